//! Wire encoding for the daemon command protocol.
//!
//! The daemon expects the command as ASCII decimal text with no
//! terminator; the client half-closing its write side marks the end of
//! the request. The reply is an unframed byte stream, decoded as UTF-8
//! once the daemon closes the connection.

use super::client::ClientError;

/// Serialize a command value to its wire form.
pub fn encode_command(command: i64) -> String {
    command.to_string()
}

/// Decode an accumulated reply as UTF-8 text.
///
/// The daemon's reply framing carries no encoding marker; anything that
/// is not valid UTF-8 is unusable and reported as [`ClientError::DecodeFailed`].
pub fn decode_response(bytes: Vec<u8>) -> Result<String, ClientError> {
    String::from_utf8(bytes).map_err(|e| ClientError::DecodeFailed(e.utf8_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_is_plain_decimal() {
        assert_eq!(encode_command(0), "0");
        assert_eq!(encode_command(42), "42");
        assert_eq!(encode_command(-7), "-7");
        assert_eq!(encode_command(i64::MAX), "9223372036854775807");
    }

    #[test]
    fn test_decode_valid_utf8() {
        let text = decode_response(b"plugged in".to_vec()).unwrap();
        assert_eq!(text, "plugged in");
    }

    #[test]
    fn test_decode_empty_reply() {
        // A daemon that closes without writing produced an empty reply,
        // which is still a successful (if vacuous) response.
        assert_eq!(decode_response(Vec::new()).unwrap(), "");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let err = decode_response(vec![0xff, 0xfe, 0xfd]).unwrap_err();
        assert!(matches!(err, ClientError::DecodeFailed(_)));
    }
}
