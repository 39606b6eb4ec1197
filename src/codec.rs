use crate::error::DecodeError;

/// Decodes a hex string into bytes. Every character must be a hex digit;
/// callers trim surrounding whitespace themselves.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(hex::decode(input)?)
}

/// Lowercase hex encoding, the inverse of [`decode_hex`].
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_encode_inverse() {
        let samples: [&[u8]; 4] = [&[], &[0x00], &[0x91, 0x01, 0xff], &[0xde, 0xad, 0xbe, 0xef, 0x6a]];
        for bytes in samples {
            assert_eq!(decode_hex(&encode_hex(bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn test_decode_accepts_mixed_case() {
        assert_eq!(decode_hex("6A28fF").unwrap(), vec![0x6a, 0x28, 0xff]);
    }

    #[test]
    fn test_whitespace_is_invalid() {
        assert!(matches!(decode_hex("6a 28").unwrap_err(), DecodeError::InvalidHex(_)));
        assert_eq!(
            decode_hex("6a 028").unwrap_err(),
            DecodeError::InvalidHex(hex::FromHexError::InvalidHexCharacter { c: ' ', index: 2 })
        );
        assert_eq!(
            decode_hex("9 1").unwrap_err(),
            DecodeError::InvalidHex(hex::FromHexError::OddLength)
        );
    }

    #[test]
    fn test_error_index_points_into_caller_input() {
        let err = decode_hex("6a2z").unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidHex(hex::FromHexError::InvalidHexCharacter { c: 'z', index: 3 })
        );
    }

    #[test]
    fn test_odd_length_is_invalid() {
        let err = decode_hex("910").unwrap_err();
        assert_eq!(err, DecodeError::InvalidHex(hex::FromHexError::OddLength));
    }

    #[test]
    fn test_non_hex_character_is_invalid() {
        let err = decode_hex("invalidhex").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidHex(hex::FromHexError::InvalidHexCharacter { c: 'i', index: 0 })
        ));
    }
}
