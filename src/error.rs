use thiserror::Error;

/// Everything that can go wrong while decoding a transaction or a BHASH payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Malformed transaction at byte {offset}: {reason}")]
    MalformedTransaction { offset: usize, reason: &'static str },
    #[error("Truncated OP_RETURN script: push declares {declared} bytes, {available} available")]
    TruncatedScript { declared: usize, available: usize },
    #[error("Truncated OP_RETURN script: {width}-byte push length field, {available} bytes available")]
    TruncatedPushLength { width: usize, available: usize },
    #[error("Invalid magic byte 0x{found:02x}, expected 0x91")]
    InvalidMagic { found: u8 },
    #[error("Truncated BHASH payload: {len} bytes, need at least 40")]
    TruncatedPayload { len: usize },
}

impl DecodeError {
    /// Fatal errors stop a scan; the rest only disqualify a single output.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DecodeError::InvalidHex(_) | DecodeError::MalformedTransaction { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(DecodeError::InvalidHex(hex::FromHexError::OddLength).is_fatal());
        assert!(
            DecodeError::MalformedTransaction {
                offset: 4,
                reason: "input count"
            }
            .is_fatal()
        );
        assert!(!DecodeError::InvalidMagic { found: 0x6a }.is_fatal());
        assert!(!DecodeError::TruncatedPayload { len: 3 }.is_fatal());
        assert!(
            !DecodeError::TruncatedPushLength {
                width: 2,
                available: 1
            }
            .is_fatal()
        );
        assert!(
            !DecodeError::TruncatedScript {
                declared: 40,
                available: 2
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_messages_carry_context() {
        let err = DecodeError::MalformedTransaction {
            offset: 37,
            reason: "script length exceeds buffer",
        };
        assert_eq!(
            err.to_string(),
            "Malformed transaction at byte 37: script length exceeds buffer"
        );
        assert_eq!(
            DecodeError::InvalidMagic { found: 0x6a }.to_string(),
            "Invalid magic byte 0x6a, expected 0x91"
        );
    }
}
