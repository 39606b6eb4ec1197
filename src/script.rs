use bitcoin::opcodes::all::{OP_PUSHBYTES_75, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4, OP_RETURN};
use log::debug;

use crate::error::DecodeError;

/// Returns the data pushed right after `OP_RETURN`, or `None` when the script
/// is not a null-data output carrying a push.
///
/// Bytes beyond the declared push length are ignored.
pub fn extract_op_return_payload(script: &[u8]) -> Result<Option<&[u8]>, DecodeError> {
    let Some((&first, rest)) = script.split_first() else {
        return Ok(None);
    };
    if first != OP_RETURN.to_u8() {
        return Ok(None);
    }
    let Some((&push, rest)) = rest.split_first() else {
        debug!("Bare OP_RETURN without a push, skipping");
        return Ok(None);
    };

    let (declared, data) = match push {
        op if op <= OP_PUSHBYTES_75.to_u8() => (usize::from(op), rest),
        op if op == OP_PUSHDATA1.to_u8() => read_push_len::<1>(rest)?,
        op if op == OP_PUSHDATA2.to_u8() => read_push_len::<2>(rest)?,
        op if op == OP_PUSHDATA4.to_u8() => read_push_len::<4>(rest)?,
        op => {
            debug!("OP_RETURN followed by non-push opcode 0x{:02x}, skipping", op);
            return Ok(None);
        }
    };

    if data.len() < declared {
        return Err(DecodeError::TruncatedScript {
            declared,
            available: data.len(),
        });
    }
    Ok(Some(&data[..declared]))
}

/// Reads an `N`-byte little-endian push length following an `OP_PUSHDATA*` opcode.
fn read_push_len<const N: usize>(rest: &[u8]) -> Result<(usize, &[u8]), DecodeError> {
    if rest.len() < N {
        return Err(DecodeError::TruncatedPushLength {
            width: N,
            available: rest.len(),
        });
    }
    let (len_bytes, data) = rest.split_at(N);
    let declared = len_bytes
        .iter()
        .rev()
        .fold(0usize, |acc, b| (acc << 8) | usize::from(*b));
    Ok((declared, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::{script::PushBytesBuf, ScriptBuf};

    fn op_return_script(data: Vec<u8>) -> ScriptBuf {
        let buf = PushBytesBuf::try_from(data).unwrap();
        ScriptBuf::new_op_return(&buf)
    }

    #[test]
    fn test_direct_push() {
        let script = op_return_script(vec![0x91; 40]);
        assert_eq!(script.as_bytes()[1], 0x28);
        let payload = extract_op_return_payload(script.as_bytes()).unwrap();
        assert_eq!(payload, Some(&[0x91u8; 40][..]));
    }

    #[test]
    fn test_pushdata1_payload() {
        let script = op_return_script(vec![0x91; 80]);
        assert_eq!(&script.as_bytes()[..3], &[0x6a, 0x4c, 80]);
        let payload = extract_op_return_payload(script.as_bytes()).unwrap().unwrap();
        assert_eq!(payload.len(), 80);
    }

    #[test]
    fn test_pushdata2_with_trailing_opcode() {
        let mut script = vec![0x6a, 0x4d, 0x03, 0x00, 0xaa, 0xbb, 0xcc];
        script.push(0x51);
        let payload = extract_op_return_payload(&script).unwrap();
        assert_eq!(payload, Some(&[0xaa, 0xbb, 0xcc][..]));
    }

    #[test]
    fn test_pushdata4_payload() {
        let script = [0x6a, 0x4e, 0x02, 0x00, 0x00, 0x00, 0x91, 0x01];
        let payload = extract_op_return_payload(&script).unwrap();
        assert_eq!(payload, Some(&[0x91, 0x01][..]));
    }

    #[test]
    fn test_empty_push_is_a_candidate() {
        assert_eq!(extract_op_return_payload(&[0x6a, 0x00]).unwrap(), Some(&[0u8; 0][..]));
    }

    #[test]
    fn test_non_op_return_is_skipped() {
        let p2wpkh = hex::decode("001485d78eb795bd9c8a21afefc8b6fdaedf71836809").unwrap();
        assert_eq!(extract_op_return_payload(&p2wpkh).unwrap(), None);
        assert_eq!(extract_op_return_payload(&[]).unwrap(), None);
        assert_eq!(extract_op_return_payload(&[0x6a]).unwrap(), None);
        assert_eq!(extract_op_return_payload(&[0x6a, 0x51]).unwrap(), None);
    }

    #[test]
    fn test_truncated_push() {
        let err = extract_op_return_payload(&[0x6a, 0x28, 0x91, 0x01]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedScript {
                declared: 40,
                available: 2
            }
        );

        let err = extract_op_return_payload(&[0x6a, 0x4c, 0xff, 0x91]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedScript {
                declared: 255,
                available: 1
            }
        );
    }

    #[test]
    fn test_truncated_push_length_field() {
        let err = extract_op_return_payload(&[0x6a, 0x4c]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedPushLength {
                width: 1,
                available: 0
            }
        );
        assert_eq!(
            err.to_string(),
            "Truncated OP_RETURN script: 1-byte push length field, 0 bytes available"
        );

        let err = extract_op_return_payload(&[0x6a, 0x4d, 0x01]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedPushLength {
                width: 2,
                available: 1
            }
        );
    }
}
