//! Minimal wire-format transaction parser.
//!
//! Walks a serialized transaction just far enough to enumerate its outputs.
//! Inputs and witness stacks are consumed and discarded; every length prefix is
//! bounds-checked so truncated or padded buffers fail with the byte offset
//! at which parsing stopped.

use log::debug;

use crate::error::DecodeError;

const SEGWIT_MARKER: u8 = 0x00;
const SEGWIT_FLAG: u8 = 0x01;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    pub value: u64, // satoshis
    pub script_pubkey: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTransaction {
    pub version: u32,
    pub segwit: bool,
    pub input_count: usize,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

/// Read position over a borrowed transaction buffer.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn malformed(&self, reason: &'static str) -> DecodeError {
        DecodeError::MalformedTransaction {
            offset: self.pos,
            reason,
        }
    }

    fn take(&mut self, len: usize, reason: &'static str) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(self.malformed(reason));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn skip(&mut self, len: usize, reason: &'static str) -> Result<(), DecodeError> {
        self.take(len, reason).map(|_| ())
    }

    fn peek_pair(&self) -> Option<(u8, u8)> {
        match self.bytes.get(self.pos..self.pos + 2) {
            Some(&[a, b]) => Some((a, b)),
            _ => None,
        }
    }

    fn read_u32_le(&mut self, reason: &'static str) -> Result<u32, DecodeError> {
        let raw = self.take(4, reason)?;
        Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    fn read_u64_le(&mut self, reason: &'static str) -> Result<u64, DecodeError> {
        let raw = self.take(8, reason)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(raw);
        Ok(u64::from_le_bytes(buf))
    }

    /// Bitcoin compact-size integer: one byte below 0xfd, otherwise a
    /// 0xfd/0xfe/0xff prefix followed by a 2/4/8 byte little-endian value.
    fn read_compact_size(&mut self, reason: &'static str) -> Result<u64, DecodeError> {
        let first = self.take(1, reason)?[0];
        let value = match first {
            0..=0xfc => u64::from(first),
            0xfd => {
                let raw = self.take(2, reason)?;
                u64::from(u16::from_le_bytes([raw[0], raw[1]]))
            }
            0xfe => u64::from(self.read_u32_le(reason)?),
            0xff => self.read_u64_le(reason)?,
        };
        Ok(value)
    }

    /// Compact-size used as a byte length or element count; values that cannot
    /// fit the remaining buffer are rejected before anything is allocated.
    fn read_len(&mut self, reason: &'static str) -> Result<usize, DecodeError> {
        let start = self.pos;
        let value = self.read_compact_size(reason)?;
        usize::try_from(value)
            .ok()
            .filter(|len| *len <= self.remaining())
            .ok_or(DecodeError::MalformedTransaction {
                offset: start,
                reason,
            })
    }
}

/// Parses a serialized transaction (legacy or BIP144 SegWit) and returns its
/// outputs in wire order.
pub fn decode_transaction(bytes: &[u8]) -> Result<ParsedTransaction, DecodeError> {
    let mut cursor = Cursor::new(bytes);

    let version = cursor.read_u32_le("version truncated")?;

    let segwit = cursor.peek_pair() == Some((SEGWIT_MARKER, SEGWIT_FLAG));
    if segwit {
        cursor.skip(2, "segwit marker truncated")?;
    }

    // Every input occupies at least 41 bytes, so a count larger than the
    // remaining buffer can never be satisfied.
    let input_count = cursor.read_len("input count exceeds buffer")?;
    for _ in 0..input_count {
        cursor.skip(32, "previous txid truncated")?;
        cursor.skip(4, "previous output index truncated")?;
        let script_len = cursor.read_len("script_sig length exceeds buffer")?;
        cursor.skip(script_len, "script_sig truncated")?;
        cursor.skip(4, "sequence truncated")?;
    }

    let output_count = cursor.read_len("output count exceeds buffer")?;
    let mut outputs = Vec::with_capacity(output_count);
    for _ in 0..output_count {
        let value = cursor.read_u64_le("output value truncated")?;
        let script_len = cursor.read_len("script_pubkey length exceeds buffer")?;
        let script_pubkey = cursor.take(script_len, "script_pubkey truncated")?.to_vec();
        outputs.push(TxOutput {
            value,
            script_pubkey,
        });
    }

    if segwit {
        for _ in 0..input_count {
            let items = cursor.read_len("witness item count exceeds buffer")?;
            for _ in 0..items {
                let item_len = cursor.read_len("witness item length exceeds buffer")?;
                cursor.skip(item_len, "witness item truncated")?;
            }
        }
    }

    let lock_time = cursor.read_u32_le("locktime truncated")?;

    if cursor.remaining() != 0 {
        return Err(cursor.malformed("unconsumed trailing bytes"));
    }

    debug!(
        "Parsed transaction: version={} segwit={} inputs={} outputs={}",
        version,
        segwit,
        input_count,
        outputs.len()
    );

    Ok(ParsedTransaction {
        version,
        segwit,
        input_count,
        outputs,
        lock_time,
    })
}
