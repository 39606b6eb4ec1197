use std::fmt;

use log::debug;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::bets::{BetTable, BET_DATA_LEN};
use crate::error::DecodeError;

pub const BHASH_MAGIC: u8 = 0x91;
/// magic(1) | content_type(1) | block_height(4, BE) | asset_type(2, BE) | bet_data(32)
pub const ENVELOPE_LEN: usize = 40;

const BLOCK_HEIGHT_OFFSET: usize = 2;
const ASSET_TYPE_OFFSET: usize = 6;
const BET_DATA_OFFSET: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
    Bitcoin,
    SatoshiNet,
    Bhash,
    Reserved(u16),
}

impl AssetType {
    pub fn from_u16(code: u16) -> Self {
        match code {
            0x0000 => AssetType::Bitcoin,
            0x0001 => AssetType::SatoshiNet,
            0x0002 => AssetType::Bhash,
            other => AssetType::Reserved(other),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            AssetType::Bitcoin => 0x0000,
            AssetType::SatoshiNet => 0x0001,
            AssetType::Bhash => 0x0002,
            AssetType::Reserved(code) => *code,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssetType::Bitcoin => "BTC (Bitcoin)",
            AssetType::SatoshiNet => "BTC (Bitcoin - Satoshinet)",
            AssetType::Bhash => "BHASH (BHASH Protocol Asset Type)",
            AssetType::Reserved(_) => "Reserved Extension",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Reserved(code) => write!(f, "{} (0x{:04x})", self.name(), code),
            _ => write!(f, "{}", self.name()),
        }
    }
}

impl Serialize for AssetType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AssetType", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("name", self.name())?;
        state.end()
    }
}

/// Fixed-layout BHASH payload carried in an OP_RETURN push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BhashEnvelope {
    pub magic: u8,
    pub content_type: u8,
    pub block_height: u32,
    pub asset_type: AssetType,
    pub bet_data: [u8; BET_DATA_LEN],
    /// Payload bytes past the fixed layout; not interpreted.
    pub trailing_len: usize,
}

impl BhashEnvelope {
    pub fn bet_table(&self) -> BetTable {
        BetTable::from_bytes(&self.bet_data)
    }
}

/// Single bytes are written as `0x`-prefixed hex next to their numeric value.
impl Serialize for BhashEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BhashEnvelope", 7)?;
        state.serialize_field("magic", &format!("0x{:02x}", self.magic))?;
        state.serialize_field("content_type", &self.content_type)?;
        state.serialize_field("content_type_hex", &format!("0x{:02x}", self.content_type))?;
        state.serialize_field("block_height", &self.block_height)?;
        state.serialize_field("asset_type", &self.asset_type)?;
        state.serialize_field("bet_data", &hex::encode(self.bet_data))?;
        state.serialize_field("trailing_len", &self.trailing_len)?;
        state.end()
    }
}

/// Validates the magic byte and length, then decodes the fixed fields.
///
/// Only the first [`ENVELOPE_LEN`] bytes are read; longer payloads are accepted
/// and the excess is reported in `trailing_len`.
pub fn decode_envelope(payload: &[u8]) -> Result<BhashEnvelope, DecodeError> {
    let Some(&magic) = payload.first() else {
        return Err(DecodeError::TruncatedPayload { len: 0 });
    };
    if magic != BHASH_MAGIC {
        return Err(DecodeError::InvalidMagic { found: magic });
    }
    if payload.len() < ENVELOPE_LEN {
        return Err(DecodeError::TruncatedPayload { len: payload.len() });
    }

    let content_type = payload[1];
    let block_height = u32::from_be_bytes([
        payload[BLOCK_HEIGHT_OFFSET],
        payload[BLOCK_HEIGHT_OFFSET + 1],
        payload[BLOCK_HEIGHT_OFFSET + 2],
        payload[BLOCK_HEIGHT_OFFSET + 3],
    ]);
    let asset_code = u16::from_be_bytes([payload[ASSET_TYPE_OFFSET], payload[ASSET_TYPE_OFFSET + 1]]);

    let mut bet_data = [0u8; BET_DATA_LEN];
    bet_data.copy_from_slice(&payload[BET_DATA_OFFSET..ENVELOPE_LEN]);

    let envelope = BhashEnvelope {
        magic,
        content_type,
        block_height,
        asset_type: AssetType::from_u16(asset_code),
        bet_data,
        trailing_len: payload.len() - ENVELOPE_LEN,
    };
    debug!(
        "Decoded BHASH envelope: content_type={} block_height={} asset_type={}",
        envelope.content_type, envelope.block_height, envelope.asset_type
    );
    Ok(envelope)
}
