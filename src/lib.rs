//! Decoder for BHASH envelopes carried in Bitcoin OP_RETURN outputs.

pub mod bets;
pub mod codec;
pub mod envelope;
pub mod error;
pub mod mempool;
pub mod report;
pub mod scanner;
pub mod script;
pub mod settings;
pub mod tx;

pub use bets::{BetSummary, BetTable};
pub use envelope::{AssetType, BhashEnvelope};
pub use error::DecodeError;
pub use scanner::{
    decode_payload, decode_payload_hex, scan_transaction, scan_transaction_hex, BhashRecord,
    OutputFailure, ScanReport,
};
