use log::{debug, info, warn};
use serde::Serialize;

use crate::bets::{BetSummary, BetTable};
use crate::codec::decode_hex;
use crate::envelope::{decode_envelope, BhashEnvelope};
use crate::error::DecodeError;
use crate::script::extract_op_return_payload;
use crate::tx::{decode_transaction, TxOutput};

/// One decoded BHASH envelope with its bet table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BhashRecord {
    /// Position of the carrying output, `None` when the payload was decoded directly.
    pub output_index: Option<usize>,
    pub envelope: BhashEnvelope,
    pub bet_table: BetTable,
    pub summary: BetSummary,
}

/// An OP_RETURN output that could not be decoded as BHASH.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputFailure {
    pub output_index: usize,
    #[serde(serialize_with = "serialize_display")]
    pub error: DecodeError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    pub output_count: usize,
    pub records: Vec<BhashRecord>,
    pub failures: Vec<OutputFailure>,
}

impl ScanReport {
    /// True when no output carried a valid BHASH envelope.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn serialize_display<S: serde::Serializer>(
    error: &DecodeError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl BhashRecord {
    fn new(output_index: Option<usize>, envelope: BhashEnvelope) -> Self {
        let bet_table = envelope.bet_table();
        let summary = bet_table.summary();
        Self {
            output_index,
            envelope,
            bet_table,
            summary,
        }
    }
}

/// Decodes a candidate OP_RETURN payload that has already been extracted.
pub fn decode_payload(payload: &[u8]) -> Result<BhashRecord, DecodeError> {
    let envelope = decode_envelope(payload)?;
    Ok(BhashRecord::new(None, envelope))
}

pub fn decode_payload_hex(payload_hex: &str) -> Result<BhashRecord, DecodeError> {
    decode_payload(&decode_hex(payload_hex)?)
}

/// Runs one output through extraction and envelope decoding.
///
/// `Ok(None)` means the output is not a null-data output at all.
pub fn decode_output(
    output_index: usize,
    output: &TxOutput,
) -> Result<Option<BhashRecord>, DecodeError> {
    let Some(payload) = extract_op_return_payload(&output.script_pubkey)? else {
        return Ok(None);
    };
    let envelope = decode_envelope(payload)?;
    Ok(Some(BhashRecord::new(Some(output_index), envelope)))
}

/// Scans every output of a raw transaction and reports all BHASH envelopes.
///
/// Only a structurally malformed transaction is fatal; per-output failures are
/// collected in [`ScanReport::failures`] and scanning continues.
pub fn scan_transaction(bytes: &[u8]) -> Result<ScanReport, DecodeError> {
    let tx = decode_transaction(bytes)?;
    let mut report = ScanReport {
        output_count: tx.outputs.len(),
        ..ScanReport::default()
    };

    for (index, output) in tx.outputs.iter().enumerate() {
        match decode_output(index, output) {
            Ok(Some(record)) => {
                info!(
                    "BHASH OP_RETURN found in output #{} (block height {})",
                    index, record.envelope.block_height
                );
                report.records.push(record);
            }
            Ok(None) => debug!("Output #{} is not an OP_RETURN output", index),
            Err(error) => {
                warn!("Skipping output #{}: {}", index, error);
                report.failures.push(OutputFailure {
                    output_index: index,
                    error,
                });
            }
        }
    }

    Ok(report)
}

pub fn scan_transaction_hex(tx_hex: &str) -> Result<ScanReport, DecodeError> {
    scan_transaction(&decode_hex(tx_hex)?)
}
