use std::fmt;

use crate::scanner::{BhashRecord, ScanReport};

const RULE_WIDTH: usize = 60;

impl fmt::Display for BhashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let envelope = &self.envelope;

        writeln!(f, "{rule}")?;
        match self.output_index {
            Some(index) => writeln!(f, "BHASH OP_RETURN found in output #{index}")?,
            None => writeln!(f, "BHASH payload")?,
        }
        writeln!(f, "{rule}")?;
        writeln!(f, "MAGIC_NUMBER : 0x{:02x} (BHASH protocol)", envelope.magic)?;
        writeln!(
            f,
            "CONTENT_TYPE : {} (0x{:02x})",
            envelope.content_type, envelope.content_type
        )?;
        writeln!(f, "BLOCK_HEIGHT : {}", envelope.block_height)?;
        writeln!(f, "ASSET_TYPE   : {}", envelope.asset_type)?;
        writeln!(f, "BET_DATA     : {:?}", self.bet_table.amounts())?;

        if self.summary.is_empty() {
            writeln!(f, "BET_DICT     : No bets")?;
            writeln!(f, "TOTAL BETS   : 0 bets")?;
        } else {
            let dict = self
                .summary
                .bets
                .iter()
                .map(|(label, amount)| format!("'{label}': {amount}"))
                .collect::<Vec<_>>()
                .join(", ");
            let details = self
                .summary
                .bets
                .iter()
                .map(|(label, amount)| format!("{label}:{amount}"))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "BET_DICT     : {{{dict}}}")?;
            writeln!(f, "TOTAL BETS   : {} bets", self.summary.total)?;
            writeln!(f, "BET DETAILS  : {details}")?;
        }
        write!(f, "{rule}")
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No BHASH OP_RETURN (MAGIC=0x91) found in this transaction.");
        }
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}

/// Pretty JSON for anything the scanner produces.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
