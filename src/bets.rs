use std::collections::BTreeMap;

use serde::Serialize;

pub const BET_SLOTS: usize = 16;
pub const BET_DATA_LEN: usize = BET_SLOTS * 2;

/// Sixteen bet amounts, one per hexadecimal digit `0`..=`f`, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BetTable([u16; BET_SLOTS]);

/// Non-zero bets keyed by their digit label, plus the sum over all sixteen slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BetSummary {
    pub bets: BTreeMap<char, u16>,
    pub total: u32,
}

/// Label for slot `index`: `'0'..='9'` then `'a'..='f'`.
pub fn bet_label(index: usize) -> char {
    debug_assert!(index < BET_SLOTS);
    char::from_digit(index as u32, 16).unwrap_or('?')
}

impl BetTable {
    /// Splits the 32-byte bet segment into little-endian `u16` amounts.
    pub fn from_bytes(data: &[u8; BET_DATA_LEN]) -> Self {
        let mut amounts = [0u16; BET_SLOTS];
        for (slot, pair) in amounts.iter_mut().zip(data.chunks_exact(2)) {
            *slot = u16::from_le_bytes([pair[0], pair[1]]);
        }
        Self(amounts)
    }

    pub fn amounts(&self) -> &[u16; BET_SLOTS] {
        &self.0
    }

    pub fn get(&self, label: char) -> Option<u16> {
        let index = label.to_digit(16)? as usize;
        self.0.get(index).copied()
    }

    /// `(label, amount)` pairs in slot order, zeros included.
    pub fn entries(&self) -> impl Iterator<Item = (char, u16)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, amount)| (bet_label(index), *amount))
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|amount| u32::from(*amount)).sum()
    }

    pub fn summary(&self) -> BetSummary {
        BetSummary {
            bets: self.entries().filter(|(_, amount)| *amount > 0).collect(),
            total: self.total(),
        }
    }
}

impl BetSummary {
    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }
}
