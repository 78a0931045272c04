use std::fmt::Display;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use tracing::warn;

use crate::transaction::{TIMESTAMP_FORMAT, TransactionKind};

/// Capacity of an account's history. There is no day rollover, so this is a
/// lifetime cap.
pub const LIMIT_DAILY_TRANSACTIONS: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub at: DateTime<Local>,
}

#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        History {
            entries: Vec::new(),
        }
    }

    /// Appends the entry unless the history is full. Returns whether it was
    /// stored; a full history never evicts older entries.
    pub fn register(&mut self, kind: TransactionKind, amount: Decimal, at: DateTime<Local>) -> bool {
        if self.entries.len() >= LIMIT_DAILY_TRANSACTIONS {
            warn!(
                limit = LIMIT_DAILY_TRANSACTIONS,
                %kind,
                %amount,
                "maximum number of transactions reached, entry dropped"
            );
            return false;
        }
        self.entries.push(HistoryEntry { kind, amount, at });
        true
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Transaction history:")?;
        for entry in &self.entries {
            writeln!(
                f,
                "Type: {}, Amount: {}, Time: {}",
                entry.kind,
                entry.amount,
                entry.at.format(TIMESTAMP_FORMAT)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_register_in_order() {
        let mut history = History::new();
        let now = Local::now();
        assert!(history.register(TransactionKind::Deposit, Decimal::new(100, 0), now));
        assert!(history.register(TransactionKind::Withdrawal, Decimal::new(30, 0), now));
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].kind, TransactionKind::Deposit);
        assert_eq!(history.entries()[1].kind, TransactionKind::Withdrawal);
        assert_eq!(history.entries()[1].amount, Decimal::new(30, 0));
    }

    #[test]
    fn test_history_rejects_when_full() {
        let mut history = History::new();
        let now = Local::now();
        for i in 0..LIMIT_DAILY_TRANSACTIONS {
            assert!(history.register(TransactionKind::Deposit, Decimal::from(i as u64 + 1), now));
        }
        assert!(!history.register(TransactionKind::Deposit, Decimal::new(999, 0), now));
        assert_eq!(history.len(), LIMIT_DAILY_TRANSACTIONS);
        // oldest entry is kept
        assert_eq!(history.entries()[0].amount, Decimal::ONE);
        assert!(history.entries().iter().all(|e| e.amount != Decimal::new(999, 0)));
    }

    #[test]
    fn test_history_display() {
        let mut history = History::new();
        assert_eq!(history.to_string(), "Transaction history:\n");
        let at = Local::now();
        history.register(TransactionKind::Deposit, Decimal::new(1050, 2), at);
        assert_eq!(
            history.to_string(),
            format!(
                "Transaction history:\nType: Deposit, Amount: 10.50, Time: {}\n",
                at.format(TIMESTAMP_FORMAT)
            )
        );
    }
}
