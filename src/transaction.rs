use std::fmt::Display;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

/// A signed movement on an account's ledger. Deposits are positive,
/// withdrawals negative.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerEntry {
    pub at: DateTime<Local>,
    pub amount: Decimal,
}

impl LedgerEntry {
    pub fn new(at: DateTime<Local>, amount: Decimal) -> Self {
        LedgerEntry { at, amount }
    }

    /// Entries are labelled by sign, so a zero withdrawal reads as a deposit.
    pub fn kind(&self) -> TransactionKind {
        if self.amount < Decimal::ZERO {
            TransactionKind::Withdrawal
        } else {
            TransactionKind::Deposit
        }
    }
}

impl Display for LedgerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}, Time: {}",
            self.kind(),
            self.amount.abs(),
            self.at.format(TIMESTAMP_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_follows_sign() {
        let now = Local::now();
        assert_eq!(
            LedgerEntry::new(now, Decimal::new(100, 0)).kind(),
            TransactionKind::Deposit
        );
        assert_eq!(
            LedgerEntry::new(now, Decimal::new(-30, 0)).kind(),
            TransactionKind::Withdrawal
        );
        assert_eq!(
            LedgerEntry::new(now, -Decimal::ZERO).kind(),
            TransactionKind::Deposit
        );
    }

    #[test]
    fn test_entry_display() {
        let at = Local::now();
        let entry = LedgerEntry::new(at, Decimal::new(-3050, 2));
        assert_eq!(
            entry.to_string(),
            format!("Withdrawal: 30.50, Time: {}", at.format(TIMESTAMP_FORMAT))
        );
    }
}
