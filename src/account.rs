use std::fmt::Display;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    client::Client,
    error::LedgerError,
    history::History,
    transaction::{LedgerEntry, TransactionKind},
};

pub const BRANCH: &str = "0001";
pub const LIMIT_WITHDRAWALS: u32 = 3;

pub type AccountNumber = u32;

/// Outcome of a successful deposit or withdrawal.
#[derive(Clone, Debug, PartialEq)]
pub struct Posting {
    pub entry: LedgerEntry,
    /// False when the history was already full and the entry was dropped.
    pub history_recorded: bool,
}

#[derive(Clone, Debug)]
pub struct Account {
    pub number: AccountNumber,
    pub branch: &'static str,
    pub holder: String,
    ledger: Vec<LedgerEntry>,
    history: History,
}

impl Account {
    pub fn new(number: AccountNumber, holder: impl Into<String>) -> Self {
        Account {
            number,
            branch: BRANCH,
            holder: holder.into(),
            ledger: Vec::new(),
            history: History::new(),
        }
    }

    pub fn balance(&self) -> Decimal {
        self.ledger.iter().map(|entry| entry.amount).sum()
    }

    #[cfg(test)]
    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Posting, LedgerError> {
        self.deposit_at(amount, Local::now())
    }

    pub fn deposit_at(&mut self, amount: Decimal, at: DateTime<Local>) -> Result<Posting, LedgerError> {
        if amount <= Decimal::ZERO {
            warn!(account = self.number, %amount, "deposit rejected");
            return Err(LedgerError::NonPositiveAmount);
        }
        if self.balance().checked_add(amount).is_none() {
            warn!(account = self.number, %amount, "deposit would overflow the balance");
            return Err(LedgerError::AmountTooLarge { amount });
        }
        Ok(self.post(TransactionKind::Deposit, amount, at))
    }

    /// `owner_withdrawals` is the holder's withdrawal counter. Nothing
    /// increments it, so the limit check never trips in practice.
    pub fn withdraw(&mut self, amount: Decimal, owner_withdrawals: u32) -> Result<Posting, LedgerError> {
        self.withdraw_at(amount, owner_withdrawals, Local::now())
    }

    pub fn withdraw_at(
        &mut self,
        amount: Decimal,
        owner_withdrawals: u32,
        at: DateTime<Local>,
    ) -> Result<Posting, LedgerError> {
        if owner_withdrawals > LIMIT_WITHDRAWALS {
            warn!(account = self.number, owner_withdrawals, "withdrawal limit exceeded");
            return Err(LedgerError::WithdrawalLimitExceeded {
                limit: LIMIT_WITHDRAWALS,
            });
        }
        if amount < Decimal::ZERO {
            warn!(account = self.number, %amount, "withdrawal rejected");
            return Err(LedgerError::NegativeAmount);
        }
        let balance = self.balance();
        if amount > balance {
            warn!(account = self.number, %amount, %balance, "insufficient funds");
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                balance,
            });
        }
        Ok(self.post(TransactionKind::Withdrawal, amount, at))
    }

    fn post(&mut self, kind: TransactionKind, amount: Decimal, at: DateTime<Local>) -> Posting {
        let signed = match kind {
            TransactionKind::Deposit => amount,
            TransactionKind::Withdrawal => -amount,
        };
        let entry = LedgerEntry::new(at, signed);
        self.ledger.push(entry.clone());
        let history_recorded = self.history.register(kind, amount, at);
        debug!(account = self.number, %kind, %amount, history_recorded, "posted");
        Posting {
            entry,
            history_recorded,
        }
    }

    /// The header's tax id comes from the account itself; `holder` only
    /// supplies the display name.
    pub fn statement<'a>(&'a self, holder: &'a Client) -> Statement<'a> {
        debug_assert_eq!(holder.tax_id, self.holder);
        Statement {
            account: self,
            holder,
        }
    }
}

pub struct Statement<'a> {
    account: &'a Account,
    holder: &'a Client,
}

const RULE: &str = "==========================================";

impl Display for Statement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.account.ledger.is_empty() {
            return writeln!(f, "No movements have been made!");
        }
        writeln!(f, "{RULE}")?;
        writeln!(f, "Tax ID: {}", self.account.holder)?;
        writeln!(f, "Branch: {}", self.account.branch)?;
        writeln!(f, "Account: {}", self.account.number)?;
        writeln!(f, "Holder: {}", self.holder.name)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Statement start")?;
        for entry in &self.account.ledger {
            writeln!(f, "{entry}")?;
        }
        writeln!(f)?;
        writeln!(f, "Balance: R$ {}", self.account.balance())?;
        writeln!(f, "Statement end")?;
        writeln!(f, "{RULE}")
    }
}
