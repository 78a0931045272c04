use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Amount too large: the balance cannot hold {amount} more")]
    AmountTooLarge { amount: Decimal },

    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Insufficient balance for withdrawal (requested {requested}, balance {balance})")]
    InsufficientFunds { requested: Decimal, balance: Decimal },

    #[error("Withdrawal limit exceeded. Limit: {limit}")]
    WithdrawalLimitExceeded { limit: u32 },

    #[error("Client {0} is not registered!")]
    ClientNotFound(String),
}
