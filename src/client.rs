use std::fmt::Display;

use crate::{
    account::{Account, AccountNumber},
    address::Address,
};

#[derive(Clone, Debug)]
pub struct Client {
    pub tax_id: String,
    pub name: String,
    pub birth_date: String,
    pub address: Address,
    accounts: Vec<Account>,
    withdrawal_count: u32,
}

impl Client {
    pub fn new(
        tax_id: impl Into<String>,
        name: impl Into<String>,
        birth_date: impl Into<String>,
        address: Address,
    ) -> Self {
        Client {
            tax_id: tax_id.into(),
            name: name.into(),
            birth_date: birth_date.into(),
            address,
            accounts: Vec::new(),
            withdrawal_count: 0,
        }
    }

    pub fn add_account(&mut self, account: Account) -> &Account {
        self.accounts.push(account);
        &self.accounts[self.accounts.len() - 1]
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|account| account.number == number)
    }

    pub fn account_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.number == number)
    }

    /// Never incremented; kept for the withdrawal-limit check.
    pub fn withdrawal_count(&self) -> u32 {
        self.withdrawal_count
    }
}

impl Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (tax ID {}), born {}, {}",
            self.name, self.tax_id, self.birth_date, self.address
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = Client::new("111", "Ana", "01-01-1990", Address::default());
        assert_eq!(client.tax_id, "111");
        assert_eq!(client.accounts().count(), 0);
        assert_eq!(client.withdrawal_count(), 0);
    }

    #[test]
    fn test_client_display() {
        let address = Address {
            street: "Main St".to_string(),
            number: "10".to_string(),
            district: "Center".to_string(),
            city: "Springfield".to_string(),
            state: "SP".to_string(),
            ..Address::default()
        };
        let client = Client::new("111", "Ana", "01-01-1990", address);
        assert_eq!(
            client.to_string(),
            "Ana (tax ID 111), born 01-01-1990, Main St, 10 - Center, Springfield/SP"
        );
    }

    #[test]
    fn test_add_and_find_accounts() {
        let mut client = Client::new("111", "Ana", "01-01-1990", Address::default());
        assert_eq!(client.add_account(Account::new(3, "111")).number, 3);
        assert_eq!(client.add_account(Account::new(7, "111")).number, 7);
        assert_eq!(client.accounts().map(|a| a.number).collect::<Vec<_>>(), vec![3, 7]);
        assert_eq!(client.account(7).map(|a| a.number), Some(7));
        assert!(client.account(4).is_none());
        assert!(client.account_mut(3).is_some());
    }
}
