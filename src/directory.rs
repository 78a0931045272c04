use tracing::{debug, warn};

use crate::{
    account::{Account, AccountNumber},
    client::Client,
    error::LedgerError,
};

/// Registry of every client known to the running session. Tax ids are not
/// unique; lookups return the first registered match.
pub struct Directory {
    clients: Vec<Client>,
    next_account_number: AccountNumber,
}

impl Directory {
    pub fn new() -> Self {
        Directory {
            clients: Vec::new(),
            next_account_number: 1,
        }
    }

    pub fn register_client(&mut self, client: Client) -> &Client {
        debug!(tax_id = %client.tax_id, "client registered");
        self.clients.push(client);
        &self.clients[self.clients.len() - 1]
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn find_client(&self, tax_id: &str) -> Option<&Client> {
        self.clients.iter().find(|client| client.tax_id == tax_id)
    }

    pub fn find_client_mut(&mut self, tax_id: &str) -> Option<&mut Client> {
        self.clients.iter_mut().find(|client| client.tax_id == tax_id)
    }

    pub fn find_account(&self, tax_id: &str, number: AccountNumber) -> Option<&Account> {
        self.find_client(tax_id)?.account(number)
    }

    pub fn find_account_mut(&mut self, tax_id: &str, number: AccountNumber) -> Option<&mut Account> {
        self.find_client_mut(tax_id)?.account_mut(number)
    }

    pub fn open_account(&mut self, tax_id: &str) -> Result<&Account, LedgerError> {
        let number = self.next_account_number;
        let Some(client) = self.clients.iter_mut().find(|client| client.tax_id == tax_id) else {
            warn!(tax_id, "cannot open account for unknown client");
            return Err(LedgerError::ClientNotFound(tax_id.to_string()));
        };
        self.next_account_number += 1;
        debug!(tax_id, number, "account opened");
        Ok(client.add_account(Account::new(number, tax_id)))
    }

    /// Every account paired with its holder, in registration order.
    pub fn accounts(&self) -> impl Iterator<Item = (&Client, &Account)> {
        self.clients
            .iter()
            .flat_map(|client| client.accounts().map(move |account| (client, account)))
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::address::Address;

    fn client(tax_id: &str, name: &str) -> Client {
        Client::new(tax_id, name, "01-01-1990", Address::default())
    }

    #[test]
    fn test_directory_creation() {
        let directory = Directory::new();
        assert!(directory.clients().is_empty());
        assert_eq!(directory.accounts().count(), 0);
    }

    #[test]
    fn test_open_account_requires_client() {
        let mut directory = Directory::new();
        assert_eq!(
            directory.open_account("999").err(),
            Some(LedgerError::ClientNotFound("999".to_string()))
        );
        directory.register_client(client("111", "Ana"));
        assert_eq!(directory.open_account("111").map(|a| a.number), Ok(1));
    }

    #[test]
    fn test_account_numbers_are_sequential_across_clients() {
        let mut directory = Directory::new();
        directory.register_client(client("111", "Ana"));
        directory.register_client(client("222", "Bruno"));
        assert_eq!(directory.open_account("111").unwrap().number, 1);
        assert_eq!(directory.open_account("222").unwrap().number, 2);
        // failed opens do not consume a number
        assert!(directory.open_account("333").is_err());
        assert_eq!(directory.open_account("111").unwrap().number, 3);

        let listed: Vec<_> = directory
            .accounts()
            .map(|(c, a)| (c.tax_id.as_str(), a.number))
            .collect();
        assert_eq!(listed, vec![("111", 1), ("111", 3), ("222", 2)]);
    }

    #[test]
    fn test_duplicate_tax_id_first_match_wins() {
        let mut directory = Directory::new();
        directory.register_client(client("111", "First"));
        directory.register_client(client("111", "Second"));
        assert_eq!(directory.clients().len(), 2);
        assert_eq!(directory.find_client("111").unwrap().name, "First");

        directory.open_account("111").unwrap();
        assert_eq!(directory.clients()[0].accounts().count(), 1);
        assert_eq!(directory.clients()[1].accounts().count(), 0);
    }

    #[test]
    fn test_find_account() {
        let mut directory = Directory::new();
        directory.register_client(client("111", "Ana"));
        directory.register_client(client("222", "Bruno"));
        directory.open_account("111").unwrap();
        assert!(directory.find_account("111", 1).is_some());
        assert!(directory.find_account("222", 1).is_none());
        assert!(directory.find_account("333", 1).is_none());

        let account = directory.find_account_mut("111", 1).unwrap();
        account.deposit(Decimal::new(100, 0)).unwrap();
        assert_eq!(
            directory.find_account("111", 1).unwrap().balance(),
            Decimal::new(100, 0)
        );
    }
}
