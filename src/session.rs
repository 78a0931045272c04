use std::io::{self, BufRead, Write};

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    account::{AccountNumber, Posting},
    address::Address,
    audit::AuditLog,
    client::Client,
    directory::Directory,
    error::LedgerError,
    history::LIMIT_DAILY_TRANSACTIONS,
};

const MAIN_MENU: &str = "
            Checking Account Operations

                Select an option:
                [R]egister client
                [O]pen account
                [S]elect client/account
                [L]ist accounts

                [Q]uit
        => ";

const ACCOUNT_MENU: &str = "
            Checking Account Operations

                Select an option:
                [D]eposit
                [W]ithdraw
                [S]tatement
                [T]ransactions

                [B]ack
        => ";

const RULE: &str = "==========================================";

/// Interactive menu loop. Owns the client directory for the lifetime of the
/// session; input ending is treated as quitting.
pub struct Session<R, W, A: Write> {
    directory: Directory,
    audit: AuditLog<A>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write, A: Write> Session<R, W, A> {
    pub fn new(input: R, output: W, audit: AuditLog<A>) -> Self {
        Session {
            directory: Directory::new(),
            audit,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        info!("session started");
        while let Some(option) = self.prompt(MAIN_MENU)? {
            match option.to_uppercase().as_str() {
                "R" => self.register_client()?,
                "O" => self.open_account()?,
                "S" => self.select_account()?,
                "L" => self.list_accounts()?,
                "Q" => break,
                _ => writeln!(self.output, "Invalid option!")?,
            }
        }
        info!(clients = self.directory.clients().len(), "session finished");
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn register_client(&mut self) -> io::Result<()> {
        let mut fields = Vec::with_capacity(9);
        for label in [
            "Tax ID: ",
            "Name: ",
            "Birth date (dd-mm-yyyy): ",
            "Street: ",
            "Number: ",
            "Complement: ",
            "District: ",
            "City: ",
            "State: ",
        ] {
            match self.prompt(label)? {
                Some(value) => fields.push(value),
                None => return Ok(()),
            }
        }
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        let (tax_id, name, birth_date) = (next(), next(), next());
        let address = Address {
            street: next(),
            number: next(),
            complement: next(),
            district: next(),
            city: next(),
            state: next(),
        };
        let client = self
            .directory
            .register_client(Client::new(tax_id, name, birth_date, address));
        writeln!(self.output, "Client registered successfully!")?;
        writeln!(self.output, "{client}")
    }

    fn open_account(&mut self) -> io::Result<()> {
        let Some(tax_id) = self.prompt("Client tax ID: ")? else {
            return Ok(());
        };
        let found = self
            .audit
            .record("select_client", &[&tax_id], || self.directory.find_client(&tax_id))
            .is_some();
        if !found {
            return writeln!(self.output, "Client not registered!");
        }
        let opened = self
            .audit
            .record("open_account", &[&tax_id], || self.directory.open_account(&tax_id))
            .map(|account| account.number);
        match opened {
            Ok(number) => writeln!(self.output, "Account {number} opened successfully!"),
            Err(err) => writeln!(self.output, "{err}"),
        }
    }

    fn list_accounts(&mut self) -> io::Result<()> {
        let directory = &self.directory;
        let output = &mut self.output;
        self.audit.record("list_accounts", &[], || -> io::Result<()> {
            writeln!(output, "{RULE}")?;
            writeln!(output, "Listing start")?;
            for (client, account) in directory.accounts() {
                writeln!(output)?;
                writeln!(output, "    Branch: {}", account.branch)?;
                writeln!(output, "    Account: {}", account.number)?;
                writeln!(output, "    Holder: {}", client.name)?;
                writeln!(output, "    Balance: {}", account.balance())?;
            }
            writeln!(output, "Listing end")?;
            writeln!(output, "{RULE}")
        })
    }

    fn request_account_number(&mut self) -> io::Result<Option<AccountNumber>> {
        loop {
            let Some(value) = self.prompt("Account number: ")? else {
                return Ok(None);
            };
            if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(number) = value.parse() {
                    return Ok(Some(number));
                }
            }
            writeln!(
                self.output,
                "Please enter whole numbers only for the account number."
            )?;
        }
    }

    fn select_account(&mut self) -> io::Result<()> {
        let Some(tax_id) = self.prompt("Client tax ID: ")? else {
            return Ok(());
        };
        let Some(number) = self.request_account_number()? else {
            return Ok(());
        };
        let found = self
            .audit
            .record("select_account", &[&tax_id, &number], || {
                self.directory.find_account(&tax_id, number)
            })
            .is_some();
        if !found {
            return writeln!(self.output, "Account not found!");
        }
        self.account_menu(&tax_id, number)
    }

    fn account_menu(&mut self, tax_id: &str, number: AccountNumber) -> io::Result<()> {
        debug!(tax_id, number, "account selected");
        while let Some(option) = self.prompt(ACCOUNT_MENU)? {
            match option.to_uppercase().as_str() {
                "D" => self.deposit(tax_id, number)?,
                "W" => self.withdraw(tax_id, number)?,
                "S" => self.statement(tax_id, number)?,
                "T" => self.transactions(tax_id, number)?,
                "B" => break,
                _ => writeln!(self.output, "Invalid option!")?,
            }
        }
        Ok(())
    }

    fn request_amount(&mut self, label: &str) -> io::Result<Option<Decimal>> {
        let Some(value) = self.prompt(label)? else {
            return Ok(None);
        };
        match value.parse::<Decimal>() {
            Ok(amount) => Ok(Some(amount)),
            Err(_) => {
                writeln!(self.output, "Invalid amount!")?;
                Ok(None)
            }
        }
    }

    fn deposit(&mut self, tax_id: &str, number: AccountNumber) -> io::Result<()> {
        let Some(amount) = self.request_amount("Deposit amount: ")? else {
            return Ok(());
        };
        let outcome = self
            .audit
            .record("deposit", &[&tax_id, &number, &amount], || {
                self.directory
                    .find_account_mut(tax_id, number)
                    .map(|account| account.deposit(amount))
            });
        self.report("Deposit", outcome)
    }

    fn withdraw(&mut self, tax_id: &str, number: AccountNumber) -> io::Result<()> {
        let Some(amount) = self.request_amount("Withdrawal amount: ")? else {
            return Ok(());
        };
        let outcome = self
            .audit
            .record("withdraw", &[&tax_id, &number, &amount], || -> Option<Result<Posting, LedgerError>> {
                let client = self.directory.find_client_mut(tax_id)?;
                let withdrawals = client.withdrawal_count();
                Some(client.account_mut(number)?.withdraw(amount, withdrawals))
            });
        self.report("Withdrawal", outcome)
    }

    fn report(
        &mut self,
        operation: &str,
        outcome: Option<Result<Posting, LedgerError>>,
    ) -> io::Result<()> {
        match outcome {
            Some(Ok(posting)) => {
                if !posting.history_recorded {
                    writeln!(
                        self.output,
                        "Maximum number of transactions reached (max {LIMIT_DAILY_TRANSACTIONS})"
                    )?;
                }
                writeln!(
                    self.output,
                    "{operation} of {} completed.",
                    posting.entry.amount.abs()
                )
            }
            Some(Err(err)) => writeln!(self.output, "{err}"),
            None => writeln!(self.output, "Account not found!"),
        }
    }

    fn statement(&mut self, tax_id: &str, number: AccountNumber) -> io::Result<()> {
        let Some(client) = self.directory.find_client(tax_id) else {
            return writeln!(self.output, "Account not found!");
        };
        match client.account(number) {
            Some(account) => write!(self.output, "{}", account.statement(client)),
            None => writeln!(self.output, "Account not found!"),
        }
    }

    fn transactions(&mut self, tax_id: &str, number: AccountNumber) -> io::Result<()> {
        match self.directory.find_account(tax_id, number) {
            Some(account) => write!(self.output, "{}", account.history()),
            None => writeln!(self.output, "Account not found!"),
        }
    }
}
