//! Flat-file persistence.
//!
//! The only module that touches durable storage. Every call opens its file,
//! does its work and closes the handle before returning.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info};

use tellerbook_common::{format_amount, AccountNumber, Result, TransactionKind, CURRENCY_CODE};

use crate::config::StoreConfig;
use crate::snapshot::AccountRow;

/// Durable sink for ledger records.
pub trait TransactionJournal {
    /// Append one transaction line.
    fn append_transaction(
        &self,
        account_number: &AccountNumber,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<()>;
}

/// Render a transactions file line: `12345678,Deposit: 500 BDT`.
pub fn transaction_line(
    account_number: &AccountNumber,
    kind: TransactionKind,
    amount: Decimal,
) -> String {
    format!(
        "{},{}: {} {}",
        account_number,
        kind,
        format_amount(amount),
        CURRENCY_CODE
    )
}

/// Reads and writes the accounts snapshot and the transaction log.
#[derive(Debug, Clone)]
pub struct FileStore {
    config: StoreConfig,
}

impl FileStore {
    /// Create a store over the configured paths. No file is touched yet.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Overwrite the accounts file with one line per row, in the given order.
    pub fn write_account_snapshot(&self, rows: &[AccountRow]) -> Result<()> {
        let path = &self.config.accounts_path;
        let mut writer = BufWriter::new(File::create(path)?);

        for row in rows {
            writeln!(writer, "{}", row.to_line())?;
        }
        writer.flush()?;

        info!(path = %path.display(), accounts = rows.len(), "Account snapshot written");
        Ok(())
    }

    /// Read the accounts file. A missing file is an empty snapshot.
    pub fn load_account_snapshot(&self) -> Result<Vec<AccountRow>> {
        let path = &self.config.accounts_path;
        let Some(reader) = open_if_exists(path)? else {
            debug!(path = %path.display(), "No account snapshot yet");
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(AccountRow::parse_line(&line, index + 1)?);
        }

        info!(path = %path.display(), accounts = rows.len(), "Account snapshot loaded");
        Ok(rows)
    }

    /// Read the transactions file verbatim, oldest line first.
    ///
    /// A missing file yields no lines. Bytes that are not valid UTF-8 are
    /// replaced with U+FFFD rather than failing the read.
    pub fn load_transaction_lines(&self) -> Result<Vec<String>> {
        let path = &self.config.transactions_path;
        let Some(mut reader) = open_if_exists(path)? else {
            debug!(path = %path.display(), "No transaction log yet");
            return Ok(Vec::new());
        };

        let mut lines = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            lines.push(String::from_utf8_lossy(&buf).into_owned());
        }

        debug!(path = %path.display(), lines = lines.len(), "Transaction log loaded");
        Ok(lines)
    }
}

impl TransactionJournal for FileStore {
    fn append_transaction(
        &self,
        account_number: &AccountNumber,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.transactions_path)?;

        writeln!(file, "{}", transaction_line(account_number, kind, amount))?;
        file.flush()?;
        Ok(())
    }
}

fn open_if_exists(path: &Path) -> Result<Option<BufReader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(BufReader::new(file))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tellerbook_common::{Pin, TellerError};
    use tempfile::tempdir;

    fn row(name: &str, number: &str, balance: Decimal) -> AccountRow {
        AccountRow {
            name: name.to_string(),
            account_number: AccountNumber::new(number),
            pin: Pin::new("1234"),
            balance,
        }
    }

    #[test]
    fn test_transaction_line_format() {
        let number = AccountNumber::new("12345678");
        assert_eq!(
            transaction_line(&number, TransactionKind::Deposit, dec!(500)),
            "12345678,Deposit: 500 BDT"
        );
        assert_eq!(
            transaction_line(&number, TransactionKind::Withdraw, dec!(12.50)),
            "12345678,Withdraw: 12.5 BDT"
        );
    }

    #[test]
    fn test_append_keeps_prior_lines() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(StoreConfig::in_dir(dir.path()));
        let number = AccountNumber::new("100");

        store
            .append_transaction(&number, TransactionKind::Deposit, dec!(10))
            .unwrap();
        store
            .append_transaction(&number, TransactionKind::Withdraw, dec!(3))
            .unwrap();

        let lines = store.load_transaction_lines().unwrap();
        assert_eq!(
            lines,
            vec!["100,Deposit: 10 BDT".to_string(), "100,Withdraw: 3 BDT".to_string()]
        );
    }

    #[test]
    fn test_missing_files_load_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(StoreConfig::in_dir(dir.path()));

        assert!(store.load_transaction_lines().unwrap().is_empty());
        assert!(store.load_account_snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_transaction_lines_are_verbatim() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::in_dir(dir.path());
        std::fs::write(&config.transactions_path, "not,a real: line\n\n42,Deposit: 1 BDT\n")
            .unwrap();

        let lines = FileStore::new(config).load_transaction_lines().unwrap();
        assert_eq!(lines, vec!["not,a real: line", "", "42,Deposit: 1 BDT"]);
    }

    #[test]
    fn test_invalid_utf8_line_does_not_lose_history() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::in_dir(dir.path());
        std::fs::write(
            &config.transactions_path,
            b"1,Deposit: 5 BDT\n\xff\xfe\r\n2,Deposit: 6 BDT",
        )
        .unwrap();

        let lines = FileStore::new(config).load_transaction_lines().unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1,Deposit: 5 BDT");
        assert_eq!(lines[1], "\u{FFFD}\u{FFFD}");
        assert_eq!(lines[2], "2,Deposit: 6 BDT");
    }

    #[test]
    fn test_snapshot_overwrites() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(StoreConfig::in_dir(dir.path()));

        store
            .write_account_snapshot(&[row("A", "1", dec!(1)), row("B", "2", dec!(2))])
            .unwrap();
        store
            .write_account_snapshot(&[row("C", "3", dec!(30.5))])
            .unwrap();

        let contents = std::fs::read_to_string(&store.config().accounts_path).unwrap();
        assert_eq!(contents, "C,3,1234,30.5\n");

        let rows = store.load_account_snapshot().unwrap();
        assert_eq!(rows, vec![row("C", "3", dec!(30.5))]);
    }

    #[test]
    fn test_malformed_snapshot_line() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::in_dir(dir.path());
        std::fs::write(&config.accounts_path, "A,1,1234,10\n\nbroken\n").unwrap();

        let result = FileStore::new(config).load_account_snapshot();
        assert!(matches!(
            result,
            Err(TellerError::MalformedRecord { line: 3, .. })
        ));
    }

    #[test]
    fn test_unwritable_snapshot_reports_io() {
        let dir = tempdir().unwrap();
        let config = StoreConfig {
            accounts_path: dir.path().join("missing").join("users.txt"),
            transactions_path: dir.path().join("transactions.txt"),
        };

        let result = FileStore::new(config).write_account_snapshot(&[]);
        assert!(matches!(result, Err(TellerError::Io(_))));
    }
}
