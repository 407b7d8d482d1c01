//! Directory bootstrap.

use anyhow::Context;
use rust_decimal::Decimal;
use tracing::info;

use tellerbook_ledger::{Account, Directory, FileStore};

/// Demonstration account used when no accounts file exists yet.
pub const DEMO_NAME: &str = "Imam";
pub const DEMO_ACCOUNT_NUMBER: &str = "12345678";
pub const DEMO_PIN: &str = "1234";

/// Opening balance of the demonstration account.
pub fn demo_balance() -> Decimal {
    Decimal::from(50_000)
}

/// Build the directory from the accounts file, or seed it with the
/// demonstration account when the file is missing or empty.
pub fn load_directory(store: &FileStore) -> anyhow::Result<Directory> {
    let rows = store.load_account_snapshot().with_context(|| {
        format!(
            "failed to read accounts file {}",
            store.config().accounts_path.display()
        )
    })?;

    if !rows.is_empty() {
        return Ok(Directory::from_rows(rows));
    }

    info!("No saved accounts, seeding demonstration account");
    let mut directory = Directory::new();
    directory.insert(Account::new(
        DEMO_NAME,
        DEMO_ACCOUNT_NUMBER,
        DEMO_PIN,
        demo_balance(),
    ))?;
    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tellerbook_ledger::StoreConfig;
    use tempfile::tempdir;

    #[test]
    fn test_seeds_demo_account_on_first_run() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(StoreConfig::in_dir(dir.path()));

        let directory = load_directory(&store).unwrap();

        assert_eq!(directory.len(), 1);
        let account = directory.search(DEMO_ACCOUNT_NUMBER, DEMO_PIN).unwrap();
        assert_eq!(account.name(), DEMO_NAME);
        assert_eq!(account.balance(), dec!(50000));
    }

    #[test]
    fn test_uses_saved_accounts() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::in_dir(dir.path());
        std::fs::write(&config.accounts_path, "Nadia,777,4321,12.5\n").unwrap();
        let store = FileStore::new(config);

        let directory = load_directory(&store).unwrap();

        assert_eq!(directory.len(), 1);
        assert!(directory.search(DEMO_ACCOUNT_NUMBER, DEMO_PIN).is_none());
        assert_eq!(directory.search("777", "4321").unwrap().balance(), dec!(12.5));
    }

    #[test]
    fn test_malformed_accounts_file_is_an_error() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::in_dir(dir.path());
        std::fs::write(&config.accounts_path, "garbage\n").unwrap();

        assert!(load_directory(&FileStore::new(config)).is_err());
    }
}
