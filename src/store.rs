use rusqlite::Connection;

use crate::db::{get_value, remove_value, set_value};
use crate::error::{NetWorthError, Result};
use crate::models::{default_accounts, Account, MAX_AMOUNT};

/// Storage key holding the serialized account list.
pub const ACCOUNTS_KEY: &str = "accounts";

/// Owns the account list. All mutation goes through `update` and the reset
/// protocol, each of which writes back to storage.
#[derive(Debug, Clone)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

/// Proof that a reset was requested. Hand it to `AccountStore::commit_reset`
/// to go through with it, or `cancel` it.
#[must_use = "a pending reset does nothing until committed or cancelled"]
#[derive(Debug)]
pub struct PendingReset {
    _private: (),
}

impl PendingReset {
    pub fn cancel(self) {
        tracing::debug!("reset cancelled");
    }
}

fn write_accounts(conn: &Connection, accounts: &[Account]) -> Result<()> {
    let json = serde_json::to_string(accounts)?;
    set_value(conn, ACCOUNTS_KEY, &json)?;
    tracing::debug!(count = accounts.len(), "saved accounts");
    Ok(())
}

impl AccountStore {
    /// Read the persisted snapshot, falling back to the built-in list when it
    /// is absent or does not parse.
    pub fn load(conn: &Connection) -> Result<Self> {
        let accounts = match get_value(conn, ACCOUNTS_KEY)? {
            None => {
                tracing::info!("no saved accounts, using defaults");
                default_accounts()
            }
            Some(raw) => match serde_json::from_str::<Vec<Account>>(&raw) {
                Ok(accounts) => {
                    tracing::debug!(count = accounts.len(), "loaded accounts");
                    accounts
                }
                Err(e) => {
                    tracing::warn!(error = %e, "saved accounts are unreadable, using defaults");
                    default_accounts()
                }
            },
        };
        Ok(Self { accounts })
    }

    #[cfg(test)]
    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        write_accounts(conn, &self.accounts)
    }

    /// Set the amount at `index` and persist. The name is never touched.
    /// Nothing changes in memory unless the write succeeds.
    pub fn update(&mut self, conn: &Connection, index: usize, amount: i64) -> Result<&[Account]> {
        if amount.unsigned_abs() > MAX_AMOUNT.unsigned_abs() {
            return Err(NetWorthError::InvalidAmount(amount.to_string()));
        }
        let len = self.accounts.len();
        let mut updated = self.accounts.clone();
        let account = updated
            .get_mut(index)
            .ok_or(NetWorthError::IndexOutOfRange { index, len })?;
        let previous = account.amount;
        account.amount = amount;
        write_accounts(conn, &updated)?;
        tracing::info!(account = %updated[index].name, previous, amount, "amount updated");
        self.accounts = updated;
        Ok(&self.accounts)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.accounts.iter().position(|a| a.name == name)
    }

    pub fn request_reset(&self) -> PendingReset {
        tracing::debug!("reset requested");
        PendingReset { _private: () }
    }

    /// Restore the built-in list and clear the persisted snapshot.
    pub fn commit_reset(&mut self, conn: &Connection, pending: PendingReset) -> Result<&[Account]> {
        let PendingReset { _private: () } = pending;
        remove_value(conn, ACCOUNTS_KEY)?;
        self.accounts = default_accounts();
        tracing::info!("accounts reset to defaults");
        Ok(&self.accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::total_wealth;
    use crate::db::test_db;
    use crate::models::AccountKind;

    fn sample() -> Vec<Account> {
        vec![
            Account::new("A", 100, AccountKind::Cash),
            Account::new("B Broker", 50, AccountKind::Stock),
        ]
    }

    #[test]
    fn test_load_without_snapshot_returns_defaults() {
        let (_dir, conn) = test_db();
        let store = AccountStore::load(&conn).unwrap();
        assert_eq!(store.accounts(), default_accounts().as_slice());
    }

    #[test]
    fn test_load_unparsable_snapshot_returns_defaults() {
        let (_dir, conn) = test_db();
        set_value(&conn, ACCOUNTS_KEY, "{not json").unwrap();
        let store = AccountStore::load(&conn).unwrap();
        assert_eq!(store.accounts().len(), 14);
    }

    #[test]
    fn test_load_record_missing_fields_returns_defaults() {
        let (_dir, conn) = test_db();
        set_value(&conn, ACCOUNTS_KEY, r#"[{"name": "A"}]"#).unwrap();
        let store = AccountStore::load(&conn).unwrap();
        assert_eq!(store.accounts(), default_accounts().as_slice());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let (_dir, conn) = test_db();
        let store = AccountStore::from_accounts(sample());
        store.save(&conn).unwrap();
        let loaded = AccountStore::load(&conn).unwrap();
        assert_eq!(loaded.accounts(), sample().as_slice());
    }

    #[test]
    fn test_update_changes_amount_and_persists() {
        let (_dir, conn) = test_db();
        let mut store = AccountStore::from_accounts(sample());
        let accounts = store.update(&conn, 0, 500).unwrap();
        assert_eq!(total_wealth(accounts), 550);
        assert_eq!(accounts[0].name, "A");
        assert_eq!(accounts[1], Account::new("B Broker", 50, AccountKind::Stock));

        let reloaded = AccountStore::load(&conn).unwrap();
        assert_eq!(reloaded.accounts()[0].amount, 500);
    }

    #[test]
    fn test_update_out_of_range_is_rejected() {
        let (_dir, conn) = test_db();
        let mut store = AccountStore::from_accounts(sample());
        let err = store.update(&conn, 2, 1).unwrap_err();
        assert!(matches!(err, NetWorthError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(store.accounts(), sample().as_slice());
        assert!(get_value(&conn, ACCOUNTS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_failed_save_keeps_previous_amount() {
        let (_dir, conn) = test_db();
        let mut store = AccountStore::from_accounts(sample());
        conn.execute_batch("DROP TABLE storage").unwrap();
        let err = store.update(&conn, 0, 999).unwrap_err();
        assert!(matches!(err, NetWorthError::Db(_)));
        assert_eq!(store.accounts(), sample().as_slice());
    }

    #[test]
    fn test_update_rejects_amount_beyond_limit() {
        let (_dir, conn) = test_db();
        let mut store = AccountStore::from_accounts(sample());
        let err = store.update(&conn, 0, i64::MAX).unwrap_err();
        assert!(matches!(err, NetWorthError::InvalidAmount(_)));
        assert!(store.update(&conn, 0, -MAX_AMOUNT).is_ok());
        assert_eq!(total_wealth(store.accounts()), 50 - MAX_AMOUNT);
    }

    #[test]
    fn test_position_by_exact_name() {
        let store = AccountStore::from_accounts(sample());
        assert_eq!(store.position("B Broker"), Some(1));
        assert_eq!(store.position("Broker"), None);
    }

    #[test]
    fn test_cancelled_reset_keeps_edits() {
        let (_dir, conn) = test_db();
        let mut store = AccountStore::from_accounts(sample());
        store.update(&conn, 1, 75).unwrap();
        store.request_reset().cancel();
        assert_eq!(store.accounts()[1].amount, 75);
        assert!(get_value(&conn, ACCOUNTS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_committed_reset_restores_defaults_and_clears_storage() {
        let (_dir, conn) = test_db();
        let mut store = AccountStore::from_accounts(sample());
        store.update(&conn, 0, 1).unwrap();
        let pending = store.request_reset();
        let accounts = store.commit_reset(&conn, pending).unwrap();
        assert_eq!(accounts, default_accounts().as_slice());
        assert!(get_value(&conn, ACCOUNTS_KEY).unwrap().is_none());
    }
}
