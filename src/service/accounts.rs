use crate::db::{AccountCreation, AccountsStorage};
use crate::error::GateError;
use crate::service::passwords;
use tracing::{debug, info};

/// Signup and login on top of the account table.
///
/// Hashing runs on the blocking pool. Callers validate input (non-empty
/// username/password); this layer only hashes, stores and verifies.
#[derive(Clone)]
pub struct AccountService {
    storage: AccountsStorage,
}

impl AccountService {
    pub fn new(storage: AccountsStorage) -> Self {
        Self { storage }
    }

    /// Open the store at `database_url` and create the table if it is missing.
    pub async fn open(database_url: &str) -> Result<Self, GateError> {
        let storage = AccountsStorage::from_url(database_url)?;
        storage.init_schema().await?;
        Ok(Self::new(storage))
    }

    pub fn storage(&self) -> &AccountsStorage {
        &self.storage
    }

    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccountCreation, GateError> {
        let plaintext = password.to_owned();
        let hash =
            tokio::task::spawn_blocking(move || passwords::hash_password(&plaintext)).await??;

        let outcome = self.storage.insert(username, &hash).await?;
        match outcome {
            AccountCreation::Created => info!(username, "account created"),
            AccountCreation::Duplicate => info!(username, "signup rejected: username taken"),
        }
        Ok(outcome)
    }

    /// `true` only when the user exists and the password matches. Unknown user
    /// and wrong password are indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, GateError> {
        let stored = self
            .storage
            .find_by_username(username)
            .await?
            .map(|account| account.password);

        let plaintext = password.to_owned();
        let matched = tokio::task::spawn_blocking(move || match stored {
            Some(hash) => passwords::verify_password(&plaintext, &hash),
            None => passwords::verify_against_dummy(&plaintext),
        })
        .await?;

        debug!(username, matched, "authentication attempt");
        Ok(matched)
    }
}
