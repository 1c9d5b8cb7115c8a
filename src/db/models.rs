use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbAccount {
    pub username: String,
    /// Argon2id PHC string (salt and parameters included).
    pub password: String,
}

/// Result of inserting a new account. Storage faults travel separately as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCreation {
    Created,
    /// The username is taken; nothing was written.
    Duplicate,
}

impl AccountCreation {
    pub fn is_created(self) -> bool {
        matches!(self, AccountCreation::Created)
    }
}
