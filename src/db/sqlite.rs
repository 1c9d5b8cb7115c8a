use crate::db::models::{AccountCreation, DbAccount};
use crate::db::schema::SQLITE_INIT;
use crate::error::GateError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection, Error as SqlxError};
use std::str::FromStr;
use tracing::warn;

/// Account table access. Holds connection options only: every operation opens
/// its own connection and closes it before returning, on success and on error.
#[derive(Clone)]
pub struct AccountsStorage {
    options: SqliteConnectOptions,
}

impl AccountsStorage {
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }

    pub fn from_url(database_url: &str) -> Result<Self, GateError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        Ok(Self::new(options))
    }

    async fn open(&self) -> Result<SqliteConnection, GateError> {
        Ok(SqliteConnection::connect_with(&self.options).await?)
    }

    /// Close the connection, then hand back the operation's result.
    /// An operation error wins over a close error.
    async fn release<T>(
        conn: SqliteConnection,
        result: Result<T, GateError>,
    ) -> Result<T, GateError> {
        let closed = conn.close().await;
        let value = result?;
        if let Err(e) = closed {
            warn!(error = %e, "closing sqlite connection failed");
            return Err(e.into());
        }
        Ok(value)
    }

    /// Initialize the schema by executing the bundled DDL. Safe to run repeatedly.
    pub async fn init_schema(&self) -> Result<(), GateError> {
        let mut conn = self.open().await?;
        let result = Self::exec_schema(&mut conn).await;
        Self::release(conn, result).await
    }

    async fn exec_schema(conn: &mut SqliteConnection) -> Result<(), GateError> {
        // execute statements one by one (sqlx::query runs a single statement)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&mut *conn).await?;
        }
        Ok(())
    }

    /// Insert a new account. A UNIQUE violation is reported as
    /// `AccountCreation::Duplicate`; the table is the only arbiter of uniqueness.
    pub async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AccountCreation, GateError> {
        let mut conn = self.open().await?;
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&mut conn)
            .await;
        let outcome = match result {
            Ok(_) => Ok(AccountCreation::Created),
            Err(SqlxError::Database(db_err)) if db_err.is_unique_violation() => {
                Ok(AccountCreation::Duplicate)
            }
            Err(e) => Err(e.into()),
        };
        Self::release(conn, outcome).await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<DbAccount>, GateError> {
        let mut conn = self.open().await?;
        let result =
            sqlx::query_as::<_, DbAccount>("SELECT username, password FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&mut conn)
                .await
                .map_err(GateError::from);
        Self::release(conn, result).await
    }

    pub async fn count(&self) -> Result<i64, GateError> {
        let mut conn = self.open().await?;
        let result = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM users")
            .fetch_one(&mut conn)
            .await
            .map(|row| row.0)
            .map_err(GateError::from);
        Self::release(conn, result).await
    }
}
