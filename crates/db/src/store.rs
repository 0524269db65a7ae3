//! The explicit store handle and its write strategy.
//!
//! Whether multi-statement transactions are usable is decided once, when
//! the store is opened. Statement-level poolers (for example PgBouncer in
//! `statement` mode) reject `BEGIN`; against those the store runs
//! multi-step writes as independent statements instead.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::DbPool;

/// How multi-step writes (sketch create and delete) are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Steps run inside one transaction.
    Atomic,
    /// Steps run as separate statements; a failure midway is not rolled back.
    BestEffort,
}

impl WriteMode {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteMode::Atomic => "atomic",
            WriteMode::BestEffort => "best_effort",
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured write strategy, parsed from `DB_WRITE_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteModeSetting {
    /// Detect the mode when the store is opened.
    #[default]
    Auto,
    /// Skip detection and use the given mode.
    Force(WriteMode),
}

#[derive(Debug, thiserror::Error)]
#[error("invalid write mode '{0}', expected one of: auto, atomic, best_effort")]
pub struct ParseWriteModeError(String);

impl FromStr for WriteModeSetting {
    type Err = ParseWriteModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(WriteModeSetting::Auto),
            "atomic" => Ok(WriteModeSetting::Force(WriteMode::Atomic)),
            "best_effort" | "best-effort" => Ok(WriteModeSetting::Force(WriteMode::BestEffort)),
            _ => Err(ParseWriteModeError(s.to_string())),
        }
    }
}

/// Database handle shared by all request handlers.
///
/// Cheap to clone: the pool is reference counted internally.
#[derive(Debug, Clone)]
pub struct Store {
    pool: DbPool,
    write_mode: WriteMode,
}

impl Store {
    /// Connect to the database and select a write strategy.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        setting: WriteModeSetting,
    ) -> Result<Self, sqlx::Error> {
        let pool = crate::create_pool(database_url, max_connections).await?;
        Self::from_pool(pool, setting).await
    }

    /// Wrap an existing pool, probing it when `setting` is `Auto`.
    pub async fn from_pool(pool: DbPool, setting: WriteModeSetting) -> Result<Self, sqlx::Error> {
        let write_mode = match setting {
            WriteModeSetting::Auto => detect_write_mode(&pool).await?,
            WriteModeSetting::Force(mode) => mode,
        };
        tracing::info!(%write_mode, forced = setting != WriteModeSetting::Auto, "Store opened");
        Ok(Self { pool, write_mode })
    }

    /// Wrap an existing pool with a fixed write strategy and no detection.
    pub fn with_write_mode(pool: DbPool, write_mode: WriteMode) -> Self {
        Self { pool, write_mode }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Close every pooled connection. Waits for checked-out connections
    /// to be returned first.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Store closed");
    }
}

/// Open and roll back a throwaway transaction to learn whether the server
/// supports them.
///
/// Rejections that mean "transactions are not available here" select
/// [`WriteMode::BestEffort`]; any other failure is returned as an error.
pub async fn detect_write_mode(pool: &DbPool) -> Result<WriteMode, sqlx::Error> {
    let attempt = async {
        let mut tx = pool.begin().await?;
        sqlx::query("SELECT 1").execute(&mut *tx).await?;
        tx.rollback().await
    };

    match attempt.await {
        Ok(()) => Ok(WriteMode::Atomic),
        Err(err) if is_transaction_unsupported(&err) => {
            tracing::warn!(error = %err, "Transactions unavailable, using best-effort writes");
            Ok(WriteMode::BestEffort)
        }
        Err(err) => Err(err),
    }
}

/// SQLSTATE class `0A` (feature not supported) or `08P01`, which
/// statement-mode poolers return for `BEGIN`.
fn is_transaction_unsupported(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.starts_with("0A") || code == "08P01"),
        _ => false,
    }
}
