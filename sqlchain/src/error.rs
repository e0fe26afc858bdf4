use thiserror::Error;

/// Errors surfaced while configuring, building or executing a query.
///
/// Every fallible I/O step (connect, prepare, execute, scan) maps to
/// [`Error::Database`] and aborts the operation; nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The driver identifier matched no supported backend.
    #[error("unknown database driver `{0}`, expected one of: sqlite, mysql, postgres")]
    UnknownDriver(String),

    /// The join kind keyword matched no supported join flavor.
    #[error("unknown join kind `{0}`, expected one of: INNER, LEFT, RIGHT, FULL")]
    UnknownJoinKind(String),

    /// Connection string or environment problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// Builder state that cannot be assembled into a statement.
    #[error("cannot build statement: {0}")]
    Build(String),

    /// Failure reported by the underlying driver.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
