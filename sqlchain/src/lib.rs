//! sqlchain: a fluent SQL statement builder and executor.
//!
//! Chain configuration calls off a [`Database`] handle, then finish with a
//! terminal operation that assembles the statement, runs it against the
//! configured backend and maps the result into [`Row`]s of tagged
//! [`Value`]s.
//!
//! ```ignore
//! let db = Database::new("sqlite", "app.db").await?;
//!
//! let admins = db
//!     .from("users")
//!     .fields("id, name")
//!     .r#where("role = ?", params!["admin"])
//!     .order("id DESC")
//!     .limit(10)
//!     .find_all()
//!     .await?;
//!
//! let id = db.from("users").insert(colvals!(name = "go", age = 5)).await?;
//! ```

/// This module contains the macros used in the crate.
#[macro_use]
mod macros;

mod driver;
mod error;
mod row;
mod value;

/// This module contains query construction and execution.
pub mod query;

/// This module contains the prelude for the crate.
pub mod prelude;

pub use driver::Driver;
pub use error::{Error, Result};
pub use query::{BuiltQuery, JoinKind, QueryBuilder};
pub use row::Row;
pub use value::Value;

use sqlx::any::AnyPoolOptions;

/// Pool over the configured backend.
pub type Connection = sqlx::Pool<sqlx::Any>;

/// Long-lived database handle: driver identity plus a connection pool.
///
/// Per-query state lives in the [`QueryBuilder`] returned by
/// [`Database::from`]; the handle itself is cheap to share and outlives
/// any number of queries.
pub struct Database {
    driver: Driver,
    pool: Connection,
}

impl Database {
    /// Connect eagerly. The driver identifier picks the backend family
    /// (`sqlite`/`sqlite3`, `mysql`/`mariadb`, `postgres`/`postgresql`);
    /// anything else is rejected up front.
    pub async fn new(driver: &str, dsn: &str) -> Result<Self> {
        let (driver, url) = resolve(driver, dsn)?;
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;
        Ok(Self { driver, pool })
    }

    /// Like [`new`](Self::new) but defers the first connection until a
    /// query runs. Configuration errors still surface immediately.
    pub fn connect_lazy(driver: &str, dsn: &str) -> Result<Self> {
        let (driver, url) = resolve(driver, dsn)?;
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(5)
            .connect_lazy(&url)?;
        Ok(Self { driver, pool })
    }

    /// Connect from the environment: loads `.env` if present and reads
    /// `DATABASE_URL`, inferring the driver from the URL scheme.
    pub async fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| Error::Config("DATABASE_URL is not set".to_string()))?;
        let driver = Driver::from_url(&url)?;
        Self::new(driver.scheme(), &url).await
    }

    /// Start a query chain against `table` (an alias is allowed, e.g.
    /// `"users u"`). Build state is fresh per call.
    pub fn from(&self, table: &str) -> QueryBuilder<'_> {
        QueryBuilder::new(self, table)
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    pub fn pool(&self) -> &Connection {
        &self.pool
    }
}

fn resolve(driver: &str, dsn: &str) -> Result<(Driver, String)> {
    let driver: Driver = driver.parse()?;
    let url = driver.normalize_dsn(dsn)?;
    Ok((driver, url))
}
