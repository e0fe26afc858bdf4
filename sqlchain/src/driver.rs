use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Supported backend families.
///
/// The driver carries the placeholder dialect: SQLite and MySQL take `?`
/// as written, PostgreSQL wants numbered `$1..$n`, rewritten once over the
/// final statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Sqlite,
    Mysql,
    Postgres,
}

impl Driver {
    /// Canonical URL scheme sqlx expects for this backend.
    pub fn scheme(self) -> &'static str {
        match self {
            Driver::Sqlite => "sqlite",
            Driver::Mysql => "mysql",
            Driver::Postgres => "postgres",
        }
    }

    /// Infer the driver from a connection URL's scheme.
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url.split(':').next().unwrap_or_default();
        scheme.parse().map_err(|_| {
            Error::Config(format!(
                "cannot infer a database driver from connection string scheme `{scheme}`"
            ))
        })
    }

    /// Normalize a connection string for this driver. A bare DSN gets the
    /// driver's scheme prefixed; an explicit scheme must name the same
    /// backend or the configuration is rejected.
    pub(crate) fn normalize_dsn(self, dsn: &str) -> Result<String> {
        if let Some((scheme, _)) = dsn.split_once(':') {
            if let Ok(given) = scheme.parse::<Driver>() {
                if given != self {
                    return Err(Error::Config(format!(
                        "connection string scheme `{scheme}` does not match driver `{self}`"
                    )));
                }
                return Ok(dsn.to_string());
            }
        }
        Ok(match self {
            Driver::Sqlite => format!("sqlite:{dsn}"),
            Driver::Mysql => format!("mysql://{dsn}"),
            Driver::Postgres => format!("postgres://{dsn}"),
        })
    }

    /// Rewrite `?` placeholders into the backend's dialect. The scan is as
    /// naive as the rest of the assembly: single-quoted text is skipped,
    /// nothing else is parsed.
    pub(crate) fn rewrite_placeholders(self, sql: &str) -> String {
        if self != Driver::Postgres {
            return sql.to_string();
        }
        let mut out = String::with_capacity(sql.len() + 8);
        let mut index = 0usize;
        let mut in_text = false;
        for ch in sql.chars() {
            match ch {
                '\'' => {
                    in_text = !in_text;
                    out.push(ch);
                }
                '?' if !in_text => {
                    index += 1;
                    out.push('$');
                    out.push_str(&index.to_string());
                }
                _ => out.push(ch),
            }
        }
        out
    }
}

impl FromStr for Driver {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            "mysql" | "mariadb" => Ok(Driver::Mysql),
            "postgres" | "postgresql" | "pgsql" => Ok(Driver::Postgres),
            other => Err(Error::UnknownDriver(other.to_string())),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("sqlite3".parse::<Driver>().unwrap(), Driver::Sqlite);
        assert_eq!("MariaDB".parse::<Driver>().unwrap(), Driver::Mysql);
        assert_eq!("postgresql".parse::<Driver>().unwrap(), Driver::Postgres);
    }

    #[test]
    fn unknown_driver_is_an_error() {
        let err = "oracle".parse::<Driver>().unwrap_err();
        assert!(matches!(err, Error::UnknownDriver(name) if name == "oracle"));
    }

    #[test]
    fn infers_driver_from_url() {
        assert_eq!(
            Driver::from_url("postgres://u@localhost/app").unwrap(),
            Driver::Postgres
        );
        assert!(Driver::from_url("/var/data/app.db").is_err());
    }

    #[test]
    fn normalizes_bare_dsn() {
        assert_eq!(
            Driver::Sqlite.normalize_dsn("file:cache?mode=memory").unwrap(),
            "sqlite:file:cache?mode=memory"
        );
        assert_eq!(
            Driver::Mysql.normalize_dsn("root@localhost/app").unwrap(),
            "mysql://root@localhost/app"
        );
    }

    #[test]
    fn rejects_mismatched_scheme() {
        let err = Driver::Postgres.normalize_dsn("mysql://root@localhost/app");
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn postgres_placeholders_are_numbered() {
        let sql = "SELECT * FROM users WHERE name = ? AND note = 'what?' AND age > ?";
        assert_eq!(
            Driver::Postgres.rewrite_placeholders(sql),
            "SELECT * FROM users WHERE name = $1 AND note = 'what?' AND age > $2"
        );
        assert_eq!(Driver::Sqlite.rewrite_placeholders(sql), sql);
    }
}
