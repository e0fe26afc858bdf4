use std::str::FromStr;

use crate::error::{Error, Result};

/// Join flavor keyword. [`JoinKind::Plain`] emits a bare `JOIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    #[default]
    Plain,
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub(crate) fn sql(self) -> &'static str {
        match self {
            JoinKind::Plain => "JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
        }
    }
}

impl FromStr for JoinKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "JOIN" => Ok(JoinKind::Plain),
            "INNER" => Ok(JoinKind::Inner),
            "LEFT" => Ok(JoinKind::Left),
            "RIGHT" => Ok(JoinKind::Right),
            "FULL" => Ok(JoinKind::Full),
            other => Err(Error::UnknownJoinKind(other.to_string())),
        }
    }
}

/// One join specification. Joins accumulate on the builder in call order.
#[derive(Debug, Clone)]
pub(crate) struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub on: Option<String>,
}

impl Join {
    pub(crate) fn sql(&self) -> String {
        match &self.on {
            Some(on) => format!("{} {} ON {}", self.kind.sql(), self.table, on),
            None => format!("{} {}", self.kind.sql(), self.table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("left".parse::<JoinKind>().unwrap(), JoinKind::Left);
        assert_eq!("INNER".parse::<JoinKind>().unwrap(), JoinKind::Inner);
        assert_eq!("Full".parse::<JoinKind>().unwrap(), JoinKind::Full);
        assert_eq!("".parse::<JoinKind>().unwrap(), JoinKind::Plain);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let err = "bogus".parse::<JoinKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownJoinKind(kind) if kind == "BOGUS"));
    }

    #[test]
    fn join_sql() {
        let join = Join {
            kind: JoinKind::Left,
            table: "profiles p".to_string(),
            on: Some("p.user_id = users.id".to_string()),
        };
        assert_eq!(join.sql(), "LEFT JOIN profiles p ON p.user_id = users.id");

        let bare = Join {
            kind: JoinKind::Plain,
            table: "b".to_string(),
            on: None,
        };
        assert_eq!(bare.sql(), "JOIN b");
    }
}
