//! Query construction and execution.
//!
//! [`QueryBuilder`] holds the per-query build state: chain methods consume
//! and return the builder, terminal operations (in `exec`) consume it for
//! good, so a spent builder cannot be reused.

mod builder;
mod exec;
mod join;

pub use builder::BuiltQuery;
pub use join::JoinKind;

pub(crate) use join::Join;

use crate::{Database, Value};

/// Per-query build state, created fresh by [`Database::from`] and discarded
/// by the terminal operation. Not meant to be shared: one builder per
/// logical query.
pub struct QueryBuilder<'a> {
    pub(crate) db: &'a Database,
    pub(crate) table: String,
    pub(crate) joins: Vec<Join>,
    pub(crate) fields: String,
    pub(crate) wheres: Vec<String>,
    pub(crate) binds: Vec<Value>,
    pub(crate) group: String,
    pub(crate) having: String,
    pub(crate) order: String,
    pub(crate) limit: i64,
    pub(crate) offset: i64,
    pub(crate) dangling_on: bool,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(db: &'a Database, table: &str) -> Self {
        Self {
            db,
            table: table.to_string(),
            joins: Vec::new(),
            fields: String::new(),
            wheres: Vec::new(),
            binds: Vec::new(),
            group: String::new(),
            having: String::new(),
            order: String::new(),
            limit: 0,
            offset: 0,
            dangling_on: false,
        }
    }

    /// Append a join against the base table. Joins accumulate in call
    /// order; an empty target is ignored entirely, ON clause included.
    ///
    /// ```ignore
    /// db.from("users")
    ///     .join("profiles p", JoinKind::Left)
    ///     .on("p.user_id = users.id")
    /// ```
    pub fn join(mut self, table: &str, kind: JoinKind) -> Self {
        if table.is_empty() {
            return self;
        }
        self.joins.push(Join {
            kind,
            table: table.to_string(),
            on: None,
        });
        self
    }

    /// Attach the ON predicate to the most recent join. Calling this with
    /// no join on the builder is reported when the statement is built.
    pub fn on(mut self, condition: &str) -> Self {
        if condition.is_empty() {
            return self;
        }
        match self.joins.last_mut() {
            Some(join) => join.on = Some(condition.to_string()),
            None => self.dangling_on = true,
        }
        self
    }

    /// Projection list; an empty string means all columns.
    ///
    /// ```ignore
    /// .fields("id, name, age")
    /// .fields("users.id, companies.name")
    /// ```
    pub fn fields(mut self, fields: &str) -> Self {
        self.fields = fields.to_string();
        self
    }

    /// Append a predicate fragment and its bound parameters atomically, so
    /// bind order always matches placeholder order. Fragments are
    /// AND-joined at build time.
    ///
    /// ```ignore
    /// .r#where("id = ?", params![1])
    /// .r#where("name like ?", params!["%go%"])
    /// ```
    pub fn r#where(mut self, condition: &str, params: Vec<Value>) -> Self {
        self.wheres.push(condition.to_string());
        self.binds.extend(params);
        self
    }

    /// `GROUP BY` expression; empty leaves the clause out.
    pub fn group(mut self, group: &str) -> Self {
        self.group = group.to_string();
        self
    }

    /// `HAVING` predicate; empty leaves the clause out.
    pub fn having(mut self, having: &str) -> Self {
        self.having = having.to_string();
        self
    }

    /// `ORDER BY` expression; empty leaves the clause out.
    pub fn order(mut self, order: &str) -> Self {
        self.order = order.to_string();
        self
    }

    /// Row cap; zero or negative means no `LIMIT` clause.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Row skip; zero or negative means no `OFFSET` clause.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }
}
