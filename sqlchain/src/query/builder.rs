//! Pure statement assembly: builder state in, statement text plus bind
//! list out. No I/O happens here.

use crate::error::{Error, Result};
use crate::Value;

use super::QueryBuilder;

/// Assembled statement text plus its bind parameters. Placeholder order in
/// the text matches the argument order left to right.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub sql: String,
    pub args: Vec<Value>,
}

impl QueryBuilder<'_> {
    /// Assemble the SELECT statement. Clause order is fixed; unset clauses
    /// contribute nothing, not even whitespace.
    pub fn build_select(&self) -> Result<BuiltQuery> {
        self.check()?;
        let fields = if self.fields.is_empty() {
            "*"
        } else {
            &self.fields
        };
        let mut parts = vec![format!("SELECT {fields} FROM {}", self.table)];
        for join in &self.joins {
            parts.push(join.sql());
        }
        push_clause(&mut parts, "GROUP BY", &self.group);
        push_clause(&mut parts, "HAVING", &self.having);
        self.push_where(&mut parts);
        self.push_tail(&mut parts);
        Ok(BuiltQuery {
            sql: parts.join(" "),
            args: self.binds.clone(),
        })
    }

    /// Assemble the INSERT statement. Values are bound parameters, one per
    /// column, in caller order.
    pub fn build_insert(&self, cols: &[(String, Value)]) -> Result<BuiltQuery> {
        self.check()?;
        if cols.is_empty() {
            return Err(Error::Build("insert needs at least one column".to_string()));
        }
        let fields: Vec<&str> = cols.iter().map(|(name, _)| name.as_str()).collect();
        let placeholders = vec!["?"; cols.len()].join(", ");
        Ok(BuiltQuery {
            sql: format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table,
                fields.join(", "),
                placeholders
            ),
            args: cols.iter().map(|(_, value)| value.clone()).collect(),
        })
    }

    /// Assemble the UPDATE statement. SET binds come first, then the
    /// accumulated WHERE binds, matching placeholder order.
    pub fn build_update(&self, cols: &[(String, Value)]) -> Result<BuiltQuery> {
        self.check()?;
        if cols.is_empty() {
            return Err(Error::Build("update needs at least one column".to_string()));
        }
        let set: Vec<String> = cols.iter().map(|(name, _)| format!("{name} = ?")).collect();
        let mut parts = vec![format!("UPDATE {} SET {}", self.table, set.join(", "))];
        self.push_where(&mut parts);
        self.push_tail(&mut parts);
        let mut args: Vec<Value> = cols.iter().map(|(_, value)| value.clone()).collect();
        args.extend(self.binds.iter().cloned());
        Ok(BuiltQuery {
            sql: parts.join(" "),
            args,
        })
    }

    /// Assemble the DELETE statement.
    pub fn build_delete(&self) -> Result<BuiltQuery> {
        self.check()?;
        let mut parts = vec![format!("DELETE FROM {}", self.table)];
        self.push_where(&mut parts);
        self.push_tail(&mut parts);
        Ok(BuiltQuery {
            sql: parts.join(" "),
            args: self.binds.clone(),
        })
    }

    fn check(&self) -> Result<()> {
        if self.table.is_empty() {
            return Err(Error::Build("no table selected".to_string()));
        }
        if self.dangling_on {
            return Err(Error::Build(
                "on() called without a preceding join".to_string(),
            ));
        }
        Ok(())
    }

    fn push_where(&self, parts: &mut Vec<String>) {
        if !self.wheres.is_empty() {
            parts.push(format!("WHERE {}", self.wheres.join(" AND ")));
        }
    }

    fn push_tail(&self, parts: &mut Vec<String>) {
        push_clause(parts, "ORDER BY", &self.order);
        if self.limit > 0 {
            parts.push(format!("LIMIT {}", self.limit));
        }
        if self.offset > 0 {
            parts.push(format!("OFFSET {}", self.offset));
        }
    }
}

fn push_clause(parts: &mut Vec<String>, keyword: &str, body: &str) {
    if !body.is_empty() {
        parts.push(format!("{keyword} {body}"));
    }
}

#[cfg(test)]
mod tests {
    use crate::{colvals, params, Database, JoinKind, Value};

    fn db() -> Database {
        Database::connect_lazy("sqlite", ":memory:").unwrap()
    }

    #[tokio::test]
    async fn bare_select_defaults_to_star() {
        let db = db();
        let built = db.from("users").build_select().unwrap();
        assert_eq!(built.sql, "SELECT * FROM users");
        assert!(built.args.is_empty());
    }

    #[tokio::test]
    async fn every_clause_in_fixed_order() {
        let db = db();
        let built = db
            .from("users u")
            .join("profiles p", JoinKind::Left)
            .on("p.user_id = u.id")
            .fields("u.id, p.bio")
            .group("u.id")
            .having("count(*) > 1")
            .r#where("u.age > ?", params![18])
            .order("u.id DESC")
            .limit(3)
            .offset(6)
            .build_select()
            .unwrap();
        assert_eq!(
            built.sql,
            "SELECT u.id, p.bio FROM users u \
             LEFT JOIN profiles p ON p.user_id = u.id \
             GROUP BY u.id HAVING count(*) > 1 \
             WHERE u.age > ? ORDER BY u.id DESC LIMIT 3 OFFSET 6"
        );
        assert_eq!(built.args, params![18]);
    }

    #[tokio::test]
    async fn where_fragments_accumulate_in_order() {
        let db = db();
        let built = db
            .from("users")
            .r#where("id = ?", params![1])
            .r#where("name = ?", params!["go"])
            .build_select()
            .unwrap();
        assert_eq!(built.sql, "SELECT * FROM users WHERE id = ? AND name = ?");
        assert_eq!(built.args, vec![Value::Integer(1), Value::Text("go".into())]);
    }

    #[tokio::test]
    async fn non_positive_limit_and_offset_are_omitted() {
        let db = db();
        for limit in [0, -5] {
            let built = db.from("users").limit(limit).offset(-1).build_select().unwrap();
            assert_eq!(built.sql, "SELECT * FROM users");
        }
        let built = db.from("users").limit(3).build_select().unwrap();
        assert_eq!(built.sql, "SELECT * FROM users LIMIT 3");
    }

    #[tokio::test]
    async fn joins_accumulate() {
        let db = db();
        let built = db
            .from("a")
            .join("b", JoinKind::Left)
            .on("b.a_id = a.id")
            .join("c", JoinKind::Inner)
            .on("c.b_id = b.id")
            .build_select()
            .unwrap();
        assert_eq!(
            built.sql,
            "SELECT * FROM a LEFT JOIN b ON b.a_id = a.id INNER JOIN c ON c.b_id = b.id"
        );
    }

    #[tokio::test]
    async fn plain_join_has_no_kind_keyword() {
        let db = db();
        let built = db.from("a").join("b", JoinKind::Plain).build_select().unwrap();
        assert_eq!(built.sql, "SELECT * FROM a JOIN b");
    }

    #[tokio::test]
    async fn empty_join_target_emits_nothing() {
        let db = db();
        let built = db
            .from("a")
            .join("", JoinKind::Left)
            .build_select()
            .unwrap();
        assert_eq!(built.sql, "SELECT * FROM a");
    }

    #[tokio::test]
    async fn dangling_on_is_a_build_error() {
        let db = db();
        let err = db.from("a").on("b.id = a.id").build_select().unwrap_err();
        assert!(err.to_string().contains("without a preceding join"));
    }

    #[tokio::test]
    async fn empty_table_is_a_build_error() {
        let db = db();
        assert!(db.from("").build_select().is_err());
    }

    #[tokio::test]
    async fn insert_binds_in_column_order() {
        let db = db();
        let built = db
            .from("users")
            .build_insert(&colvals!(name = "go", age = 5))
            .unwrap();
        assert_eq!(built.sql, "INSERT INTO users (name, age) VALUES (?, ?)");
        assert_eq!(built.args, vec![Value::Text("go".into()), Value::Integer(5)]);
    }

    #[tokio::test]
    async fn update_set_binds_precede_where_binds() {
        let db = db();
        let built = db
            .from("users")
            .r#where("id = ?", params![7])
            .build_update(&colvals!(role = "admin"))
            .unwrap();
        assert_eq!(built.sql, "UPDATE users SET role = ? WHERE id = ?");
        assert_eq!(
            built.args,
            vec![Value::Text("admin".into()), Value::Integer(7)]
        );
    }

    #[tokio::test]
    async fn update_and_delete_carry_tail_clauses() {
        let db = db();
        let built = db
            .from("logs")
            .r#where("level = ?", params!["debug"])
            .order("id")
            .limit(10)
            .build_delete()
            .unwrap();
        assert_eq!(
            built.sql,
            "DELETE FROM logs WHERE level = ? ORDER BY id LIMIT 10"
        );
    }

    #[tokio::test]
    async fn empty_column_set_is_rejected() {
        let db = db();
        assert!(db.from("users").build_insert(&[]).is_err());
        assert!(db.from("users").build_update(&[]).is_err());
    }
}
