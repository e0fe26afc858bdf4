pub use crate::{colvals, params};
pub use crate::{Connection, Database, Driver, Error, JoinKind, QueryBuilder, Row, Value};
