/// Build the bind list for `QueryBuilder::where` and the raw execution
/// paths.
///
/// # Example
///
/// ```
/// use sqlchain::params;
///
/// let binds = params![1, "go"];
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Value::from($value)),+]
    };
}

/// Build the ordered column/value pairs consumed by
/// [`insert`](crate::QueryBuilder::insert) and
/// [`update`](crate::QueryBuilder::update). Column order is call order.
///
/// # Example
///
/// ```
/// use sqlchain::colvals;
///
/// let record = colvals!(name = "go", age = 5);
/// ```
#[macro_export]
macro_rules! colvals {
    ($($column:ident = $value:expr),* $(,)?) => {
        vec![$((stringify!($column).to_string(), $crate::Value::from($value))),*]
    };
}

macro_rules! binds {
    ($args:expr, $stream:expr) => {{
        for arg in $args {
            $stream = match arg {
                $crate::Value::Null => $stream.bind(Option::<String>::None),
                $crate::Value::Integer(v) => $stream.bind(v),
                $crate::Value::Float(v) => $stream.bind(v),
                $crate::Value::Text(v) => $stream.bind(v),
                // byte strings travel as raw text, like the literal renderer
                $crate::Value::Bytes(v) => {
                    $stream.bind(String::from_utf8_lossy(&v).into_owned())
                }
            };
        }
    }};
}
