use serde_json::Value;
use sqlx::postgres::PgArguments;

/// Rendered partial-UPDATE pieces: the SET clause fragment and the ordered
/// parameter list. `params[0]` is always the key value, bound to `$1` in the
/// caller's WHERE clause; the fragment's placeholders start at `$2` and
/// follow the parameter order exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateFragment {
    pub set_clause: String,
    pub params: Vec<Value>,
}

impl UpdateFragment {
    /// True when no columns were set. Executing an empty SET clause is
    /// invalid SQL, so callers must reject the request as a no-op first.
    pub fn is_empty(&self) -> bool {
        self.params.len() <= 1
    }
}

/// Accumulates (column, value) pairs for an entity whose update fields are
/// all optional, then renders a parameterized SET clause with correctly
/// numbered placeholders.
///
/// Two presence modes:
/// - conditional (`new(false)`): `set(col, None)` is skipped entirely, so
///   absent PATCH fields never reach SQL;
/// - always-include (`new(true)`): every call is recorded, `None` binding
///   SQL NULL — for fields where writing an empty value is itself the
///   requested update (addresses, image url).
#[derive(Debug)]
pub struct UpdateBuilder {
    columns: Vec<(String, Value)>,
    always_include: bool,
}

impl UpdateBuilder {
    pub fn new(always_include: bool) -> Self {
        Self {
            columns: Vec::new(),
            always_include,
        }
    }

    pub fn set(mut self, column: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.columns.push((column.to_string(), v.into())),
            None if self.always_include => self.columns.push((column.to_string(), Value::Null)),
            None => {}
        }
        self
    }

    /// Render the SET clause and parameter list for
    /// `UPDATE <table> SET <set_clause> WHERE <key_column> = $1`.
    /// The table/key names are returned to the caller only through the
    /// query text it assembles; this builder owns the fragment/params
    /// pairing invariant.
    pub fn build(self, key: impl Into<Value>) -> UpdateFragment {
        let mut params = Vec::with_capacity(self.columns.len() + 1);
        params.push(key.into());

        let set_clause = self
            .columns
            .into_iter()
            .enumerate()
            .map(|(i, (column, value))| {
                params.push(value);
                // $1 is reserved for the key
                format!("{} = ${}", column, i + 2)
            })
            .collect::<Vec<_>>()
            .join(", ");

        UpdateFragment { set_clause, params }
    }
}

/// Bind a JSON parameter onto a sqlx query. Array parameters are not used
/// by update fragments; objects bind as JSONB.
pub fn bind_value<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                // Postgres doesn't have u64; cast down if safe
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        Value::Array(_) => q,
        Value::Object(_) => q.bind(v.clone()),
    }
}
