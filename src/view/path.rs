use crate::view::value::FieldValue;
use serde_json::Value;
use std::fmt;

/// Ordered list of field names locating a possibly-nested value inside
/// a record, e.g. `owner.type.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldPath(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a dotted path string. Empty segments are dropped, so
    /// `"a..b"` and `"a.b"` are the same path.
    pub fn parse(dotted: &str) -> Self {
        FieldPath(
            dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Segment view for slice-pattern matching in `Record` impls.
    pub fn segments(&self) -> Vec<&str> {
        self.iter().collect()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl From<&str> for FieldPath {
    fn from(dotted: &str) -> Self {
        FieldPath::parse(dotted)
    }
}

impl From<String> for FieldPath {
    fn from(dotted: String) -> Self {
        FieldPath::parse(&dotted)
    }
}

/// Row-shaped data the view engine can search, filter and sort.
///
/// Resolution is total: a path the record does not know, or whose
/// intermediate object is absent, resolves to `FieldValue::Empty`.
pub trait Record {
    fn resolve(&self, path: &FieldPath) -> FieldValue;
}

/// Dynamic resolution over JSON objects. Null, missing fields, arrays
/// and nested objects at the leaf all resolve to the empty sentinel.
impl Record for Value {
    fn resolve(&self, path: &FieldPath) -> FieldValue {
        let mut current = self;
        for segment in path.iter() {
            match current.get(segment) {
                Some(next) => current = next,
                None => return FieldValue::Empty,
            }
        }
        scalar_of(current)
    }
}

fn scalar_of(value: &Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Empty,
        Value::Bool(b) => FieldValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Int(i)
            } else {
                FieldValue::from(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => FieldValue::Empty,
    }
}
