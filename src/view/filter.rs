use crate::view::path::{FieldPath, Record};
use crate::view::value::FieldValue;
use std::cmp::Ordering;

/// One inclusion test attached to a field path.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterTest {
    /// Exact match against the resolved value.
    Equals(FieldValue),
    /// Inclusive numeric range; each bound is independently optional.
    Between { min: Option<f64>, max: Option<f64> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub path: FieldPath,
    pub test: FilterTest,
}

/// The set of active inclusion constraints on a collection view.
///
/// An inactive filter simply has no clause: the builder methods skip
/// `None` values, so "filter not set" can never exclude a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    clauses: Vec<FilterClause>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Require `path` to resolve to exactly `value`.
    pub fn equals(mut self, path: impl Into<FieldPath>, value: impl Into<FieldValue>) -> Self {
        self.clauses.push(FilterClause {
            path: path.into(),
            test: FilterTest::Equals(value.into()),
        });
        self
    }

    /// Like [`equals`](Self::equals), but `None` leaves the filter inactive.
    pub fn equals_opt<V>(self, path: impl Into<FieldPath>, value: Option<V>) -> Self
    where
        V: Into<FieldValue>,
    {
        match value {
            Some(v) => self.equals(path, v),
            None => self,
        }
    }

    /// Require `path` to resolve to a number inside `[min, max]`.
    ///
    /// Non-finite bounds are dropped (a bound that cannot be compared
    /// never constrains), and a clause with no remaining bound is not
    /// added at all.
    pub fn between(
        mut self,
        path: impl Into<FieldPath>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        let min = min.filter(|n| n.is_finite());
        let max = max.filter(|n| n.is_finite());
        if min.is_none() && max.is_none() {
            return self;
        }
        self.clauses.push(FilterClause {
            path: path.into(),
            test: FilterTest::Between { min, max },
        });
        self
    }

    /// True when every active clause accepts the record.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.clauses.iter().all(|clause| {
            let value = record.resolve(&clause.path);
            match &clause.test {
                FilterTest::Equals(expected) => {
                    !value.is_empty() && value.compare(expected) == Ordering::Equal
                }
                FilterTest::Between { min, max } => {
                    let Some(n) = value.as_number() else {
                        return false;
                    };
                    min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi)
                }
            }
        })
    }
}

/// Case-insensitive substring search across the view's searchable
/// paths. An empty query accepts every record.
pub fn search_matches<R: Record>(record: &R, query: &str, searchable: &[FieldPath]) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    searchable.iter().any(|path| {
        record
            .resolve(path)
            .search_text()
            .to_lowercase()
            .contains(&needle)
    })
}

/// Compose the search test and the filter clauses into one conjunctive
/// predicate. Pure: re-derive it whenever the query or spec changes.
pub fn predicate<'a, R: Record>(
    query: &'a str,
    searchable: &'a [FieldPath],
    filters: &'a FilterSpec,
) -> impl Fn(&R) -> bool + 'a {
    move |record| search_matches(record, query, searchable) && filters.matches(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn properties() -> Vec<Value> {
        vec![
            json!({ "id": 1, "price": 100, "pool": false, "type": { "name": "Appartement" } }),
            json!({ "id": 2, "price": 300, "pool": true, "type": { "name": "Maison" } }),
            json!({ "id": 3, "price": 200, "pool": false, "type": { "name": "Terrain" } }),
        ]
    }

    fn apply(records: &[Value], query: &str, spec: &FilterSpec) -> Vec<i64> {
        let searchable = vec![FieldPath::parse("type.name")];
        let pred = predicate(query, &searchable, spec);
        records
            .iter()
            .filter(|r| pred(*r))
            .map(|r| r["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_empty_spec_and_query_accept_everything() {
        let records = properties();
        assert_eq!(apply(&records, "", &FilterSpec::new()), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = properties();
        assert_eq!(apply(&records, "maison", &FilterSpec::new()), vec![2]);
        assert_eq!(apply(&records, "A", &FilterSpec::new()), vec![1, 2, 3]);
        assert_eq!(
            apply(&records, "château", &FilterSpec::new()),
            Vec::<i64>::new()
        );
    }

    #[test]
    fn test_equals_filter() {
        let records = properties();
        let spec = FilterSpec::new().equals("pool", true);
        assert_eq!(apply(&records, "", &spec), vec![2]);
    }

    #[test]
    fn test_equals_opt_none_is_inactive() {
        let records = properties();
        let spec = FilterSpec::new().equals_opt("pool", None::<bool>);
        assert!(spec.is_empty());
        assert_eq!(apply(&records, "", &spec), vec![1, 2, 3]);
    }

    #[test]
    fn test_min_price_keeps_relative_order() {
        // min 150 keeps 300 then 200 in original record order
        let records = properties();
        let spec = FilterSpec::new().between("price", Some(150.0), None);
        assert_eq!(apply(&records, "", &spec), vec![2, 3]);
    }

    #[test]
    fn test_range_bounds_are_inclusive_and_independent() {
        let records = properties();
        let spec = FilterSpec::new().between("price", Some(100.0), Some(200.0));
        assert_eq!(apply(&records, "", &spec), vec![1, 3]);

        let max_only = FilterSpec::new().between("price", None, Some(100.0));
        assert_eq!(apply(&records, "", &max_only), vec![1]);
    }

    #[test]
    fn test_inverted_range_is_always_empty() {
        let records = properties();
        let spec = FilterSpec::new().between("price", Some(250.0), Some(50.0));
        assert_eq!(apply(&records, "", &spec), Vec::<i64>::new());
    }

    #[test]
    fn test_non_finite_bounds_are_dropped() {
        let records = properties();
        let spec = FilterSpec::new().between("price", Some(f64::NAN), None);
        assert!(spec.is_empty());

        let half = FilterSpec::new().between("price", Some(f64::INFINITY), Some(150.0));
        assert_eq!(half.len(), 1);
        assert_eq!(apply(&records, "", &half), vec![1]);
    }

    #[test]
    fn test_range_on_non_numeric_value_excludes() {
        let records = properties();
        let spec = FilterSpec::new().between("type.name", Some(0.0), None);
        assert_eq!(apply(&records, "", &spec), Vec::<i64>::new());
    }

    #[test]
    fn test_equals_on_missing_path_excludes() {
        // a record with no account never matches an active account filter
        let users = vec![
            json!({ "id": 1, "account": { "approved": true } }),
            json!({ "id": 2, "account": null }),
        ];
        let spec = FilterSpec::new().equals("account.approved", true);
        let searchable: Vec<FieldPath> = Vec::new();
        let pred = predicate("", &searchable, &spec);
        let kept: Vec<i64> = users
            .iter()
            .filter(|r| pred(*r))
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(kept, vec![1]);
    }

    #[test]
    fn test_filters_and_search_compose_conjunctively() {
        let records = properties();
        let spec = FilterSpec::new().between("price", Some(150.0), None);
        assert_eq!(apply(&records, "terrain", &spec), vec![3]);
        assert_eq!(apply(&records, "appartement", &spec), Vec::<i64>::new());
    }
}
