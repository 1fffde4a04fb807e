//! Query expression evaluation for in-memory document filtering and sorting.
//!
//! The semantics follow what MongoDB does for the same filter, so the two
//! backends agree on the queries the repository issues:
//!
//! - a missing field compares like `null` for `Eq`, `Ne` and `NoneOf`;
//! - equality against an array field matches if any element is equal;
//! - `Contains` is a case-insensitive substring test, per element on arrays;
//! - sorting across types follows BSON type order, with missing fields first.

use bson::{Bson, DateTime, Document as BsonDocument, oid::ObjectId};
use std::{cmp::Ordering, collections::HashMap};

use estate_cms_core::{
    error::RepositoryError,
    query::{Expr, FieldOp, QueryVisitor, Sort, SortDirection},
};

/// Type-erased, comparable representation of BSON values.
///
/// Numeric types are normalized to f64 so `Int32(2)`, `Int64(2)` and
/// `Double(2.0)` compare equal.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Number(f64),
    String(&'a str),
    Map(HashMap<&'a str, Comparable<'a>>),
    Array(Vec<Comparable<'a>>),
    ObjectId(ObjectId),
    Bool(bool),
    DateTime(DateTime),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(f64::from(*value)),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::ObjectId(value) => Comparable::ObjectId(*value),
            Bson::Array(arr) => Comparable::Array(arr.iter().map(Comparable::from).collect()),
            Bson::Document(doc) => Comparable::Map(
                doc.iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect(),
            ),
            // Other types are not comparable
            _ => Comparable::Null,
        }
    }
}

impl Comparable<'_> {
    /// Position in BSON's cross-type sort order.
    fn type_rank(&self) -> u8 {
        match self {
            Comparable::Null => 0,
            Comparable::Number(_) => 1,
            Comparable::String(_) => 2,
            Comparable::Map(_) => 3,
            Comparable::Array(_) => 4,
            Comparable::ObjectId(_) => 5,
            Comparable::Bool(_) => 6,
            Comparable::DateTime(_) => 7,
        }
    }

    /// Total order used for sorting: by type rank first, then by value.
    pub(crate) fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // NaN sorts before every other number
            (Comparable::Number(a), Comparable::Number(b)) => b
                .is_nan()
                .cmp(&a.is_nan())
                .then_with(|| a.partial_cmp(b).unwrap_or(Ordering::Equal)),
            _ => self
                .partial_cmp(other)
                .unwrap_or_else(|| self.type_rank().cmp(&other.type_rank())),
        }
    }

    /// Substring test for strings, applied per element for arrays.
    fn contains(&self, needle: &Comparable<'_>) -> bool {
        match (self, needle) {
            (Comparable::String(haystack), Comparable::String(needle)) => haystack
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            (Comparable::Array(items), needle) => items.iter().any(|item| item.contains(needle)),
            (field, needle) => field == needle,
        }
    }

    fn matches_eq(&self, value: &Comparable<'_>) -> bool {
        match self {
            Comparable::Array(items) if !matches!(value, Comparable::Array(_)) => {
                items.iter().any(|item| item == value)
            }
            _ => self == value,
        }
    }
}

impl PartialEq for Comparable<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for Comparable<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => Some(Ordering::Equal),
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Evaluates filter expressions against one document.
pub(crate) struct DocumentEvaluator<'a> {
    document: &'a BsonDocument,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a BsonDocument) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> bool {
        match self.visit_expr(expr) {
            Ok(matched) => matched,
            Err(err) => match err {},
        }
    }

    /// Returns `true` if `document` matches `filter`; no filter matches everything.
    pub fn matches(document: &'a BsonDocument, filter: Option<&Expr>) -> bool {
        filter.is_none_or(|expr| DocumentEvaluator::new(document).evaluate(expr))
    }
}

/// Orders two documents by a list of sort keys, most significant first.
pub(crate) fn compare_documents(a: &BsonDocument, b: &BsonDocument, sort: &[Sort]) -> Ordering {
    sort.iter()
        .map(|key| {
            let left = a.get(&key.field).map_or(Comparable::Null, Comparable::from);
            let right = b.get(&key.field).map_or(Comparable::Null, Comparable::from);

            match key.direction {
                SortDirection::Asc => left.sort_cmp(&right),
                SortDirection::Desc => right.sort_cmp(&left),
            }
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Evaluation never fails; unsupported comparisons simply do not match.
pub(crate) enum Never {}

impl From<Never> for RepositoryError {
    fn from(never: Never) -> Self {
        match never {}
    }
}

impl QueryVisitor for DocumentEvaluator<'_> {
    type Output = bool;
    type Error = Never;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(!self.visit_expr(expr)?)
    }

    fn visit_exists(&mut self, field: &str, should_exist: bool) -> Result<Self::Output, Self::Error> {
        Ok(self.document.contains_key(field) == should_exist)
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        let field_value = self
            .document
            .get(field)
            .map_or(Comparable::Null, Comparable::from);
        let value = Comparable::from(value);
        let present = self.document.contains_key(field);

        Ok(match op {
            FieldOp::Eq => field_value.matches_eq(&value),
            FieldOp::Ne => !field_value.matches_eq(&value),
            FieldOp::Gt | FieldOp::Gte | FieldOp::Lt | FieldOp::Lte => {
                present
                    && match field_value.partial_cmp(&value) {
                        Some(ordering) => match op {
                            FieldOp::Gt => ordering == Ordering::Greater,
                            FieldOp::Gte => ordering != Ordering::Less,
                            FieldOp::Lt => ordering == Ordering::Less,
                            _ => ordering != Ordering::Greater,
                        },
                        None => false,
                    }
            }
            FieldOp::Contains => field_value.contains(&value),
            FieldOp::AnyOf => match &value {
                Comparable::Array(values) => values.iter().any(|candidate| field_value.matches_eq(candidate)),
                single => field_value.matches_eq(single),
            },
            FieldOp::NoneOf => match &value {
                Comparable::Array(values) => !values.iter().any(|candidate| field_value.matches_eq(candidate)),
                single => !field_value.matches_eq(single),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use estate_cms_core::query::Filter;

    fn matches(document: &BsonDocument, expr: Expr) -> bool {
        DocumentEvaluator::matches(document, Some(&expr))
    }

    #[test]
    fn equality_normalizes_numeric_types() {
        let document = doc! { "display_order": 2_i64, "rating": 4.0 };

        assert!(matches(&document, Filter::eq("display_order", 2)));
        assert!(matches(&document, Filter::eq("rating", 4)));
        assert!(!matches(&document, Filter::eq("rating", 5)));
    }

    #[test]
    fn missing_field_equals_null_only() {
        let document = doc! { "title": "A" };

        assert!(matches(&document, Filter::eq("subtitle", Bson::Null)));
        assert!(!matches(&document, Filter::eq("subtitle", "x")));
        assert!(matches(&document, Filter::ne("subtitle", "x")));
        assert!(!matches(&document, Filter::gt("subtitle", 1)));
    }

    #[test]
    fn contains_ignores_case_on_strings() {
        let document = doc! { "location": "Kompally, Hyderabad" };

        assert!(matches(&document, Filter::contains("location", "hyderabad")));
        assert!(matches(&document, Filter::contains("location", "KOMP")));
        assert!(!matches(&document, Filter::contains("location", "Bangalore")));
    }

    #[test]
    fn array_fields_match_on_any_element() {
        let document = doc! { "tags": ["Luxury Villas", "Hyderabad"] };

        assert!(matches(&document, Filter::eq("tags", "Hyderabad")));
        assert!(matches(&document, Filter::contains("tags", "villas")));
        assert!(!matches(&document, Filter::contains("tags", "Chennai")));
        assert!(matches(&document, Filter::any_of("tags", ["Chennai", "Hyderabad"])));
        assert!(matches(&document, Filter::none_of("tags", ["Chennai"])));
    }

    #[test]
    fn logical_combinations() {
        let document = doc! { "active": true, "featured": false };

        assert!(matches(&document, Filter::eq("active", true).and(Filter::eq("featured", false))));
        assert!(matches(&document, Filter::eq("featured", true).or(Filter::eq("active", true))));
        assert!(matches(&document, Filter::eq("featured", true).not()));
        assert!(matches(&document, Filter::and([])));
        assert!(matches(&document, Filter::exists("active")));
        assert!(matches(&document, Filter::not_exists("deleted")));
    }

    #[test]
    fn no_filter_matches_everything() {
        assert!(DocumentEvaluator::matches(&doc! {}, None));
    }

    #[test]
    fn multi_key_sort_breaks_ties_with_later_keys() {
        let a = doc! { "featured": true, "display_order": 2 };
        let b = doc! { "featured": true, "display_order": 1 };
        let c = doc! { "featured": false, "display_order": 0 };
        let sort = [Sort::desc("featured"), Sort::asc("display_order")];

        let mut documents = vec![&a, &c, &b];
        documents.sort_by(|x, y| compare_documents(x, y, &sort));

        assert_eq!(documents, vec![&b, &a, &c]);
    }

    #[test]
    fn missing_sort_field_orders_first_ascending() {
        let with = doc! { "launch_date": DateTime::from_millis(10) };
        let without = doc! {};

        assert_eq!(
            compare_documents(&without, &with, &[Sort::asc("launch_date")]),
            Ordering::Less
        );
    }

    #[test]
    fn nan_sorts_before_every_number() {
        let mut documents: Vec<BsonDocument> = (0..50)
            .map(|i| {
                let area = if i % 7 == 0 { f64::NAN } else { f64::from((i * 37) % 50) };
                doc! { "area_sqyds": area }
            })
            .collect();

        documents.sort_by(|a, b| compare_documents(a, b, &[Sort::asc("area_sqyds")]));

        let areas: Vec<f64> = documents
            .iter()
            .map(|document| document.get_f64("area_sqyds").unwrap())
            .collect();
        let nan_count = areas.iter().filter(|area| area.is_nan()).count();

        assert_eq!(nan_count, 8);
        assert!(areas[..nan_count].iter().all(|area| area.is_nan()));
        assert!(areas[nan_count..].windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
