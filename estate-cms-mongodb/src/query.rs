//! Query translation from filter expressions to MongoDB query syntax.
//!
//! This module translates the repository's abstract query expressions into
//! MongoDB BSON documents for execution by the MongoDB query engine.

use bson::{Bson, Document, doc};

use estate_cms_core::{
    error::{RepositoryError, RepositoryResult},
    query::{Expr, FieldOp, QueryVisitor, Sort, SortDirection},
};

/// Translates query expressions into MongoDB query documents.
pub(crate) struct MongoQueryTranslator;

impl MongoQueryTranslator {
    /// Builds the filter document for `filter`; `None` matches every document.
    pub fn filter(filter: Option<&Expr>) -> RepositoryResult<Document> {
        match filter {
            Some(expr) => MongoQueryTranslator.visit_expr(expr),
            None => Ok(doc! {}),
        }
    }

    /// Builds an ordered sort document, most significant key first.
    pub fn sort(sort: &[Sort]) -> Document {
        Document::from_iter(sort.iter().map(|key| {
            (
                key.field.clone(),
                Bson::Int32(match key.direction {
                    SortDirection::Asc => 1,
                    SortDirection::Desc => -1,
                }),
            )
        }))
    }

    fn visit_all(&mut self, exprs: &[Expr]) -> RepositoryResult<Vec<Document>> {
        exprs
            .iter()
            .map(|expr| self.visit_expr(expr))
            .collect()
    }
}

fn as_array(value: &Bson) -> Bson {
    match value {
        Bson::Array(_) => value.clone(),
        other => Bson::Array(vec![other.clone()]),
    }
}

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = RepositoryError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        // MongoDB rejects an empty `$and`
        if exprs.is_empty() {
            return Ok(doc! {});
        }

        Ok(doc! { "$and": self.visit_all(exprs)? })
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        // An empty disjunction matches nothing
        if exprs.is_empty() {
            return Ok(doc! { "$nor": vec![Document::new()] });
        }

        Ok(doc! { "$or": self.visit_all(exprs)? })
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(doc! { "$nor": vec![self.visit_expr(expr)?] })
    }

    fn visit_exists(&mut self, field: &str, should_exist: bool) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: { "$exists": should_exist },
        })
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: match op {
                FieldOp::Eq => doc! { "$eq": value },
                FieldOp::Ne => doc! { "$ne": value },
                FieldOp::Gt => doc! { "$gt": value },
                FieldOp::Gte => doc! { "$gte": value },
                FieldOp::Lt => doc! { "$lt": value },
                FieldOp::Lte => doc! { "$lte": value },
                FieldOp::Contains => match value {
                    Bson::String(s) => doc! { "$regex": regex::escape(s), "$options": "i" },
                    other => doc! { "$eq": other },
                },
                FieldOp::AnyOf => doc! { "$in": as_array(value) },
                FieldOp::NoneOf => doc! { "$nin": as_array(value) },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_cms_core::query::Filter;

    fn translate(expr: Expr) -> Document {
        MongoQueryTranslator::filter(Some(&expr)).unwrap()
    }

    #[test]
    fn missing_filter_matches_everything() {
        assert_eq!(MongoQueryTranslator::filter(None).unwrap(), doc! {});
    }

    #[test]
    fn comparisons_use_operator_documents() {
        assert_eq!(translate(Filter::eq("active", true)), doc! { "active": { "$eq": true } });
        assert_eq!(translate(Filter::gte("rating", 4)), doc! { "rating": { "$gte": 4 } });
    }

    #[test]
    fn contains_escapes_regex_metacharacters() {
        assert_eq!(
            translate(Filter::contains("price", "₹1.2 Cr+")),
            doc! { "price": { "$regex": "₹1\\.2 Cr\\+", "$options": "i" } }
        );
    }

    #[test]
    fn membership_always_sends_an_array() {
        assert_eq!(
            translate(Filter::any_of("status", ["Available", "Sold Out"])),
            doc! { "status": { "$in": ["Available", "Sold Out"] } }
        );
        assert_eq!(
            translate(Expr::field("status".into(), FieldOp::NoneOf, "Sold Out".into())),
            doc! { "status": { "$nin": ["Sold Out"] } }
        );
    }

    #[test]
    fn logical_operators() {
        assert_eq!(
            translate(Filter::eq("active", true).and(Filter::exists("image_url"))),
            doc! { "$and": [{ "active": { "$eq": true } }, { "image_url": { "$exists": true } }] }
        );
        assert_eq!(
            translate(Filter::eq("featured", true).not()),
            doc! { "$nor": [{ "featured": { "$eq": true } }] }
        );
        assert_eq!(translate(Filter::and([])), doc! {});
        assert_eq!(translate(Filter::or([])), doc! { "$nor": [{}] });
    }

    #[test]
    fn sort_document_keeps_key_order() {
        let sort = MongoQueryTranslator::sort(&[Sort::desc("featured"), Sort::asc("display_order")]);

        assert_eq!(
            sort.keys().collect::<Vec<_>>(),
            vec!["featured", "display_order"]
        );
        assert_eq!(sort, doc! { "featured": -1, "display_order": 1 });
    }
}
