//! Canonical listing queries of the public site.
//!
//! Public listings only ever show `active` documents; each collection has a fixed
//! ordering. These helpers build the [`Query`] a listing endpoint hands to
//! [`Repository::get_all`](estate_cms_core::repository::Repository::get_all).

use estate_cms_core::query::{Expr, Filter, Query, Sort, SortDirection};

/// Matches documents whose `active` flag is set.
pub fn active() -> Expr {
    Filter::eq("active", true)
}

/// Active documents in ascending `display_order`, as used by the about, team
/// and amenity pages.
pub fn by_display_order() -> Query {
    Query::builder()
        .filter(active())
        .sort("display_order", SortDirection::Asc)
        .build()
}

/// Optional criteria of the property listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    /// Exact status, e.g. `Available`.
    pub status: Option<String>,
    /// Exact facing, e.g. `East`.
    pub facing: Option<String>,
    /// Case-insensitive fragment of the location.
    pub location: Option<String>,
    pub featured: Option<bool>,
    pub skip: usize,
    pub limit: Option<usize>,
}

/// Active properties, featured ones first, then newest first.
pub fn properties(filter: &PropertyFilter) -> Query {
    let mut conditions = vec![active()];

    if let Some(status) = &filter.status {
        conditions.push(Filter::eq("status", status.as_str()));
    }
    if let Some(facing) = &filter.facing {
        conditions.push(Filter::eq("facing", facing.as_str()));
    }
    if let Some(location) = &filter.location {
        conditions.push(Filter::contains("location", location.as_str()));
    }
    if let Some(featured) = filter.featured {
        conditions.push(Filter::eq("featured", featured));
    }

    Query {
        filter: Some(Filter::and(conditions)),
        sort: vec![Sort::desc("featured"), Sort::desc("created_at")],
        offset: Some(filter.skip),
        limit: filter.limit,
    }
}

/// Active banners by `display_order`, newest first among equals.
pub fn home_banners() -> Query {
    Query::builder()
        .filter(active())
        .sort("display_order", SortDirection::Asc)
        .sort("created_at", SortDirection::Desc)
        .build()
}

/// Active NRI content by `display_order`, optionally for one section only.
pub fn nri_content(section: Option<&str>) -> Query {
    let mut filter = active();
    if let Some(section) = section {
        filter = filter.and(Filter::eq("section_name", section));
    }

    Query {
        filter: Some(filter),
        sort: vec![Sort::asc("display_order")],
        ..Query::default()
    }
}

/// Active upcoming projects, soonest launch first.
pub fn upcoming_projects() -> Query {
    Query::builder()
        .filter(active())
        .sort("launch_date", SortDirection::Asc)
        .build()
}

pub fn testimonials(featured: Option<bool>) -> Query {
    Query {
        filter: Some(with_featured(active(), featured)),
        sort: vec![Sort::desc("featured"), Sort::asc("display_order")],
        ..Query::default()
    }
}

/// Active news and events, featured first, then most recently published.
pub fn news_events(category: Option<&str>, featured: Option<bool>, skip: usize, limit: usize) -> Query {
    let mut filter = active();
    if let Some(category) = category {
        filter = filter.and(Filter::eq("category", category));
    }

    Query {
        filter: Some(with_featured(filter, featured)),
        sort: vec![Sort::desc("featured"), Sort::desc("publish_date")],
        offset: Some(skip),
        limit: Some(limit),
    }
}

/// Active blog posts, optionally restricted to one category or tag.
pub fn blogs(category: Option<&str>, tag: Option<&str>) -> Query {
    let mut filter = active();
    if let Some(category) = category {
        filter = filter.and(Filter::eq("category", category));
    }
    if let Some(tag) = tag {
        filter = filter.and(Filter::eq("tags", tag));
    }

    Query {
        filter: Some(filter),
        sort: vec![Sort::desc("featured"), Sort::desc("publish_date")],
        ..Query::default()
    }
}

/// Every contact submission, newest first, for the admin inbox.
pub fn contact_submissions() -> Query {
    Query::builder()
        .sort("created_at", SortDirection::Desc)
        .build()
}

fn with_featured(filter: Expr, featured: Option<bool>) -> Expr {
    match featured {
        Some(featured) => filter.and(Filter::eq("featured", featured)),
        None => filter,
    }
}
