//! Editorial content shown across the public site.

use bson::DateTime;
use serde::{Deserialize, Serialize};

use estate_cms_macros::Document;

use super::default_true;

/// A slide of the home page hero carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "home_banners")]
pub struct HomeBanner {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "about_sections")]
pub struct AboutSection {
    /// `company_story`, `mission`, `vision`, ...
    pub section_name: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "team_members")]
pub struct TeamMember {
    pub name: String,
    pub position: String,
    pub bio: String,
    pub image_url: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "amenities")]
pub struct Amenity {
    pub title: String,
    pub description: String,
    /// Name of the icon the front-end renders.
    pub icon_name: String,
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub display_order: i32,
}

fn default_rating() -> i32 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "testimonials")]
pub struct Testimonial {
    pub name: String,
    pub location: String,
    pub testimonial: String,
    pub image_url: String,
    /// 1 to 5 stars.
    #[serde(default = "default_rating")]
    pub rating: i32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "news_events")]
pub struct NewsEvent {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: String,
    /// `News`, `Events`, `Projects` or `Awards`.
    pub category: String,
    pub author: String,
    #[serde(default = "DateTime::now")]
    pub publish_date: DateTime,
    pub event_date: Option<DateTime>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// A block of the NRI corner page (services, benefits, process, legal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "nri_content")]
pub struct NriContent {
    pub section_name: String,
    pub title: String,
    pub content: String,
    pub icon_name: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "blogs")]
pub struct Blog {
    pub title: String,
    /// URL path segment, unique per post.
    pub slug: String,
    pub excerpt: String,
    /// HTML body.
    pub content: String,
    pub featured_image: Option<String>,
    pub category: String,
    pub author: String,
    #[serde(default = "DateTime::now")]
    pub publish_date: DateTime,
    #[serde(default)]
    pub tags: Vec<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub display_order: i32,
}
