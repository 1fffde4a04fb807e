//! Sellable inventory: villas, budget homes, plots and upcoming launches.

use bson::DateTime;
use serde::{Deserialize, Serialize};

use estate_cms_macros::Document;

use super::default_true;

/// A villa in one of the company's projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "properties")]
pub struct Property {
    pub villa_number: String,
    /// `Available`, `Sold Out` or `Coming Soon`.
    pub status: String,
    /// Plot size in square yards.
    pub plot_size: i64,
    /// Built-up area in square feet.
    pub built_up_area: i64,
    pub facing: String,
    pub location: String,
    pub price_range: String,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub enquiry_link: String,
    pub map_link: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "budget_homes")]
pub struct BudgetHome {
    pub project_name: String,
    pub location: String,
    pub status: String,
    pub plot_size: Option<i64>,
    pub built_up_area: Option<i64>,
    pub facing: Option<String>,
    pub price: Option<String>,
    pub price_range: Option<String>,
    /// `Villa`, `Independent House`, ...
    pub property_type: Option<String>,
    #[serde(default)]
    pub description: String,
    pub thumbnail_image: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub youtube_link: Option<String>,
    pub enquiry_link: Option<String>,
    pub map_link: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// An open plot for sale, priced per square yard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "plots")]
pub struct Plot {
    pub title: String,
    pub location: String,
    pub status: String,
    pub area_sqyds: Option<f64>,
    pub area_sqft: Option<f64>,
    pub price_per_sqyd: Option<f64>,
    pub facing: Option<String>,
    pub price: Option<String>,
    pub price_range: Option<String>,
    #[serde(default)]
    pub description: String,
    pub main_image: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    pub youtube_link: Option<String>,
    pub enquiry_link: Option<String>,
    pub map_link: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "upcoming_projects")]
pub struct UpcomingProject {
    pub title: String,
    pub description: String,
    pub launch_date: Option<DateTime>,
    pub location: String,
    pub image_url: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub early_access_link: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}
