//! Site-wide settings, administrators and inbound enquiries.

use bson::DateTime;
use serde::{Deserialize, Serialize};

use estate_cms_macros::Document;

use super::default_true;

fn default_company_name() -> String {
    "KMK Homes".to_string()
}

/// The company's contact details; the site keeps a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "contact_info")]
pub struct ContactInfo {
    #[serde(default = "default_company_name")]
    pub company_name: String,
    pub phone: String,
    pub email: String,
    pub whatsapp: String,
    pub address: String,
    pub map_embed_url: String,
    pub business_hours: String,
}

/// Partial update of [`ContactInfo`]; turn it into a patch with
/// `Patch::from_serializable`, which skips the `None` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfoUpdate {
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    pub map_embed_url: Option<String>,
    pub business_hours: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "site_settings")]
pub struct SiteSetting {
    pub setting_key: String,
    pub setting_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettingUpdate {
    pub setting_value: String,
}

fn default_role() -> String {
    "admin".to_string()
}

/// An account of the admin panel. Hashing happens before the record gets here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "admin_users")]
pub struct AdminUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// `admin` or `editor`.
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_status() -> String {
    "new".to_string()
}

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "contact_submissions")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub property_interest: Option<String>,
    pub visit_date: Option<DateTime>,
    pub message: String,
    /// `new`, `contacted` or `closed`.
    #[serde(default = "default_status")]
    pub status: String,
}
