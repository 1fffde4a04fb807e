//! Record types of the CMS, one per collection.
//!
//! Required fields are plain types, optional ones are `Option`s, and fields with a
//! default in the admin forms carry `#[serde(default)]` so partially filled
//! documents still load.

mod content;
mod listings;
mod site;

pub use content::{AboutSection, Amenity, Blog, HomeBanner, NewsEvent, NriContent, TeamMember, Testimonial};
pub use listings::{BudgetHome, Plot, Property, UpcomingProject};
pub use site::{AdminUser, ContactInfo, ContactInfoUpdate, ContactSubmission, SiteSetting, SiteSettingUpdate};

/// Every collection the CMS stores, in the order the admin dashboard lists them.
pub const COLLECTIONS: [&str; 16] = [
    "properties",
    "home_banners",
    "about_sections",
    "team_members",
    "amenities",
    "upcoming_projects",
    "testimonials",
    "news_events",
    "nri_content",
    "contact_info",
    "site_settings",
    "admin_users",
    "contact_submissions",
    "blogs",
    "budget_homes",
    "plots",
];

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_cms_core::document::Document;

    #[test]
    fn every_record_type_maps_to_a_listed_collection() {
        let names = [
            Property::collection_name(),
            HomeBanner::collection_name(),
            AboutSection::collection_name(),
            TeamMember::collection_name(),
            Amenity::collection_name(),
            UpcomingProject::collection_name(),
            Testimonial::collection_name(),
            NewsEvent::collection_name(),
            NriContent::collection_name(),
            ContactInfo::collection_name(),
            SiteSetting::collection_name(),
            AdminUser::collection_name(),
            ContactSubmission::collection_name(),
            Blog::collection_name(),
            BudgetHome::collection_name(),
            Plot::collection_name(),
        ];

        assert_eq!(names, COLLECTIONS);
    }
}
