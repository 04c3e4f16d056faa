//! Logical request → endpoint mapping for the photo API.
//!
//! # Design
//! A `Route` is a pure description of one API call; `parts` maps it to a
//! path and query pairs without side effects. The consumer key is supplied
//! by the caller (it lives on `PxClient`, injected at construction) rather
//! than being baked in here.

use crate::model::PhotoId;

/// 1-based page number for paginated endpoints.
pub type Page = u32;

/// Feed selector for the photo listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Popular,
    HighestRated,
    Upcoming,
    Editors,
    FreshToday,
    FreshYesterday,
    FreshWeek,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Popular => "popular",
            Feature::HighestRated => "highest_rated",
            Feature::Upcoming => "upcoming",
            Feature::Editors => "editors",
            Feature::FreshToday => "fresh_today",
            Feature::FreshYesterday => "fresh_yesterday",
            Feature::FreshWeek => "fresh_week",
        }
    }
}

/// Requested rendition size for photo detail fetches, integer-coded on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Tiny,
    Small,
    Medium,
    Large,
    XLarge,
}

impl ImageSize {
    pub fn code(self) -> u8 {
        match self {
            ImageSize::Tiny => 1,
            ImageSize::Small => 2,
            ImageSize::Medium => 3,
            ImageSize::Large => 4,
            ImageSize::XLarge => 5,
        }
    }
}

/// One logical API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Photos { page: Page },
    PhotoDetail { id: PhotoId, size: ImageSize },
    Comments { id: PhotoId, page: Page },
}

impl Route {
    /// Endpoint path relative to the API base, with a leading slash.
    pub fn path(&self) -> String {
        match self {
            Route::Photos { .. } => "/photos".to_string(),
            Route::PhotoDetail { id, .. } => format!("/photos/{id}"),
            Route::Comments { id, .. } => format!("/photos/{id}/comments"),
        }
    }

    /// Query pairs for this route. Values are unencoded; the client encodes
    /// them when assembling the final URL.
    pub fn query(&self, consumer_key: &str, feature: Feature) -> Vec<(&'static str, String)> {
        match self {
            Route::Photos { page } => vec![
                ("consumer_key", consumer_key.to_string()),
                ("page", page.to_string()),
                ("feature", feature.as_str().to_string()),
            ],
            Route::PhotoDetail { size, .. } => vec![
                ("consumer_key", consumer_key.to_string()),
                ("image_size", size.code().to_string()),
            ],
            Route::Comments { page, .. } => vec![
                ("consumer_key", consumer_key.to_string()),
                ("comments_page", page.to_string()),
                ("comments", "1".to_string()),
            ],
        }
    }
}
