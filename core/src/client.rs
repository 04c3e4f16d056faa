//! Stateless HTTP request builder and response parser for the photo API.
//!
//! # Design
//! `PxClient` holds only immutable configuration: the base URL, the consumer
//! key (injected at construction, never a compiled-in literal) and the feed
//! feature. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! caller executes the actual HTTP round-trip in between, keeping the core
//! deterministic and free of I/O dependencies.

use serde_json::Value;
use url::Url;

use crate::decode::{decode_collection, decode_object};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::model::{Comment, PhotoId, PhotoInfo};
use crate::router::{Feature, ImageSize, Page, Route};

/// Production API endpoint.
pub const BASE_URL: &str = "https://api.500px.com/v1";

/// Stateless client for the photo API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct PxClient {
    base_url: Url,
    consumer_key: String,
    feature: Feature,
}

impl PxClient {
    /// Client for the production endpoint. The consumer key is the caller's
    /// credential; there is no default.
    pub fn new(consumer_key: impl Into<String>) -> Self {
        // BASE_URL is a static, known-valid URL.
        let base_url = Url::parse(BASE_URL).expect("static base URL parses");
        Self::with_base_url(base_url, consumer_key)
    }

    /// Client against an arbitrary endpoint, e.g. a local test server.
    pub fn with_base_url(base_url: Url, consumer_key: impl Into<String>) -> Self {
        Self {
            base_url,
            consumer_key: consumer_key.into(),
            feature: Feature::FreshWeek,
        }
    }

    /// Select the feed served by `build_photos`. Defaults to `FreshWeek`.
    pub fn feature(mut self, feature: Feature) -> Self {
        self.feature = feature;
        self
    }

    pub fn build_photos(&self, page: Page) -> HttpRequest {
        self.build(Route::Photos { page })
    }

    pub fn build_photo_detail(&self, id: PhotoId, size: ImageSize) -> HttpRequest {
        self.build(Route::PhotoDetail { id, size })
    }

    pub fn build_comments(&self, id: PhotoId, page: Page) -> HttpRequest {
        self.build(Route::Comments { id, page })
    }

    /// Direct image fetch; image URLs arrive fully formed in photo records.
    pub fn build_image(&self, url: &str) -> HttpRequest {
        HttpRequest { url: url.to_string() }
    }

    pub fn parse_photos(&self, response: &HttpResponse) -> Result<Vec<PhotoInfo>, ApiError> {
        let root = json_root(response)?;
        decode_collection(&response.meta(), &root)
    }

    pub fn parse_photo_detail(&self, response: &HttpResponse) -> Result<PhotoInfo, ApiError> {
        let root = json_root(response)?;
        decode_object(&response.meta(), &root)
    }

    pub fn parse_comments(&self, response: &HttpResponse) -> Result<Vec<Comment>, ApiError> {
        let root = json_root(response)?;
        decode_collection(&response.meta(), &root)
    }

    fn build(&self, route: Route) -> HttpRequest {
        let mut url = self.base_url.clone();
        let path = format!("{}{}", url.path().trim_end_matches('/'), route.path());
        url.set_path(&path);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in route.query(&self.consumer_key, self.feature) {
                pairs.append_pair(key, &value);
            }
        }
        HttpRequest { url: url.into() }
    }
}

/// Status check plus JSON parse, shared by every `parse_*` method.
fn json_root(response: &HttpResponse) -> Result<Value, ApiError> {
    if !(200..300).contains(&response.status) {
        return Err(ApiError::Status {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }
    serde_json::from_slice(&response.body).map_err(ApiError::JsonSerialization)
}
