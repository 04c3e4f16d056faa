//! Synchronous client core for a 500px-style photo API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `PxClient` is stateless — base URL, injected consumer key, feed feature.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `PhotoFeed`/`CommentFeed` wrap the client with single-flight paginated
//!   merging; because all mutation goes through `&mut self`, the `Idle`/
//!   `Loading` state is the only exclusion mechanism needed.
//! - List decoding is lenient: malformed elements are dropped, never failing
//!   a whole page. Single-object decoding is strict.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod decode;
pub mod error;
pub mod feed;
pub mod http;
pub mod image;
pub mod model;
pub mod router;

pub use client::{PxClient, BASE_URL};
pub use decode::{DecodableFromCollection, DecodableFromObject};
pub use error::{ApiError, FeedError};
pub use feed::{CommentFeed, LoadState, PageMerge, PhotoCollection, PhotoFeed};
pub use http::{HttpRequest, HttpResponse, ResponseMeta};
pub use image::{parse_image, FetchSlot, ImageCache};
pub use model::{Category, Comment, PhotoId, PhotoInfo};
pub use router::{Feature, ImageSize, Page, Route};
