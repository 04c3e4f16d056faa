//! Paginated feed synchronization: load pages, merge results, dedup by id.
//!
//! # Design
//! A feed owns its aggregate and admits at most one in-flight page load; the
//! `Idle`/`Loading` state is the sole mutual-exclusion mechanism. Because the
//! host performs the I/O between `begin_load` and `complete_load`, every
//! merge runs on whichever context owns the feed (`&mut self`), so no locks
//! are needed. On any failure the aggregate and page cursor are left exactly
//! as they were — the same page is safe to retry, and no retry is automatic.
//!
//! `PhotoCollection` pairs an insertion-ordered id sequence with an id→record
//! map, updated together: positional access for a grid, set semantics for
//! dedup. A re-fetched id keeps its first-inserted value.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ops::Range;

use tracing::debug;

use crate::client::PxClient;
use crate::error::{ApiError, FeedError};
use crate::http::{HttpRequest, HttpResponse};
use crate::model::{Comment, PhotoId, PhotoInfo};
use crate::router::Page;

/// Insertion-ordered, id-deduplicated photo aggregate.
#[derive(Debug, Default)]
pub struct PhotoCollection {
    order: Vec<PhotoId>,
    by_id: HashMap<PhotoId, PhotoInfo>,
}

impl PhotoCollection {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Record at a stable positional index (insertion order).
    pub fn get(&self, index: usize) -> Option<&PhotoInfo> {
        self.order.get(index).and_then(|id| self.by_id.get(id))
    }

    pub fn by_id(&self, id: PhotoId) -> Option<&PhotoInfo> {
        self.by_id.get(&id)
    }

    /// Iterate records in the order they were first inserted.
    pub fn iter(&self) -> impl Iterator<Item = &PhotoInfo> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    /// Insert-if-absent: a duplicate id keeps the first-inserted value.
    /// Returns whether the record was added.
    fn insert(&mut self, photo: PhotoInfo) -> bool {
        match self.by_id.entry(photo.id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                self.order.push(photo.id);
                slot.insert(photo);
                true
            }
        }
    }

    fn clear(&mut self) {
        self.order.clear();
        self.by_id.clear();
    }
}

/// Load state of one feed instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading { page: Page },
}

/// Outcome of a successfully merged page, for incremental UI updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMerge {
    /// The page that was loaded.
    pub page: Page,
    /// Positional index range of freshly inserted items.
    pub inserted: Range<usize>,
    /// True when the load was a page-1 full refresh (aggregate was reset).
    pub refreshed: bool,
}

/// Synchronizer for the paginated photo listing.
#[derive(Debug)]
pub struct PhotoFeed {
    client: PxClient,
    photos: PhotoCollection,
    state: LoadState,
    current_page: Page,
}

impl PhotoFeed {
    pub fn new(client: PxClient) -> Self {
        Self {
            client,
            photos: PhotoCollection::default(),
            state: LoadState::Idle,
            current_page: 0,
        }
    }

    pub fn photos(&self) -> &PhotoCollection {
        &self.photos
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Last successfully loaded page; 0 until a load succeeds.
    pub fn current_page(&self) -> Page {
        self.current_page
    }

    /// Full refresh: reload from page 1.
    pub fn begin_refresh(&mut self) -> Result<HttpRequest, FeedError> {
        self.begin_load(1)
    }

    /// Fetch the page after the last successful one.
    pub fn begin_next_page(&mut self) -> Result<HttpRequest, FeedError> {
        self.begin_load(self.current_page + 1)
    }

    /// Start loading `page` (1-based). Rejected while another load is in
    /// flight; the host must call `complete_load` with the round-trip's
    /// outcome before the next `begin_*`.
    pub fn begin_load(&mut self, page: Page) -> Result<HttpRequest, FeedError> {
        if let LoadState::Loading { .. } = self.state {
            return Err(FeedError::LoadInFlight);
        }
        self.state = LoadState::Loading { page };
        debug!(page, "photo page load started");
        Ok(self.client.build_photos(page))
    }

    /// Finish the in-flight load. Always returns the feed to `Idle`. On
    /// success page 1 resets the aggregate, any page merges with dedup by id,
    /// and the cursor advances; on failure nothing changes.
    pub fn complete_load(
        &mut self,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<PageMerge, FeedError> {
        let LoadState::Loading { page } = self.state else {
            return Err(FeedError::NoLoadInFlight);
        };
        self.state = LoadState::Idle;

        let response = outcome?;
        let incoming = self.client.parse_photos(&response)?;

        if page == 1 {
            self.photos.clear();
        }
        let before = self.photos.len();
        for photo in incoming {
            self.photos.insert(photo);
        }
        self.current_page = page;
        debug!(page, inserted = self.photos.len() - before, "photo page merged");

        Ok(PageMerge {
            page,
            inserted: before..self.photos.len(),
            refreshed: page == 1,
        })
    }
}

/// Synchronizer for one photo's comment thread.
///
/// Comments carry no identity, so pages past the first append in payload
/// order without deduplication. The single-flight and failure rules match
/// `PhotoFeed`.
#[derive(Debug)]
pub struct CommentFeed {
    client: PxClient,
    photo_id: PhotoId,
    comments: Vec<Comment>,
    state: LoadState,
    current_page: Page,
}

impl CommentFeed {
    pub fn new(client: PxClient, photo_id: PhotoId) -> Self {
        Self {
            client,
            photo_id,
            comments: Vec::new(),
            state: LoadState::Idle,
            current_page: 0,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn begin_refresh(&mut self) -> Result<HttpRequest, FeedError> {
        self.begin_load(1)
    }

    pub fn begin_next_page(&mut self) -> Result<HttpRequest, FeedError> {
        self.begin_load(self.current_page + 1)
    }

    pub fn begin_load(&mut self, page: Page) -> Result<HttpRequest, FeedError> {
        if let LoadState::Loading { .. } = self.state {
            return Err(FeedError::LoadInFlight);
        }
        self.state = LoadState::Loading { page };
        debug!(photo_id = self.photo_id, page, "comment page load started");
        Ok(self.client.build_comments(self.photo_id, page))
    }

    pub fn complete_load(
        &mut self,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<PageMerge, FeedError> {
        let LoadState::Loading { page } = self.state else {
            return Err(FeedError::NoLoadInFlight);
        };
        self.state = LoadState::Idle;

        let response = outcome?;
        let incoming = self.client.parse_comments(&response)?;

        if page == 1 {
            self.comments.clear();
        }
        let before = self.comments.len();
        self.comments.extend(incoming);
        self.current_page = page;

        Ok(PageMerge {
            page,
            inserted: before..self.comments.len(),
            refreshed: page == 1,
        })
    }
}
