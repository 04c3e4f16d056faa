//! Image fetch support: response validation, a bounded cache, and per-slot
//! cancellation.
//!
//! # Design
//! Pixel decoding is the host's concern — `parse_image` validates the
//! transport layers and hands the bytes to a caller-supplied decoder, so the
//! core stays free of image-format dependencies. The cache stores decoded
//! images behind `Arc`, which keeps eviction safe for in-flight readers.
//! `FetchSlot` models a reusable visual slot (a grid cell): reassigning the
//! slot cancels the superseded fetch so a stale image is never applied.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Validate an image response and decode it with the host-supplied decoder.
///
/// Classification order: non-success status, then an unusable body
/// (`DataSerialization`), then a decoder refusal (`ImageSerialization`).
pub fn parse_image<I>(
    response: &HttpResponse,
    decode: impl FnOnce(&[u8]) -> Option<I>,
) -> Result<I, ApiError> {
    if !(200..300).contains(&response.status) {
        return Err(ApiError::Status {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }
    if response.body.is_empty() {
        return Err(ApiError::DataSerialization("empty response body".to_string()));
    }
    decode(&response.body)
        .ok_or_else(|| ApiError::ImageSerialization("decoder produced no image".to_string()))
}

/// Capacity-bounded, thread-safe key→image store.
///
/// Eviction drops the oldest-inserted key once `capacity` is exceeded.
/// Values are shared as `Arc`, so a reader holding one is unaffected by a
/// later eviction. Concurrent `get`/`put` are safe from any thread.
#[derive(Debug)]
pub struct ImageCache<I> {
    capacity: usize,
    inner: Mutex<CacheInner<I>>,
}

#[derive(Debug)]
struct CacheInner<I> {
    map: HashMap<String, Arc<I>>,
    order: VecDeque<String>,
}

impl<I> ImageCache<I> {
    /// `capacity` is clamped to at least one entry.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<I>> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.map.get(key).cloned()
    }

    /// Store an image, returning the shared handle. Re-putting an existing
    /// key replaces the value without changing its eviction position.
    pub fn put(&self, key: impl Into<String>, image: I) -> Arc<I> {
        let key = key.into();
        let image = Arc::new(image);
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.map.insert(key.clone(), Arc::clone(&image)).is_none() {
            inner.order.push_back(key);
            while inner.order.len() > self.capacity {
                if let Some(oldest) = inner.order.pop_front() {
                    inner.map.remove(&oldest);
                }
            }
        }
        image
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cancellation handle for a reusable visual slot.
///
/// `begin` cancels whatever fetch the slot was previously running and issues
/// a fresh token for the new one. The host checks `is_cancelled` on the
/// token before applying a fetched image. Cancellation is idempotent and
/// safe to trigger after the fetch has completed.
#[derive(Debug, Default)]
pub struct FetchSlot {
    current: CancellationToken,
}

impl FetchSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassign the slot: the previous fetch's token is cancelled and a new
    /// one is returned for the fetch about to start.
    pub fn begin(&mut self) -> CancellationToken {
        self.current.cancel();
        self.current = CancellationToken::new();
        self.current.clone()
    }

    /// Cancel the in-flight fetch, if any.
    pub fn cancel(&mut self) {
        self.current.cancel();
    }
}
