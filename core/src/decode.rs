//! Generic decode capabilities for typed API responses.
//!
//! # Design
//! Two capabilities, implemented per model type, both taking the raw parsed
//! JSON value plus the HTTP metadata that produced it:
//!
//! - [`DecodableFromObject`] — a single typed object, usually nested under a
//!   key like `photo`. A failed decode is a hard error: the caller receives
//!   `ObjectSerialization`.
//! - [`DecodableFromCollection`] — a list of objects under a top-level array
//!   key. List decoding is deliberately lenient: elements that fail to
//!   decode are dropped, never failing the whole batch, so one malformed
//!   record in a page does not blank the screen. Only a missing array key is
//!   a structural failure.

use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::http::ResponseMeta;

/// A model that can be decoded from a single JSON object.
pub trait DecodableFromObject: Sized {
    /// Decode one instance from the response root. `None` means required
    /// fields were missing or mistyped.
    fn decode_object(meta: &ResponseMeta<'_>, value: &Value) -> Option<Self>;
}

/// A model that can be decoded from a JSON array nested in the response.
pub trait DecodableFromCollection: Sized {
    /// Top-level key holding the array of elements.
    const ARRAY_KEY: &'static str;

    /// Decode one array element. `None` drops the element from the batch.
    fn decode_element(meta: &ResponseMeta<'_>, element: &Value) -> Option<Self>;
}

/// Decode a single object, mapping a refused decode to `ObjectSerialization`.
pub fn decode_object<T: DecodableFromObject>(
    meta: &ResponseMeta<'_>,
    root: &Value,
) -> Result<T, ApiError> {
    T::decode_object(meta, root).ok_or_else(|| {
        ApiError::ObjectSerialization(format!(
            "required fields missing or mistyped for {}",
            std::any::type_name::<T>()
        ))
    })
}

/// Decode a collection, dropping elements that fail individually.
///
/// Preserves payload order. A missing or non-array `ARRAY_KEY` is a total
/// structural failure and yields `ObjectSerialization`.
pub fn decode_collection<T: DecodableFromCollection>(
    meta: &ResponseMeta<'_>,
    root: &Value,
) -> Result<Vec<T>, ApiError> {
    let elements = root
        .get(T::ARRAY_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ApiError::ObjectSerialization(format!("missing `{}` array", T::ARRAY_KEY))
        })?;

    let mut decoded = Vec::with_capacity(elements.len());
    let mut dropped = 0usize;
    for element in elements {
        match T::decode_element(meta, element) {
            Some(item) => decoded.push(item),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(key = T::ARRAY_KEY, dropped, kept = decoded.len(), "dropped malformed elements");
    }
    Ok(decoded)
}
