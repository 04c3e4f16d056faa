//! Domain models for the photo API.
//!
//! # Design
//! Records are built only from decoded server payloads and never mutated in
//! place; a later fetch of the same photo produces a fresh value. Required
//! fields (`id`, `image_url`) fail the decode when missing or mistyped.
//! Optional fields are extracted leniently, field by field, so a single
//! mistyped optional turns into `None` instead of discarding the record —
//! matching the tolerance the list decoder applies across elements.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use serde_json::Value;

use crate::decode::{DecodableFromCollection, DecodableFromObject};
use crate::http::ResponseMeta;

/// Server-assigned photo identifier.
pub type PhotoId = u64;

/// One photo record as returned by the list or detail endpoints.
///
/// Identity is the `id` field alone: equality and hashing ignore every other
/// field, so collections keyed by photo compare and deduplicate by id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PhotoInfo {
    pub id: PhotoId,
    /// Image URL; required alongside `id` for the record to decode.
    pub url: String,

    pub name: Option<String>,
    pub description: Option<String>,

    pub favorites_count: Option<u32>,
    pub votes_count: Option<u32>,
    pub comments_count: Option<u32>,
    pub views: Option<u32>,

    pub highest_rating: Option<f32>,
    pub pulse: Option<f32>,

    pub camera: Option<String>,
    pub focal_length: Option<String>,
    pub shutter_speed: Option<String>,
    pub aperture: Option<String>,
    pub iso: Option<String>,

    pub category: Category,

    /// Opaque server timestamps, kept as the strings the API sent.
    pub taken: Option<String>,
    pub uploaded: Option<String>,

    pub username: Option<String>,
    pub fullname: Option<String>,
    pub user_picture_url: Option<String>,
}

impl PhotoInfo {
    /// A record carrying only the required fields. List payloads that omit
    /// all metadata decode to exactly this shape.
    pub fn new(id: PhotoId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            ..Self::default()
        }
    }

    /// Decode one photo fragment (the object carrying `id`, `image_url` and
    /// friends). Returns `None` when a required field is missing or mistyped.
    fn from_fragment(fragment: &Value) -> Option<Self> {
        let id = fragment.get("id")?.as_u64()?;
        let url = fragment.get("image_url")?.as_str()?.to_string();

        let user = fragment.get("user");
        Some(Self {
            id,
            url,
            name: field_str(fragment, "name"),
            description: field_str(fragment, "description"),
            favorites_count: field_u32(fragment, "favorites_count"),
            votes_count: field_u32(fragment, "votes_count"),
            comments_count: field_u32(fragment, "comments_count"),
            views: field_u32(fragment, "times_viewed"),
            highest_rating: field_f32(fragment, "highest_rating"),
            pulse: field_f32(fragment, "rating"),
            camera: field_str(fragment, "camera"),
            focal_length: field_str(fragment, "focal_length"),
            shutter_speed: field_str(fragment, "shutter_speed"),
            aperture: field_str(fragment, "aperture"),
            iso: field_str(fragment, "iso"),
            category: fragment
                .get("category")
                .and_then(Value::as_i64)
                .map(Category::from_code)
                .unwrap_or_default(),
            taken: field_str(fragment, "taken_at"),
            uploaded: field_str(fragment, "created_at"),
            username: user.and_then(|u| field_str(u, "username")),
            fullname: user.and_then(|u| field_str(u, "fullname")),
            user_picture_url: user.and_then(|u| field_str(u, "userpic_url")),
        })
    }
}

impl PartialEq for PhotoInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PhotoInfo {}

impl Hash for PhotoInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl DecodableFromObject for PhotoInfo {
    /// Detail responses nest the record under a top-level `photo` key.
    fn decode_object(_meta: &ResponseMeta<'_>, value: &Value) -> Option<Self> {
        Self::from_fragment(value.get("photo")?)
    }
}

impl DecodableFromCollection for PhotoInfo {
    const ARRAY_KEY: &'static str = "photos";

    fn decode_element(_meta: &ResponseMeta<'_>, element: &Value) -> Option<Self> {
        // The upstream feed marks every accepted record with an `nsfw` bool.
        // Its value is never consulted, but records without the field are
        // rejected; kept as a required-presence check.
        element.get("nsfw")?.as_bool()?;
        Self::from_fragment(element)
    }
}

/// One comment on a photo. The payload carries no stable identity, so
/// comments are plain values with no dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub user_fullname: String,
    pub user_picture_url: String,
    pub body: String,
}

impl DecodableFromCollection for Comment {
    const ARRAY_KEY: &'static str = "comments";

    /// All three fields are required; a fragment missing any of them is
    /// dropped from the batch rather than failing it.
    fn decode_element(_meta: &ResponseMeta<'_>, element: &Value) -> Option<Self> {
        let user = element.get("user")?;
        Some(Self {
            user_fullname: user.get("fullname")?.as_str()?.to_string(),
            user_picture_url: user.get("userpic_url")?.as_str()?.to_string(),
            body: element.get("body")?.as_str()?.to_string(),
        })
    }
}

/// Closed set of photo categories, integer-coded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Category {
    #[default]
    Uncategorized,
    Celebrities,
    Film,
    Journalism,
    Nude,
    BlackAndWhite,
    StillLife,
    People,
    Landscapes,
    CityAndArchitecture,
    Abstract,
    Animals,
    Macro,
    Travel,
    Fashion,
    Commercial,
    Concert,
    Sport,
    Nature,
    PerformingArts,
    Family,
    Street,
    Underwater,
    Food,
    FineArt,
    Wedding,
    Transportation,
    UrbanExploration,
}

impl Category {
    /// Map a wire code to a category, falling back to `Uncategorized` for
    /// unrecognized codes.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Category::Celebrities,
            2 => Category::Film,
            3 => Category::Journalism,
            4 => Category::Nude,
            5 => Category::BlackAndWhite,
            6 => Category::StillLife,
            7 => Category::People,
            8 => Category::Landscapes,
            9 => Category::CityAndArchitecture,
            10 => Category::Abstract,
            11 => Category::Animals,
            12 => Category::Macro,
            13 => Category::Travel,
            14 => Category::Fashion,
            15 => Category::Commercial,
            16 => Category::Concert,
            17 => Category::Sport,
            18 => Category::Nature,
            19 => Category::PerformingArts,
            20 => Category::Family,
            21 => Category::Street,
            22 => Category::Underwater,
            23 => Category::Food,
            24 => Category::FineArt,
            25 => Category::Wedding,
            26 => Category::Transportation,
            27 => Category::UrbanExploration,
            _ => Category::Uncategorized,
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Category::Uncategorized => "Uncategorized",
            Category::Celebrities => "Celebrities",
            Category::Film => "Film",
            Category::Journalism => "Journalism",
            Category::Nude => "Nude",
            Category::BlackAndWhite => "Black And White",
            Category::StillLife => "Still Life",
            Category::People => "People",
            Category::Landscapes => "Landscapes",
            Category::CityAndArchitecture => "City And Architecture",
            Category::Abstract => "Abstract",
            Category::Animals => "Animals",
            Category::Macro => "Macro",
            Category::Travel => "Travel",
            Category::Fashion => "Fashion",
            Category::Commercial => "Commercial",
            Category::Concert => "Concert",
            Category::Sport => "Sport",
            Category::Nature => "Nature",
            Category::PerformingArts => "Performing Arts",
            Category::Family => "Family",
            Category::Street => "Street",
            Category::Underwater => "Underwater",
            Category::Food => "Food",
            Category::FineArt => "Fine Art",
            Category::Wedding => "Wedding",
            Category::Transportation => "Transportation",
            Category::UrbanExploration => "Urban Exploration",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn field_str(value: &Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(str::to_string)
}

fn field_u32(value: &Value, key: &str) -> Option<u32> {
    value.get(key)?.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn field_f32(value: &Value, key: &str) -> Option<f32> {
    value.get(key)?.as_f64().map(|f| f as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::decode::{decode_collection, decode_object};

    fn meta() -> ResponseMeta<'static> {
        ResponseMeta { status: 200, headers: &[] }
    }

    #[test]
    fn equality_and_hash_use_id_only() {
        use std::collections::HashSet;

        let a = PhotoInfo::new(7, "https://img/a.jpg");
        let mut b = PhotoInfo::new(7, "https://img/b.jpg");
        b.name = Some("different".to_string());
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b), "same id must collide");
    }

    #[test]
    fn detail_decode_reads_nested_photo_fragment() {
        let root = json!({
            "photo": {
                "id": 4930,
                "image_url": "https://img/4930.jpg",
                "name": "Dawn",
                "favorites_count": 12,
                "votes_count": 44,
                "comments_count": 3,
                "times_viewed": 901,
                "highest_rating": 92.5,
                "rating": 88.5,
                "camera": "X100V",
                "focal_length": "23",
                "shutter_speed": "1/250",
                "aperture": "2.0",
                "iso": "400",
                "category": 8,
                "taken_at": "2014-09-01T08:00:00-04:00",
                "created_at": "2014-09-02T10:00:00-04:00",
                "description": "first light",
                "user": {
                    "username": "ep",
                    "fullname": "Essan P.",
                    "userpic_url": "https://img/u.jpg"
                }
            }
        });
        let photo: PhotoInfo = decode_object(&meta(), &root).unwrap();
        assert_eq!(photo.id, 4930);
        assert_eq!(photo.url, "https://img/4930.jpg");
        assert_eq!(photo.name.as_deref(), Some("Dawn"));
        assert_eq!(photo.views, Some(901));
        assert_eq!(photo.pulse, Some(88.5));
        assert_eq!(photo.category, Category::Landscapes);
        assert_eq!(photo.fullname.as_deref(), Some("Essan P."));
        assert_eq!(photo.taken.as_deref(), Some("2014-09-01T08:00:00-04:00"));
    }

    #[test]
    fn detail_decode_fails_without_photo_key() {
        let err = decode_object::<PhotoInfo>(&meta(), &json!({"id": 1})).unwrap_err();
        assert!(matches!(err, crate::ApiError::ObjectSerialization(_)));
    }

    #[test]
    fn mistyped_optional_field_does_not_drop_the_record() {
        let root = json!({
            "photo": {
                "id": 5,
                "image_url": "https://img/5.jpg",
                "favorites_count": "many",
                "category": "landscapes"
            }
        });
        let photo: PhotoInfo = decode_object(&meta(), &root).unwrap();
        assert_eq!(photo.favorites_count, None);
        assert_eq!(photo.category, Category::Uncategorized);
    }

    #[test]
    fn list_elements_require_typed_nsfw_presence() {
        let root = json!({
            "photos": [
                {"id": 1, "image_url": "https://img/1.jpg", "nsfw": false},
                {"id": 2, "image_url": "https://img/2.jpg"},
                {"id": 3, "image_url": "https://img/3.jpg", "nsfw": "no"},
                {"id": 4, "image_url": "https://img/4.jpg", "nsfw": true},
                {"image_url": "https://img/5.jpg", "nsfw": false},
                {"id": 6, "nsfw": false},
            ]
        });
        let photos: Vec<PhotoInfo> = decode_collection(&meta(), &root).unwrap();
        let ids: Vec<_> = photos.iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 4]);
    }

    #[test]
    fn comment_decode_requires_all_three_fields() {
        let root = json!({
            "comments": [
                {"user": {"fullname": "A", "userpic_url": "https://u/a.jpg"}, "body": "nice"},
                {"user": {"fullname": "B"}, "body": "missing picture"},
                {"user": {"fullname": "C", "userpic_url": "https://u/c.jpg"}},
                {"body": "no user at all"},
            ]
        });
        let comments: Vec<Comment> = decode_collection(&meta(), &root).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].user_fullname, "A");
        assert_eq!(comments[0].user_picture_url, "https://u/a.jpg");
        assert_eq!(comments[0].body, "nice");
    }

    #[test]
    fn unknown_category_codes_fall_back_to_uncategorized() {
        assert_eq!(Category::from_code(27), Category::UrbanExploration);
        assert_eq!(Category::from_code(0), Category::Uncategorized);
        assert_eq!(Category::from_code(99), Category::Uncategorized);
        assert_eq!(Category::from_code(-3), Category::Uncategorized);
    }

    #[test]
    fn category_labels_are_human_readable() {
        assert_eq!(Category::BlackAndWhite.to_string(), "Black And White");
        assert_eq!(Category::UrbanExploration.to_string(), "Urban Exploration");
    }
}
