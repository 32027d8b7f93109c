//! Wire shapes returned by the store and their normalization.
//!
//! The store is loose about a few fields: `category` may be a plain string or
//! an object with a `name`, `images` may be a single string or an array, and
//! `price` may arrive as a number or a numeric string. Everything is folded
//! into a fixed [`Record`] here so nothing past the gateway branches on shape.

use crate::error::StoreError;
use crate::types::{Record, RecordId};
use serde::Deserialize;

/// Category shown when the store sends none.
pub const MISSING_CATEGORY: &str = "N/A";

/// Image used when the store sends no usable URL.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300?text=No+Image";

#[derive(Debug, Deserialize)]
pub(crate) struct WireRecord {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    price: WirePrice,
    #[serde(default)]
    category: Option<WireCategory>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    images: Option<WireImages>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WirePrice {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireCategory {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireImages {
    One(String),
    Many(Vec<String>),
}

impl WireRecord {
    /// Fold the wire shape into a [`Record`].
    pub(crate) fn normalize(self) -> Result<Record, StoreError> {
        let id = RecordId(self.id);

        let price = match self.price {
            WirePrice::Number(value) => value,
            WirePrice::Text(text) => text.trim().parse::<f64>().map_err(|_| StoreError::Malformed {
                id,
                reason: format!("price {:?} is not a number", text),
            })?,
        };
        if !price.is_finite() || price < 0.0 {
            return Err(StoreError::Malformed {
                id,
                reason: format!("price {} is out of range", price),
            });
        }
        // -0.0 becomes 0.0
        let price = price + 0.0;

        let category = match self.category {
            Some(WireCategory::Name(name)) => Some(name),
            Some(WireCategory::Object { name }) => name,
            None => None,
        }
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| MISSING_CATEGORY.to_string());

        let mut images: Vec<String> = match self.images {
            Some(WireImages::One(url)) => vec![url],
            Some(WireImages::Many(urls)) => urls,
            None => Vec::new(),
        };
        images.retain(|url| !url.trim().is_empty());
        if images.is_empty() {
            images.push(PLACEHOLDER_IMAGE.to_string());
        }

        Ok(Record {
            id,
            title: self.title.unwrap_or_default(),
            price,
            category,
            description: self.description.unwrap_or_default(),
            images,
        })
    }
}

/// Decode and normalize a listing body.
pub(crate) fn decode_list(body: &[u8]) -> Result<Vec<Record>, StoreError> {
    let wire: Vec<WireRecord> = serde_json::from_slice(body)?;
    wire.into_iter().map(WireRecord::normalize).collect()
}

/// Decode and normalize a single-record body.
pub(crate) fn decode_one(body: &[u8]) -> Result<Record, StoreError> {
    let wire: WireRecord = serde_json::from_slice(body)?;
    wire.normalize()
}
