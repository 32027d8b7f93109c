//! Draft validation.

use crate::types::{Draft, RecordPayload};
use reqwest::Url;
use std::collections::BTreeMap;
use std::fmt;

/// Minimum trimmed length of a title, in characters.
pub const MIN_TITLE_CHARS: usize = 3;

/// Minimum trimmed length of a description, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// A form field that can carry a validation error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Title,
    Price,
    Category,
    Description,
    Image,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftField::Title => "title",
            DraftField::Price => "price",
            DraftField::Category => "category",
            DraftField::Description => "description",
            DraftField::Image => "image",
        };
        f.write_str(name)
    }
}

/// Field-scoped validation outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<DraftField, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with an error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error message for `field`, if any.
    pub fn error(&self, field: DraftField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn field_errors(&self) -> &BTreeMap<DraftField, String> {
        &self.errors
    }

    fn reject(&mut self, field: DraftField, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

/// Check every field of a draft.
pub fn validate(draft: &Draft) -> ValidationReport {
    let mut report = ValidationReport::default();

    let title = draft.title.trim();
    if title.is_empty() {
        report.reject(DraftField::Title, "Title is required");
    } else if title.chars().count() < MIN_TITLE_CHARS {
        report.reject(DraftField::Title, "Title must be at least 3 characters");
    }

    let price = draft.price.trim();
    if price.is_empty() {
        report.reject(DraftField::Price, "Price is required");
    } else {
        match parse_price(price) {
            None => report.reject(DraftField::Price, "Price must be a number"),
            Some(value) if value <= 0.0 => {
                report.reject(DraftField::Price, "Price must be greater than 0")
            }
            Some(_) => {}
        }
    }

    if draft.category.trim().is_empty() {
        report.reject(DraftField::Category, "Category is required");
    }

    let description = draft.description.trim();
    if description.is_empty() {
        report.reject(DraftField::Description, "Description is required");
    } else if description.chars().count() < MIN_DESCRIPTION_CHARS {
        report.reject(
            DraftField::Description,
            "Description must be at least 10 characters",
        );
    }

    let images = image_urls(draft);
    if images.is_empty() {
        report.reject(DraftField::Image, "Image URL is required");
    } else if images.iter().any(|url| Url::parse(url).is_err()) {
        report.reject(DraftField::Image, "Image URL is invalid");
    }

    report
}

/// Validate and convert a draft into the body sent to the store.
pub fn prepare(draft: &Draft) -> Result<RecordPayload, ValidationReport> {
    let report = validate(draft);
    if !report.is_valid() {
        return Err(report);
    }

    let images: Vec<String> = image_urls(draft).into_iter().map(str::to_string).collect();
    let price = parse_price(draft.price.trim()).unwrap_or_default();

    Ok(RecordPayload {
        title: draft.title.trim().to_string(),
        price,
        category: draft.category.trim().to_string(),
        description: draft.description.trim().to_string(),
        image: images.first().cloned().unwrap_or_default(),
        images,
    })
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn image_urls(draft: &Draft) -> Vec<&str> {
    draft
        .images
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .collect()
}
