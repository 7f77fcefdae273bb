//! Shared travel photos

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GeoPoint, UserId};
use crate::{Result, WanderLensError};

pub type PhotoId = u64;

/// A photo posted to the discovery feed
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    pub user_id: UserId,
    /// Remote URL or inline `data:image/...;base64,` URI
    pub image_url: String,
    pub caption: String,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub tags: Vec<String>,
    pub likes: u32,
    /// How the traveller got there
    pub transport_details: Option<String>,
    /// What they ate
    pub food_details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Upload form payload
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPhoto {
    pub image_url: String,
    pub caption: String,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub tags: Vec<String>,
    pub transport_details: Option<String>,
    pub food_details: Option<String>,
}

impl NewPhoto {
    pub fn validate(&self) -> Result<()> {
        let image = self.image_url.trim();
        if image.is_empty() {
            return Err(WanderLensError::validation("Please choose a photo to upload."));
        }
        if !(image.starts_with("http://")
            || image.starts_with("https://")
            || image.starts_with("data:image/"))
        {
            return Err(WanderLensError::validation(
                "The photo must be an image URL or an image data URI.",
            ));
        }

        if self.caption.trim().is_empty() {
            return Err(WanderLensError::validation("Please add a caption to your photo."));
        }

        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => {
                GeoPoint::new(lat, lon)?;
            }
            (None, None) => {}
            _ => {
                return Err(WanderLensError::validation(
                    "Latitude and longitude must be provided together.",
                ));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn into_photo(self, id: PhotoId, user_id: UserId, created_at: DateTime<Utc>) -> Photo {
        Photo {
            id,
            user_id,
            image_url: self.image_url.trim().to_string(),
            caption: self.caption.trim().to_string(),
            location_name: blank_to_none(self.location_name),
            latitude: self.latitude,
            longitude: self.longitude,
            tags: normalize_tags(self.tags),
            likes: 0,
            transport_details: blank_to_none(self.transport_details),
            food_details: blank_to_none(self.food_details),
            created_at,
        }
    }
}

pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Lowercase, strip leading `#`, drop blanks and duplicates
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().trim_start_matches('#').to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}
