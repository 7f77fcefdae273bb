//! User-submitted places

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GeoPoint, UserId};
use crate::{Result, WanderLensError};

pub type PlaceId = u64;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    /// Free-form label such as "viewpoint" or "restaurant"
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl Place {
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPlace {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl NewPlace {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(WanderLensError::validation("Please give the place a name."));
        }
        self.point()?;
        Ok(())
    }

    /// Both coordinates are required
    pub fn point(&self) -> Result<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon),
            _ => Err(WanderLensError::validation(
                "Please set the place's latitude and longitude.",
            )),
        }
    }

    pub fn into_place(
        self,
        id: PlaceId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<Place> {
        let point = self.point()?;
        Ok(Place {
            id,
            user_id,
            name: self.name.trim().to_string(),
            description: super::photo::blank_to_none(self.description),
            category: super::photo::blank_to_none(self.category)
                .map(|c| c.to_lowercase())
                .unwrap_or_else(|| "other".to_string()),
            latitude: point.latitude,
            longitude: point.longitude,
            created_at,
        })
    }
}
