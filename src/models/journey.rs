//! Multi-day travel logs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use super::photo::blank_to_none;
use crate::{Result, WanderLensError};

pub type JourneyId = u64;

/// A user-authored trip: how they travelled, where they slept, what they saw each day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub id: JourneyId,
    pub user_id: UserId,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub transport: Option<String>,
    pub lodging: Option<String>,
    pub days: Vec<JourneyDay>,
    pub created_at: DateTime<Utc>,
}

impl Journey {
    /// Trip length in days, counting both ends
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        trip_length(self.start_date, self.end_date)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDay {
    /// 1-based day number within the trip
    pub day: u32,
    #[serde(default)]
    pub places: Vec<JourneyStop>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStop {
    pub name: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewJourney {
    pub title: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub transport: Option<String>,
    pub lodging: Option<String>,
    pub days: Vec<JourneyDay>,
}

fn trip_length(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

impl NewJourney {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(WanderLensError::validation("Please give your journey a title."));
        }
        if self.destination.trim().is_empty() {
            return Err(WanderLensError::validation("Please enter a destination."));
        }
        let (start, end) = self.dates()?;
        if end < start {
            return Err(WanderLensError::validation(
                "The journey cannot end before it starts.",
            ));
        }

        let length = trip_length(start, end);
        let mut seen = Vec::with_capacity(self.days.len());
        for day in &self.days {
            if day.day == 0 || i64::from(day.day) > length {
                return Err(WanderLensError::validation(format!(
                    "Day {} is outside this {length}-day journey.",
                    day.day
                )));
            }
            if seen.contains(&day.day) {
                return Err(WanderLensError::validation(format!(
                    "Day {} is listed more than once.",
                    day.day
                )));
            }
            seen.push(day.day);

            if day.places.iter().any(|stop| stop.name.trim().is_empty()) {
                return Err(WanderLensError::validation(format!(
                    "Every place on day {} needs a name.",
                    day.day
                )));
            }
        }

        Ok(())
    }

    fn dates(&self) -> Result<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(WanderLensError::validation(
                "Please choose when the journey starts and ends.",
            )),
        }
    }

    pub fn into_journey(
        self,
        id: JourneyId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<Journey> {
        let (start_date, end_date) = self.dates()?;
        let mut days = self.days;
        days.sort_by_key(|d| d.day);

        Ok(Journey {
            id,
            user_id,
            title: self.title.trim().to_string(),
            destination: self.destination.trim().to_string(),
            start_date,
            end_date,
            transport: blank_to_none(self.transport),
            lodging: blank_to_none(self.lodging),
            days,
            created_at,
        })
    }
}
