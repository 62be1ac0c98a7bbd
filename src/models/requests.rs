use crate::error::ValidationError;
use crate::models::domain::{parse_day, Creator, SessionRequest, TimeRange};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Creator record as supplied by callers, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub creator_type: Option<String>,
    #[serde(default)]
    pub availability: Option<AvailabilityPayload>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPayload {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub time_range: Option<String>,
}

impl TryFrom<CreatorPayload> for Creator {
    type Error = ValidationError;

    fn try_from(payload: CreatorPayload) -> Result<Self, Self::Error> {
        let id = payload.id.ok_or(ValidationError::MissingField("id"))?;
        let name = payload.name.ok_or(ValidationError::MissingField("name"))?;
        let creator_type = payload
            .creator_type
            .ok_or(ValidationError::MissingField("type"))?
            .parse()?;
        let availability = payload
            .availability
            .ok_or(ValidationError::MissingField("availability"))?;
        let time_range = TimeRange::parse(
            availability
                .time_range
                .as_deref()
                .ok_or(ValidationError::MissingField("availability.timeRange"))?,
        )?;
        let dates = availability
            .dates
            .iter()
            .map(|d| parse_day(d))
            .collect::<Result<Vec<_>, _>>()?;
        let genres = payload.genres.ok_or(ValidationError::MissingField("genres"))?;

        Creator::new(id, name, creator_type, dates, time_range, genres)
    }
}

/// Request to find creator pairs for a session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesRequest {
    #[validate(nested)]
    pub request: SessionRequest,
    #[serde(default)]
    pub creators: Vec<CreatorPayload>,
    #[validate(range(min = 1, max = 50))]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request to suggest a common slot for a group of creators
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SuggestTimeRequest {
    #[validate(length(min = 1))]
    pub creators: Vec<CreatorPayload>,
}
