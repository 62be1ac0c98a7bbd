use crate::error::ValidationError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Role a creator plays in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CreatorType {
    Writer,
    Producer,
    WriterProducer,
}

impl CreatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatorType::Writer => "writer",
            CreatorType::Producer => "producer",
            CreatorType::WriterProducer => "writer/producer",
        }
    }
}

impl FromStr for CreatorType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "writer" => Ok(CreatorType::Writer),
            "producer" => Ok(CreatorType::Producer),
            "writer/producer" => Ok(CreatorType::WriterProducer),
            _ => Err(ValidationError::UnknownCreatorType(s.to_string())),
        }
    }
}

impl TryFrom<String> for CreatorType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CreatorType> for String {
    fn from(value: CreatorType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CreatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
        .or_else(|| parse_hour_only(raw))
}

/// `"9 AM"` or `"5pm"`; chrono will not build a time from an hour alone
fn parse_hour_only(raw: &str) -> Option<NaiveTime> {
    let split = raw.len().checked_sub(2)?;
    let hour = raw.get(..split)?.trim();
    let meridiem = raw.get(split..)?;
    if hour.is_empty() || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveTime::parse_from_str(&format!("{}:00 {}", hour, meridiem), "%I:%M %p").ok()
}

/// A daily wall-clock window with no date or timezone attached
///
/// Always satisfies `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::EmptyTimeRange {
                start: start.format("%H:%M").to_string(),
                end: end.format("%H:%M").to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse `"HH:MM - HH:MM"` (seconds and 12-hour clock are accepted too)
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let (start, end) = raw
            .split_once('-')
            .ok_or_else(|| ValidationError::InvalidTimeRange(raw.to_string()))?;

        let start = parse_clock(start)
            .ok_or_else(|| ValidationError::InvalidTimeRange(raw.to_string()))?;
        let end = parse_clock(end)
            .ok_or_else(|| ValidationError::InvalidTimeRange(raw.to_string()))?;

        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }
}

impl FromStr for TimeRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeRange {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeRange> for String {
    fn from(value: TimeRange) -> Self {
        value.to_string()
    }
}

fn format_clock(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", format_clock(self.start), format_clock(self.end))
    }
}

/// Parse a calendar day from `YYYY-MM-DD` or a full timestamp
///
/// Timestamps keep the calendar day of their own offset; time-of-day is
/// discarded.
pub fn parse_day(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .ok_or_else(|| ValidationError::InvalidDate(raw.to_string()))
}

fn deserialize_optional_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse_day(&s).map_err(<D::Error as serde::de::Error>::custom))
        .transpose()
}

/// When a creator can work
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub dates: BTreeSet<NaiveDate>,
    pub time_range: TimeRange,
}

/// A validated collaborator profile
///
/// Built only through [`Creator::new`] (or `TryFrom<CreatorPayload>`), so
/// every instance has an id, a name, at least one date and a non-empty
/// daily window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Creator {
    id: String,
    name: String,
    #[serde(rename = "type")]
    creator_type: CreatorType,
    availability: Availability,
    genres: Vec<String>,
}

impl Creator {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        creator_type: CreatorType,
        dates: impl IntoIterator<Item = NaiveDate>,
        time_range: TimeRange,
        genres: impl IntoIterator<Item = String>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let name = name.into();

        if id.trim().is_empty() {
            return Err(ValidationError::MissingField("id"));
        }
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
        if dates.is_empty() {
            return Err(ValidationError::NoAvailableDates(id));
        }

        let mut unique: Vec<String> = Vec::new();
        for genre in genres {
            if !unique.contains(&genre) {
                unique.push(genre);
            }
        }

        Ok(Self {
            id,
            name,
            creator_type,
            availability: Availability { dates, time_range },
            genres: unique,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn creator_type(&self) -> CreatorType {
        self.creator_type
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn dates(&self) -> &BTreeSet<NaiveDate> {
        &self.availability.dates
    }

    pub fn time_range(&self) -> TimeRange {
        self.availability.time_range
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }
}

/// Description of the session being planned
///
/// Carried through matching for context; none of these fields filter or
/// weight candidate pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_day")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub session_type: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form labels; they are echoed to the provider and never parsed
    #[serde(default)]
    pub required_roles: Vec<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

/// A compatible pair after scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPair {
    pub first: Creator,
    pub second: Creator,
    pub common_dates: Vec<NaiveDate>,
    pub overlap_hours: f64,
    pub shared_genres: Vec<String>,
    pub score: f64,
}

/// Suggested day and window for a group of creators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSlot {
    pub date: NaiveDate,
    pub window: TimeRange,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub common_date: f64,
    pub overlap_hour: f64,
    pub shared_genre: f64,
    pub complementary_role: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            common_date: 10.0,
            overlap_hour: 5.0,
            shared_genre: 2.0,
            complementary_role: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_parse() {
        let range = TimeRange::parse("09:00 - 17:00").unwrap();
        assert_eq!(range.start(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(range.end(), NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(range.hours(), 8.0);
        assert_eq!(range.to_string(), "09:00 - 17:00");
    }

    #[test]
    fn test_time_range_twelve_hour_clock() {
        let range = TimeRange::parse("9:30 AM - 1:00 PM").unwrap();
        assert_eq!(range.to_string(), "09:30 - 13:00");
    }

    #[test]
    fn test_time_range_hour_only_twelve_hour_clock() {
        assert_eq!(TimeRange::parse("9 AM - 5 PM").unwrap().to_string(), "09:00 - 17:00");
        assert_eq!(TimeRange::parse("10am - 2pm").unwrap().to_string(), "10:00 - 14:00");
        assert!(TimeRange::parse("13 PM - 5 PM").is_err());
        assert!(TimeRange::parse("x AM - 5 PM").is_err());
    }

    #[test]
    fn test_time_range_rejects_inverted() {
        let err = TimeRange::parse("17:00 - 09:00").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyTimeRange { .. }));

        let err = TimeRange::parse("10:00 - 10:00").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyTimeRange { .. }));
    }

    #[test]
    fn test_time_range_rejects_garbage() {
        assert!(matches!(
            TimeRange::parse("whenever"),
            Err(ValidationError::InvalidTimeRange(_))
        ));
        assert!(matches!(
            TimeRange::parse("25:00 - 26:00"),
            Err(ValidationError::InvalidTimeRange(_))
        ));
    }

    #[test]
    fn test_parse_day_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        assert_eq!(parse_day("2025-04-10").unwrap(), expected);
        assert_eq!(parse_day("2025-04-10T18:30:00Z").unwrap(), expected);
        assert_eq!(parse_day("2025-04-10T23:59:59.999+02:00").unwrap(), expected);
        assert!(parse_day("April 10th").is_err());
    }

    #[test]
    fn test_creator_type_parsing() {
        assert_eq!("Writer".parse::<CreatorType>().unwrap(), CreatorType::Writer);
        assert_eq!("producer".parse::<CreatorType>().unwrap(), CreatorType::Producer);
        assert_eq!(
            "writer/producer".parse::<CreatorType>().unwrap(),
            CreatorType::WriterProducer
        );
        assert!("drummer".parse::<CreatorType>().is_err());
        assert!("writer-producer".parse::<CreatorType>().is_err());
    }

    #[test]
    fn test_creator_requires_dates() {
        let range = TimeRange::parse("09:00 - 17:00").unwrap();
        let err = Creator::new("c1", "Cass", CreatorType::Writer, vec![], range, vec![]).unwrap_err();
        assert_eq!(err, ValidationError::NoAvailableDates("c1".to_string()));
    }

    #[test]
    fn test_creator_dedupes_genres() {
        let range = TimeRange::parse("09:00 - 17:00").unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let creator = Creator::new(
            "c1",
            "Cass",
            CreatorType::Writer,
            vec![day, day],
            range,
            vec!["Pop".to_string(), "R&B".to_string(), "Pop".to_string()],
        )
        .unwrap();

        assert_eq!(creator.genres(), &["Pop".to_string(), "R&B".to_string()]);
        assert_eq!(creator.dates().len(), 1);
    }

    #[test]
    fn test_session_request_accepts_timestamp_date() {
        let json = r#"{"title":"Test Session","type":"Writing","date":"2025-04-10T00:00:00.000Z","requiredRoles":["Producer"]}"#;
        let request: SessionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.date, NaiveDate::from_ymd_opt(2025, 4, 10));
        assert_eq!(request.required_roles, vec!["Producer".to_string()]);
    }

    #[test]
    fn test_session_request_keeps_unknown_roles() {
        let json = r#"{"title":"Test Session","type":"Writing","requiredRoles":["Engineer","Producer"]}"#;
        let request: SessionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.required_roles, vec!["Engineer".to_string(), "Producer".to_string()]);
    }
}
