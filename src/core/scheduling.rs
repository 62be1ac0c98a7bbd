use crate::models::{Creator, SessionSlot, TimeRange};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Suggest the earliest day and the shared daily window for a group
///
/// Returns `None` when the group is empty, has no day in common, or their
/// daily windows do not intersect.
pub fn suggest_session_slot(creators: &[Creator]) -> Option<SessionSlot> {
    let (first, rest) = creators.split_first()?;

    let mut days: BTreeSet<NaiveDate> = first.dates().clone();
    for creator in rest {
        days = days.intersection(creator.dates()).copied().collect();
    }
    let date = days.into_iter().next()?;

    let start = creators.iter().map(|c| c.time_range().start()).max()?;
    let end = creators.iter().map(|c| c.time_range().end()).min()?;
    let window = TimeRange::new(start, end).ok()?;

    Some(SessionSlot { date, window })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreatorType;

    fn creator(id: &str, days: &[u32], range: &str) -> Creator {
        Creator::new(
            id,
            id,
            CreatorType::Writer,
            days.iter().map(|d| NaiveDate::from_ymd_opt(2025, 4, *d).unwrap()),
            TimeRange::parse(range).unwrap(),
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_earliest_common_day_and_window() {
        let group = vec![
            creator("a", &[12, 10, 11], "09:00 - 17:00"),
            creator("b", &[11, 12], "10:00 - 18:00"),
            creator("c", &[12, 11], "13:00 - 20:00"),
        ];

        let slot = suggest_session_slot(&group).unwrap();
        assert_eq!(slot.date, NaiveDate::from_ymd_opt(2025, 4, 11).unwrap());
        assert_eq!(slot.window.to_string(), "13:00 - 17:00");
    }

    #[test]
    fn test_no_common_day() {
        let group = vec![creator("a", &[10], "09:00 - 17:00"), creator("b", &[11], "09:00 - 17:00")];
        assert!(suggest_session_slot(&group).is_none());
    }

    #[test]
    fn test_disjoint_windows() {
        let group = vec![creator("a", &[10], "08:00 - 10:00"), creator("b", &[10], "12:00 - 17:00")];
        assert!(suggest_session_slot(&group).is_none());
    }

    #[test]
    fn test_single_creator_uses_own_window() {
        let group = vec![creator("a", &[10], "08:00 - 10:00")];
        let slot = suggest_session_slot(&group).unwrap();
        assert_eq!(slot.window.to_string(), "08:00 - 10:00");
        assert!(suggest_session_slot(&[]).is_none());
    }
}
