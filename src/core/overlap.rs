use crate::error::ValidationError;
use crate::models::TimeRange;

/// Minimum shared hours for two creators to be schedulable together
pub const MIN_OVERLAP_HOURS: f64 = 2.0;

/// Intersection of two daily windows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub overlaps: bool,
    pub hours: f64,
}

/// Overlap of two daily windows against the default two-hour threshold
#[inline]
pub fn overlap(a: &TimeRange, b: &TimeRange) -> Overlap {
    overlap_with_threshold(a, b, MIN_OVERLAP_HOURS)
}

/// Overlap of two daily windows against a custom threshold
///
/// Both windows are placed on the same nominal day. Disjoint windows give
/// zero hours, never a negative value.
#[inline]
pub fn overlap_with_threshold(a: &TimeRange, b: &TimeRange, min_hours: f64) -> Overlap {
    let start = a.start().max(b.start());
    let end = a.end().min(b.end());

    let seconds = (end - start).num_seconds().max(0);
    let hours = seconds as f64 / 3600.0;

    Overlap {
        overlaps: hours >= min_hours,
        hours,
    }
}

/// Overlap of two textual windows such as `"09:00 - 17:00"`
pub fn overlap_str(a: &str, b: &str) -> Result<Overlap, ValidationError> {
    let a = TimeRange::parse(a)?;
    let b = TimeRange::parse(b)?;
    Ok(overlap(&a, &b))
}
