use crate::models::Creator;
use chrono::NaiveDate;

/// Two distinct creators that share at least one calendar day
#[derive(Debug, Clone)]
pub struct CandidatePair<'a> {
    pub first: &'a Creator,
    pub second: &'a Creator,
    pub common_dates: Vec<NaiveDate>,
}

/// Calendar days present in both creators' availability, ascending
#[inline]
pub fn common_dates(a: &Creator, b: &Creator) -> Vec<NaiveDate> {
    a.dates().intersection(b.dates()).copied().collect()
}

/// Lazily enumerate every unordered pair `{i, j}` with `i < j`
///
/// Pairs with no shared day are skipped here, before any time-window work.
pub fn enumerate_pairs(pool: &[Creator]) -> impl Iterator<Item = CandidatePair<'_>> + '_ {
    pool.iter().enumerate().flat_map(move |(i, first)| {
        pool[i + 1..].iter().filter_map(move |second| {
            let common_dates = common_dates(first, second);
            if common_dates.is_empty() {
                tracing::trace!("Skipping {} / {}: no shared dates", first.id(), second.id());
                return None;
            }
            Some(CandidatePair {
                first,
                second,
                common_dates,
            })
        })
    })
}
