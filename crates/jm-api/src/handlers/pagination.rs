use std::ops::RangeInclusive;

use crate::error::ApiError;

const LIMIT_RANGE: RangeInclusive<i64> = 1..=50;
const OFFSET_RANGE: RangeInclusive<i64> = 0..=10_000;

/// Bounds-check caller-supplied paging before any catalog work happens.
pub fn validate_pagination(limit: i64, offset: i64) -> Result<(usize, usize), ApiError> {
    if !LIMIT_RANGE.contains(&limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be within {}..{}",
            LIMIT_RANGE.start(),
            LIMIT_RANGE.end()
        )));
    }

    if !OFFSET_RANGE.contains(&offset) {
        return Err(ApiError::BadRequest(format!(
            "offset must be within {}..{}",
            OFFSET_RANGE.start(),
            OFFSET_RANGE.end()
        )));
    }

    Ok((limit as usize, offset as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_boundaries_are_inclusive() {
        assert_eq!(validate_pagination(1, 0).unwrap(), (1, 0));
        assert_eq!(validate_pagination(50, 10_000).unwrap(), (50, 10_000));
    }

    #[test]
    fn values_outside_the_ranges_are_refused() {
        for (limit, offset) in [(0, 0), (51, 0), (5, -1), (5, 10_001)] {
            assert!(validate_pagination(limit, offset).is_err(), "{limit}/{offset}");
        }
    }
}
