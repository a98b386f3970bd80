//! Derived progress values.
//!
//! # Responsibility
//! - Compute task/funding progress as pure functions of catalog + completion set.
//! - Evaluate the funding milestone ladder under the configured unlock rule.
//! - Map task categories onto the five-phase roadmap per persona.
//!
//! # Invariants
//! - Nothing here holds state; every value is recomputed from its inputs.
//! - Percentages use half-up rounding and report 0 for an empty denominator.

pub mod milestone;
pub mod roadmap;
pub mod tasks;

/// Returns `round(100 * part / whole)` with half-up rounding, or 0 when `whole == 0`.
///
/// `part` may exceed `whole`; callers that need a cap apply it themselves.
pub fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = u128::from(part);
    let whole = u128::from(whole);
    let rounded = (200 * part + whole) / (2 * whole);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn empty_denominator_is_zero() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(5, 0), 0);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(1, 200), 1);
        assert_eq!(percent(10, 10), 100);
    }

    #[test]
    fn overshoot_is_not_capped() {
        assert_eq!(percent(3, 2), 150);
    }
}
