use crate::models::Match;

/// Average `match_level` across a user's matches, rounded to one decimal
///
/// Returns 0.0 for an empty slice. Rounding is half away from zero.
/// The filter engine, the sort engine and the display rows all call this,
/// so a user's level is the same value everywhere it shows up.
#[inline]
pub fn average_match_level(matches: &[Match]) -> f64 {
    if matches.is_empty() {
        return 0.0;
    }

    let sum: f64 = matches.iter().map(|m| m.match_level).sum();
    round_one_decimal(sum / matches.len() as f64)
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
