//! Channel resistance.

/// Reduce `amount` by `percent` resistance.
///
/// `floor(amount * (1 - percent / 100))`, never below 0, with `percent`
/// clamped to `0..=100`.
///
/// ```
/// use rust_duel::stats::apply_damage_resistance;
///
/// assert_eq!(apply_damage_resistance(100, 50), 50);
/// assert_eq!(apply_damage_resistance(100, 100), 0);
/// assert_eq!(apply_damage_resistance(100, 0), 100);
/// ```
#[must_use]
pub fn apply_damage_resistance(amount: i64, percent: i64) -> i64 {
    if amount <= 0 {
        return 0;
    }
    let kept = 100 - percent.clamp(0, 100);
    // Split so the multiply cannot overflow: q * kept <= amount.
    amount / 100 * kept + amount % 100 * kept / 100
}
