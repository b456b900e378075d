//! Adapter layer: converts between the engine's exact `Decimal` readings and
//! the `f64` values the rendering host plots.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

/// Convert Decimal to f64 (lossy but sufficient for plotting).
pub fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

pub fn series_to_f64(series: &[Decimal]) -> Vec<f64> {
    series.iter().copied().map(to_f64).collect()
}

/// Linear position of `value` inside `[min, max]`, clamped to `0.0..=1.0`.
/// Renderers scale this to pixel height.
pub fn normalized(value: Decimal, (min, max): (Decimal, Decimal)) -> f64 {
    if max <= min {
        return 0.0;
    }
    let ratio = (value - min) / (max - min);
    to_f64(ratio).clamp(0.0, 1.0)
}
