pub mod identity;
pub mod kpi;
pub mod scores;

/// Clamps into [0, 1]; NaN maps to 0.
pub fn clip01(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}
