//! Level Classifier
//!
//! Linear quantization of brightness into ordered levels. Level 0 is the
//! darkest.

/// Amount subtracted from the level count before scaling, so that a
/// brightness of exactly 100 lands in the last level rather than one past it.
pub const LEVEL_EPSILON: f64 = 0.0001;

/// Map a brightness in `[0, 100]` to a level in `[0, num_layers - 1]`
///
/// Computes `floor(brightness / 100 * (num_layers - LEVEL_EPSILON))` and
/// clamps the result. Monotonic in brightness. A layer count of zero maps
/// everything to level 0.
pub fn classify_level(brightness: f64, num_layers: u32) -> usize {
    if num_layers == 0 {
        return 0;
    }

    let scaled = (brightness / 100.0 * (f64::from(num_layers) - LEVEL_EPSILON)).floor();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, f64::from(num_layers - 1)) as usize
}
