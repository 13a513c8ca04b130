//! Product placement along the cart line's X axis.

/// X slots for `count` products, symmetric about the origin. A single
/// product sits at the origin.
pub fn line_positions(count: usize) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![0.0];
    }
    let half = (count as f32 / 2.0).ceil();
    let min = -(half * 30.0);
    let max = half * 30.0;
    let step = (max * 2.0 / count as f32).ceil();
    (0..count).map(|i| min + step * i as f32).collect()
}

/// Camera targets far off the line edge get pulled back toward it.
pub fn clamp_line_position(x: f32) -> f32 {
    if x > 6.0 || x < -6.0 { x * 0.8 } else { x }
}
