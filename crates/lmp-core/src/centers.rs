use crate::geom::Vec3;

/// Unweighted mean position. Returns the origin for an empty slice.
pub fn center_of_geometry(positions: &[Vec3]) -> Vec3 {
    if positions.is_empty() {
        return Vec3::ZERO;
    }
    let mut sum = [0.0f64; 3];
    for p in positions {
        sum[0] += p.x;
        sum[1] += p.y;
        sum[2] += p.z;
    }
    let inv = 1.0 / positions.len() as f64;
    Vec3::new(sum[0] * inv, sum[1] * inv, sum[2] * inv)
}
