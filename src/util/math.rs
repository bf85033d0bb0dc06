//! Polar geometry helpers shared by the lookup builder and the detectors.

/// Degrees of arc subtended by one kilometre at `range_km`.
pub(crate) fn deg_per_km(range_km: f64) -> f64 {
    180.0 / std::f64::consts::PI / range_km
}

/// Converts an angle to an azimuth index by truncating toward zero.
pub(crate) fn angle_to_index(angle_deg: f64, delta_az_deg: f64) -> i64 {
    (angle_deg / delta_az_deg) as i64
}

/// Resolves `ray + offset` on an azimuth axis of length `ny`.
///
/// A circular sweep wraps once by `ny` in either direction; a bounded sweep
/// discards anything outside `[0, ny)`.
pub(crate) fn wrap_ray(ray: usize, offset: i64, ny: usize, circular: bool) -> Option<usize> {
    let ny_i = ny as i64;
    let mut target = ray as i64 + offset;
    if circular {
        if target < 0 {
            target += ny_i;
        } else if target >= ny_i {
            target -= ny_i;
        }
    }
    if target < 0 || target >= ny_i {
        return None;
    }
    Some(target as usize)
}

/// Arithmetic mean, zero for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
