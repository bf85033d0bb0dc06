//! Ray-parallel mapping for the detectors (feature-gated).

use crate::detect::RayWrites;
use rayon::prelude::*;

/// Computes every ray's writes in parallel, returned in ray order.
pub(crate) fn map_rays<F>(ny: usize, ray_writes: F) -> Vec<Option<RayWrites>>
where
    F: Fn(usize) -> Option<RayWrites> + Sync + Send,
{
    (0..ny).into_par_iter().map(ray_writes).collect()
}
