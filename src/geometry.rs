use nalgebra::DMatrix;

use crate::visibility::VisibleSatellite;

/// Forms the (n x 4) geometry matrix: one row per visible satellite,
/// [-unit line of sight, 1], the trailing column being the receiver
/// clock bias term. Empty input forms a (0 x 4) matrix, which the
/// solver reports as undefined.
pub(crate) fn matrix(visible: &[VisibleSatellite]) -> DMatrix<f64> {
    DMatrix::from_fn(visible.len(), 4, |i, j| {
        if j < 3 {
            -visible[i].los_ecef[j]
        } else {
            1.0
        }
    })
}
