use nalgebra::{DMatrix, Matrix3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::Position;

/// Dilution Of Precision of one resolved geometry. All values are
/// positive, finite, and tied by GDOP² = PDOP² + TDOP² and
/// PDOP² = HDOP² + VDOP².
#[derive(Debug, Clone, Default, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DilutionOfPrecision {
    /// Geometric DOP
    pub gdop: f64,

    /// Position (3D) DOP
    pub pdop: f64,

    /// Horizontal DOP
    pub hdop: f64,

    /// Vertical DOP
    pub vdop: f64,

    /// Temporal DOP
    pub tdop: f64,
}

impl DilutionOfPrecision {
    /// Rotates the position block of Q into the local ENU frame,
    /// where the horizontal / vertical decomposition is meaningful.
    fn q_enu(mat: &DMatrix<f64>, lat_rad: f64, lon_rad: f64) -> Matrix3<f64> {
        let r = Matrix3::<f64>::new(
            -lon_rad.sin(),
            -lon_rad.cos() * lat_rad.sin(),
            lat_rad.cos() * lon_rad.cos(),
            lon_rad.cos(),
            -lat_rad.sin() * lon_rad.sin(),
            lat_rad.cos() * lon_rad.sin(),
            0.0_f64,
            lat_rad.cos(),
            lat_rad.sin(),
        );

        let q_3 = Matrix3::<f64>::new(
            mat[(0, 0)],
            mat[(0, 1)],
            mat[(0, 2)],
            mat[(1, 0)],
            mat[(1, 1)],
            mat[(1, 2)],
            mat[(2, 0)],
            mat[(2, 1)],
            mat[(2, 2)],
        );

        r.transpose() * q_3 * r
    }

    /// Resolves the DOP of this geometry matrix: Q = (GᵗWG)⁻¹ and its
    /// ENU decomposition at the receiver location. Returns None (the
    /// undefined state, not an error) whenever fewer than 4 satellites
    /// contribute or the normal equations are singular: blocked skies
    /// are an expected real world condition, the caller records the
    /// epoch and moves on.
    pub(crate) fn solve(
        g: &DMatrix<f64>,
        w: Option<&DMatrix<f64>>,
        rx: &Position,
        singularity_threshold: f64,
    ) -> Option<Self> {
        if g.nrows() < 4 {
            return None;
        }

        let q = match w {
            Some(w) => g.transpose() * w * g,
            None => g.transpose() * g,
        };

        let det = q.determinant();
        if !det.is_finite() || det.abs() < singularity_threshold {
            return None;
        }

        let q_inv = q.try_inverse()?;
        if q_inv.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let (lat_rad, lon_rad) = rx.lat_lon_rad();
        let q_enu = Self::q_enu(&q_inv, lat_rad, lon_rad);

        Some(Self {
            gdop: q_inv.trace().sqrt(),
            tdop: q_inv[(3, 3)].sqrt(),
            pdop: q_enu.trace().sqrt(),
            hdop: (q_enu[(0, 0)] + q_enu[(1, 1)]).sqrt(),
            vdop: q_enu[(2, 2)].sqrt(),
        })
    }
}
