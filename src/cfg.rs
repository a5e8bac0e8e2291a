#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use nalgebra::DMatrix;

use crate::prelude::{Constellation, Duration};
use crate::visibility::VisibleSatellite;

fn default_kepler_eps() -> f64 {
    1E-12
}

fn default_kepler_max_iter() -> usize {
    30
}

fn default_singularity_threshold() -> f64 {
    1E-10
}

fn default_max_dtoe() -> Duration {
    Duration::from_hours(2.0)
}

fn default_weighting() -> Option<WeightModel> {
    None
}

fn default_constellations() -> Option<Vec<Constellation>> {
    None
}

/// Optional measurement weighting applied when forming the
/// normal equations, as a diagonal weight matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WeightModel {
    /// w = 1 / (sigma · sin²(elev)): low elevation vehicles weigh less.
    ElevationSine {
        /// Constellation dependent variance scaling (unitless)
        sigma: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Minimal SV elevation angle (in degrees). SV below that angle
    /// do not contribute to the geometry. There is no internal default:
    /// the mask is a policy choice that depends on the deployment and
    /// constellations being tracked, you must provide it.
    pub min_sv_elev_deg: f64,

    /// Kepler solver convergence criterion (in radians).
    #[cfg_attr(feature = "serde", serde(default = "default_kepler_eps"))]
    pub kepler_eps_rad: f64,

    /// Kepler solver iteration cap, reached only on pathological
    /// eccentricities, in which case the vehicle is dropped.
    #[cfg_attr(feature = "serde", serde(default = "default_kepler_max_iter"))]
    pub kepler_max_iter: usize,

    /// |det(GᵗG)| below this threshold is considered a singular
    /// geometry and reported as undefined DOP.
    #[cfg_attr(
        feature = "serde",
        serde(default = "default_singularity_threshold")
    )]
    pub singularity_threshold: f64,

    /// Ephemeris frame validity window: a frame applies to epochs
    /// within ±max_dtoe of its ToE. 2 hours is standard for GPS-like
    /// broadcast ephemerides.
    #[cfg_attr(feature = "serde", serde(default = "default_max_dtoe"))]
    pub max_dtoe: Duration,

    /// Optional weighting of the normal equations.
    #[cfg_attr(feature = "serde", serde(default = "default_weighting"))]
    pub weighting: Option<WeightModel>,

    /// Restrict the solution to these [Constellation]s.
    /// `None` means any vehicle found in the pool may contribute.
    #[cfg_attr(feature = "serde", serde(default = "default_constellations"))]
    pub constellations: Option<Vec<Constellation>>,
}

impl Config {
    /// Builds a new [Config] with requested elevation mask (in degrees)
    /// and documented defaults for everything else.
    pub fn new(min_sv_elev_deg: f64) -> Self {
        Self {
            min_sv_elev_deg,
            kepler_eps_rad: default_kepler_eps(),
            kepler_max_iter: default_kepler_max_iter(),
            singularity_threshold: default_singularity_threshold(),
            max_dtoe: default_max_dtoe(),
            weighting: default_weighting(),
            constellations: default_constellations(),
        }
    }

    /// Copies and returns [Config] with updated [WeightModel].
    pub fn with_weighting(mut self, model: WeightModel) -> Self {
        self.weighting = Some(model);
        self
    }

    /// Copies and returns [Config] restricted to these [Constellation]s.
    pub fn with_constellations(mut self, constellations: Vec<Constellation>) -> Self {
        self.constellations = Some(constellations);
        self
    }

    /// Forms the diagonal weight matrix for this geometry,
    /// when weighting is enabled.
    pub(crate) fn weight_matrix(&self, visible: &[VisibleSatellite]) -> Option<DMatrix<f64>> {
        let model = self.weighting?;
        match model {
            WeightModel::ElevationSine { sigma } => {
                let mut mat = DMatrix::identity(visible.len(), visible.len());
                for (i, vis) in visible.iter().enumerate() {
                    let sin_elev = vis.elevation_deg.to_radians().sin();
                    mat[(i, i)] = 1.0 / (sigma * sin_elev.powi(2));
                }
                Some(mat)
            },
        }
    }
}
