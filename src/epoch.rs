use log::debug;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dop::DilutionOfPrecision;
use crate::geometry;
use crate::prelude::{Config, Epoch, EphemerisPool, Position, ReceiverFix, SV};
use crate::visibility;

/// Per fix outcome. Exactly one [DopReport] exists per proposed
/// [ReceiverFix], whether or not the geometry was solvable, so the
/// output always aligns with the original trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DopReport {
    /// Sampling instant of the [ReceiverFix]
    pub t: Epoch,

    /// Receiver [Position] this report was resolved for
    pub position: Position,

    /// Number of satellites retained by the elevation mask
    pub n_visible: usize,

    /// Resolved [DilutionOfPrecision]. `None` is the undefined state:
    /// fewer than 4 satellites in sight, or a degenerate geometry.
    pub dop: Option<DilutionOfPrecision>,
}

/// Resolves one fix: ephemeris selection, satellite propagation,
/// masking, geometry formation and inversion. Pure function of its
/// (read-only) inputs, which is what allows the trajectory level to
/// fan epochs out across threads.
pub(crate) struct EpochProcessor<'a> {
    pub cfg: &'a Config,
    pub pool: &'a EphemerisPool,
}

impl EpochProcessor<'_> {
    fn retained(&self, sv: SV) -> bool {
        match &self.cfg.constellations {
            Some(constellations) => constellations.contains(&sv.constellation),
            None => true,
        }
    }

    /// Propagates every usable vehicle to this instant.
    /// Selection misses and solver failures drop the vehicle from this
    /// epoch only: they are reported, never propagated.
    fn satellite_states(&self, t: Epoch) -> Vec<(SV, Vector3<f64>)> {
        let mut states = Vec::new();

        for sv in self.pool.sv() {
            if !self.retained(sv) {
                continue;
            }

            let eph = match self.pool.select(sv, t, self.cfg.max_dtoe) {
                Ok(eph) => eph,
                Err(e) => {
                    debug!("{} - dropped: {}", t, e);
                    continue;
                },
            };

            match eph.resolve_position(t, self.cfg) {
                Ok(ecef_m) => states.push((sv, ecef_m)),
                Err(e) => {
                    debug!("{} - dropped: {}", t, e);
                },
            }
        }

        states
    }

    pub fn process(&self, fix: &ReceiverFix) -> DopReport {
        let states = self.satellite_states(fix.t);

        let visible = visibility::filter(&fix.position, &states, self.cfg.min_sv_elev_deg);

        let g = geometry::matrix(&visible);
        let w = self.cfg.weight_matrix(&visible);

        let dop = DilutionOfPrecision::solve(
            &g,
            w.as_ref(),
            &fix.position,
            self.cfg.singularity_threshold,
        );

        if dop.is_none() {
            debug!("{} - undefined geometry ({} in sight)", fix.t, visible.len());
        }

        DopReport {
            t: fix.t,
            position: fix.position,
            n_visible: visible.len(),
            dop,
        }
    }
}
