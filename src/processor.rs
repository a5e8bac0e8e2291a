use rayon::prelude::*;

use crate::epoch::EpochProcessor;
use crate::prelude::{Config, DopReport, EphemerisPool, Error, ReceiverFix};

/// Trajectory level DOP solver: owns the [Config] and the read-only
/// [EphemerisPool], and resolves one [DopReport] per proposed fix.
#[derive(Debug, Clone)]
pub struct TrajectoryProcessor {
    cfg: Config,
    pool: EphemerisPool,
}

impl TrajectoryProcessor {
    /// Builds a new [TrajectoryProcessor] from [Config] and the
    /// [EphemerisPool] covering the trajectory timespan.
    pub fn new(cfg: Config, pool: EphemerisPool) -> Self {
        Self { cfg, pool }
    }

    /// Resolves the [DilutionOfPrecision] along this trajectory.
    /// Epochs are independent and processed in parallel; the output
    /// preserves input order and length, one [DopReport] per fix,
    /// undefined geometries included. Only structurally empty input
    /// errors out.
    pub fn process(&self, fixes: &[ReceiverFix]) -> Result<Vec<DopReport>, Error> {
        if fixes.is_empty() {
            return Err(Error::EmptyTrajectory);
        }

        if self.pool.is_empty() {
            return Err(Error::EmptyEphemerisPool);
        }

        let processor = EpochProcessor {
            cfg: &self.cfg,
            pool: &self.pool,
        };

        Ok(fixes.par_iter().map(|fix| processor.process(fix)).collect())
    }
}
