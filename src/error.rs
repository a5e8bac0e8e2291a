use thiserror::Error;

use crate::prelude::{Epoch, SV};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No ephemeris frame is valid for this [SV] at requested [Epoch]:
    /// either the pool does not know this vehicle at all, or every known
    /// frame lies outside its validity window. The vehicle is simply
    /// dropped from that epoch, this is never fatal to the run.
    #[error("{1} has no valid ephemeris frame at {0}")]
    EphemerisInvalid(Epoch, SV),

    /// Kepler solver did not converge within the iteration cap.
    /// Only reachable with pathological orbital elements: the vehicle
    /// is dropped from that epoch.
    #[error("{1} kepler solver did not converge at {0}")]
    KeplerNoConvergence(Epoch, SV),

    /// [SV] constellation is not tied to a known timescale, we cannot
    /// express the propagation instant correctly.
    #[error("unknown timescale for {0}")]
    UnknownTimescale(SV),

    /// Empty fix sequence: there is nothing to process.
    #[error("empty trajectory")]
    EmptyTrajectory,

    /// Empty ephemeris pool: no satellite position can ever be resolved.
    #[error("empty ephemeris pool")]
    EmptyEphemerisPool,
}
