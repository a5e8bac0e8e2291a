#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod cfg;
mod constants;
mod dop;
mod epoch;
mod ephemeris;
mod error;
mod fix;
mod geometry;
mod position;
mod processor;
mod visibility;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{Config, WeightModel};
    pub use crate::dop::DilutionOfPrecision;
    pub use crate::ephemeris::{Ephemeris, EphemerisPool};
    pub use crate::epoch::DopReport;
    pub use crate::error::Error;
    pub use crate::fix::ReceiverFix;
    pub use crate::position::Position;
    pub use crate::processor::TrajectoryProcessor;
    pub use crate::visibility::VisibleSatellite;
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
