use itertools::Itertools;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::{Position, SV};

/// One satellite retained by the elevation mask, with its geometry
/// relative to the receiver.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VisibleSatellite {
    /// [SV]
    pub sv: SV,
    /// Elevation above receiver horizon (in degrees)
    pub elevation_deg: f64,
    /// Azimuth, clockwise from North (in degrees, [0°; 360°[)
    pub azimuth_deg: f64,
    /// Unit line of sight, receiver to satellite, ECEF frame
    pub(crate) los_ecef: Vector3<f64>,
}

/// Retains satellites standing above the elevation mask (in degrees),
/// resolving elevation, azimuth and unit line of sight for each.
/// Output is sorted by [SV] for deterministic downstream processing.
pub(crate) fn filter(
    rx: &Position,
    states: &[(SV, Vector3<f64>)],
    mask_deg: f64,
) -> Vec<VisibleSatellite> {
    let (lat_rad, lon_rad) = rx.lat_lon_rad();
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();

    // local ENU unit vectors, expressed in ECEF
    let east = Vector3::new(-sin_lon, cos_lon, 0.0);
    let north = Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let up = Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

    let rx_ecef = rx.ecef();

    states
        .iter()
        .filter_map(|(sv, sat_ecef)| {
            let los = (sat_ecef - rx_ecef).normalize();

            let elevation_deg = los.dot(&up).asin().to_degrees();
            if elevation_deg < mask_deg {
                return None;
            }

            let mut azimuth_deg = los.dot(&east).atan2(los.dot(&north)).to_degrees();
            if azimuth_deg < 0.0 {
                azimuth_deg += 360.0;
            }

            Some(VisibleSatellite {
                sv: *sv,
                elevation_deg,
                azimuth_deg,
                los_ecef: los,
            })
        })
        .sorted_by_key(|vis| vis.sv)
        .collect()
}
