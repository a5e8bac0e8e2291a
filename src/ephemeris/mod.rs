use std::collections::{BTreeMap, HashMap};

use log::warn;

use crate::prelude::{Duration, Epoch, Error, SV};

mod kepler;

/// One broadcast ephemeris frame: Keplerian elements, perturbation
/// terms and clock polynomial for a single [SV], applicable within a
/// bounded window around its Time of Ephemeris.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Ephemeris {
    /// [SV]
    pub sv: SV,

    /// Time of Ephemeris, expressed in the [SV] timescale
    pub toe: Epoch,

    /// Time of Clock, expressed in the [SV] timescale
    pub toc: Epoch,

    /// Semi-major axis (in meters)
    pub semi_major_axis_m: f64,

    /// Eccentricity
    pub eccentricity: f64,

    /// Mean anomaly at ToE (in radians)
    pub m0_rad: f64,

    /// Inclination at ToE (in radians)
    pub i0_rad: f64,

    /// Inclination rate (in radians/s)
    pub idot_rad_s: f64,

    /// Mean motion correction (in radians/s)
    pub dn_rad_s: f64,

    /// Longitude of ascending node at ToE (in radians)
    pub omega0_rad: f64,

    /// Argument of perigee (in radians)
    pub omega_rad: f64,

    /// Ascending node rate (in radians/s)
    pub omega_dot_rad_s: f64,

    /// Argument of latitude, Sine / Cosine harmonic terms (in radians)
    pub cus_cuc_rad: (f64, f64),

    /// Inclination, Sine / Cosine harmonic terms (in radians)
    pub cis_cic_rad: (f64, f64),

    /// Orbital radius, Sine / Cosine harmonic terms (in meters)
    pub crs_crc_m: (f64, f64),

    /// Clock bias (in seconds)
    pub clock_bias_s: f64,

    /// Clock drift (in s/s)
    pub clock_drift_s_s: f64,

    /// Clock drift rate (in s/s²)
    pub clock_drift_rate_s_s2: f64,
}

impl Ephemeris {
    /// Returns true if this [Ephemeris] frame is still valid at `now`.
    pub fn is_valid(&self, now: Epoch, max_dtoe: Duration) -> bool {
        (now - self.toe).abs() < max_dtoe
    }

    /// Returns ToE in seconds of week
    pub(crate) fn weekly_toe_seconds(&self) -> f64 {
        (self.toe.to_time_of_week().1 as f64) / 1.0E9
    }

    /// Screens this frame for physically invalid content.
    /// Frames that do not pass are rejected at pool ingestion.
    fn sanity(&self) -> bool {
        let finite = [
            self.semi_major_axis_m,
            self.eccentricity,
            self.m0_rad,
            self.i0_rad,
            self.idot_rad_s,
            self.dn_rad_s,
            self.omega0_rad,
            self.omega_rad,
            self.omega_dot_rad_s,
            self.cus_cuc_rad.0,
            self.cus_cuc_rad.1,
            self.cis_cic_rad.0,
            self.cis_cic_rad.1,
            self.crs_crc_m.0,
            self.crs_crc_m.1,
            self.clock_bias_s,
            self.clock_drift_s_s,
            self.clock_drift_rate_s_s2,
        ]
        .iter()
        .all(|v| v.is_finite());

        finite
            && self.semi_major_axis_m > 0.0
            && self.eccentricity >= 0.0
            && self.eccentricity < 1.0
    }
}

/// Read-only pool of [Ephemeris] frames, indexed per [SV] and sorted
/// by ToE, so the active frame at any instant is resolved without
/// rescanning the whole set.
#[derive(Debug, Clone, Default)]
pub struct EphemerisPool {
    frames: HashMap<SV, BTreeMap<Epoch, Ephemeris>>,
}

impl EphemerisPool {
    /// Builds an empty [EphemerisPool].
    pub fn new() -> Self {
        Self::default()
    }

    /// Proposes one [Ephemeris] frame. Physically invalid frames are
    /// rejected (and reported): they must never contribute to a solution.
    /// Returns true if the frame was retained.
    pub fn insert(&mut self, eph: Ephemeris) -> bool {
        if !eph.sanity() {
            warn!("{}({}) - malformed ephemeris frame rejected", eph.toe, eph.sv);
            return false;
        }

        self.frames.entry(eph.sv).or_default().insert(eph.toe, eph);
        true
    }

    /// Returns the active frame for this [SV] at `t`: the one whose ToE
    /// lies closest to `t`, among frames whose validity window contains `t`.
    pub fn select(&self, sv: SV, t: Epoch, max_dtoe: Duration) -> Result<&Ephemeris, Error> {
        let frames = self
            .frames
            .get(&sv)
            .ok_or(Error::EphemerisInvalid(t, sv))?;

        let below = frames.range(..=t).next_back().map(|(_, eph)| eph);
        let above = frames.range(t..).next().map(|(_, eph)| eph);

        let nearest = match (below, above) {
            (Some(b), Some(a)) => {
                if (t - b.toe).abs() <= (a.toe - t).abs() {
                    Some(b)
                } else {
                    Some(a)
                }
            },
            (Some(b), None) => Some(b),
            (None, Some(a)) => Some(a),
            (None, None) => None,
        };

        nearest
            .filter(|eph| eph.is_valid(t, max_dtoe))
            .ok_or(Error::EphemerisInvalid(t, sv))
    }

    /// Returns the [SV]s this pool knows about (unordered).
    pub fn sv(&self) -> impl Iterator<Item = SV> + '_ {
        self.frames.keys().copied()
    }

    /// Total number of retained frames.
    pub fn len(&self) -> usize {
        self.frames.values().map(|v| v.len()).sum()
    }

    /// Returns true if no frame was ever retained.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FromIterator<Ephemeris> for EphemerisPool {
    fn from_iter<T: IntoIterator<Item = Ephemeris>>(iter: T) -> Self {
        let mut pool = Self::new();
        for eph in iter {
            pool.insert(eph);
        }
        pool
    }
}
