use log::debug;
use nalgebra::{Rotation3, Vector3};

use crate::constants::{
    EARTH_ANGULAR_VEL_RAD, EARTH_GRAVITATION_MU_M3_S2, RELATIVISTIC_CLOCK_F_S_SQRT_M,
};
use crate::prelude::{Config, Ephemeris, Epoch, Error};

impl Ephemeris {
    /// Solves Kepler's equation (mean to eccentric anomaly) by fixed
    /// point iteration. Returns None when the iteration cap is reached
    /// before the convergence criterion, which only happens on
    /// pathological eccentricities.
    fn eccentric_anomaly(&self, m_rad: f64, eps_rad: f64, max_iter: usize) -> Option<f64> {
        let e = self.eccentricity;
        let mut e_k = m_rad;

        for _ in 0..max_iter {
            let e_k_next = m_rad + e * e_k.sin();
            if (e_k_next - e_k).abs() < eps_rad {
                return Some(e_k_next);
            }
            e_k = e_k_next;
        }

        None
    }

    /// Resolves this [Ephemeris] frame into the [SV] ECEF position
    /// (in meters) at `epoch`. The validity window is the caller's
    /// concern: pool selection guarantees it before we ever get here.
    pub fn resolve_position(&self, epoch: Epoch, cfg: &Config) -> Result<Vector3<f64>, Error> {
        let e = self.eccentricity;
        let e_2 = e.powi(2);
        let a = self.semi_major_axis_m;
        let a_3 = a.powi(3);

        let (cus, cuc) = self.cus_cuc_rad;
        let (cis, cic) = self.cis_cic_rad;
        let (crs, crc) = self.crs_crc_m;
        let (i0, idot) = (self.i0_rad, self.idot_rad_s);
        let (omega0, omega, omega_dot) = (self.omega0_rad, self.omega_rad, self.omega_dot_rad_s);

        let timescale = self
            .sv
            .constellation
            .timescale()
            .ok_or(Error::UnknownTimescale(self.sv))?;

        // Epochs are absolute: week rollover never shows in (t - toe)
        let epoch = epoch.to_time_scale(timescale);
        let t_k = (epoch - self.toe).to_seconds();

        let n0 = (EARTH_GRAVITATION_MU_M3_S2 / a_3).sqrt();
        let n = n0 + self.dn_rad_s;
        let m = self.m0_rad + n * t_k;

        let e_k = self
            .eccentric_anomaly(m, cfg.kepler_eps_rad, cfg.kepler_max_iter)
            .ok_or(Error::KeplerNoConvergence(epoch, self.sv))?;

        let (sin_e_k, cos_e_k) = e_k.sin_cos();
        let v_k = ((1.0 - e_2).sqrt() * sin_e_k).atan2(cos_e_k - e);

        let phi = v_k + omega;
        let (sin_2phi, cos_2phi) = (2.0 * phi).sin_cos();

        let u_k = phi + cuc * cos_2phi + cus * sin_2phi;
        let r_k = a * (1.0 - e * cos_e_k) + crc * cos_2phi + crs * sin_2phi;
        let i_k = i0 + idot * t_k + cic * cos_2phi + cis * sin_2phi;

        let omega_k = omega0 + (omega_dot - EARTH_ANGULAR_VEL_RAD) * t_k
            - EARTH_ANGULAR_VEL_RAD * self.weekly_toe_seconds();

        let (x, y, z) = (r_k * u_k.cos(), r_k * u_k.sin(), 0.0);

        // orbital plane to ECEF rotation
        let rot_x3 = Rotation3::from_axis_angle(&Vector3::x_axis(), i_k);
        let rot_z3 = Rotation3::from_axis_angle(&Vector3::z_axis(), omega_k);
        let rot3 = rot_z3 * rot_x3;

        let xyz_ecef = rot3 * Vector3::new(x, y, z);

        debug!(
            "{}({}) - kepler solving x={:.3} y={:.3} z={:.3} t_k={:.1}",
            epoch, self.sv, xyz_ecef[0], xyz_ecef[1], xyz_ecef[2], t_k
        );

        Ok(xyz_ecef)
    }

    /// Evaluates the broadcast clock polynomial at `epoch`, including
    /// the relativistic eccentricity correction. Not involved in the
    /// geometry itself, but the terms travel with every broadcast
    /// frame and range consumers need them.
    pub fn clock_offset_seconds(&self, epoch: Epoch, cfg: &Config) -> Result<f64, Error> {
        let timescale = self
            .sv
            .constellation
            .timescale()
            .ok_or(Error::UnknownTimescale(self.sv))?;

        let epoch = epoch.to_time_scale(timescale);
        let dt = (epoch - self.toc).to_seconds();
        let t_k = (epoch - self.toe).to_seconds();

        let a = self.semi_major_axis_m;
        let n = (EARTH_GRAVITATION_MU_M3_S2 / a.powi(3)).sqrt() + self.dn_rad_s;
        let m = self.m0_rad + n * t_k;

        let e_k = self
            .eccentric_anomaly(m, cfg.kepler_eps_rad, cfg.kepler_max_iter)
            .ok_or(Error::KeplerNoConvergence(epoch, self.sv))?;

        let dt_rel = RELATIVISTIC_CLOCK_F_S_SQRT_M * self.eccentricity * a.sqrt() * e_k.sin();

        Ok(self.clock_bias_s
            + self.clock_drift_s_s * dt
            + self.clock_drift_rate_s_s2 * dt.powi(2)
            + dt_rel)
    }
}
