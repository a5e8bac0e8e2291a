/// Earth angular velocity, in WGS84 frame rad/s
pub const EARTH_ANGULAR_VEL_RAD: f64 = 7.2921151467E-5;

/// Earth gravitational constant (m^3 s-2)
pub const EARTH_GRAVITATION_MU_M3_S2: f64 = 3.986004418E14;

/// WGS84 Earth Frame Ellipsoid semi-major axis
pub const EARTH_SEMI_MAJOR_AXIS_WGS84: f64 = 6378137.0_f64;

/// Relativistic clock correction factor -2√μ/c² (s per √m)
pub const RELATIVISTIC_CLOCK_F_S_SQRT_M: f64 = -4.442807633E-10;
