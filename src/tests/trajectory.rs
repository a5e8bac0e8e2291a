use std::str::FromStr;

use crate::prelude::{
    Config, Constellation, Duration, Epoch, EphemerisPool, Error, Position, ReceiverFix,
    TrajectoryProcessor, Vector3,
};
use crate::tests::{init_logger, synthetic_constellation};

fn t0() -> Epoch {
    Epoch::from_str("2020-06-25T00:00:00 GPST").unwrap()
}

fn equatorial_fix(t: Epoch, lon_deg: f64) -> ReceiverFix {
    ReceiverFix::new(
        t,
        Position::from_geo(Vector3::new(0.0, lon_deg.to_radians(), 0.0)),
    )
}

#[test]
fn one_report_per_fix_in_order() {
    init_logger();

    let pool: EphemerisPool = synthetic_constellation(t0()).into_iter().collect();
    assert_eq!(pool.len(), 24);

    let fixes: Vec<_> = (0..8)
        .map(|i| {
            equatorial_fix(
                t0() + Duration::from_seconds(i as f64 * 30.0),
                i as f64 * 1.0E-3,
            )
        })
        .collect();

    let solver = TrajectoryProcessor::new(Config::new(5.0), pool);
    let reports = solver.process(&fixes).unwrap();

    assert_eq!(reports.len(), fixes.len());

    for (report, fix) in reports.iter().zip(fixes.iter()) {
        assert_eq!(report.t, fix.t);
        assert_eq!(report.position, fix.position);

        // a 24 vehicle shell guarantees a solvable sky anywhere
        assert!(report.n_visible >= 4);
        let dop = report.dop.expect("geometry must resolve under this shell");

        assert!(dop.gdop > 0.0 && dop.gdop < 10.0);
        assert!((dop.gdop.powi(2) - dop.pdop.powi(2) - dop.tdop.powi(2)).abs() < 1.0E-9);
        assert!((dop.pdop.powi(2) - dop.hdop.powi(2) - dop.vdop.powi(2)).abs() < 1.0E-9);
    }
}

#[test]
fn unsolvable_epoch_still_reported() {
    init_logger();

    let pool: EphemerisPool = synthetic_constellation(t0()).into_iter().collect();

    // second fix lies hours past every validity window:
    // every vehicle is dropped there, yet the epoch must show up
    let fixes = vec![
        equatorial_fix(t0(), 0.0),
        equatorial_fix(t0() + Duration::from_hours(7.0), 0.0),
    ];

    let solver = TrajectoryProcessor::new(Config::new(5.0), pool);
    let reports = solver.process(&fixes).unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports[0].dop.is_some());

    assert_eq!(reports[1].t, fixes[1].t);
    assert_eq!(reports[1].n_visible, 0);
    assert!(reports[1].dop.is_none());
}

#[test]
fn structurally_empty_input_errors() {
    let pool: EphemerisPool = synthetic_constellation(t0()).into_iter().collect();
    let solver = TrajectoryProcessor::new(Config::new(5.0), pool);
    assert_eq!(solver.process(&[]), Err(Error::EmptyTrajectory));

    let solver = TrajectoryProcessor::new(Config::new(5.0), EphemerisPool::new());
    assert_eq!(
        solver.process(&[equatorial_fix(t0(), 0.0)]),
        Err(Error::EmptyEphemerisPool),
    );
}

#[test]
fn constellation_selection_applies() {
    let pool: EphemerisPool = synthetic_constellation(t0()).into_iter().collect();

    // pool only knows GPS: restricting to Galileo empties every sky
    let cfg = Config::new(5.0).with_constellations(vec![Constellation::Galileo]);
    let solver = TrajectoryProcessor::new(cfg, pool);

    let reports = solver.process(&[equatorial_fix(t0(), 0.0)]).unwrap();
    assert_eq!(reports[0].n_visible, 0);
    assert!(reports[0].dop.is_none());
}

#[test]
fn mask_angle_prunes_the_sky() {
    let pool: EphemerisPool = synthetic_constellation(t0()).into_iter().collect();
    let fix = equatorial_fix(t0(), 0.0);

    let open = TrajectoryProcessor::new(Config::new(5.0), pool.clone());
    let strict = TrajectoryProcessor::new(Config::new(40.0), pool);

    let n_open = open.process(&[fix]).unwrap()[0].n_visible;
    let n_strict = strict.process(&[fix]).unwrap()[0].n_visible;

    assert!(n_strict < n_open);
}

#[cfg(feature = "serde")]
#[test]
fn config_deserializes_with_defaults() {
    let cfg: Config = serde_json::from_str(r#"{"min_sv_elev_deg": 10.0}"#).unwrap();
    assert_eq!(cfg, Config::new(10.0));
}

#[cfg(feature = "serde")]
#[test]
fn reports_serialize() {
    let pool: EphemerisPool = synthetic_constellation(t0()).into_iter().collect();
    let solver = TrajectoryProcessor::new(Config::new(5.0), pool);

    let reports = solver.process(&[equatorial_fix(t0(), 0.0)]).unwrap();
    let json = serde_json::to_string(&reports).unwrap();
    assert!(json.contains("gdop"));
}
