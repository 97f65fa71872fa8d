use std::f64::consts::PI;

use crate::report::Report;
use crate::response;
use crate::{BoxParams, ConfigError, DriverParams, EvalConfig, PortShape, SweepResult, SystemParams};

/// Default sweep range in Hz.
pub const DEFAULT_RANGE_HZ: (f64, f64) = (10.0, 1000.0);

/// Default number of grid points.
pub const DEFAULT_POINTS: usize = 300;

/// `n` logarithmically spaced frequencies from `lo` to `hi` Hz, endpoints
/// inclusive, strictly increasing.
pub fn log_spaced(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    assert!(n >= 2, "grid needs at least two points");
    assert!(lo > 0.0 && hi > lo, "grid needs 0 < lo < hi");
    let log_lo = lo.log10();
    let step = (hi.log10() - log_lo) / (n - 1) as f64;
    (0..n).map(|i| 10f64.powf(log_lo + step * i as f64)).collect()
}

/// Sweep one design: build the grid, seed the report with the echoed input
/// parameters, and run the response model once. Adds no computation of its
/// own — it exists because several named designs are swept independently
/// and overlaid by the renderer under `label`.
pub fn run_sweep(
    label: &str,
    driver: &DriverParams,
    enclosure: &BoxParams,
    system: &SystemParams,
    config: &EvalConfig,
    range_hz: (f64, f64),
    points: usize,
) -> Result<SweepResult, ConfigError> {
    let frequencies = log_spaced(range_hz.0, range_hz.1, points);
    let omega: Vec<f64> = frequencies.iter().map(|f| 2.0 * PI * f).collect();
    let seed = seed_report(driver, enclosure, system);
    let (curves, report) = response::evaluate(&omega, driver, enclosure, system, config, &seed)?;
    log::debug!(
        "swept {label:?}: {points} points over {:.0}–{:.0} Hz, {} report entries",
        range_hz.0,
        range_hz.1,
        report.len()
    );
    Ok(SweepResult {
        label: label.to_owned(),
        frequencies,
        curves,
        report,
    })
}

/// Echo the raw input parameters into the report seed so a design can be
/// reconstructed from its report. Port fields are echoed only for ported
/// boxes, and only the dimensions the selected shape actually uses.
pub fn seed_report(
    driver: &DriverParams,
    enclosure: &BoxParams,
    system: &SystemParams,
) -> Report {
    let mut seed = Report::new();
    seed.set("F_s", driver.fs);
    seed.set("R_e", driver.re);
    seed.set("L_e", driver.le);
    seed.set("Q_ms", driver.qms);
    seed.set("Q_es", driver.qes);
    seed.set("Vas", driver.vas);
    seed.set("Xmax", driver.xmax);
    seed.set("S_d", driver.sd);
    seed.set("V_box", enclosure.v_box);
    seed.set("n_ports", enclosure.n_ports as f64);
    if enclosure.is_ported() {
        seed.set("f_port", enclosure.f_port);
        seed.set("Q_port", enclosure.q_port);
        match enclosure.port_shape {
            PortShape::Circular => seed.set("d_port", enclosure.d_port),
            PortShape::Rectangular => {
                seed.set("a_port", enclosure.a_port);
                seed.set("b_port", enclosure.b_port);
            }
        }
        seed.set("endCorrect", enclosure.end_correct);
    }
    seed.set("Znom", system.znom);
    seed.set("Pin", system.pin);
    seed
}
