use num_complex::Complex64;
use std::f64::consts::PI;

use crate::constants::{
    self, GAMMA, LISTENING_DISTANCE, METERS_TO_INCHES, P_ATM, P_REF, PHASE_ROTATION_DEG, RHO_AIR,
};
use crate::port::{self, PortModel};
use crate::report::Report;
use crate::{
    BoxParams, ConfigError, DriverParams, EvalConfig, ResponseCurves, SystemParams, VelocityUnits,
    VoltageConvention,
};

/// Lumped electromechanical constants derived from the Thiele-Small set
/// via the adiabatic gas law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Electromechanics {
    /// Driver resonance ω₀ in rad/s.
    pub omega_0: f64,
    /// Moving mass in kg.
    pub mass: f64,
    /// Force factor BL in T·m.
    pub bl: f64,
    /// Mechanical damping in N/(m/s).
    pub damping: f64,
    /// Suspension stiffness in N/m.
    pub stiffness: f64,
    /// Cone radius in m.
    pub cone_radius: f64,
    /// Air-spring stiffness of the box in N/m.
    pub box_stiffness: f64,
    /// Peak drive voltage in V, per the configured convention.
    pub peak_voltage: f64,
}

impl Electromechanics {
    pub fn derive(
        driver: &DriverParams,
        enclosure: &BoxParams,
        system: &SystemParams,
        config: &EvalConfig,
    ) -> Self {
        let omega_0 = 2.0 * PI * driver.fs;
        let mass = GAMMA * P_ATM * driver.sd * driver.sd / (omega_0 * omega_0 * driver.vas);
        let bl = (omega_0 * mass * driver.re / driver.qes).sqrt();
        let damping = omega_0 * mass / driver.qms;
        let stiffness = omega_0 * omega_0 * mass;
        let cone_radius = (driver.sd / PI).sqrt();
        let box_stiffness = GAMMA * P_ATM * driver.sd * driver.sd / enclosure.v_box;
        let peak_voltage = match config.voltage_convention {
            VoltageConvention::NominalLoad => (2.0 * system.pin * system.znom).sqrt(),
            VoltageConvention::CoilResistance => (2.0 * system.pin * driver.re).sqrt(),
        };
        Self {
            omega_0,
            mass,
            bl,
            damping,
            stiffness,
            cone_radius,
            box_stiffness,
            peak_voltage,
        }
    }
}

/// Evaluate the response model elementwise over `omega` (rad/s).
///
/// Returns the curve set and a fresh report: `seed` overlaid with every
/// derived quantity. The seed itself is never mutated. Degenerate
/// frequencies (a zero denominator somewhere) produce non-finite samples,
/// never a panic — a sweep fails only on a [`ConfigError`], before any
/// computation.
pub fn evaluate(
    omega: &[f64],
    driver: &DriverParams,
    enclosure: &BoxParams,
    system: &SystemParams,
    config: &EvalConfig,
    seed: &Report,
) -> Result<(ResponseCurves, Report), ConfigError> {
    driver.validate()?;
    enclosure.validate()?;
    system.validate()?;

    let em = Electromechanics::derive(driver, enclosure, system, config);
    let port = PortModel::from_params(enclosure)?;
    let c = constants::speed_of_sound();
    let j = Complex64::i();
    let phase_rot = Complex64::from_polar(1.0, PHASE_ROTATION_DEG.to_radians());

    let n = omega.len();
    let mut excursion = Vec::with_capacity(n);
    let mut impedance = Vec::with_capacity(n);
    let mut spl = Vec::with_capacity(n);
    let mut phase = Vec::with_capacity(n);
    let mut pressure = Vec::with_capacity(n);
    let mut port_velocity = port.as_ref().map(|_| Vec::with_capacity(n));

    for &w in omega {
        let z = Complex64::new(driver.re, w * driver.le);

        let kappa = match &port {
            Some(p) => port::stiffness_correction(w, p.omega_port, p.q_port),
            None => Complex64::new(1.0, 0.0),
        };
        let k_eff = em.stiffness + kappa * em.box_stiffness;

        // Forced response of the coupled electro-mechanical second-order
        // system; dividing by z folds the electrical damping into the
        // mechanical equation.
        let denom = k_eff / em.mass
            + j * w * (em.bl * em.bl / (em.mass * z) + em.damping / em.mass)
            - w * w;
        let x = em.bl * em.peak_voltage / (em.mass * z * denom);

        // Driving-point impedance as loaded by the back-EMF.
        let z_in = z / (1.0 - j * w * em.bl * x / em.peak_voltage);

        // Near-field piston pressure at the listening distance.
        let p = RHO_AIR * em.cone_radius * em.cone_radius * w * w * kappa * x
            / (2.0 * LISTENING_DISTANCE);
        let p_rms = p / 2f64.sqrt();

        excursion.push(x);
        impedance.push(z_in);
        spl.push(20.0 * (p_rms.norm() / P_REF).log10());
        phase.push((p * phase_rot).arg().to_degrees());
        pressure.push(p);

        if let (Some(samples), Some(p_model)) = (port_velocity.as_mut(), port.as_ref()) {
            let kappa2 = port::velocity_correction(w, p_model.omega_port, p_model.q_port);
            let v = j * w * kappa2 * x * driver.sd / p_model.geometry.area;
            samples.push(match config.velocity_units {
                VelocityUnits::MetersPerSecond => v,
                VelocityUnits::Mach => v / c,
            });
        }
    }

    let report = assemble_report(seed, &em, port.as_ref(), system, c);

    Ok((
        ResponseCurves {
            excursion,
            impedance,
            spl,
            phase,
            port_velocity,
            pressure,
        },
        report,
    ))
}

/// Overlay the derived quantities onto a copy of the caller's seed.
///
/// The rectangular equivalent-diameter back-fill under `d_port` is the one
/// place a seeded key is overwritten; every other derived label is the
/// model's own.
fn assemble_report(
    seed: &Report,
    em: &Electromechanics,
    port: Option<&PortModel>,
    system: &SystemParams,
    c: f64,
) -> Report {
    let mut report = seed.clone();
    report.set("adiabatic constant", GAMMA);
    report.set("atmospheric pressure (Pa)", P_ATM);
    report.set("density of air (kg/m^3)", RHO_AIR);
    report.set("speed of sound in air (m/s)", c);
    report.set("listening distance (m)", LISTENING_DISTANCE);
    report.set("resonant angular frequency w_0 (1/s)", em.omega_0);
    report.set("cone mass m (kg)", em.mass);
    report.set("force factor BL (T m)", em.bl);
    report.set("mechanical damping factor (N/(m/s))", em.damping);
    report.set("mechanical spring constant (N/m)", em.stiffness);
    report.set("mechanical compliance (m/N)", 1.0 / em.stiffness);
    report.set("input power (W)", system.pin);
    report.set("peak input voltage (V)", em.peak_voltage);
    report.set("cone radius (m)", em.cone_radius);
    report.set("box spring constant (N/m)", em.box_stiffness);
    if let Some(p) = port {
        if let Some(d_eq) = p.geometry.equivalent_diameter {
            report.set("d_port", d_eq);
        }
        report.set("port angular frequency (1/s)", p.omega_port);
        report.set("port area (m^2)", p.geometry.area);
        report.set("port effective radius (m)", p.geometry.effective_radius);
        report.set("length of port (m)", p.length);
        report.set("length of port (in)", p.length * METERS_TO_INCHES);
        report.set("volume of port (l)", p.length * p.geometry.area * 1000.0);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_driver() -> DriverParams {
        DriverParams::default()
    }

    fn ported_box() -> BoxParams {
        BoxParams::default()
    }

    fn sealed_box() -> BoxParams {
        BoxParams {
            n_ports: 0,
            ..BoxParams::default()
        }
    }

    fn system() -> SystemParams {
        SystemParams::default()
    }

    #[test]
    fn test_electromechanics_reference_values() {
        // Hand-computed from the reference driver in a 32 l box at 100 W
        // into 8 Ω nominal.
        let em = Electromechanics::derive(
            &reference_driver(),
            &ported_box(),
            &system(),
            &EvalConfig::default(),
        );
        assert!((em.omega_0 - 232.47786).abs() < 1e-4, "ω₀ = {}", em.omega_0);
        assert!((em.mass - 0.048188).abs() < 1e-5, "m = {}", em.mass);
        assert!((em.bl - 11.32785).abs() < 1e-4, "BL = {}", em.bl);
        assert!((em.damping - 3.57909).abs() < 1e-4, "C = {}", em.damping);
        assert!((em.stiffness - 2604.34).abs() < 0.1, "K = {}", em.stiffness);
        assert!(
            (em.box_stiffness - 11963.7).abs() < 0.5,
            "K_box = {}",
            em.box_stiffness
        );
        assert!((em.cone_radius - 0.128593).abs() < 1e-5);
        assert!((em.peak_voltage - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_voltage_conventions() {
        let nominal = Electromechanics::derive(
            &reference_driver(),
            &ported_box(),
            &system(),
            &EvalConfig::default(),
        );
        let coil = Electromechanics::derive(
            &reference_driver(),
            &ported_box(),
            &system(),
            &EvalConfig {
                voltage_convention: VoltageConvention::CoilResistance,
                ..EvalConfig::default()
            },
        );
        // √(2·100·8) = 40 V vs √(2·100·5.04) ≈ 31.75 V
        assert!((nominal.peak_voltage - 40.0).abs() < 1e-12);
        assert!((coil.peak_voltage - 31.749016).abs() < 1e-5);
    }

    #[test]
    fn test_impedance_peak_at_resonance() {
        // At ω₀ the back-EMF loading must lift |Z| above the DC resistance.
        let driver = reference_driver();
        let omega = [2.0 * PI * driver.fs];
        let (curves, _) = evaluate(
            &omega,
            &driver,
            &sealed_box(),
            &system(),
            &EvalConfig::default(),
            &Report::new(),
        )
        .unwrap();
        let z_mag = curves.impedance[0].norm();
        assert!(z_mag > driver.re, "|Z(ω₀)| = {z_mag} ≤ R_e = {}", driver.re);
    }

    #[test]
    fn test_sealed_has_no_port_velocity_or_report_keys() {
        let omega: Vec<f64> = (1..=50).map(|i| i as f64 * 20.0).collect();
        let (curves, report) = evaluate(
            &omega,
            &reference_driver(),
            &sealed_box(),
            &system(),
            &EvalConfig::default(),
            &Report::new(),
        )
        .unwrap();
        assert!(curves.port_velocity.is_none());
        for (label, _) in report.iter() {
            assert!(
                !label.to_ascii_lowercase().contains("port"),
                "sealed report leaked port key {label:?}"
            );
        }
    }

    #[test]
    fn test_ported_report_keys() {
        let omega = [100.0];
        let (curves, report) = evaluate(
            &omega,
            &reference_driver(),
            &ported_box(),
            &system(),
            &EvalConfig::default(),
            &Report::new(),
        )
        .unwrap();
        assert!(curves.port_velocity.is_some());
        assert!((report.get("length of port (m)").unwrap() - 0.42193).abs() < 1e-4);
        assert!(
            (report.get("length of port (in)").unwrap() - 0.42193 * METERS_TO_INCHES).abs() < 1e-2
        );
        assert!((report.get("volume of port (l)").unwrap() - 3.175).abs() < 1e-2);
        assert!((report.get("port area (m^2)").unwrap() - 0.007525).abs() < 1e-9);
        // rectangular openings back-fill the equivalent circular diameter
        let d_eq = report.get("d_port").unwrap();
        assert!((d_eq - 0.0978832).abs() < 1e-6, "d_port = {d_eq}");
    }

    #[test]
    fn test_seed_not_mutated_and_echoed() {
        let mut seed = Report::new();
        seed.set("F_s", 37.0);
        seed.set("scratch", 1.5);
        let omega = [100.0];
        let (_, report) = evaluate(
            &omega,
            &reference_driver(),
            &ported_box(),
            &system(),
            &EvalConfig::default(),
            &seed,
        )
        .unwrap();
        // the seed is untouched, the output starts from it
        assert_eq!(seed.len(), 2);
        assert_eq!(report.get("F_s"), Some(37.0));
        assert_eq!(report.get("scratch"), Some(1.5));
        assert_eq!(report.iter().next().unwrap().0, "F_s");
    }

    #[test]
    fn test_mach_velocity_scaling() {
        let omega: Vec<f64> = (1..=20).map(|i| i as f64 * 50.0).collect();
        let driver = reference_driver();
        let ms = evaluate(
            &omega,
            &driver,
            &ported_box(),
            &system(),
            &EvalConfig::default(),
            &Report::new(),
        )
        .unwrap()
        .0;
        let mach = evaluate(
            &omega,
            &driver,
            &ported_box(),
            &system(),
            &EvalConfig {
                velocity_units: VelocityUnits::Mach,
                ..EvalConfig::default()
            },
            &Report::new(),
        )
        .unwrap()
        .0;
        let c = constants::speed_of_sound();
        let v_ms = ms.port_velocity.unwrap();
        let v_mach = mach.port_velocity.unwrap();
        for (a, b) in v_ms.iter().zip(&v_mach) {
            assert!((*a / c - *b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_zero_frequency_sample_is_non_finite_not_panic() {
        // ω = 0 makes the radiated pressure exactly zero, so SPL is −∞.
        let omega = [0.0, 100.0];
        let (curves, _) = evaluate(
            &omega,
            &reference_driver(),
            &ported_box(),
            &system(),
            &EvalConfig::default(),
            &Report::new(),
        )
        .unwrap();
        assert!(curves.spl[0].is_infinite() && curves.spl[0] < 0.0);
        assert!(curves.spl[1].is_finite());
    }

    #[test]
    fn test_invalid_params_rejected_before_computation() {
        let bad_driver = DriverParams {
            qes: 0.0,
            ..reference_driver()
        };
        let err = evaluate(
            &[100.0],
            &bad_driver,
            &ported_box(),
            &system(),
            &EvalConfig::default(),
            &Report::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { name: "Q_es", .. }));
    }
}
