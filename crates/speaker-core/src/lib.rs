pub mod constants;
pub mod design;
pub mod port;
pub mod report;
pub mod response;
pub mod sweep;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use design::Design;
pub use report::Report;

// ---------------------------------------------------------------------------
// Shared interface types — the render layer builds against these
// ---------------------------------------------------------------------------

/// Thiele-Small parameters of the driver, SI units.
///
/// Serde names match the keys the design files use (`F_s`, `R_e`, …), so a
/// saved design round-trips byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverParams {
    /// Free-air resonance in Hz.
    #[serde(rename = "F_s")]
    pub fs: f64,
    /// Voice-coil DC resistance in Ω.
    #[serde(rename = "R_e")]
    pub re: f64,
    /// Voice-coil inductance in H.
    #[serde(rename = "L_e")]
    pub le: f64,
    /// Mechanical quality factor.
    #[serde(rename = "Q_ms")]
    pub qms: f64,
    /// Electrical quality factor.
    #[serde(rename = "Q_es")]
    pub qes: f64,
    /// Equivalent compliance volume in m³.
    #[serde(rename = "Vas")]
    pub vas: f64,
    /// Maximum linear excursion in m. Reported only; the linear model does
    /// not clip against it.
    #[serde(rename = "Xmax")]
    pub xmax: f64,
    /// Effective cone area in m².
    #[serde(rename = "S_d")]
    pub sd: f64,
}

impl Default for DriverParams {
    fn default() -> Self {
        // Eminence DeltaLite 2512-ii
        Self {
            fs: 37.0,
            re: 5.04,
            le: 0.46e-3,
            qms: 3.13,
            qes: 0.44,
            vas: 147e-3,
            xmax: 4.9e-3,
            sd: 519.5e-4,
        }
    }
}

impl DriverParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("F_s", self.fs)?;
        require_positive("R_e", self.re)?;
        require_non_negative("L_e", self.le)?;
        require_positive("Q_ms", self.qms)?;
        require_positive("Q_es", self.qes)?;
        require_positive("Vas", self.vas)?;
        require_non_negative("Xmax", self.xmax)?;
        require_positive("S_d", self.sd)?;
        Ok(())
    }
}

/// Cross-section of a port opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortShape {
    Circular,
    Rectangular,
}

/// Enclosure and port parameters, SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxParams {
    /// Net internal volume in m³.
    #[serde(rename = "V_box")]
    pub v_box: f64,
    /// Number of ports; 0 means a sealed box.
    pub n_ports: u32,
    /// Port tuning frequency in Hz. Unused when sealed.
    pub f_port: f64,
    /// Port loss factor. Unused when sealed.
    #[serde(rename = "Q_port")]
    pub q_port: f64,
    /// Which dimension set below describes the opening.
    #[serde(rename = "portShape")]
    pub port_shape: PortShape,
    /// Diameter of a circular port, in m.
    pub d_port: f64,
    /// Width of a rectangular port, in m.
    pub a_port: f64,
    /// Height of a rectangular port, in m.
    pub b_port: f64,
    /// Port end-correction factor, typically 0.6–0.85.
    #[serde(rename = "endCorrect")]
    pub end_correct: f64,
}

impl Default for BoxParams {
    fn default() -> Self {
        // 32 l box with one rectangular slot port tuned to 40 Hz
        Self {
            v_box: 32e-3,
            n_ports: 1,
            f_port: 40.0,
            q_port: 50.0,
            port_shape: PortShape::Rectangular,
            d_port: 0.0,
            a_port: 3.5e-2,
            b_port: 21.5e-2,
            end_correct: 0.732,
        }
    }
}

impl BoxParams {
    pub fn is_ported(&self) -> bool {
        self.n_ports > 0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("V_box", self.v_box)?;
        if self.is_ported() {
            require_positive("f_port", self.f_port)?;
            require_positive("Q_port", self.q_port)?;
            require_non_negative("endCorrect", self.end_correct)?;
            match self.port_shape {
                PortShape::Circular => {
                    if !(self.d_port.is_finite() && self.d_port > 0.0) {
                        return Err(ConfigError::BadCircularPort { d_port: self.d_port });
                    }
                }
                PortShape::Rectangular => {
                    if !(self.a_port.is_finite()
                        && self.b_port.is_finite()
                        && self.a_port > 0.0
                        && self.b_port > 0.0)
                    {
                        return Err(ConfigError::BadRectangularPort {
                            a_port: self.a_port,
                            b_port: self.b_port,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Drive-side parameters, SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemParams {
    /// Nominal load impedance in Ω, used by the default voltage convention.
    #[serde(rename = "Znom")]
    pub znom: f64,
    /// Reference RMS input power in W.
    #[serde(rename = "Pin")]
    pub pin: f64,
}

impl Default for SystemParams {
    fn default() -> Self {
        Self { znom: 8.0, pin: 100.0 }
    }
}

impl SystemParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("Znom", self.znom)?;
        require_positive("Pin", self.pin)?;
        Ok(())
    }
}

/// How the peak drive voltage is derived from the input power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoltageConvention {
    /// Vin = √(2·Pin·Znom): rated power into the nominal load.
    #[default]
    NominalLoad,
    /// Vin = √(2·Pin·R_e): rated power into the DC resistance, the
    /// convention WinISD uses.
    CoilResistance,
}

/// Units of the port air-velocity curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityUnits {
    #[default]
    MetersPerSecond,
    Mach,
}

/// Evaluation policies, passed explicitly into every evaluation rather than
/// living in process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvalConfig {
    pub voltage_convention: VoltageConvention,
    pub velocity_units: VelocityUnits,
}

/// A configuration rejected before any computation begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be a finite non-negative number, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("circular port needs d_port > 0, got {d_port}")]
    BadCircularPort { d_port: f64 },
    #[error("rectangular port needs a_port and b_port > 0, got {a_port} × {b_port}")]
    BadRectangularPort { a_port: f64, b_port: f64 },
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

/// Frequency-domain curves from one evaluation — one value per grid point,
/// consumed by the plotting layer. Samples at degenerate frequencies may be
/// non-finite; callers filter or display them as they see fit.
#[derive(Debug, Clone)]
pub struct ResponseCurves {
    /// Cone excursion in m (complex amplitude).
    pub excursion: Vec<Complex64>,
    /// Driving-point electrical impedance in Ω.
    pub impedance: Vec<Complex64>,
    /// Sound pressure level in dB SPL at the listening distance.
    pub spl: Vec<f64>,
    /// Acoustic phase in degrees.
    pub phase: Vec<f64>,
    /// Port air velocity in m/s (or Mach, per [`VelocityUnits`]).
    /// `None` for a sealed box.
    pub port_velocity: Option<Vec<Complex64>>,
    /// Sound pressure amplitude in Pa at the listening distance.
    pub pressure: Vec<Complex64>,
}

/// Results of one sweep — curves for plotting plus the derived-quantity
/// report, labeled for overlay against other designs.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Series label for the renderer.
    pub label: String,
    /// Grid frequencies in Hz.
    pub frequencies: Vec<f64>,
    pub curves: ResponseCurves,
    pub report: Report,
}

/// Run the default sweep (10–1000 Hz, 300 points) for a design.
pub fn compute(design: &Design, config: &EvalConfig) -> Result<SweepResult, ConfigError> {
    sweep::run_sweep(
        &design.name,
        &design.driver,
        &design.enclosure,
        &design.system,
        config,
        sweep::DEFAULT_RANGE_HZ,
        sweep::DEFAULT_POINTS,
    )
}
