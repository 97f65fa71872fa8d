use num_complex::Complex64;

use crate::constants::{self, GAMMA, P_ATM, RHO_AIR};
use crate::{BoxParams, ConfigError, PortShape};

/// Port opening geometry, aggregated over all ports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortGeometry {
    /// Total opening area in m².
    pub area: f64,
    /// Effective radius of a single opening in m.
    pub effective_radius: f64,
    /// Equivalent circular diameter in m. Present for rectangular openings
    /// so every design quotes a comparable diameter figure.
    pub equivalent_diameter: Option<f64>,
}

impl PortGeometry {
    pub fn from_params(params: &BoxParams) -> Result<Self, ConfigError> {
        match params.port_shape {
            PortShape::Circular => {
                if !(params.d_port.is_finite() && params.d_port > 0.0) {
                    return Err(ConfigError::BadCircularPort {
                        d_port: params.d_port,
                    });
                }
                Ok(Self {
                    area: params.n_ports as f64 * constants::area_from_diameter(params.d_port),
                    effective_radius: params.d_port / 2.0,
                    equivalent_diameter: None,
                })
            }
            PortShape::Rectangular => {
                if !(params.a_port.is_finite()
                    && params.b_port.is_finite()
                    && params.a_port > 0.0
                    && params.b_port > 0.0)
                {
                    return Err(ConfigError::BadRectangularPort {
                        a_port: params.a_port,
                        b_port: params.b_port,
                    });
                }
                let area = params.n_ports as f64 * params.a_port * params.b_port;
                Ok(Self {
                    area,
                    // the smaller dimension bounds the effective radius
                    effective_radius: params.a_port.min(params.b_port) / 2.0,
                    equivalent_diameter: Some((4.0 * area / std::f64::consts::PI).sqrt()),
                })
            }
        }
    }
}

/// Correction factor κ(ω) applied to the box stiffness: the Helmholtz
/// resonator's reactive loading on the enclosed air spring.
///
/// κ(ω) = ω² / (ω² − jω·ω_port/Q_port − ω_port²)
pub fn stiffness_correction(omega: f64, omega_port: f64, q_port: f64) -> Complex64 {
    let denom = Complex64::new(
        omega * omega - omega_port * omega_port,
        -omega * omega_port / q_port,
    );
    Complex64::new(omega * omega, 0.0) / denom
}

/// Correction factor κ₂(ω) relating cone motion to the port air plug.
///
/// κ₂(ω) = ω_port² / (ω² − jω·ω_port/Q_port − ω_port²)
pub fn velocity_correction(omega: f64, omega_port: f64, q_port: f64) -> Complex64 {
    let denom = Complex64::new(
        omega * omega - omega_port * omega_port,
        -omega * omega_port / q_port,
    );
    Complex64::new(omega_port * omega_port, 0.0) / denom
}

/// Physical port length that tunes `area` to `omega_port` in a box of
/// `v_box` m³, with the end correction subtracted from both openings.
pub fn length(
    area: f64,
    effective_radius: f64,
    v_box: f64,
    omega_port: f64,
    end_correct: f64,
) -> f64 {
    area * GAMMA * P_ATM / (RHO_AIR * v_box * omega_port * omega_port)
        - 2.0 * effective_radius * end_correct
}

/// Everything the response model needs for a ported box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortModel {
    /// Tuning frequency in rad/s.
    pub omega_port: f64,
    /// Loss factor.
    pub q_port: f64,
    pub geometry: PortGeometry,
    /// Physical port length in m.
    pub length: f64,
}

impl PortModel {
    /// `None` for a sealed box (`n_ports == 0`).
    pub fn from_params(params: &BoxParams) -> Result<Option<Self>, ConfigError> {
        if !params.is_ported() {
            return Ok(None);
        }
        let geometry = PortGeometry::from_params(params)?;
        let omega_port = 2.0 * std::f64::consts::PI * params.f_port;
        Ok(Some(Self {
            omega_port,
            q_port: params.q_port,
            geometry,
            length: length(
                geometry.area,
                geometry.effective_radius,
                params.v_box,
                omega_port,
                params.end_correct,
            ),
        }))
    }
}
