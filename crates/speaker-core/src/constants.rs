/// Adiabatic constant of air, dimensionless.
pub const GAMMA: f64 = 1.4;

/// Atmospheric pressure in Pa.
pub const P_ATM: f64 = 101_325.0;

/// Density of air in kg/m³.
pub const RHO_AIR: f64 = 1.18;

/// Listening distance for the near-field pressure estimate, in metres.
pub const LISTENING_DISTANCE: f64 = 1.0;

/// Reference RMS pressure for 0 dB SPL, in Pa.
pub const P_REF: f64 = 20e-6;

/// Conversion factor used when the report prints port length in inches.
pub const METERS_TO_INCHES: f64 = 39.3;

/// Rotation applied to the plotted acoustic phase, in degrees.
///
/// Calibration constant: it makes the phase trace agree with WinISD's
/// display. The physical basis of the offset is unclear.
pub const PHASE_ROTATION_DEG: f64 = 180.0;

/// Speed of sound from the adiabatic gas law, c = √(γ·P_atm/ρ).
pub fn speed_of_sound() -> f64 {
    (GAMMA * P_ATM / RHO_AIR).sqrt()
}

/// Cross-sectional area from diameter (both in metres).
pub fn area_from_diameter(diameter: f64) -> f64 {
    std::f64::consts::PI * (diameter / 2.0).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_of_sound() {
        // √(1.4 · 101325 / 1.18) ≈ 346.7 m/s
        let c = speed_of_sound();
        assert!((c - 346.7).abs() < 0.1, "c = {c}");
    }

    #[test]
    fn test_area_from_diameter() {
        let a = area_from_diameter(0.1);
        assert!((a - 0.007853981).abs() < 1e-8, "a = {a}");
    }
}
