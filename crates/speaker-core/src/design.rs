use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BoxParams, DriverParams, SystemParams};

/// A named, complete parameter set — the unit a user saves, loads and
/// overlays against other designs.
///
/// The JSON layout is the design text the tool displays and accepts:
///
/// ```json
/// {"design": "my 12\" box", "driver": {…}, "box": {…}, "system": {…}}
/// ```
///
/// with all values in SI units. Unknown enum tags (an unrecognized
/// `portShape` or policy string) fail to parse; nothing is silently
/// defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    #[serde(rename = "design")]
    pub name: String,
    pub driver: DriverParams,
    #[serde(rename = "box")]
    pub enclosure: BoxParams,
    pub system: SystemParams,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            name: "my 12\" box".to_owned(),
            driver: DriverParams::default(),
            enclosure: BoxParams::default(),
            system: SystemParams::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DesignError {
    #[error("invalid design JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Design {
    /// Pretty-printed JSON for the design text area / a saved file.
    pub fn to_json(&self) -> Result<String, DesignError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, DesignError> {
        Ok(serde_json::from_str(text)?)
    }
}
