use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::effects::params::EffectParams;
use crate::encode::gif::GifOpts;
use crate::foundation::error::{GlimmerError, GlimmerResult};
use crate::pipeline::session::SessionOpts;

/// JSON-facing configuration: effect parameters, random seed, and GIF output settings.
///
/// Every field is optional in the JSON; missing fields take their documented defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlimmerConfig {
    /// Glitter and sparkle parameters.
    pub effects: EffectParams,
    /// Fixed seed for reproducible output.
    pub seed: Option<u64>,
    /// GIF export settings.
    pub gif: GifOpts,
}

impl GlimmerConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GlimmerResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| GlimmerError::config(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> GlimmerResult<Self> {
        serde_json::from_str(s).map_err(|e| GlimmerError::config(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GlimmerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GlimmerError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> GlimmerResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GlimmerError::config(format!("serialize config JSON: {e}")))
    }

    /// Session options derived from this configuration.
    pub fn session_opts(&self) -> SessionOpts {
        SessionOpts { seed: self.seed }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
