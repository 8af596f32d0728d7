use crate::foundation::error::{StardriftError, StardriftResult};
use crate::starfield::layer::{LayerSpec, default_layers};

/// Scene configuration, deserializable from JSON.
///
/// Every field has a default so `{}` is a valid config.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    /// Global animation switch. This build ships with animation forced on;
    /// disabling produces an inert scene that never schedules a frame.
    #[serde(default = "default_enabled")]
    pub animations_enabled: bool,

    /// Starfield layer table, far to near.
    #[serde(default = "default_layer_table")]
    pub layers: Vec<LayerSpec>,

    /// RNG seed for reproducible star sets and flight periods.
    /// `None` draws from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Pinned flight period in milliseconds. `None` draws the period
    /// uniformly from the standard range at start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_period_ms: Option<f64>,
}

fn default_enabled() -> bool {
    true
}

fn default_layer_table() -> Vec<LayerSpec> {
    default_layers().to_vec()
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            animations_enabled: true,
            layers: default_layer_table(),
            seed: None,
            flight_period_ms: None,
        }
    }
}

impl SceneConfig {
    /// Validate the full config up front.
    pub fn validate(&self) -> StardriftResult<()> {
        if self.layers.is_empty() {
            return Err(StardriftError::validation(
                "config must declare at least one starfield layer",
            ));
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        if let Some(period) = self.flight_period_ms
            && (!period.is_finite() || period <= 0.0)
        {
            return Err(StardriftError::validation(
                "flight_period_ms must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json(text: &str) -> StardriftResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| StardriftError::serde(format!("invalid scene config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
