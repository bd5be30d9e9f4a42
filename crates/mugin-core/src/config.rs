use crate::Result;
use crate::merge::deep_merge_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest number of parallel links the renderer can fan out legibly.
pub const DEFAULT_MAX_WEIGHT: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
    /// Cap on the size of a parallel-link bucket. `0` disables the cap.
    pub max_weight: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }
}

impl GraphConfig {
    pub fn unbounded() -> Self {
        Self { max_weight: 0 }
    }

    /// Applies a JSON object of overrides on top of this config.
    pub fn with_overrides(&self, overrides: &Value) -> Result<Self> {
        let mut value = serde_json::to_value(self)?;
        deep_merge_value(&mut value, overrides);
        Ok(serde_json::from_value(value)?)
    }

    pub(crate) fn exceeds_cap(&self, weight: u32) -> bool {
        self.max_weight != 0 && weight > self.max_weight
    }
}
