use crate::Result;
use crate::placement::Viewport;
use mugin_core::merge::deep_merge_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Arc radius as a multiple of the chord length.
    pub arc_factor: f64,
    /// Angle between the two trimmed ends of a fanned arc. Derived from `arc_factor` when unset.
    pub angular_spread: Option<f64>,
    /// Margin added around every ellipse.
    pub base_margin: f64,
    /// Extra margin at an end that carries an arrowhead.
    pub arrow_margin: f64,
    /// Extra margin for nodes that are not pinned.
    pub free_margin: f64,
    pub min_rx: f64,
    pub ry: f64,
    /// Font size handed to the text measurer when sizing labels.
    pub font_size: f64,
    pub viewport: Viewport,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            arc_factor: 1.4,
            angular_spread: None,
            base_margin: 1.0,
            arrow_margin: 2.0,
            free_margin: 1.0,
            min_rx: mugin_core::model::DEFAULT_RX,
            ry: mugin_core::model::DEFAULT_RY,
            font_size: 16.0,
            viewport: Viewport::default(),
        }
    }
}

impl LayoutConfig {
    /// Applies a JSON object of overrides on top of this config.
    pub fn with_overrides(&self, overrides: &Value) -> Result<Self> {
        let mut value = serde_json::to_value(self).map_err(mugin_core::Error::from)?;
        deep_merge_value(&mut value, overrides);
        let merged = serde_json::from_value(value).map_err(mugin_core::Error::from)?;
        Ok(merged)
    }

    /// Twice the angle between chord and tangent at either end of an arc whose radius is
    /// `arc_factor` chord lengths.
    pub fn spread(&self) -> f64 {
        match self.angular_spread {
            Some(spread) => spread,
            None => 2.0 * (0.5 / self.arc_factor).min(1.0).asin(),
        }
    }
}
