use crate::config::LayoutConfig;
use mugin_core::Graph;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Fixed-advance measurer: every character is `font_size * char_width_factor` wide.
///
/// Zero factors fall back to the defaults (`0.5`, `1.2`), which reproduce the classic
/// `max(30, 4 * len)` ellipse width at the default 16px font.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.5
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let font_size = style.font_size.max(1.0);
        let line_count = text.split('\n').count();
        let max_chars = text
            .split('\n')
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        TextMetrics {
            width: max_chars as f64 * font_size * char_width_factor,
            height: line_count as f64 * font_size * line_height_factor,
            line_count,
        }
    }
}

/// Sets every node's half-axes from its measured name: `rx` grows with the label but never
/// drops below `min_rx`; `ry` is fixed.
pub fn size_nodes(graph: &mut Graph, measurer: &dyn TextMeasurer, config: &LayoutConfig) {
    let style = TextStyle {
        font_size: config.font_size,
        ..TextStyle::default()
    };
    for (name, geometry) in graph.geometries_mut() {
        let metrics = measurer.measure(name, &style);
        geometry.rx = config.min_rx.max(metrics.width / 2.0);
        geometry.ry = config.ry;
    }
}
