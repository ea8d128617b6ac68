//! Legend entries derived from the color scale.

use serde::Serialize;
use viewer_common::{Color, LegendConfig};

use crate::colorscale::ColorScale;
use crate::html::escape;

/// One labeled color of the legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// A titled legend, entries in ascending value order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

/// Format a breakpoint for a label: at least one decimal place.
pub fn format_break(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Build legend entries, one per bucket of `scale`.
///
/// Bucket `i` is labeled `"{lower} – {upper}"`, except the lowest bucket,
/// which uses `config.lowest_label` with `{upper}` substituted.
pub fn build_legend(scale: &ColorScale, config: &LegendConfig) -> Legend {
    let entries = scale
        .colors()
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let lower = format_break(scale.breaks()[i]);
            let upper = format_break(scale.breaks()[i + 1]);
            let label = if i == 0 {
                config.lowest_label.replace("{upper}", &upper)
            } else {
                format!("{} – {}", lower, upper)
            };
            LegendEntry {
                label,
                color: *color,
            }
        })
        .collect();

    Legend {
        title: config.title.clone(),
        entries,
    }
}

impl Legend {
    /// Legend box markup, positioned by the surrounding map container.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<div class=\"legend\">\n");
        html.push_str(&format!(
            "  <div class=\"legend-title\">{}</div>\n",
            escape(&self.title)
        ));
        for entry in &self.entries {
            html.push_str(&format!(
                "  <div class=\"legend-item\"><span class=\"legend-swatch\" style=\"background:{}\"></span>{}</div>\n",
                entry.color.to_hex(),
                escape(&entry.label)
            ));
        }
        html.push_str("</div>\n");
        html
    }
}
