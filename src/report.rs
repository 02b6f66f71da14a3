use crate::error::Result;
use crate::insights::HealthScore;
use crate::models::{AnalysisResult, FrequencyEntry, Insight, InsightKind, OutputFormat};
use crate::tokens::{self, TokenSummary};
use std::path::Path;
use tracing::info;

pub const PALETTE_PREVIEW_LEN: usize = 12;

/// Text shown for a result: the CSS verbatim for shadcn output when the
/// service returned it, pretty-printed `data` otherwise.
pub fn format_result_display(result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Shadcn {
        if let Some(css) = result.data.css.as_deref().filter(|c| !c.is_empty()) {
            return Ok(css.to_string());
        }
    }
    Ok(serde_json::to_string_pretty(&result.data)?)
}

/// First entries of `data.colors` as `(name, color)` pairs.
pub fn palette_preview(result: &AnalysisResult) -> Vec<(String, String)> {
    result
        .data
        .colors
        .iter()
        .flatten()
        .take(PALETTE_PREVIEW_LEN)
        .map(|(name, value)| {
            let color = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.clone(), color)
        })
        .collect()
}

/// Host of the analyzed URL, `None` when the echoed URL does not parse.
pub fn source_host(result: &AnalysisResult) -> Option<String> {
    url::Url::parse(&result.input.url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

fn kind_marker(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Warning => "⚠️",
        InsightKind::Info => "ℹ️",
        InsightKind::Success => "✅",
        InsightKind::Suggestion => "💡",
    }
}

pub fn render_insights_markdown(insights: &[Insight], health: &HealthScore) -> String {
    let mut md_content = String::new();
    md_content.push_str("# Design Insights\n\n");
    md_content.push_str(&format!("{} insights found\n\n", insights.len()));
    for insight in insights {
        md_content.push_str(&format!(
            "## {} {}\n\n",
            kind_marker(insight.kind),
            insight.title
        ));
        md_content.push_str(&format!("{}\n\n", insight.description));
        md_content.push_str(&format!("> **Recommendation:** {}\n\n", insight.recommendation));
    }
    md_content.push_str("---\n\n");
    md_content.push_str("## Design System Health Score\n\n");
    md_content.push_str(&format!("- Color System: {} unique colors\n", health.colors));
    md_content.push_str(&format!("- Typography: {} font families\n", health.font_families));
    md_content.push_str(&format!("- Spacing: {} spacing values\n", health.spacing));
    md_content
}

fn push_frequency_section(
    md_content: &mut String,
    heading: &str,
    total: usize,
    entries: &[FrequencyEntry],
    bar: bool,
) {
    md_content.push_str(&format!("## {} ({})\n\n", heading, total));
    if entries.is_empty() {
        md_content.push_str("_none_\n\n");
        return;
    }
    for entry in entries {
        let swatch = if bar {
            let width = tokens::spacing_width(&entry.value);
            format!("{} ", "▇".repeat((width / 4.0).ceil().max(1.0) as usize))
        } else {
            String::new()
        };
        md_content.push_str(&format!(
            "- {}`{}` - {} uses ({}%)\n",
            swatch, entry.value, entry.count, entry.prevalence
        ));
    }
    md_content.push('\n');
}

pub fn render_tokens_markdown(summary: &TokenSummary, source: &str) -> String {
    let mut md_content = String::new();
    md_content.push_str("# Token Explorer\n\n");
    md_content.push_str(&format!("Extracted from **{}**\n\n", source));

    push_frequency_section(&mut md_content, "Colors", summary.totals.colors, &summary.colors, false);
    push_frequency_section(&mut md_content, "Typography", summary.totals.fonts, &summary.fonts, false);
    push_frequency_section(&mut md_content, "Spacing", summary.totals.spacing, &summary.spacing, true);

    md_content.push_str(&format!(
        "## Custom Properties ({})\n\n",
        summary.totals.custom_properties
    ));
    if summary.custom_properties.is_empty() {
        md_content.push_str("_none_\n");
    } else {
        for prop in &summary.custom_properties {
            md_content.push_str(&format!("- `{}`: {}\n", prop.name, prop.value));
        }
    }
    md_content
}

pub fn render_palette(preview: &[(String, String)]) -> String {
    let mut out = String::from("Color Palette Preview\n");
    for (name, color) in preview {
        out.push_str(&format!("  {:<24} {}\n", name, color));
    }
    out
}

pub fn write_report(output_path: &Path, content: &str) -> Result<()> {
    std::fs::write(output_path, content)?;
    info!("report written to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{generate_insights, health_score};
    use serde_json::json;

    fn sample() -> AnalysisResult {
        serde_json::from_value(json!({
            "meta": { "source": "https://stripe.com" },
            "data": {
                "css": ":root {\n  --background: 0 0% 100%;\n}\n",
                "colors": { "background": "hsl(0 0% 100%)", "primary": "hsl(243 75% 59%)" },
                "tokens": {
                    "spacing": { "frequency": [ { "value": "8px", "count": 30, "prevalence": 41.2 } ] }
                }
            },
            "input": { "url": "https://stripe.com/pricing" }
        }))
        .unwrap()
    }

    #[test]
    fn shadcn_shows_css_verbatim() {
        let result = sample();
        let text = format_result_display(&result, OutputFormat::Shadcn).unwrap();
        assert_eq!(text, ":root {\n  --background: 0 0% 100%;\n}\n");
    }

    #[test]
    fn other_formats_show_pretty_data() {
        let result = sample();
        let text = format_result_display(&result, OutputFormat::Tailwind).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["colors"]["primary"], "hsl(243 75% 59%)");
        assert!(text.contains('\n'));
    }

    #[test]
    fn shadcn_without_css_falls_back_to_json() {
        let result: AnalysisResult =
            serde_json::from_value(json!({ "data": { "theme": { "radius": "0.5rem" } } })).unwrap();
        let text = format_result_display(&result, OutputFormat::Shadcn).unwrap();
        assert!(text.contains("\"radius\": \"0.5rem\""));
    }

    #[test]
    fn shadcn_with_empty_css_falls_back_to_json() {
        let result: AnalysisResult =
            serde_json::from_value(json!({ "data": { "css": "", "colors": { "a": "#fff" } } })).unwrap();
        let text = format_result_display(&result, OutputFormat::Shadcn).unwrap();
        assert!(!text.is_empty());
        assert!(text.contains("\"a\": \"#fff\""));
    }

    #[test]
    fn palette_is_capped_and_ordered() {
        let colors: serde_json::Map<String, serde_json::Value> = (0..20)
            .map(|i| (format!("c{}", i), json!(format!("#{:02x}0000", i))))
            .collect();
        let mut result = AnalysisResult::default();
        result.data.colors = Some(colors);
        let preview = palette_preview(&result);
        assert_eq!(preview.len(), PALETTE_PREVIEW_LEN);
        assert_eq!(preview[0], ("c0".to_string(), "#000000".to_string()));
        assert_eq!(preview[11].0, "c11");
        assert!(palette_preview(&AnalysisResult::default()).is_empty());
    }

    #[test]
    fn host_from_echoed_url() {
        assert_eq!(source_host(&sample()), Some("stripe.com".to_string()));
        assert_eq!(source_host(&AnalysisResult::default()), None);
    }

    #[test]
    fn insights_markdown_lists_every_insight() {
        let result = sample();
        let insights = generate_insights(&result);
        let md = render_insights_markdown(&insights, &health_score(&result));
        assert!(md.contains("4 insights found"));
        assert!(md.contains("Well-Controlled Color Palette"));
        assert!(md.contains("- Spacing: 1 spacing values"));
    }

    #[test]
    fn tokens_markdown_has_all_sections() {
        let result = sample();
        let md = render_tokens_markdown(&tokens::summarize_result(&result), tokens::source_label(&result));
        assert!(md.contains("Extracted from **https://stripe.com**"));
        assert!(md.contains("## Colors (0)"));
        assert!(md.contains("## Spacing (1)"));
        assert!(md.contains("`8px` - 30 uses (41.2%)"));
        assert!(md.contains("## Custom Properties (0)"));
    }
}
