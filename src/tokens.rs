use crate::models::{AnalysisResult, FrequencyEntry, TokenSet};
use serde::Serialize;
use serde_json::Value;

pub const TOP_COLORS: usize = 10;
pub const TOP_FONTS: usize = 8;
pub const TOP_SPACING: usize = 10;
pub const TOP_CUSTOM_PROPERTIES: usize = 10;
pub const UNKNOWN_SOURCE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomProperty {
    pub name: String,
    pub value: String,
}

/// Leading entries of each token category. Entries keep the order the
/// service sent them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenSummary {
    pub colors: Vec<FrequencyEntry>,
    pub fonts: Vec<FrequencyEntry>,
    pub spacing: Vec<FrequencyEntry>,
    pub custom_properties: Vec<CustomProperty>,
    pub totals: TokenTotals,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenTotals {
    pub colors: usize,
    pub fonts: usize,
    pub spacing: usize,
    pub custom_properties: usize,
}

pub fn summarize(tokens: &TokenSet) -> TokenSummary {
    TokenSummary {
        colors: head(&tokens.colors.frequency, TOP_COLORS),
        fonts: head(&tokens.font_families.frequency, TOP_FONTS),
        spacing: head(&tokens.spacing.frequency, TOP_SPACING),
        custom_properties: tokens
            .custom_properties
            .iter()
            .take(TOP_CUSTOM_PROPERTIES)
            .map(|(name, value)| CustomProperty {
                name: name.clone(),
                value: display_value(value),
            })
            .collect(),
        totals: TokenTotals {
            colors: tokens.color_count(),
            fonts: tokens.font_family_count(),
            spacing: tokens.spacing_count(),
            custom_properties: tokens.custom_property_count(),
        },
    }
}

/// Summary of the result's tokens; empty when the result has none.
pub fn summarize_result(result: &AnalysisResult) -> TokenSummary {
    result.tokens().map(summarize).unwrap_or_default()
}

pub fn source_label(result: &AnalysisResult) -> &str {
    result
        .meta
        .source
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_SOURCE)
}

/// Bar width for a spacing swatch: the leading number of `value`,
/// 4 when it has none, capped at 40.
pub fn spacing_width(value: &str) -> f64 {
    let numeric: String = value
        .trim()
        .chars()
        .enumerate()
        .take_while(|(i, c)| c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+')))
        .map(|(_, c)| c)
        .collect();
    match numeric.parse::<f64>() {
        Ok(n) if n != 0.0 && n.is_finite() => n.min(40.0),
        _ => 4.0,
    }
}

fn head(entries: &[FrequencyEntry], n: usize) -> Vec<FrequencyEntry> {
    entries.iter().take(n).cloned().collect()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
