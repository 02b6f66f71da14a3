use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const DEFAULT_URL: &str = "https://stripe.com";

/// Output format requested from the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Shadcn,
    Tailwind,
    Json,
    StyleDictionary,
    ThemeJson,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Shadcn,
        OutputFormat::Tailwind,
        OutputFormat::Json,
        OutputFormat::StyleDictionary,
        OutputFormat::ThemeJson,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Shadcn => "shadcn",
            OutputFormat::Tailwind => "tailwind",
            OutputFormat::Json => "json",
            OutputFormat::StyleDictionary => "style-dictionary",
            OutputFormat::ThemeJson => "theme-json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Shadcn => "shadcn/ui Theme",
            OutputFormat::Tailwind => "Tailwind Config",
            OutputFormat::Json => "Raw JSON",
            OutputFormat::StyleDictionary => "Style Dictionary",
            OutputFormat::ThemeJson => "Theme JSON",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Shadcn => "Ready-to-use CSS variables for shadcn/ui",
            OutputFormat::Tailwind => "Tailwind CSS configuration object",
            OutputFormat::Json => "Complete token data in JSON format",
            OutputFormat::StyleDictionary => "Design tokens for Style Dictionary",
            OutputFormat::ThemeJson => "WordPress-compatible theme.json format",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hsl,
    Hex,
    Oklch,
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 3] = [ColorFormat::Hsl, ColorFormat::Hex, ColorFormat::Oklch];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorFormat::Hsl => "hsl",
            ColorFormat::Hex => "hex",
            ColorFormat::Oklch => "oklch",
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/v1/analyze`. Built fresh for every analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub url: String,
    pub format: OutputFormat,
    pub color_format: ColorFormat,
    pub compact: bool,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            format: OutputFormat::default(),
            color_format: ColorFormat::default(),
            compact: false,
        }
    }
}

/// Response of the analysis service.
///
/// Only a handful of fields are read. Everything else is kept in the
/// flattened `extra` maps so a saved result round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: Meta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: ResultData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub input: RequestEcho,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    pub fn tokens(&self) -> Option<&TokenSet> {
        self.data.tokens.as_ref()
    }

    pub fn color_count(&self) -> usize {
        self.tokens().map_or(0, TokenSet::color_count)
    }

    pub fn custom_property_count(&self) -> usize {
        self.tokens().map_or(0, TokenSet::custom_property_count)
    }

    pub fn font_family_count(&self) -> usize {
        self.tokens().map_or(0, TokenSet::font_family_count)
    }

    pub fn spacing_count(&self) -> usize {
        self.tokens().map_or(0, TokenSet::spacing_count)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenSet>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The request as echoed back by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestEcho {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: FrequencyList,
    #[serde(default, deserialize_with = "null_as_default")]
    pub font_families: FrequencyList,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spacing: FrequencyList,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_properties: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenSet {
    pub fn color_count(&self) -> usize {
        self.colors.frequency.len()
    }

    pub fn custom_property_count(&self) -> usize {
        self.custom_properties.len()
    }

    pub fn font_family_count(&self) -> usize {
        self.font_families.frequency.len()
    }

    pub fn spacing_count(&self) -> usize {
        self.spacing.frequency.len()
    }
}

/// Distinct token values, expected in descending `count` order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub frequency: Vec<FrequencyEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    /// Percentage of all occurrences, 0 to 100.
    #[serde(default, deserialize_with = "null_as_default")]
    pub prevalence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Info,
    Success,
    Suggestion,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Info => "info",
            InsightKind::Success => "success",
            InsightKind::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_wire_field_names() {
        let request = AnalysisRequest {
            url: "https://stripe.com".to_string(),
            format: OutputFormat::StyleDictionary,
            color_format: ColorFormat::Oklch,
            compact: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "url": "https://stripe.com",
                "format": "style-dictionary",
                "colorFormat": "oklch",
                "compact": true
            })
        );
    }

    #[test]
    fn missing_and_null_fields_default() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "meta": null,
            "data": { "tokens": { "colors": null, "customProperties": null } }
        }))
        .unwrap();
        assert_eq!(result.meta.source, None);
        assert_eq!(result.input.url, "");
        assert_eq!(result.color_count(), 0);
        assert_eq!(result.custom_property_count(), 0);
        assert_eq!(result.spacing_count(), 0);
    }

    #[test]
    fn null_entry_fields_default() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "data": { "tokens": { "colors": { "frequency": [
                { "value": "#fff", "count": 3, "prevalence": null },
                { "value": "#000", "count": null, "prevalence": 12.5 }
            ] } } },
            "input": { "url": null }
        }))
        .unwrap();
        let colors = &result.tokens().unwrap().colors.frequency;
        assert_eq!(colors[0].count, 3);
        assert_eq!(colors[0].prevalence, 0.0);
        assert_eq!(colors[1].count, 0);
        assert_eq!(colors[1].prevalence, 12.5);
        assert_eq!(result.input.url, "");
        assert_eq!(result.color_count(), 2);
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "meta": { "source": "stripe.com", "version": 3 },
            "data": { "css": ":root {}", "extraBlock": [1, 2] },
            "input": { "url": "https://stripe.com", "format": "shadcn" },
            "timing": { "ms": 812 }
        });
        let result: AnalysisResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(result.extra.get("timing"), Some(&json!({ "ms": 812 })));
        assert_eq!(serde_json::to_value(&result).unwrap(), raw);
    }

    #[test]
    fn custom_properties_keep_received_order() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"data":{"tokens":{"customProperties":{"--z":"1","--a":"2","--m":"3"}}}}"#,
        )
        .unwrap();
        let keys: Vec<_> = result
            .tokens()
            .unwrap()
            .custom_properties
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["--z", "--a", "--m"]);
    }
}
