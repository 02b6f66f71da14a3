//! Rule-based advice about an extracted design system.
//!
//! Rules live in [`RULES`] and are evaluated in table order. Each rule
//! measures one count and emits the first band containing it; a count
//! that falls in no band emits nothing.

use crate::models::{AnalysisResult, Insight, InsightKind};
use serde::Serialize;

const COUNT_PLACEHOLDER: &str = "{count}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    ColorCount,
    CustomPropertyCount,
    FontFamilyCount,
    SpacingCount,
}

impl Metric {
    /// Missing token data counts as zero.
    pub fn measure(&self, result: &AnalysisResult) -> usize {
        match self {
            Metric::ColorCount => result.color_count(),
            Metric::CustomPropertyCount => result.custom_property_count(),
            Metric::FontFamilyCount => result.font_family_count(),
            Metric::SpacingCount => result.spacing_count(),
        }
    }
}

/// Inclusive count range with the insight it produces.
#[derive(Debug)]
pub struct Band {
    pub min: usize,
    pub max: Option<usize>,
    pub kind: InsightKind,
    pub title: &'static str,
    /// `{count}` is replaced with the measured value.
    pub description: &'static str,
    pub recommendation: &'static str,
}

impl Band {
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }

    fn render(&self, count: usize) -> Insight {
        Insight {
            kind: self.kind,
            title: self.title.to_string(),
            description: self
                .description
                .replace(COUNT_PLACEHOLDER, &count.to_string()),
            recommendation: self.recommendation.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Rule {
    pub metric: Metric,
    pub bands: &'static [Band],
}

impl Rule {
    pub fn evaluate(&self, result: &AnalysisResult) -> Option<Insight> {
        let count = self.metric.measure(result);
        self.bands
            .iter()
            .find(|band| band.contains(count))
            .map(|band| band.render(count))
    }
}

pub static RULES: [Rule; 4] = [
    Rule {
        metric: Metric::ColorCount,
        bands: &[
            Band {
                min: 51,
                max: None,
                kind: InsightKind::Warning,
                title: "Color Palette Complexity",
                description: "This design system uses {count} unique colors, which may indicate inconsistency in the color palette.",
                recommendation: "Consider consolidating similar colors into a more systematic color scale with fewer, but more intentional color choices.",
            },
            Band {
                min: 21,
                max: Some(50),
                kind: InsightKind::Info,
                title: "Moderate Color Palette",
                description: "The design system uses {count} unique colors, which is reasonable but could benefit from organization.",
                recommendation: "Group colors into semantic categories (primary, secondary, accent, neutral) for better maintainability.",
            },
            Band {
                min: 0,
                max: Some(20),
                kind: InsightKind::Success,
                title: "Well-Controlled Color Palette",
                description: "The design system uses {count} unique colors, indicating good color discipline.",
                recommendation: "Maintain this focused approach to color for consistency across the design system.",
            },
        ],
    },
    Rule {
        metric: Metric::CustomPropertyCount,
        bands: &[
            Band {
                min: 101,
                max: None,
                kind: InsightKind::Success,
                title: "Rich CSS Custom Properties",
                description: "This site uses {count} CSS custom properties, indicating a mature design system approach.",
                recommendation: "Leverage these existing properties when building new components to maintain consistency.",
            },
            Band {
                min: 21,
                max: Some(100),
                kind: InsightKind::Info,
                title: "Moderate Design Token Usage",
                description: "The site uses {count} CSS custom properties, showing some design system adoption.",
                recommendation: "Consider expanding the use of CSS custom properties for better theme-ability and maintenance.",
            },
            Band {
                min: 0,
                max: Some(20),
                kind: InsightKind::Suggestion,
                title: "Design Token Opportunity",
                description: "Only {count} CSS custom properties detected. There's opportunity to systematize the design.",
                recommendation: "Implement CSS custom properties for colors, spacing, and typography to create a more maintainable design system.",
            },
        ],
    },
    Rule {
        metric: Metric::FontFamilyCount,
        // 4 to 10 families is left without comment.
        bands: &[
            Band {
                min: 11,
                max: None,
                kind: InsightKind::Warning,
                title: "Font Family Inconsistency",
                description: "{count} different font families detected, which may impact loading performance and visual consistency.",
                recommendation: "Consolidate to 2-3 core font families: one for body text, one for headings, and optionally one for monospace.",
            },
            Band {
                min: 0,
                max: Some(3),
                kind: InsightKind::Success,
                title: "Focused Typography System",
                description: "Using {count} font families shows good typographic discipline.",
                recommendation: "Continue to maintain this focused approach to typography for better brand consistency.",
            },
        ],
    },
    Rule {
        metric: Metric::SpacingCount,
        bands: &[
            Band {
                min: 31,
                max: None,
                kind: InsightKind::Warning,
                title: "Spacing Inconsistency",
                description: "{count} unique spacing values detected, indicating potential lack of a systematic spacing scale.",
                recommendation: "Implement a mathematical spacing scale (e.g., 4px, 8px, 16px, 32px) for more consistent layouts.",
            },
            Band {
                min: 0,
                max: Some(30),
                kind: InsightKind::Success,
                title: "Consistent Spacing System",
                description: "{count} spacing values suggests good spacing discipline.",
                recommendation: "Document these spacing values as part of your design system tokens.",
            },
        ],
    },
];

/// Evaluates every rule in [`RULES`] in order.
pub fn generate_insights(result: &AnalysisResult) -> Vec<Insight> {
    RULES.iter().filter_map(|rule| rule.evaluate(result)).collect()
}

/// Headline counts shown next to the insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthScore {
    pub colors: usize,
    pub font_families: usize,
    pub spacing: usize,
}

pub fn health_score(result: &AnalysisResult) -> HealthScore {
    HealthScore {
        colors: result.color_count(),
        font_families: result.font_family_count(),
        spacing: result.spacing_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FrequencyEntry, FrequencyList, ResultData, TokenSet};
    use serde_json::{json, Map, Value};

    fn frequency(n: usize) -> FrequencyList {
        FrequencyList {
            frequency: (0..n)
                .map(|i| FrequencyEntry {
                    value: format!("v{}", i),
                    count: (n - i) as u64,
                    prevalence: 0.0,
                })
                .collect(),
            ..FrequencyList::default()
        }
    }

    fn props(n: usize) -> Map<String, Value> {
        (0..n).map(|i| (format!("--p{}", i), json!(i))).collect()
    }

    fn result(colors: usize, custom: usize, fonts: usize, spacing: usize) -> AnalysisResult {
        AnalysisResult {
            data: ResultData {
                tokens: Some(TokenSet {
                    colors: frequency(colors),
                    font_families: frequency(fonts),
                    spacing: frequency(spacing),
                    custom_properties: props(custom),
                    ..TokenSet::default()
                }),
                ..ResultData::default()
            },
            ..AnalysisResult::default()
        }
    }

    fn kinds(insights: &[Insight]) -> Vec<InsightKind> {
        insights.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn color_bands() {
        for (n, expected) in [
            (0, InsightKind::Success),
            (20, InsightKind::Success),
            (21, InsightKind::Info),
            (50, InsightKind::Info),
            (51, InsightKind::Warning),
        ] {
            let insights = generate_insights(&result(n, 0, 0, 0));
            assert_eq!(insights[0].kind, expected, "colors = {}", n);
        }
    }

    #[test]
    fn custom_property_boundary_at_one_hundred() {
        assert_eq!(generate_insights(&result(0, 100, 0, 0))[1].kind, InsightKind::Info);
        assert_eq!(generate_insights(&result(0, 101, 0, 0))[1].kind, InsightKind::Success);
        assert_eq!(generate_insights(&result(0, 20, 0, 0))[1].kind, InsightKind::Suggestion);
        assert_eq!(generate_insights(&result(0, 21, 0, 0))[1].kind, InsightKind::Info);
    }

    #[test]
    fn typography_gap_emits_nothing() {
        for fonts in 4..=10 {
            let insights = generate_insights(&result(0, 0, fonts, 0));
            assert_eq!(insights.len(), 3);
            assert!(insights.iter().all(|i| !i.title.contains("Typography")));
        }
        let many = generate_insights(&result(0, 0, 11, 0));
        assert_eq!(many[2].title, "Font Family Inconsistency");
        let few = generate_insights(&result(0, 0, 3, 0));
        assert_eq!(few[2].title, "Focused Typography System");
    }

    #[test]
    fn spacing_is_always_last() {
        for fonts in [0, 5, 12] {
            for spacing in [0, 30, 31] {
                let insights = generate_insights(&result(60, 150, fonts, spacing));
                let last = insights.last().unwrap();
                assert!(last.title.contains("Spacing"));
                assert!(insights[0].title.contains("Color"));
            }
        }
        let insights = generate_insights(&result(0, 0, 0, 31));
        assert_eq!(insights[3].kind, InsightKind::Warning);
    }

    #[test]
    fn seventy_five_colors_and_nothing_else() {
        let entries: Vec<Value> = (0..75)
            .map(|i| json!({ "value": format!("#{:06x}", i), "count": 1, "prevalence": 1.3 }))
            .collect();
        let raw = json!({ "data": { "tokens": { "colors": { "frequency": entries } } } });
        let result: AnalysisResult = serde_json::from_value(raw).unwrap();
        let insights = generate_insights(&result);
        assert_eq!(
            kinds(&insights),
            vec![
                InsightKind::Warning,
                InsightKind::Suggestion,
                InsightKind::Success,
                InsightKind::Success,
            ]
        );
        assert_eq!(
            insights[0].description,
            "This design system uses 75 unique colors, which may indicate inconsistency in the color palette."
        );
        assert_eq!(
            insights[1].description,
            "Only 0 CSS custom properties detected. There's opportunity to systematize the design."
        );
    }

    #[test]
    fn empty_result_uses_zero_counts() {
        let insights = generate_insights(&AnalysisResult::default());
        assert_eq!(insights.len(), 4);
        assert_eq!(insights[3].description, "0 spacing values suggests good spacing discipline.");
    }

    #[test]
    fn generation_is_repeatable() {
        let input = result(33, 7, 2, 45);
        assert_eq!(generate_insights(&input), generate_insights(&input));
    }

    #[test]
    fn health_score_counts() {
        assert_eq!(
            health_score(&result(12, 40, 2, 9)),
            HealthScore {
                colors: 12,
                font_families: 2,
                spacing: 9
            }
        );
    }
}
