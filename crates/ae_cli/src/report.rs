//! Plain-text and JSON rendering of an [`OptimizationResult`].

use ae_core::{Category, OptimizationResult, ScoreDetail};
use serde::Serialize;

/// JSON envelope for `--json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub schema_version: u8,
    pub generated_at: String,
    pub result: &'a OptimizationResult,
}

impl<'a> JsonReport<'a> {
    pub fn new(result: &'a OptimizationResult) -> Self {
        Self {
            schema_version: ae_core::SCHEMA_VERSION,
            generated_at: chrono::Utc::now().to_rfc3339(),
            result,
        }
    }
}

/// `category_of` supplies the `[CAT]` prefix for each chosen source.
pub fn render_text<F>(result: &OptimizationResult, category_of: F) -> String
where
    F: Fn(&str) -> Category,
{
    if result.is_empty() {
        return "No valid selection found.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("Anchor:              {}\n", result.anchor.as_deref().unwrap_or("-")));
    out.push_str("Sources Selected:\n");
    for source in &result.sources {
        out.push_str(&format!("  [{}] {}\n", category_of(source), source));
    }
    out.push_str(&format!("Unique Inheritances: {}\n", result.unique_trait_count));
    out.push_str(&format!("Total Score:         {}\n", result.total_score));

    if result.targets.is_empty() {
        out.push_str("\nNo duplicated inheritances.\n");
    } else {
        out.push('\n');
        out.push_str(&render_table(&result.targets));
    }
    out
}

fn render_table(rows: &[ScoreDetail]) -> String {
    let name_width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).max(4);

    let mut out = format!(
        "{:<w$}  {:>5}  {:>5}  {:<6}  {:>5}\n",
        "Name",
        "Level",
        "Count",
        "Rarity",
        "Score",
        w = name_width
    );
    out.push_str(&format!("{}\n", "-".repeat(name_width + 31)));
    for row in rows {
        out.push_str(&format!(
            "{:<w$}  {:>5}  {:>5}  {:<6}  {:>5}\n",
            row.name,
            row.level,
            row.count,
            row.rarity,
            row.score,
            w = name_width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ae_core::Rarity;

    fn sample() -> OptimizationResult {
        let power = ScoreDetail {
            name: "Power".to_string(),
            level: 1,
            count: 2,
            rarity: Rarity::Gold,
            score: 100,
        };
        OptimizationResult {
            anchor: Some("Hero".to_string()),
            sources: vec!["Sword".to_string(), "Shield".to_string()],
            unique_trait_count: 1,
            total_score: 100,
            details: vec![power.clone()],
            targets: vec![power],
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample(), |s| if s == "Sword" { Category::Atk } else { Category::Def });
        assert!(text.contains("Anchor:              Hero"));
        assert!(text.contains("  [ATK] Sword\n"));
        assert!(text.contains("  [DEF] Shield\n"));
        assert!(text.contains("Total Score:         100"));
        assert!(text.contains("Power      1      2  gold      100"));
    }

    #[test]
    fn test_render_empty() {
        let text = render_text(&OptimizationResult::empty(), |_| Category::Unknown);
        assert_eq!(text, "No valid selection found.\n");
    }

    #[test]
    fn test_json_report() {
        let result = sample();
        let json = serde_json::to_value(JsonReport::new(&result)).unwrap();
        assert_eq!(json["schema_version"], 1);
        assert_eq!(json["result"]["total_score"], 100);
        assert_eq!(json["result"]["targets"][0]["rarity"], "gold");
        assert!(json["generated_at"].is_string());
    }
}
