//! Text rendering of an analysis -- the static results page, terminal
//! edition.
//!
//! Access into the analysis JSON is lenient throughout: the relay returns
//! the model's object unvalidated, so a missing or mistyped section renders
//! as an empty body rather than failing.

use std::fmt::Write;

use serde_json::Value;

/// Section order follows the results page: summary first, then the lists,
/// the timeline, and the strategy prose.
const TIMELINE: [(&str, &str); 4] = [
    ("week_1", "Week 1"),
    ("month_1", "Month 1"),
    ("month_3", "Month 3"),
    ("month_6", "Month 6"),
];

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "== {title} ==");
}

fn prose_section(out: &mut String, analysis: &Value, key: &str, title: &str) {
    heading(out, title);
    let text = analysis.get(key).and_then(Value::as_str).unwrap_or_default();
    let _ = writeln!(out, "{text}");
    let _ = writeln!(out);
}

fn list_section(out: &mut String, analysis: &Value, key: &str, title: &str) {
    heading(out, title);
    if let Some(items) = analysis.get(key).and_then(Value::as_array) {
        for (i, item) in items.iter().enumerate() {
            let text = item.as_str().unwrap_or_default();
            let _ = writeln!(out, "  {}. {text}", i + 1);
        }
    }
    let _ = writeln!(out);
}

/// Render a full analysis as plain text.
pub fn render_analysis(analysis: &Value) -> String {
    let mut out = String::new();

    prose_section(&mut out, analysis, "dream_life_summary", "Dream Life Summary");
    list_section(&mut out, analysis, "focus_areas", "Focus Areas");
    list_section(&mut out, analysis, "cut_out_items", "Cut Out (Decidere)");
    list_section(&mut out, analysis, "win_ticker", "Win Ticker - Daily Tracking");

    heading(&mut out, "Action Steps Timeline");
    let steps = analysis.get("action_steps");
    for (key, label) in TIMELINE {
        let _ = writeln!(&mut out, "  {label}:");
        if let Some(items) = steps
            .and_then(|s| s.get(key))
            .and_then(Value::as_array)
        {
            for item in items {
                let _ = writeln!(&mut out, "    - {}", item.as_str().unwrap_or_default());
            }
        }
    }
    let _ = writeln!(&mut out);

    prose_section(&mut out, analysis, "momentum_strategy", "Momentum Strategy");
    prose_section(
        &mut out,
        analysis,
        "environment_blueprint",
        "Environment Blueprint",
    );
    prose_section(&mut out, analysis, "financial_roadmap", "Financial Roadmap");
    list_section(&mut out, analysis, "key_insights", "Key Insights");
    list_section(
        &mut out,
        analysis,
        "potential_obstacles",
        "Potential Obstacles & Solutions",
    );
    prose_section(&mut out, analysis, "decision_analysis", "Decision Analysis");
    prose_section(&mut out, analysis, "fuel_strategy", "Fuel Strategy");
    prose_section(
        &mut out,
        analysis,
        "accountability_system",
        "Accountability System",
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_all_sections_in_order() {
        let analysis = json!({
            "dream_life_summary": "A calm, deliberate life.",
            "focus_areas": ["revenue", "health"],
            "cut_out_items": ["news"],
            "win_ticker": ["one call"],
            "action_steps": {
                "week_1": ["write the offer"],
                "month_1": ["first client"],
                "month_3": ["steady pipeline"],
                "month_6": ["hire help"]
            },
            "momentum_strategy": "Stack wins.",
            "environment_blueprint": "Desk by the window.",
            "financial_roadmap": "Close the gap with one client.",
            "key_insights": ["smaller than it feels"],
            "potential_obstacles": ["old habits"],
            "decision_analysis": "Committed.",
            "fuel_strategy": "Reread the note.",
            "accountability_system": "Weekly check-in."
        });

        let text = render_analysis(&analysis);

        assert!(text.contains("== Dream Life Summary ==\nA calm, deliberate life."));
        assert!(text.contains("  1. revenue"));
        assert!(text.contains("  2. health"));
        assert!(text.contains("== Cut Out (Decidere) =="));
        assert!(text.contains("  Week 1:\n    - write the offer"));
        assert!(text.contains("  Month 6:\n    - hire help"));
        assert!(text.contains("== Accountability System ==\nWeekly check-in."));

        let summary_pos = text.find("Dream Life Summary").unwrap();
        let timeline_pos = text.find("Action Steps Timeline").unwrap();
        let accountability_pos = text.find("Accountability System").unwrap();
        assert!(summary_pos < timeline_pos && timeline_pos < accountability_pos);
    }

    #[test]
    fn missing_and_mistyped_sections_render_empty() {
        // A parseable-but-wrong object must not panic the renderer.
        let analysis = json!({
            "focus_areas": "not an array",
            "action_steps": ["not", "a", "map"]
        });

        let text = render_analysis(&analysis);
        assert!(text.contains("== Dream Life Summary ==\n\n"));
        assert!(text.contains("== Focus Areas ==\n\n"));
        assert!(text.contains("  Week 1:\n  Month 1:"));
    }
}
