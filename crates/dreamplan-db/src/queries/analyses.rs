//! Database query functions for the `analyses` table.

use anyhow::{Context, Result};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::Analysis;

/// Parameters for inserting a new analysis row.
#[derive(Debug, Clone)]
pub struct NewAnalysis<'a> {
    pub plan_id: Uuid,
    /// The parsed model reply, stored as-is.
    pub content: &'a Value,
}

/// Pull a string-array section out of the raw content, defaulting to empty.
fn section_list(content: &Value, key: &str) -> Vec<String> {
    content
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Pull a prose section out of the raw content, defaulting to empty.
fn section_text(content: &Value, key: &str) -> String {
    content
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Insert a new analysis row linked to a plan. Returns the inserted row with
/// server-generated defaults (id, created_at).
///
/// The known sections are projected out of `content` best-effort -- a reply
/// missing a section stores an empty default rather than failing, since the
/// relay deliberately performs no shape validation.
pub async fn insert_analysis(pool: &PgPool, new: &NewAnalysis<'_>) -> Result<Analysis> {
    let win_ticker = section_list(new.content, "win_ticker");
    let focus_areas = section_list(new.content, "focus_areas");
    let cut_out_items = section_list(new.content, "cut_out_items");
    let dream_life_summary = section_text(new.content, "dream_life_summary");
    let momentum_strategy = section_text(new.content, "momentum_strategy");
    let environment_blueprint = section_text(new.content, "environment_blueprint");
    let action_steps = new
        .content
        .get("action_steps")
        .cloned()
        .unwrap_or_else(|| serde_json::json!({}));

    let analysis = sqlx::query_as::<_, Analysis>(
        "INSERT INTO analyses ( \
             plan_id, content, win_ticker, dream_life_summary, focus_areas, \
             cut_out_items, action_steps, momentum_strategy, environment_blueprint \
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING *",
    )
    .bind(new.plan_id)
    .bind(Json(new.content))
    .bind(&win_ticker)
    .bind(&dream_life_summary)
    .bind(&focus_areas)
    .bind(&cut_out_items)
    .bind(Json(&action_steps))
    .bind(&momentum_strategy)
    .bind(&environment_blueprint)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert analysis for plan {}", new.plan_id))?;

    Ok(analysis)
}

/// Fetch the analysis linked to a plan, if one exists.
pub async fn get_analysis_for_plan(pool: &PgPool, plan_id: Uuid) -> Result<Option<Analysis>> {
    let analysis = sqlx::query_as::<_, Analysis>("SELECT * FROM analyses WHERE plan_id = $1")
        .bind(plan_id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("failed to fetch analysis for plan {plan_id}"))?;

    Ok(analysis)
}
