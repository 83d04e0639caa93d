use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Status of a submitted plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Draft,
    Analyzing,
    Completed,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Analyzing => "analyzing",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

impl FromStr for PlanStatus {
    type Err = PlanStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "analyzing" => Ok(Self::Analyzing),
            "completed" => Ok(Self::Completed),
            other => Err(PlanStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PlanStatus`] string.
#[derive(Debug, Clone)]
pub struct PlanStatusParseError(pub String);

impl fmt::Display for PlanStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid plan status: {:?}", self.0)
    }
}

impl std::error::Error for PlanStatusParseError {}

// ---------------------------------------------------------------------------

/// The kind of motivation driving the plan -- moving away from pain, toward
/// pleasure, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MotivationFuel {
    Pain,
    Pleasure,
    Both,
}

impl fmt::Display for MotivationFuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pain => "pain",
            Self::Pleasure => "pleasure",
            Self::Both => "both",
        };
        f.write_str(s)
    }
}

impl FromStr for MotivationFuel {
    type Err = MotivationFuelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pain" => Ok(Self::Pain),
            "pleasure" => Ok(Self::Pleasure),
            "both" => Ok(Self::Both),
            other => Err(MotivationFuelParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`MotivationFuel`] string.
#[derive(Debug, Clone)]
pub struct MotivationFuelParseError(pub String);

impl fmt::Display for MotivationFuelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid motivation fuel: {:?}", self.0)
    }
}

impl std::error::Error for MotivationFuelParseError {}

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

/// A submitted plan -- one full answer set plus its lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: Uuid,
    pub status: PlanStatus,
    pub has_decided: bool,
    pub habits_to_cut: String,
    pub new_version_description: String,
    pub motivation_fuel: Option<MotivationFuel>,
    pub fuel_description: String,
    pub daily_fuel_reminder: String,
    pub dream_day: String,
    pub dream_week: String,
    pub ideal_living: String,
    pub monthly_costs: Json<BTreeMap<String, f64>>,
    pub current_expenses: Option<f64>,
    pub dream_expenses: Option<f64>,
    pub financial_gap: f64,
    pub daily_focus: Vec<String>,
    pub things_to_cut: Vec<String>,
    pub environment_changes: String,
    pub progress_tracking_method: String,
    pub daily_wins: Vec<String>,
    pub daily_planning_routine: String,
    pub action_commitment: String,
    pub additional_thoughts: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// An AI analysis linked 1:1 to a plan.
///
/// `content` holds the model's reply exactly as parsed; the remaining columns
/// are a best-effort projection of the sections the results page reads most.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Analysis {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub content: Json<serde_json::Value>,
    pub win_ticker: Vec<String>,
    pub dream_life_summary: String,
    pub focus_areas: Vec<String>,
    pub cut_out_items: Vec<String>,
    pub action_steps: Json<serde_json::Value>,
    pub momentum_strategy: String,
    pub environment_blueprint: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
