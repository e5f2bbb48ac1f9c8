//! Exercise reference data and calorie estimation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Body region an exercise targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    Eye,
    Back,
    Wrist,
}

impl FocusArea {
    pub const ALL: [FocusArea; 3] = [FocusArea::Eye, FocusArea::Back, FocusArea::Wrist];

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusArea::Eye => "eye",
            FocusArea::Back => "back",
            FocusArea::Wrist => "wrist",
        }
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FocusArea {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eye" => Ok(FocusArea::Eye),
            "back" => Ok(FocusArea::Back),
            "wrist" => Ok(FocusArea::Wrist),
            other => Err(ValidationError::InvalidValue {
                field: "focus_area".into(),
                message: format!("expected eye, back or wrist, got '{other}'"),
            }),
        }
    }
}

/// An exercise from the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    /// Duration of one repetition, in seconds
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
    pub repetitions: u32,
    pub focus_area: FocusArea,
    /// Metabolic equivalent of task
    pub met_score: f64,
}

impl ExerciseSpec {
    /// Energy spent by a person of `body_weight_kg` doing this exercise once.
    pub fn calories_burned(&self, body_weight_kg: Option<f64>) -> f64 {
        calories_burned(
            self.met_score,
            self.duration_seconds,
            self.repetitions,
            body_weight_kg,
        )
    }
}

/// MET-based energy estimate.
///
/// `met * 3.5 * weight / 200` kcal per minute, times the exercise duration in
/// minutes, times the repetitions. Returns 0 when the weight is unknown.
pub fn calories_burned(
    met_score: f64,
    duration_seconds: u32,
    repetitions: u32,
    body_weight_kg: Option<f64>,
) -> f64 {
    let Some(weight) = body_weight_kg else {
        return 0.0;
    };
    let per_minute = met_score * 3.5 * (weight / 200.0);
    per_minute * (f64::from(duration_seconds) / 60.0) * f64::from(repetitions)
}
