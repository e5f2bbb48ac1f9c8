//! User profile and body metrics.
//!
//! Field names follow the `users` table of the hosted store so records can be
//! deserialized as-is.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schedule::{parse_time_of_day, parse_weekday_name, WorkSchedule, WorkingDays};

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Height in centimetres
    #[serde(default)]
    pub height: Option<f64>,
    /// Weight in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default = "default_weekdays")]
    pub weekdays: Vec<String>,
    #[serde(default = "default_job_start")]
    pub job_start: String,
    #[serde(default = "default_job_end")]
    pub job_end: String,
    #[serde(default = "default_num_breaks")]
    pub num_breaks: i32,
    /// Minutes per break
    #[serde(default = "default_break_duration")]
    pub break_duration: i32,
}

fn default_name() -> String {
    "User".into()
}
fn default_weekdays() -> Vec<String> {
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_job_start() -> String {
    "06:00".into()
}
fn default_job_end() -> String {
    "21:00".into()
}
fn default_num_breaks() -> i32 {
    5
}
fn default_break_duration() -> i32 {
    20
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            email: String::new(),
            height: None,
            weight: None,
            weekdays: default_weekdays(),
            job_start: default_job_start(),
            job_end: default_job_end(),
            num_breaks: default_num_breaks(),
            break_duration: default_break_duration(),
        }
    }
}

impl UserProfile {
    /// Derive the scheduler's view of this profile.
    pub fn work_schedule(&self) -> WorkSchedule {
        WorkSchedule::new(
            self.job_start.clone(),
            self.job_end.clone(),
            WorkingDays::from_names(&self.weekdays),
            self.num_breaks,
            self.break_duration.max(0) as u32,
        )
    }

    /// Problems with the stored values. Advisory only: scheduling falls back
    /// to its own defaults for every item reported here.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();

        for (field, value) in [("job_start", &self.job_start), ("job_end", &self.job_end)] {
            if let Err(e) = parse_time_of_day(value) {
                problems.push(ValidationError::InvalidValue {
                    field: field.into(),
                    message: e.to_string(),
                });
            }
        }
        if self.num_breaks < 1 {
            problems.push(ValidationError::InvalidValue {
                field: "num_breaks".into(),
                message: format!("{} is below 1, one break will be scheduled", self.num_breaks),
            });
        }
        if self.break_duration < 1 {
            problems.push(ValidationError::InvalidValue {
                field: "break_duration".into(),
                message: "must be at least one minute".into(),
            });
        }
        for name in &self.weekdays {
            if parse_weekday_name(name).is_none() {
                problems.push(ValidationError::UnknownWeekday(name.clone()));
            }
        }
        problems
    }

    /// Body mass index, when both height and weight are known.
    pub fn bmi(&self) -> Option<f64> {
        match (self.height, self.weight) {
            (Some(h), Some(w)) if h > 0.0 => Some(bmi(h, w)),
            _ => None,
        }
    }
}

/// Order a weekday selection Sunday-first, dropping unknown names.
///
/// An empty selection falls back to Monday through Friday, which is what the
/// profile editor stores when the user unticks every day.
pub fn normalized_weekdays<I, S>(selection: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let days = WorkingDays::from_names(selection);
    let days = if days.is_empty() {
        WorkingDays::weekdays()
    } else {
        days
    };
    days.names().into_iter().map(String::from).collect()
}

/// BMI from height in centimetres and weight in kilograms.
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let metres = height_cm / 100.0;
    weight_kg / (metres * metres)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}
