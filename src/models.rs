use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Weekday keys in display order. Every routine carries all seven.
pub const WEEKDAY_KEYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Mon,
    Sun,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_protein_goal")]
    pub protein_goal: u32,
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default)]
    pub hide_rest_days: bool,
}

fn default_units() -> String {
    "lbs".to_owned()
}

fn default_protein_goal() -> u32 {
    240
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            units: default_units(),
            protein_goal: default_protein_goal(),
            week_start: WeekStart::Mon,
            hide_rest_days: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExercisePlan {
    pub name: String,
    #[serde(default)]
    pub sets: u32,
    /// Free text, e.g. "8-10".
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DayPlan {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub rest: bool,
    #[serde(default)]
    pub exercises: Vec<ExercisePlan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub days: BTreeMap<String, DayPlan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetDetail {
    pub weight: f64,
    pub reps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiftEntry {
    pub id: String,
    pub date: String,
    pub exercise: String,
    /// Normalized form of `exercise`, used only as a lookup key.
    pub exercise_key: String,
    pub set_count: u32,
    pub top_reps: u32,
    pub top_weight: f64,
    /// Computed once when the entry is recorded.
    pub personal_record: bool,
    #[serde(default)]
    pub sets: Vec<SetDetail>,
    #[serde(default)]
    pub routine_id: String,
    #[serde(default)]
    pub routine_name: String,
    #[serde(default)]
    pub day_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyweightEntry {
    pub date: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ProteinDay {
    #[serde(default)]
    pub morning: f64,
    #[serde(default)]
    pub lunch: f64,
    #[serde(default)]
    pub pre: f64,
    #[serde(default)]
    pub dinner: f64,
    #[serde(default)]
    pub bed: f64,
}

impl ProteinDay {
    pub fn total(&self) -> f64 {
        self.morning + self.lunch + self.pre + self.dinner + self.bed
    }
}

/// Whole application state, hydrated once at startup and persisted one
/// JSON document per logical key.
#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub profile: Profile,
    pub routines: Vec<Routine>,
    pub active_routine_id: String,
    pub lifts: Vec<LiftEntry>,
    pub bodyweight: Vec<BodyweightEntry>,
    pub attendance: BTreeSet<String>,
    pub protein: BTreeMap<String, ProteinDay>,
    pub custom_exercises: Vec<String>,
    pub last_backup: Option<String>,
    pub onboarded: bool,
    pub app_version: String,
    pub active_screen: String,
}

/* ---- API payloads ---- */

#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub protein_goal: Option<u32>,
    pub week_start: Option<WeekStart>,
    pub hide_rest_days: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoutineRequest {
    pub name: Option<String>,
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoutineRequest {
    pub name: String,
    pub days: BTreeMap<String, DayPlan>,
}

#[derive(Debug, Serialize)]
pub struct RoutinesResponse {
    pub routines: Vec<Routine>,
    pub active_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RecordLiftRequest {
    pub exercise: String,
    pub date: Option<String>,
    pub sets: Vec<SetDetail>,
}

#[derive(Debug, Deserialize)]
pub struct LiftQuery {
    pub exercise: Option<String>,
    pub routine: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseQuery {
    pub exercise: String,
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub exercise: String,
    pub metric: Option<crate::lifts::TrendMetric>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BodyweightRequest {
    pub date: Option<String>,
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
pub struct ToggleAttendanceRequest {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProteinRequest {
    pub date: Option<String>,
    #[serde(flatten)]
    pub slots: ProteinDay,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddExerciseRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub screen: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub version: String,
    pub previous_version: Option<String>,
    pub updated: bool,
    pub last_write: Option<String>,
    pub last_backup: Option<String>,
    pub onboarded: bool,
    pub active_screen: String,
}
