use crate::errors::AppError;
use crate::exercises;
use crate::models::{AppData, LiftEntry, LiftQuery, SetDetail};
use crate::{dates, routines};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Routine context captured on each logged lift.
#[derive(Debug, Clone, Default)]
pub struct RoutineContext {
    pub routine_id: String,
    pub routine_name: String,
    pub day_key: String,
}

impl RoutineContext {
    pub fn for_today(data: &AppData, today: NaiveDate) -> Self {
        routines::get_active(data).map_or_else(Self::default, |routine| Self {
            routine_id: routine.id.clone(),
            routine_name: routine.name.clone(),
            day_key: dates::weekday_key(today).to_owned(),
        })
    }
}

/// Validates the set rows, derives the top set, computes the PR flag
/// against all prior entries for the same exercise, appends, and keeps the
/// collection sorted newest-first.
pub fn record_lift(
    data: &mut AppData,
    exercise: &str,
    date: NaiveDate,
    sets: Vec<SetDetail>,
    context: RoutineContext,
) -> Result<LiftEntry, AppError> {
    let name = exercises::canonical(exercise);
    if name.is_empty() {
        return Err(AppError::bad_request("exercise name is required"));
    }
    let valid: Vec<SetDetail> = sets
        .into_iter()
        .filter(|set| set.weight > 0.0 && set.reps > 0)
        .collect();
    if valid.is_empty() {
        return Err(AppError::bad_request(
            "at least one set needs a weight and rep count above zero",
        ));
    }

    // first occurrence wins weight ties
    let mut top = valid[0];
    for set in &valid[1..] {
        if set.weight > top.weight {
            top = *set;
        }
    }

    let key = exercises::normalize(&name);
    let prior_max = data
        .lifts
        .iter()
        .filter(|entry| entry.exercise_key == key)
        .map(|entry| entry.top_weight)
        .fold(None::<f64>, |acc, w| Some(acc.map_or(w, |m| m.max(w))));
    let personal_record = prior_max.is_none_or(|max| top.weight > max);

    let entry = LiftEntry {
        id: routines::new_id(),
        date: dates::date_key(date),
        exercise: name,
        exercise_key: key,
        set_count: valid.len() as u32,
        top_reps: top.reps,
        top_weight: top.weight,
        personal_record,
        sets: valid,
        routine_id: context.routine_id,
        routine_name: context.routine_name,
        day_key: context.day_key,
    };
    data.lifts.push(entry.clone());
    data.lifts.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(entry)
}

/// Removes by id. Stored PR flags on other entries are left as recorded;
/// views get fresh flags from `effective_pr_ids`.
pub fn delete_lift(data: &mut AppData, id: &str) -> Result<(), AppError> {
    let before = data.lifts.len();
    data.lifts.retain(|entry| entry.id != id);
    if data.lifts.len() == before {
        return Err(AppError::not_found("no lift entry with that id"));
    }
    Ok(())
}

/// Ids that hold a record given the collection as it stands now: walking
/// oldest to newest, an entry qualifies when its top weight strictly
/// exceeds everything before it for the same exercise.
pub fn effective_pr_ids(lifts: &[LiftEntry]) -> HashSet<String> {
    let mut chronological: Vec<&LiftEntry> = lifts.iter().collect();
    chronological.sort_by(|a, b| a.date.cmp(&b.date));
    let mut best: std::collections::HashMap<&str, f64> = std::collections::HashMap::new();
    let mut ids = HashSet::new();
    for entry in chronological {
        let current = best.get(entry.exercise_key.as_str()).copied();
        if current.is_none_or(|max| entry.top_weight > max) {
            ids.insert(entry.id.clone());
            best.insert(entry.exercise_key.as_str(), entry.top_weight);
        }
    }
    ids
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExerciseStats {
    pub lifetime_max: Option<f64>,
    pub this_week_max: Option<f64>,
    pub last_week_max: Option<f64>,
    pub stalled: bool,
}

pub fn stats_for_exercise_at(today: NaiveDate, lifts: &[LiftEntry], name: &str) -> ExerciseStats {
    let key = exercises::normalize(&exercises::canonical(name));
    let week_ago = dates::date_key(today - Duration::days(7));
    let two_weeks_ago = dates::date_key(today - Duration::days(14));

    let mut lifetime_max = None::<f64>;
    let mut this_week_max = None::<f64>;
    let mut last_week_max = None::<f64>;
    for entry in lifts.iter().filter(|e| e.exercise_key == key) {
        lifetime_max = Some(lifetime_max.map_or(entry.top_weight, |m| m.max(entry.top_weight)));
        if entry.date >= week_ago {
            this_week_max = Some(this_week_max.map_or(entry.top_weight, |m| m.max(entry.top_weight)));
        } else if entry.date >= two_weeks_ago {
            last_week_max = Some(last_week_max.map_or(entry.top_weight, |m| m.max(entry.top_weight)));
        }
    }

    ExerciseStats {
        lifetime_max,
        this_week_max,
        last_week_max,
        stalled: is_stalled(lifts, name, STALL_LOOKBACK),
    }
}

pub const STALL_LOOKBACK: usize = 3;

/// Flat or declining top weight across the most recent `lookback` sessions
/// counts as stalled; a tie with the window max does not clear it. Fewer
/// than `lookback` sessions never stall.
pub fn is_stalled(lifts: &[LiftEntry], name: &str, lookback: usize) -> bool {
    let key = exercises::normalize(&exercises::canonical(name));
    let mut recent: Vec<&LiftEntry> = lifts.iter().filter(|e| e.exercise_key == key).collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(lookback);
    if recent.len() < lookback {
        return false;
    }
    let newest = recent[0].top_weight;
    let prior_max = recent[1..]
        .iter()
        .map(|e| e.top_weight)
        .fold(f64::MIN, f64::max);
    newest <= prior_max
}

/// Table/graph filter: normalized exercise, routine id, inclusive date
/// range, optional row limit. Input order (newest first) is preserved.
pub fn filter_lifts<'a>(lifts: &'a [LiftEntry], query: &LiftQuery) -> Vec<&'a LiftEntry> {
    let key = query
        .exercise
        .as_deref()
        .map(|name| exercises::normalize(&exercises::canonical(name)));
    let mut rows: Vec<&LiftEntry> = lifts
        .iter()
        .filter(|entry| key.as_deref().is_none_or(|k| entry.exercise_key == k))
        .filter(|entry| {
            query
                .routine
                .as_deref()
                .is_none_or(|id| entry.routine_id == id)
        })
        .filter(|entry| query.from.as_deref().is_none_or(|from| entry.date.as_str() >= from))
        .filter(|entry| query.to.as_deref().is_none_or(|to| entry.date.as_str() <= to))
        .collect();
    if let Some(limit) = query.limit {
        rows.truncate(limit);
    }
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    #[default]
    TopWeight,
    OneRepMax,
    Volume,
}

/// Epley estimate for a single set.
pub fn epley(weight: f64, reps: u32) -> f64 {
    weight * (1.0 + f64::from(reps) / 30.0)
}

/// Session volume: per-set detail when present, else the top-set figures
/// spread across the recorded set count.
pub fn volume(entry: &LiftEntry) -> f64 {
    if entry.sets.is_empty() {
        entry.top_weight * f64::from(entry.top_reps) * f64::from(entry.set_count)
    } else {
        entry
            .sets
            .iter()
            .map(|set| set.weight * f64::from(set.reps))
            .sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub series: Vec<f64>,
}

/// Chronological `{labels, series}` pairs for the chart collaborator.
pub fn trend(lifts: &[LiftEntry], query: &LiftQuery, metric: TrendMetric) -> TrendSeries {
    let mut rows = filter_lifts(lifts, query);
    rows.reverse();
    let labels = rows.iter().map(|entry| entry.date.clone()).collect();
    let series = rows
        .iter()
        .map(|entry| match metric {
            TrendMetric::TopWeight => entry.top_weight,
            TrendMetric::OneRepMax => epley(entry.top_weight, entry.top_reps),
            TrendMetric::Volume => volume(entry),
        })
        .collect();
    TrendSeries { labels, series }
}
