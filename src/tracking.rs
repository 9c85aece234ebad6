use crate::dates;
use crate::models::{AppData, BodyweightEntry, ProteinDay, Routine, WeekStart};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/* ---- Bodyweight ---- */

/// One reading per date; a second reading replaces the first. The log
/// stays sorted oldest-first.
pub fn upsert_bodyweight(data: &mut AppData, date: NaiveDate, weight: f64) -> BodyweightEntry {
    let key = dates::date_key(date);
    data.bodyweight.retain(|entry| entry.date != key);
    let entry = BodyweightEntry { date: key, weight };
    data.bodyweight.push(entry.clone());
    data.bodyweight.sort_by(|a, b| a.date.cmp(&b.date));
    entry
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyweightStats {
    pub latest: Option<BodyweightEntry>,
    pub delta: Option<f64>,
    pub week_avg: Option<f64>,
}

pub fn bodyweight_stats_at(today: NaiveDate, entries: &[BodyweightEntry]) -> BodyweightStats {
    let latest = entries.last().cloned();
    let delta = match entries {
        [.., previous, last] => Some(last.weight - previous.weight),
        _ => None,
    };
    let window_start = dates::date_key(today - Duration::days(6));
    let recent: Vec<f64> = entries
        .iter()
        .filter(|entry| entry.date >= window_start)
        .map(|entry| entry.weight)
        .collect();
    let week_avg = if recent.is_empty() {
        None
    } else {
        Some(recent.iter().sum::<f64>() / recent.len() as f64)
    };
    BodyweightStats {
        latest,
        delta,
        week_avg,
    }
}

/* ---- Attendance ---- */

/// Toggles membership for the date. Returns whether the date is attended
/// after the call.
pub fn toggle_attendance(data: &mut AppData, date: NaiveDate) -> bool {
    let key = dates::date_key(date);
    if data.attendance.remove(&key) {
        false
    } else {
        data.attendance.insert(key);
        true
    }
}

/// Attended dates inside the week containing `today`.
pub fn attended_this_week_at(
    today: NaiveDate,
    attendance: &BTreeSet<String>,
    week_start: WeekStart,
) -> u32 {
    let start = dates::week_start(today, week_start);
    (0..7)
        .map(|offset| dates::date_key(start + Duration::days(offset)))
        .filter(|key| attendance.contains(key))
        .count() as u32
}

/// Non-rest days in the routine, floored at 1 so downstream ratios never
/// divide by zero.
pub fn weekly_target(routine: &Routine) -> u32 {
    let days = routine.days.values().filter(|day| !day.rest).count() as u32;
    days.max(1)
}

/* ---- Protein ---- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProteinStatus {
    Hit,
    Close,
    Low,
}

pub fn set_protein(data: &mut AppData, date: NaiveDate, slots: ProteinDay) {
    data.protein.insert(dates::date_key(date), slots);
}

/// Total grams logged for the date; missing dates and slots count as zero.
pub fn protein_total(protein: &BTreeMap<String, ProteinDay>, date: NaiveDate) -> f64 {
    protein
        .get(&dates::date_key(date))
        .copied()
        .unwrap_or_default()
        .total()
}

pub fn protein_status(total: f64, goal: u32) -> ProteinStatus {
    let goal = f64::from(goal);
    if total >= goal {
        ProteinStatus::Hit
    } else if total >= goal * 0.75 {
        ProteinStatus::Close
    } else {
        ProteinStatus::Low
    }
}
