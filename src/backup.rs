use crate::dates;
use crate::errors::AppError;
use crate::models::{AppData, BodyweightEntry, LiftEntry, Profile, ProteinDay, Routine};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const BACKUP_VERSION: u32 = 1;

/// Versioned export envelope. Field names match the original backup
/// documents so old files import cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDoc {
    #[serde(default = "default_version")]
    pub v: u32,
    #[serde(rename = "exportedAt", default)]
    pub exported_at: String,
    pub profile: Profile,
    #[serde(rename = "bwLogs")]
    pub bw_logs: Vec<BodyweightEntry>,
    pub attendance: Vec<String>,
    #[serde(rename = "proteinMap")]
    pub protein_map: BTreeMap<String, ProteinDay>,
    pub lifts: Vec<LiftEntry>,
    pub routines: Vec<Routine>,
    #[serde(rename = "activeRoutineId", default)]
    pub active_routine_id: String,
    #[serde(rename = "lastBackup", default)]
    pub last_backup: Option<String>,
    #[serde(rename = "activeScreen", default)]
    pub active_screen: Option<String>,
}

fn default_version() -> u32 {
    BACKUP_VERSION
}

/// Snapshots the whole state and stamps the last-backup marker.
pub fn export(data: &mut AppData) -> BackupDoc {
    let stamp = dates::now_stamp();
    data.last_backup = Some(stamp.clone());
    BackupDoc {
        v: BACKUP_VERSION,
        exported_at: stamp.clone(),
        profile: data.profile.clone(),
        bw_logs: data.bodyweight.clone(),
        attendance: data.attendance.iter().cloned().collect(),
        protein_map: data.protein.clone(),
        lifts: data.lifts.clone(),
        routines: data.routines.clone(),
        active_routine_id: data.active_routine_id.clone(),
        last_backup: Some(stamp),
        active_screen: Some(data.active_screen.clone()),
    }
}

/// Validates the document shape before anything is touched, then replaces
/// the whole state. Rejection leaves the current state untouched.
pub fn import(raw: serde_json::Value, current: &AppData) -> Result<AppData, AppError> {
    let doc: BackupDoc = serde_json::from_value(raw)
        .map_err(|err| AppError::bad_request(format!("invalid backup file: {err}")))?;

    let mut restored = AppData {
        profile: doc.profile,
        routines: doc.routines,
        active_routine_id: doc.active_routine_id,
        lifts: doc.lifts,
        bodyweight: doc.bw_logs,
        attendance: doc.attendance.into_iter().collect::<BTreeSet<String>>(),
        protein: doc.protein_map,
        custom_exercises: current.custom_exercises.clone(),
        last_backup: doc.last_backup,
        onboarded: current.onboarded,
        app_version: current.app_version.clone(),
        active_screen: doc.active_screen.unwrap_or_default(),
    };
    crate::routines::repair_all(&mut restored);
    restored.lifts.sort_by(|a, b| b.date.cmp(&a.date));
    restored.bodyweight.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifts::{self, RoutineContext};
    use crate::models::SetDetail;
    use crate::{routines, tracking};
    use chrono::NaiveDate;

    fn populated() -> AppData {
        let mut data = AppData::default();
        routines::repair_all(&mut data);
        let date = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        lifts::record_lift(
            &mut data,
            "Bench Press",
            date,
            vec![SetDetail {
                weight: 185.0,
                reps: 5,
            }],
            RoutineContext::default(),
        )
        .unwrap();
        tracking::upsert_bodyweight(&mut data, date, 182.0);
        tracking::toggle_attendance(&mut data, date);
        data
    }

    #[test]
    fn export_round_trips_through_import() {
        let mut data = populated();
        let doc = export(&mut data);
        assert!(data.last_backup.is_some());

        let raw = serde_json::to_value(&doc).unwrap();
        let restored = import(raw, &AppData::default()).unwrap();
        assert_eq!(restored.lifts.len(), 1);
        assert_eq!(restored.bodyweight.len(), 1);
        assert!(restored.attendance.contains("2026-01-10"));
        assert_eq!(restored.active_routine_id, data.active_routine_id);
    }

    #[test]
    fn envelope_uses_the_original_field_names() {
        let mut data = populated();
        let raw = serde_json::to_value(export(&mut data)).unwrap();
        for field in [
            "v",
            "exportedAt",
            "bwLogs",
            "proteinMap",
            "activeRoutineId",
            "lastBackup",
        ] {
            assert!(raw.get(field).is_some(), "missing {field}");
        }
    }

    #[test]
    fn import_rejects_wrong_shapes_without_touching_state() {
        let mut data = populated();
        let good = serde_json::to_value(export(&mut data)).unwrap();

        for (field, bad_value) in [
            ("lifts", serde_json::json!(42)),
            ("routines", serde_json::json!({"a": 1})),
            ("bwLogs", serde_json::json!("nope")),
            ("attendance", serde_json::json!(7)),
            ("proteinMap", serde_json::json!([1, 2, 3])),
        ] {
            let mut broken = good.clone();
            broken[field] = bad_value;
            let err = import(broken, &data).expect_err("shape must be rejected");
            assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn import_repairs_restored_routines() {
        let mut data = populated();
        let mut raw = serde_json::to_value(export(&mut data)).unwrap();
        // strip most weekday keys from the first routine
        let days = raw["routines"][0]["days"].as_object().unwrap().clone();
        let mon = days.get("mon").cloned().unwrap_or_default();
        raw["routines"][0]["days"] = serde_json::json!({ "mon": mon });

        let restored = import(raw, &AppData::default()).unwrap();
        assert_eq!(restored.routines[0].days.len(), 7);
    }

    #[test]
    fn import_accepts_a_minimal_document() {
        let raw = serde_json::json!({
            "profile": {},
            "bwLogs": [],
            "attendance": [],
            "proteinMap": {},
            "lifts": [],
            "routines": [],
        });
        let restored = import(raw, &AppData::default()).unwrap();
        assert!(!restored.routines.is_empty());
        assert_eq!(restored.profile.protein_goal, 240);
    }
}
