use crate::errors::AppError;
use crate::models::{AppData, BodyweightEntry, LiftEntry, Profile, ProteinDay, Routine};
use crate::{dates, exercises, routines};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::{env, path::PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::error;

/* ---- Storage key namespace (one JSON document per key) ---- */
pub const KEY_PROFILE: &str = "gym_profile_v1";
pub const KEY_ROUTINES: &str = "gym_routines_v1";
pub const KEY_ACTIVE_ROUTINE: &str = "gym_active_routine_id_v1";
pub const KEY_ACTIVE_SCREEN: &str = "gym_active_screen_v1";
pub const KEY_BW: &str = "gym_bw_logs_v1";
pub const KEY_ATT: &str = "gym_attendance_v1";
pub const KEY_PRO: &str = "gym_protein_v1";
pub const KEY_LIFTS: &str = "gym_lifts_v1";
pub const KEY_CUSTOM_EX: &str = "gym_custom_ex_v1";
pub const KEY_APP_VERSION: &str = "gym_app_version_v1";
pub const KEY_LAST_BACKUP: &str = "gym_last_backup_v1";
pub const KEY_ONBOARD_DONE: &str = "gym_onboard_done_v1";

/// JSON-document store over a data directory. Keeps the last serialized
/// form per key so unchanged values never touch the filesystem.
pub struct KvStore {
    dir: PathBuf,
    inner: Mutex<KvInner>,
}

#[derive(Default)]
struct KvInner {
    written: HashMap<String, String>,
    last_write: Option<String>,
}

impl KvStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            inner: Mutex::new(KvInner::default()),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Parsed document under `key`, or `fallback` when the file is absent
    /// or unparseable. Never fails the caller.
    pub async fn read<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    if let Ok(raw) = String::from_utf8(bytes) {
                        self.inner.lock().await.written.insert(key.to_owned(), raw);
                    }
                    value
                }
                Err(err) => {
                    error!("failed to parse stored {key}: {err}");
                    fallback
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => fallback,
            Err(err) => {
                error!("failed to read stored {key}: {err}");
                fallback
            }
        }
    }

    /// Serializes `value` and writes it only when the serialized form
    /// differs from what was last written under `key`. Returns whether a
    /// write actually happened; the last-write stamp moves only then.
    pub async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<bool, AppError> {
        let payload = serde_json::to_string_pretty(value).map_err(AppError::internal)?;
        {
            let inner = self.inner.lock().await;
            if inner.written.get(key) == Some(&payload) {
                return Ok(false);
            }
        }
        fs::write(self.path_for(key), payload.as_bytes())
            .await
            .map_err(|err| {
                error!("failed to write {key}: {err}");
                AppError::internal(err)
            })?;
        let mut inner = self.inner.lock().await;
        inner.written.insert(key.to_owned(), payload);
        inner.last_write = Some(dates::now_stamp());
        Ok(true)
    }

    pub async fn last_write(&self) -> Option<String> {
        self.inner.lock().await.last_write.clone()
    }
}

pub fn resolve_data_dir() -> Result<PathBuf, std::io::Error> {
    if let Ok(dir) = env::var("GYMLOG_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    Ok(PathBuf::from("data"))
}

/// Hydrates the full state, repairing what needs repair. Returns the
/// previously applied app version when this binary is newer than the one
/// that last wrote the store.
pub async fn load_data(store: &KvStore) -> (AppData, Option<String>) {
    let profile: Profile = store.read(KEY_PROFILE, Profile::default()).await;
    let stored_routines: Vec<Routine> = store.read(KEY_ROUTINES, Vec::new()).await;
    let active_routine_id: String = store.read(KEY_ACTIVE_ROUTINE, String::new()).await;
    let lifts: Vec<LiftEntry> = store.read(KEY_LIFTS, Vec::new()).await;
    let bodyweight: Vec<BodyweightEntry> = store.read(KEY_BW, Vec::new()).await;
    let attendance: BTreeSet<String> = store.read(KEY_ATT, BTreeSet::new()).await;
    let protein: BTreeMap<String, ProteinDay> = store.read(KEY_PRO, BTreeMap::new()).await;
    let stored_custom: Vec<String> = store.read(KEY_CUSTOM_EX, Vec::new()).await;
    let last_backup: Option<String> = store.read(KEY_LAST_BACKUP, None).await;
    let onboarded: bool = store.read(KEY_ONBOARD_DONE, false).await;
    let stored_version: String = store.read(KEY_APP_VERSION, String::new()).await;
    let active_screen: String = store.read(KEY_ACTIVE_SCREEN, String::new()).await;

    let mut custom_exercises = Vec::new();
    for name in &stored_custom {
        exercises::add_custom(&mut custom_exercises, name);
    }

    let mut data = AppData {
        profile,
        routines: stored_routines,
        active_routine_id,
        lifts,
        bodyweight,
        attendance,
        protein,
        custom_exercises,
        last_backup,
        onboarded,
        app_version: env!("CARGO_PKG_VERSION").to_owned(),
        active_screen,
    };
    repair_loaded(&mut data);

    let previous = (!stored_version.is_empty() && stored_version != data.app_version)
        .then_some(stored_version);
    (data, previous)
}

/// One validation/migration pass over freshly loaded state. Handlers never
/// re-validate after this.
fn repair_loaded(data: &mut AppData) {
    routines::repair_all(data);
    data.profile.units = "lbs".to_owned();
    if data.profile.protein_goal == 0 {
        data.profile.protein_goal = Profile::default().protein_goal;
    }
    data.lifts.sort_by(|a, b| b.date.cmp(&a.date));
    data.bodyweight.sort_by(|a, b| a.date.cmp(&b.date));
}

pub async fn persist_data(store: &KvStore, data: &AppData) -> Result<(), AppError> {
    store.write(KEY_PROFILE, &data.profile).await?;
    store.write(KEY_ROUTINES, &data.routines).await?;
    store.write(KEY_ACTIVE_ROUTINE, &data.active_routine_id).await?;
    store.write(KEY_LIFTS, &data.lifts).await?;
    store.write(KEY_BW, &data.bodyweight).await?;
    store.write(KEY_ATT, &data.attendance).await?;
    store.write(KEY_PRO, &data.protein).await?;
    store.write(KEY_CUSTOM_EX, &data.custom_exercises).await?;
    store.write(KEY_LAST_BACKUP, &data.last_backup).await?;
    store.write(KEY_ONBOARD_DONE, &data.onboarded).await?;
    store.write(KEY_APP_VERSION, &data.app_version).await?;
    store.write(KEY_ACTIVE_SCREEN, &data.active_screen).await?;
    Ok(())
}
