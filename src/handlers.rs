use crate::errors::AppError;
use crate::lifts::{self, RoutineContext};
use crate::models::{
    AddExerciseRequest, AppData, BodyweightEntry, BodyweightRequest, CreateRoutineRequest,
    DateQuery, ExerciseQuery, LiftEntry, LiftQuery, Profile, ProfileUpdate, ProteinDay,
    ProteinRequest, RecordLiftRequest, Routine, RoutinesResponse, ScreenRequest, StatusResponse,
    ToggleAttendanceRequest, TrendQuery, UpdateRoutineRequest,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::{backup, dates, exercises, routines, stats, tracking, ui};
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(ui::render_index(&dates::today_key(), &state.version.current))
}

fn parse_date_or_today(value: Option<&str>) -> Result<NaiveDate, AppError> {
    match value {
        None => Ok(dates::today()),
        Some(raw) if raw.trim().is_empty() => Ok(dates::today()),
        Some(raw) => {
            dates::parse_key(raw).ok_or_else(|| AppError::bad_request("dates must be YYYY-MM-DD"))
        }
    }
}

/* ---- profile ---- */

pub async fn get_profile(State(state): State<AppState>) -> Json<Profile> {
    let data = state.data.lock().await;
    Json(data.profile.clone())
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    let mut data = state.data.lock().await;
    if let Some(name) = update.name {
        data.profile.name = name.trim().to_owned();
    }
    if let Some(goal) = update.protein_goal {
        if goal == 0 {
            return Err(AppError::bad_request("protein goal must be positive"));
        }
        data.profile.protein_goal = goal;
    }
    if let Some(week_start) = update.week_start {
        data.profile.week_start = week_start;
    }
    if let Some(hide) = update.hide_rest_days {
        data.profile.hide_rest_days = hide;
    }
    persist_data(&state.store, &data).await?;
    Ok(Json(data.profile.clone()))
}

/* ---- routines ---- */

pub async fn get_routines(State(state): State<AppState>) -> Json<RoutinesResponse> {
    let data = state.data.lock().await;
    Json(RoutinesResponse {
        routines: data.routines.clone(),
        active_id: data.active_routine_id.clone(),
    })
}

pub async fn create_routine(
    State(state): State<AppState>,
    Json(request): Json<CreateRoutineRequest>,
) -> Result<Json<Routine>, AppError> {
    let mut data = state.data.lock().await;
    let name = request.name.unwrap_or_else(|| "My Routine".to_owned());
    let routine = routines::create(&mut data, &name, request.template.as_deref())?;
    persist_data(&state.store, &data).await?;
    Ok(Json(routine))
}

pub async fn update_routine(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRoutineRequest>,
) -> Result<Json<Routine>, AppError> {
    let mut data = state.data.lock().await;
    let routine = routines::update(&mut data, &id, &request.name, request.days)?;
    persist_data(&state.store, &data).await?;
    Ok(Json(routine))
}

pub async fn delete_routine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoutinesResponse>, AppError> {
    let mut data = state.data.lock().await;
    routines::delete(&mut data, &id)?;
    persist_data(&state.store, &data).await?;
    Ok(Json(RoutinesResponse {
        routines: data.routines.clone(),
        active_id: data.active_routine_id.clone(),
    }))
}

pub async fn activate_routine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoutinesResponse>, AppError> {
    let mut data = state.data.lock().await;
    routines::set_active(&mut data, &id)?;
    persist_data(&state.store, &data).await?;
    Ok(Json(RoutinesResponse {
        routines: data.routines.clone(),
        active_id: data.active_routine_id.clone(),
    }))
}

pub async fn duplicate_routine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Routine>, AppError> {
    let mut data = state.data.lock().await;
    let copy = routines::duplicate(&mut data, &id)?;
    persist_data(&state.store, &data).await?;
    Ok(Json(copy))
}

/* ---- lifts ---- */

#[derive(Debug, Serialize)]
pub struct LiftListResponse {
    pub entries: Vec<LiftEntry>,
}

pub async fn list_lifts(
    State(state): State<AppState>,
    Query(query): Query<LiftQuery>,
) -> Json<LiftListResponse> {
    let data = state.data.lock().await;
    let current_records = lifts::effective_pr_ids(&data.lifts);
    let entries = lifts::filter_lifts(&data.lifts, &query)
        .into_iter()
        .map(|entry| {
            let mut row = entry.clone();
            row.personal_record = current_records.contains(&row.id);
            row
        })
        .collect();
    Json(LiftListResponse { entries })
}

pub async fn record_lift(
    State(state): State<AppState>,
    Json(request): Json<RecordLiftRequest>,
) -> Result<Json<LiftEntry>, AppError> {
    let date = parse_date_or_today(request.date.as_deref())?;
    let mut data = state.data.lock().await;
    let context = RoutineContext::for_today(&data, date);
    let entry = lifts::record_lift(&mut data, &request.exercise, date, request.sets, context)?;
    persist_data(&state.store, &data).await?;
    Ok(Json(entry))
}

pub async fn delete_lift(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LiftListResponse>, AppError> {
    let mut data = state.data.lock().await;
    lifts::delete_lift(&mut data, &id)?;
    persist_data(&state.store, &data).await?;
    let current_records = lifts::effective_pr_ids(&data.lifts);
    let entries = data
        .lifts
        .iter()
        .map(|entry| {
            let mut row = entry.clone();
            row.personal_record = current_records.contains(&row.id);
            row
        })
        .collect();
    Ok(Json(LiftListResponse { entries }))
}

pub async fn lift_stats(
    State(state): State<AppState>,
    Query(query): Query<ExerciseQuery>,
) -> Json<lifts::ExerciseStats> {
    let data = state.data.lock().await;
    Json(lifts::stats_for_exercise_at(
        dates::today(),
        &data.lifts,
        &query.exercise,
    ))
}

pub async fn lift_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Json<lifts::TrendSeries> {
    let data = state.data.lock().await;
    let filter = LiftQuery {
        exercise: Some(query.exercise),
        routine: None,
        from: query.from,
        to: query.to,
        limit: None,
    };
    Json(lifts::trend(
        &data.lifts,
        &filter,
        query.metric.unwrap_or_default(),
    ))
}

/* ---- bodyweight ---- */

#[derive(Debug, Serialize)]
pub struct BodyweightResponse {
    pub entries: Vec<BodyweightEntry>,
    pub stats: tracking::BodyweightStats,
}

pub async fn get_bodyweight(State(state): State<AppState>) -> Json<BodyweightResponse> {
    let data = state.data.lock().await;
    Json(BodyweightResponse {
        entries: data.bodyweight.clone(),
        stats: tracking::bodyweight_stats_at(dates::today(), &data.bodyweight),
    })
}

pub async fn add_bodyweight(
    State(state): State<AppState>,
    Json(request): Json<BodyweightRequest>,
) -> Result<Json<BodyweightResponse>, AppError> {
    if !request.weight.is_finite() || request.weight <= 0.0 {
        return Err(AppError::bad_request("weight must be positive"));
    }
    let date = parse_date_or_today(request.date.as_deref())?;
    let mut data = state.data.lock().await;
    tracking::upsert_bodyweight(&mut data, date, request.weight);
    persist_data(&state.store, &data).await?;
    Ok(Json(BodyweightResponse {
        stats: tracking::bodyweight_stats_at(dates::today(), &data.bodyweight),
        entries: data.bodyweight.clone(),
    }))
}

/* ---- attendance ---- */

#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub dates: Vec<String>,
    pub week: String,
    pub attended_this_week: u32,
    pub weekly_target: u32,
    pub attended_today: bool,
}

fn attendance_response(data: &AppData) -> AttendanceResponse {
    let today = dates::today();
    AttendanceResponse {
        dates: data.attendance.iter().cloned().collect(),
        week: dates::week_label(dates::week_start(today, data.profile.week_start)),
        attended_this_week: tracking::attended_this_week_at(
            today,
            &data.attendance,
            data.profile.week_start,
        ),
        weekly_target: routines::get_active(data).map_or(1, tracking::weekly_target),
        attended_today: data.attendance.contains(&dates::date_key(today)),
    }
}

pub async fn get_attendance(State(state): State<AppState>) -> Json<AttendanceResponse> {
    let data = state.data.lock().await;
    Json(attendance_response(&data))
}

pub async fn toggle_attendance(
    State(state): State<AppState>,
    Json(request): Json<ToggleAttendanceRequest>,
) -> Result<Json<AttendanceResponse>, AppError> {
    let date = parse_date_or_today(request.date.as_deref())?;
    let mut data = state.data.lock().await;
    tracking::toggle_attendance(&mut data, date);
    persist_data(&state.store, &data).await?;
    Ok(Json(attendance_response(&data)))
}

/* ---- protein ---- */

#[derive(Debug, Serialize)]
pub struct ProteinResponse {
    pub date: String,
    pub slots: ProteinDay,
    pub total: f64,
    pub goal: u32,
    pub remaining: f64,
    pub status: tracking::ProteinStatus,
}

fn protein_response(data: &AppData, date: NaiveDate) -> ProteinResponse {
    let key = dates::date_key(date);
    let slots = data.protein.get(&key).copied().unwrap_or_default();
    let total = slots.total();
    let goal = data.profile.protein_goal;
    ProteinResponse {
        date: key,
        slots,
        total,
        goal,
        remaining: (f64::from(goal) - total).max(0.0),
        status: tracking::protein_status(total, goal),
    }
}

pub async fn get_protein(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ProteinResponse>, AppError> {
    let date = parse_date_or_today(query.date.as_deref())?;
    let data = state.data.lock().await;
    Ok(Json(protein_response(&data, date)))
}

pub async fn set_protein(
    State(state): State<AppState>,
    Json(request): Json<ProteinRequest>,
) -> Result<Json<ProteinResponse>, AppError> {
    let slots = request.slots;
    let grams = [slots.morning, slots.lunch, slots.pre, slots.dinner, slots.bed];
    if grams.iter().any(|value| !value.is_finite() || *value < 0.0) {
        return Err(AppError::bad_request("protein grams can't be negative"));
    }
    let date = parse_date_or_today(request.date.as_deref())?;
    let mut data = state.data.lock().await;
    tracking::set_protein(&mut data, date, slots);
    persist_data(&state.store, &data).await?;
    Ok(Json(protein_response(&data, date)))
}

/* ---- exercises ---- */

#[derive(Debug, Serialize)]
pub struct ExercisesResponse {
    pub names: Vec<String>,
}

fn exercise_names(data: &AppData) -> Vec<String> {
    let planned = data
        .routines
        .iter()
        .flat_map(|routine| routine.days.values())
        .flat_map(|day| day.exercises.iter())
        .map(|exercise| exercise.name.clone());
    let logged = data.lifts.iter().map(|entry| entry.exercise.clone());
    exercises::catalog(&data.custom_exercises, planned.chain(logged))
}

pub async fn list_exercises(State(state): State<AppState>) -> Json<ExercisesResponse> {
    let data = state.data.lock().await;
    Json(ExercisesResponse {
        names: exercise_names(&data),
    })
}

pub async fn add_exercise(
    State(state): State<AppState>,
    Json(request): Json<AddExerciseRequest>,
) -> Result<Json<ExercisesResponse>, AppError> {
    let mut data = state.data.lock().await;
    let mut custom = std::mem::take(&mut data.custom_exercises);
    let added = exercises::add_custom(&mut custom, &request.name);
    data.custom_exercises = custom;
    if added {
        persist_data(&state.store, &data).await?;
    }
    Ok(Json(ExercisesResponse {
        names: exercise_names(&data),
    }))
}

/* ---- home / focus ---- */

pub async fn get_today(State(state): State<AppState>) -> Json<stats::TodaySummary> {
    let data = state.data.lock().await;
    Json(stats::today_summary_at(dates::today(), &data))
}

#[derive(Debug, Serialize)]
pub struct FocusResponse {
    pub focus: String,
}

pub async fn get_focus(State(state): State<AppState>) -> Json<FocusResponse> {
    let data = state.data.lock().await;
    Json(FocusResponse {
        focus: stats::focus_at(dates::today(), &data),
    })
}

/* ---- backup / restore ---- */

pub async fn export_backup(State(state): State<AppState>) -> Result<Json<backup::BackupDoc>, AppError> {
    let mut data = state.data.lock().await;
    let doc = backup::export(&mut data);
    persist_data(&state.store, &data).await?;
    Ok(Json(doc))
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub routines: usize,
    pub lifts: usize,
    pub bodyweight: usize,
    pub attendance: usize,
}

pub async fn import_backup(
    State(state): State<AppState>,
    Json(raw): Json<serde_json::Value>,
) -> Result<Json<ImportSummary>, AppError> {
    let mut data = state.data.lock().await;
    let restored = backup::import(raw, &data)?;
    *data = restored;
    persist_data(&state.store, &data).await?;
    Ok(Json(ImportSummary {
        routines: data.routines.len(),
        lifts: data.lifts.len(),
        bodyweight: data.bodyweight.len(),
        attendance: data.attendance.len(),
    }))
}

/* ---- status / misc ---- */

async fn status_response(state: &AppState, data: &AppData) -> StatusResponse {
    StatusResponse {
        version: state.version.current.clone(),
        previous_version: state.version.previous.clone(),
        updated: state.version.previous.is_some(),
        last_write: state.store.last_write().await,
        last_backup: data.last_backup.clone(),
        onboarded: data.onboarded,
        active_screen: data.active_screen.clone(),
    }
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let data = state.data.lock().await;
    Json(status_response(&state, &data).await)
}

pub async fn set_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.active_screen = request.screen;
    persist_data(&state.store, &data).await?;
    Ok(Json(status_response(&state, &data).await))
}

pub async fn complete_onboarding(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.onboarded = true;
    persist_data(&state.store, &data).await?;
    Ok(Json(status_response(&state, &data).await))
}
