use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/status", get(handlers::status))
        .route(
            "/api/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route(
            "/api/routines",
            get(handlers::get_routines).post(handlers::create_routine),
        )
        .route(
            "/api/routines/:id",
            put(handlers::update_routine).delete(handlers::delete_routine),
        )
        .route("/api/routines/:id/activate", post(handlers::activate_routine))
        .route(
            "/api/routines/:id/duplicate",
            post(handlers::duplicate_routine),
        )
        .route(
            "/api/lifts",
            get(handlers::list_lifts).post(handlers::record_lift),
        )
        .route("/api/lifts/stats", get(handlers::lift_stats))
        .route("/api/lifts/trend", get(handlers::lift_trend))
        .route("/api/lifts/:id", delete(handlers::delete_lift))
        .route(
            "/api/bodyweight",
            get(handlers::get_bodyweight).post(handlers::add_bodyweight),
        )
        .route("/api/attendance", get(handlers::get_attendance))
        .route("/api/attendance/toggle", post(handlers::toggle_attendance))
        .route(
            "/api/protein",
            get(handlers::get_protein).post(handlers::set_protein),
        )
        .route(
            "/api/exercises",
            get(handlers::list_exercises).post(handlers::add_exercise),
        )
        .route("/api/today", get(handlers::get_today))
        .route("/api/focus", get(handlers::get_focus))
        .route("/api/export", get(handlers::export_backup))
        .route("/api/import", post(handlers::import_backup))
        .route("/api/screen", post(handlers::set_screen))
        .route("/api/onboarded", post(handlers::complete_onboarding))
        .with_state(state)
}
