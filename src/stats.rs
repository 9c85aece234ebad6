use crate::models::{AppData, DayPlan};
use crate::{dates, lifts, routines, tracking};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Single prioritized recommendation for the home screen. Rules are
/// evaluated in order; the first match wins.
pub fn focus_at(today: NaiveDate, data: &AppData) -> String {
    let Some(routine) = routines::get_active(data) else {
        return "Show up and execute.".to_owned();
    };
    let plan = routine.days.get(dates::weekday_key(today));

    if plan.is_some_and(|p| p.rest) {
        return "Rest day. Recovery is where the strength shows up.".to_owned();
    }

    let yesterday = today - Duration::days(1);
    if data.attendance.contains(&dates::date_key(yesterday)) {
        let total = tracking::protein_total(&data.protein, yesterday);
        if total < f64::from(data.profile.protein_goal) * 0.75 {
            return "You trained yesterday but protein came up short. Go lighter today and get your meals in.".to_owned();
        }
    }

    if let Some(plan) = plan {
        for exercise in &plan.exercises {
            if lifts::is_stalled(&data.lifts, &exercise.name, lifts::STALL_LOOKBACK) {
                return format!(
                    "{} has stalled. Change the stimulus or drop the weight and rebuild.",
                    exercise.name
                );
            }
        }
    }

    let target = tracking::weekly_target(routine);
    let attended = tracking::attended_this_week_at(today, &data.attendance, data.profile.week_start);
    let remaining = target.saturating_sub(attended);
    if remaining > 0 {
        let noun = if remaining == 1 { "workout" } else { "workouts" };
        return format!("{remaining} {noun} left to hit this week's target.");
    }

    match plan {
        Some(p) if !p.label.trim().is_empty() => format!("{} day. Work the plan.", p.label),
        _ => "Show up and execute.".to_owned(),
    }
}

#[derive(Debug, Serialize)]
pub struct TodaySummary {
    pub date: String,
    pub day_key: String,
    pub routine_id: String,
    pub routine_name: String,
    pub plan: DayPlan,
    pub focus: String,
    pub attended_this_week: u32,
    pub weekly_target: u32,
    pub attended_today: bool,
    pub protein_total: f64,
    pub protein_goal: u32,
    pub protein_remaining: f64,
    pub protein_status: tracking::ProteinStatus,
    pub bodyweight: tracking::BodyweightStats,
}

/// Everything the home screen renders, computed on demand.
pub fn today_summary_at(today: NaiveDate, data: &AppData) -> TodaySummary {
    let date = dates::date_key(today);
    let day_key = dates::weekday_key(today).to_owned();
    let (routine_id, routine_name, plan) = routines::get_active(data).map_or_else(
        || (String::new(), String::new(), DayPlan::default()),
        |routine| {
            (
                routine.id.clone(),
                routine.name.clone(),
                routine.days.get(&day_key).cloned().unwrap_or_default(),
            )
        },
    );

    let weekly_target = routines::get_active(data).map_or(1, tracking::weekly_target);
    let attended_this_week =
        tracking::attended_this_week_at(today, &data.attendance, data.profile.week_start);
    let protein_total = tracking::protein_total(&data.protein, today);
    let goal = data.profile.protein_goal;

    TodaySummary {
        focus: focus_at(today, data),
        attended_today: data.attendance.contains(&date),
        date,
        day_key,
        routine_id,
        routine_name,
        plan,
        attended_this_week,
        weekly_target,
        protein_total,
        protein_goal: goal,
        protein_remaining: (f64::from(goal) - protein_total).max(0.0),
        protein_status: tracking::protein_status(protein_total, goal),
        bodyweight: tracking::bodyweight_stats_at(today, &data.bodyweight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifts::RoutineContext;
    use crate::models::SetDetail;
    use crate::routines;

    // 2026-01-11 is a Sunday; the default split rests on Sunday.
    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn seeded() -> AppData {
        let mut data = AppData::default();
        routines::repair_all(&mut data);
        data
    }

    fn log_short_protein_yesterday(data: &mut AppData, today: NaiveDate) {
        let yesterday = today - Duration::days(1);
        tracking::toggle_attendance(data, yesterday);
        tracking::set_protein(
            data,
            yesterday,
            crate::models::ProteinDay {
                morning: 30.0,
                ..Default::default()
            },
        );
    }

    #[test]
    fn rest_day_wins_over_everything() {
        let mut data = seeded();
        log_short_protein_yesterday(&mut data, sunday());
        let message = focus_at(sunday(), &data);
        assert!(message.starts_with("Rest day"), "{message}");
    }

    #[test]
    fn short_protein_after_training_asks_for_recovery() {
        let mut data = seeded();
        log_short_protein_yesterday(&mut data, monday());
        let message = focus_at(monday(), &data);
        assert!(message.contains("protein"), "{message}");
    }

    #[test]
    fn adequate_protein_skips_the_recovery_warning() {
        let mut data = seeded();
        let yesterday = monday() - Duration::days(1);
        tracking::toggle_attendance(&mut data, yesterday);
        tracking::set_protein(
            &mut data,
            yesterday,
            crate::models::ProteinDay {
                morning: 60.0,
                lunch: 60.0,
                pre: 30.0,
                dinner: 60.0,
                bed: 40.0,
            },
        );
        let message = focus_at(monday(), &data);
        assert!(!message.contains("protein"), "{message}");
    }

    #[test]
    fn stalled_scheduled_lift_is_named() {
        let mut data = seeded();
        // Monday on the default split schedules Bench Press first.
        for offset in [8, 4, 1] {
            lifts::record_lift(
                &mut data,
                "Bench Press",
                monday() - Duration::days(offset),
                vec![SetDetail {
                    weight: 185.0,
                    reps: 5,
                }],
                RoutineContext::default(),
            )
            .unwrap();
        }
        let message = focus_at(monday(), &data);
        assert!(message.starts_with("Bench Press has stalled"), "{message}");
    }

    #[test]
    fn countdown_when_workouts_remain() {
        let data = seeded();
        let message = focus_at(monday(), &data);
        assert_eq!(message, "6 workouts left to hit this week's target.");
    }

    #[test]
    fn day_label_once_the_week_is_done() {
        let mut data = seeded();
        // Attend every day of the Monday-start week containing 2026-01-05.
        for offset in 0..7 {
            tracking::toggle_attendance(&mut data, monday() + Duration::days(offset));
        }
        let message = focus_at(monday(), &data);
        assert_eq!(message, "Push day. Work the plan.");
    }

    #[test]
    fn today_summary_reflects_the_plan_and_protein() {
        let mut data = seeded();
        tracking::set_protein(
            &mut data,
            monday(),
            crate::models::ProteinDay {
                morning: 80.0,
                lunch: 80.0,
                pre: 0.0,
                dinner: 80.0,
                bed: 0.0,
            },
        );
        let summary = today_summary_at(monday(), &data);
        assert_eq!(summary.day_key, "mon");
        assert_eq!(summary.plan.label, "Push");
        assert_eq!(summary.weekly_target, 6);
        assert_eq!(summary.protein_total, 240.0);
        assert_eq!(summary.protein_remaining, 0.0);
        assert_eq!(summary.protein_status, tracking::ProteinStatus::Hit);
    }
}
