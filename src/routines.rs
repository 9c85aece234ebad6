use crate::errors::AppError;
use crate::exercises;
use crate::models::{AppData, DayPlan, ExercisePlan, Routine, WEEKDAY_KEYS};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn plan(name: &str, sets: u32, reps: &str) -> ExercisePlan {
    ExercisePlan {
        name: name.to_owned(),
        sets,
        reps: reps.to_owned(),
        notes: String::new(),
    }
}

fn day(label: &str, exercises: Vec<ExercisePlan>) -> DayPlan {
    DayPlan {
        label: label.to_owned(),
        rest: false,
        exercises,
    }
}

fn rest_day() -> DayPlan {
    DayPlan {
        label: "Rest".to_owned(),
        rest: true,
        exercises: Vec::new(),
    }
}

/// Template identifiers accepted by `from_template`.
pub const TEMPLATE_KEYS: [&str; 4] = ["ppl", "upper-lower", "full-body", "body-part"];

/// Default seed: a 6-day Push/Pull/Legs split with Sunday rest.
pub fn default_split() -> Routine {
    from_template("ppl", "Push / Pull / Legs").unwrap_or_else(|| Routine {
        id: new_id(),
        name: "My Routine".to_owned(),
        source: "seed".to_owned(),
        days: BTreeMap::new(),
    })
}

/// Builds an independent routine from a named template. Every call mints a
/// fresh id; templates themselves are never mutated.
pub fn from_template(kind: &str, name: &str) -> Option<Routine> {
    let days: Vec<(&str, DayPlan)> = match kind {
        "ppl" => vec![
            (
                "mon",
                day(
                    "Push",
                    vec![
                        plan("Bench Press", 4, "6-8"),
                        plan("Overhead Press", 3, "8-10"),
                        plan("Incline Dumbbell Press", 3, "8-12"),
                        plan("Overhead Dumbbell Tricep Extension", 3, "10-12"),
                    ],
                ),
            ),
            (
                "tue",
                day(
                    "Pull",
                    vec![
                        plan("Deadlift", 3, "5"),
                        plan("Barbell Row", 4, "6-8"),
                        plan("Lat Pulldown", 3, "10-12"),
                        plan("Cable Crunch", 3, "12-15"),
                    ],
                ),
            ),
            (
                "wed",
                day(
                    "Legs",
                    vec![
                        plan("Back Squat", 4, "6-8"),
                        plan("Romanian Deadlift", 3, "8-10"),
                        plan("Leg Extension", 3, "12-15"),
                        plan("Standing Calf Raise", 4, "12-15"),
                    ],
                ),
            ),
            (
                "thu",
                day(
                    "Push",
                    vec![
                        plan("Overhead Press", 4, "6-8"),
                        plan("Dumbbell Bench Press", 3, "8-12"),
                        plan("Lateral Raise", 3, "12-15"),
                    ],
                ),
            ),
            (
                "fri",
                day(
                    "Pull",
                    vec![
                        plan("Barbell Row", 4, "6-8"),
                        plan("Pull Up", 3, "AMRAP"),
                        plan("Dumbbell Curl", 3, "10-12"),
                    ],
                ),
            ),
            (
                "sat",
                day(
                    "Legs",
                    vec![
                        plan("Goblet Squat", 4, "10-12"),
                        plan("Leg Press", 3, "10-12"),
                        plan("Stationary Bike", 1, "20 min"),
                    ],
                ),
            ),
            ("sun", rest_day()),
        ],
        "upper-lower" => vec![
            (
                "mon",
                day(
                    "Upper",
                    vec![
                        plan("Bench Press", 4, "6-8"),
                        plan("Barbell Row", 4, "6-8"),
                        plan("Overhead Press", 3, "8-10"),
                    ],
                ),
            ),
            (
                "tue",
                day(
                    "Lower",
                    vec![
                        plan("Back Squat", 4, "6-8"),
                        plan("Romanian Deadlift", 3, "8-10"),
                        plan("Standing Calf Raise", 4, "12-15"),
                    ],
                ),
            ),
            ("wed", rest_day()),
            (
                "thu",
                day(
                    "Upper",
                    vec![
                        plan("Overhead Press", 4, "6-8"),
                        plan("Lat Pulldown", 3, "10-12"),
                        plan("Dumbbell Curl", 3, "10-12"),
                    ],
                ),
            ),
            (
                "fri",
                day(
                    "Lower",
                    vec![
                        plan("Deadlift", 3, "5"),
                        plan("Leg Extension", 3, "12-15"),
                        plan("Cable Crunch", 3, "12-15"),
                    ],
                ),
            ),
            ("sat", rest_day()),
            ("sun", rest_day()),
        ],
        "full-body" => vec![
            (
                "mon",
                day(
                    "Full Body A",
                    vec![
                        plan("Back Squat", 3, "5"),
                        plan("Bench Press", 3, "5"),
                        plan("Barbell Row", 3, "8-10"),
                    ],
                ),
            ),
            ("tue", rest_day()),
            (
                "wed",
                day(
                    "Full Body B",
                    vec![
                        plan("Deadlift", 3, "5"),
                        plan("Overhead Press", 3, "5"),
                        plan("Pull Up", 3, "AMRAP"),
                    ],
                ),
            ),
            ("thu", rest_day()),
            (
                "fri",
                day(
                    "Full Body C",
                    vec![
                        plan("Goblet Squat", 3, "10-12"),
                        plan("Incline Dumbbell Press", 3, "8-12"),
                        plan("Cable Crunch", 3, "12-15"),
                    ],
                ),
            ),
            ("sat", rest_day()),
            ("sun", rest_day()),
        ],
        "body-part" => vec![
            ("mon", day("Chest", vec![
                plan("Bench Press", 4, "6-8"),
                plan("Incline Dumbbell Press", 3, "8-12"),
                plan("Cable Fly", 3, "12-15"),
            ])),
            ("tue", day("Back", vec![
                plan("Barbell Row", 4, "6-8"),
                plan("Lat Pulldown", 3, "10-12"),
                plan("Seated Cable Row", 3, "10-12"),
            ])),
            ("wed", day("Legs", vec![
                plan("Back Squat", 4, "6-8"),
                plan("Leg Extension", 3, "12-15"),
                plan("Standing Calf Raise", 4, "12-15"),
            ])),
            ("thu", day("Shoulders", vec![
                plan("Overhead Press", 4, "6-8"),
                plan("Lateral Raise", 4, "12-15"),
                plan("Rear Delt Fly", 3, "12-15"),
            ])),
            ("fri", day("Arms", vec![
                plan("Dumbbell Curl", 4, "10-12"),
                plan("Overhead Dumbbell Tricep Extension", 4, "10-12"),
                plan("Cable Crunch", 3, "12-15"),
            ])),
            ("sat", rest_day()),
            ("sun", rest_day()),
        ],
        _ => return None,
    };

    Some(Routine {
        id: new_id(),
        name: name.to_owned(),
        source: format!("template:{kind}"),
        days: days
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect(),
    })
}

/// Guarantees all seven weekday keys and canonicalizes every planned
/// exercise name, dropping same-day duplicates (first occurrence wins).
pub fn repair(routine: &mut Routine) {
    routine
        .days
        .retain(|key, _| WEEKDAY_KEYS.contains(&key.as_str()));
    for key in WEEKDAY_KEYS {
        let plan = routine.days.entry(key.to_owned()).or_default();
        let mut seen = BTreeSet::new();
        let mut kept = Vec::with_capacity(plan.exercises.len());
        for mut exercise in plan.exercises.drain(..) {
            exercise.name = exercises::canonical(&exercise.name);
            if exercise.name.is_empty() {
                continue;
            }
            if seen.insert(exercises::normalize(&exercise.name)) {
                kept.push(exercise);
            }
        }
        plan.exercises = kept;
    }
}

/// Collection invariants: never empty, every routine well-formed, active id
/// always resolvable.
pub fn repair_all(data: &mut AppData) {
    if data.routines.is_empty() {
        data.routines.push(default_split());
    }
    for routine in &mut data.routines {
        if routine.id.is_empty() {
            routine.id = new_id();
        }
        if routine.name.trim().is_empty() {
            routine.name = "My Routine".to_owned();
        }
        repair(routine);
    }
    if !data.routines.iter().any(|r| r.id == data.active_routine_id) {
        data.active_routine_id = data.routines[0].id.clone();
    }
}

/// Routine matching the active id, falling back to the first when the id
/// is stale. `None` only for an empty collection, which `repair_all`
/// prevents.
pub fn get_active(data: &AppData) -> Option<&Routine> {
    data.routines
        .iter()
        .find(|r| r.id == data.active_routine_id)
        .or_else(|| data.routines.first())
}

pub fn set_active(data: &mut AppData, id: &str) -> Result<(), AppError> {
    if !data.routines.iter().any(|r| r.id == id) {
        return Err(AppError::not_found("no routine with that id"));
    }
    data.active_routine_id = id.to_owned();
    Ok(())
}

pub fn create(data: &mut AppData, name: &str, template: Option<&str>) -> Result<Routine, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("routine name is required"));
    }
    let routine = match template {
        Some(kind) => from_template(kind, name)
            .ok_or_else(|| AppError::bad_request("unknown routine template"))?,
        None => {
            let mut routine = Routine {
                id: new_id(),
                name: name.to_owned(),
                source: "custom".to_owned(),
                days: BTreeMap::new(),
            };
            repair(&mut routine);
            routine
        }
    };
    data.routines.push(routine.clone());
    Ok(routine)
}

pub fn update(
    data: &mut AppData,
    id: &str,
    name: &str,
    days: BTreeMap<String, DayPlan>,
) -> Result<Routine, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("routine name is required"));
    }
    let routine = data
        .routines
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::not_found("no routine with that id"))?;
    routine.name = name.to_owned();
    routine.days = days;
    repair(routine);
    Ok(routine.clone())
}

pub fn duplicate(data: &mut AppData, id: &str) -> Result<Routine, AppError> {
    let source = data
        .routines
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::not_found("no routine with that id"))?;
    let mut copy = source.clone();
    copy.id = new_id();
    copy.name = format!("{} (copy)", source.name);
    copy.source = "copy".to_owned();
    data.routines.push(copy.clone());
    Ok(copy)
}

pub fn delete(data: &mut AppData, id: &str) -> Result<(), AppError> {
    if data.routines.len() <= 1 {
        return Err(AppError::bad_request("the last routine can't be deleted"));
    }
    let before = data.routines.len();
    data.routines.retain(|r| r.id != id);
    if data.routines.len() == before {
        return Err(AppError::not_found("no routine with that id"));
    }
    if !data.routines.iter().any(|r| r.id == data.active_routine_id) {
        data.active_routine_id = data.routines[0].id.clone();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_carry_all_seven_days() {
        for kind in TEMPLATE_KEYS {
            let routine = from_template(kind, "T").expect("known template");
            for key in WEEKDAY_KEYS {
                assert!(routine.days.contains_key(key), "{kind} missing {key}");
            }
            assert!(routine.days.values().any(|d| d.rest), "{kind} has no rest day");
        }
    }

    #[test]
    fn template_instances_are_independent() {
        let a = from_template("ppl", "A").unwrap();
        let b = from_template("ppl", "B").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn repair_synthesizes_missing_days_as_non_rest() {
        let mut routine = Routine {
            id: new_id(),
            name: "Partial".to_owned(),
            source: String::new(),
            days: BTreeMap::from([(
                "mon".to_owned(),
                DayPlan {
                    label: "Push".to_owned(),
                    rest: false,
                    exercises: vec![plan("Bench Press", 3, "5")],
                },
            )]),
        };
        repair(&mut routine);
        assert_eq!(routine.days.len(), 7);
        let tue = &routine.days["tue"];
        assert!(!tue.rest);
        assert!(tue.exercises.is_empty());
    }

    #[test]
    fn repair_canonicalizes_and_dedupes_within_a_day() {
        let mut routine = Routine {
            id: new_id(),
            name: "R".to_owned(),
            source: String::new(),
            days: BTreeMap::from([(
                "mon".to_owned(),
                DayPlan {
                    label: "Legs".to_owned(),
                    rest: false,
                    exercises: vec![
                        plan("goblet squats", 3, "10"),
                        plan("Leg Extension", 3, "12"),
                        plan("Goblet  Squat", 4, "8"),
                    ],
                },
            )]),
        };
        repair(&mut routine);
        let names: Vec<&str> = routine.days["mon"]
            .exercises
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["Goblet Squat", "Leg Extension"]);
        // first occurrence keeps its slot and its set scheme
        assert_eq!(routine.days["mon"].exercises[0].sets, 3);
    }

    #[test]
    fn delete_refuses_the_last_routine() {
        let mut data = AppData::default();
        repair_all(&mut data);
        let only = data.routines[0].id.clone();
        let err = delete(&mut data, &only).expect_err("must refuse");
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(data.routines.len(), 1);
    }

    #[test]
    fn delete_moves_the_active_id_off_the_deleted_routine() {
        let mut data = AppData::default();
        repair_all(&mut data);
        let second = create(&mut data, "Second", Some("full-body")).unwrap();
        set_active(&mut data, &second.id).unwrap();
        delete(&mut data, &second.id).unwrap();
        assert_eq!(data.active_routine_id, data.routines[0].id);
    }

    #[test]
    fn stale_active_id_falls_back_to_first() {
        let mut data = AppData::default();
        repair_all(&mut data);
        data.active_routine_id = "gone".to_owned();
        let active = get_active(&data).expect("collection never empty");
        assert_eq!(active.id, data.routines[0].id);
    }

    #[test]
    fn create_rejects_blank_names() {
        let mut data = AppData::default();
        repair_all(&mut data);
        assert!(create(&mut data, "  ", None).is_err());
        assert!(create(&mut data, "X", Some("nope")).is_err());
    }
}
