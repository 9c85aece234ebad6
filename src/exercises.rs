//! Exercise naming. `normalize` produces lookup keys, `canonical` produces
//! display names; the two are never conflated.

/// Recognized variants mapped to a single preferred display name.
const SYNONYMS: &[(&str, &str)] = &[
    ("cable crunch", "Cable Crunch"),
    ("cable crunches", "Cable Crunch"),
    ("leg extension", "Leg Extension"),
    ("leg extensions", "Leg Extension"),
    ("standing calf raise", "Standing Calf Raise"),
    ("standing calf raise (machine)", "Standing Calf Raise"),
    (
        "overhead dumbbell tricep extension",
        "Overhead Dumbbell Tricep Extension",
    ),
    (
        "overhead dumbbell triceps extension",
        "Overhead Dumbbell Tricep Extension",
    ),
    ("goblet squat", "Goblet Squat"),
    ("goblet squats", "Goblet Squat"),
    ("spin bike", "Stationary Bike"),
    ("stationary bike", "Stationary Bike"),
];

/// Lowercase, collapse whitespace runs, trim. Never displayed.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Preferred display form: synonym-table hit, else the cleaned input.
pub fn canonical(name: &str) -> String {
    let cleaned = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return cleaned;
    }
    let key = normalize(&cleaned);
    SYNONYMS
        .iter()
        .find(|(variant, _)| *variant == key)
        .map_or(cleaned, |(_, display)| (*display).to_owned())
}

/// Adds a user-defined exercise name, keeping the list de-duplicated by
/// normalized name (against both the list and the canonical table) and
/// sorted. Returns false when nothing was added.
pub fn add_custom(list: &mut Vec<String>, name: &str) -> bool {
    let display = canonical(name);
    if display.is_empty() {
        return false;
    }
    let key = normalize(&display);
    let known = SYNONYMS.iter().any(|(_, d)| normalize(d) == key)
        || list.iter().any(|existing| normalize(existing) == key);
    if known {
        return false;
    }
    list.push(display);
    list.sort();
    true
}

/// Canonical display names plus custom and planned names, de-duplicated by
/// normalized name, sorted. Feeds autocomplete and validation.
pub fn catalog(custom: &[String], planned: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut names = Vec::new();
    let base = SYNONYMS.iter().map(|(_, display)| (*display).to_owned());
    for name in base.chain(custom.iter().cloned()).chain(planned) {
        let display = canonical(&name);
        if display.is_empty() {
            continue;
        }
        if seen.insert(normalize(&display)) {
            names.push(display);
        }
    }
    names.sort();
    names
}
