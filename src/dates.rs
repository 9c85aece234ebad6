use crate::models::WeekStart;
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_key() -> String {
    date_key(today())
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_key(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// First day of the week containing `date`, per the profile preference.
pub fn week_start(date: NaiveDate, start: WeekStart) -> NaiveDate {
    let back = match start {
        WeekStart::Mon => date.weekday().num_days_from_monday(),
        WeekStart::Sun => date.weekday().num_days_from_sunday(),
    };
    date - Duration::days(i64::from(back))
}

pub fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

pub fn weekday_key(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

pub fn now_stamp() -> String {
    Local::now().to_rfc3339()
}
