//! Per-person weekly summaries over a located month.
//!
//! # Responsibility
//! - Turn (person, date) lookups into `DayEntry` records.
//! - Split each week into the full set and the included set.
//! - Produce summary lines and the main organization per person.
//!
//! # Invariants
//! - People keep the order the caller requested them in.
//! - Only the day of month of each date is looked up in the sheet.

use crate::model::day::{DayEntry, PersonWeek, WeeklySummary};
use crate::model::grid::MonthSheet;
use crate::resolve::assignment::get_assignment;
use crate::resolve::codes::CodeResolver;
use crate::summary::aggregate::{build_summary, main_organization};
use chrono::{Datelike, NaiveDate};
use log::debug;
use std::collections::BTreeMap;

/// Builds every day entry of `person` for `dates`.
pub fn person_days(
    sheet: &MonthSheet,
    resolver: &CodeResolver,
    person: &str,
    dates: &[NaiveDate],
    holidays: &BTreeMap<NaiveDate, String>,
) -> Vec<DayEntry> {
    dates
        .iter()
        .map(|&date| {
            let is_holiday = holidays.contains_key(&date);
            let code = get_assignment(sheet, person, date.day());
            if code.is_empty() {
                DayEntry::free(date, is_holiday)
            } else {
                let description = resolver.describe(&code);
                DayEntry::assigned(date, code, description, is_holiday)
            }
        })
        .collect()
}

/// Summarizes one person's week.
pub fn summarize_person(
    resolver: &CodeResolver,
    person: &str,
    full_week: &[DayEntry],
) -> PersonWeek {
    let included: Vec<DayEntry> = full_week
        .iter()
        .filter(|entry| entry.is_included())
        .cloned()
        .collect();

    PersonWeek {
        person: person.to_string(),
        lines: build_summary(resolver, &included),
        main_organization: main_organization(resolver, full_week),
    }
}

/// Summarizes `people` over `dates` (normally one week window).
pub fn build_weekly_summary(
    sheet: &MonthSheet,
    resolver: &CodeResolver,
    people: &[String],
    dates: &[NaiveDate],
    holidays: &BTreeMap<NaiveDate, String>,
) -> WeeklySummary {
    let people: Vec<PersonWeek> = people
        .iter()
        .map(|person| {
            let full_week = person_days(sheet, resolver, person, dates, holidays);
            summarize_person(resolver, person, &full_week)
        })
        .collect();

    debug!(
        "event=weekly_summary_built module=summary status=ok people={} days={} holidays={}",
        people.len(),
        dates.len(),
        holidays.len()
    );

    WeeklySummary { people }
}
