//! Per-day and per-week records produced while summarizing a schedule.
//!
//! # Invariants
//! - Free days carry `FREE_LABEL` as both label and description.
//! - Records are built fresh per query and never persisted.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

/// Rendered label for a day without assignment.
pub const FREE_LABEL: &str = "LIBRE";

/// Description and owning organization resolved from one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeDescriptor {
    pub description: String,
    pub organization: String,
}

/// One person's schedule entry for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    /// Assignment code, or `FREE_LABEL` when the cell resolved to free.
    pub label: String,
    pub description: String,
    pub is_holiday: bool,
}

impl DayEntry {
    /// Entry for an assigned day.
    pub fn assigned(
        date: NaiveDate,
        code: impl Into<String>,
        description: impl Into<String>,
        is_holiday: bool,
    ) -> Self {
        Self {
            date,
            label: code.into(),
            description: description.into(),
            is_holiday,
        }
    }

    /// Entry for a free day.
    pub fn free(date: NaiveDate, is_holiday: bool) -> Self {
        Self::assigned(date, FREE_LABEL, FREE_LABEL, is_holiday)
    }

    pub fn is_free(&self) -> bool {
        self.label == FREE_LABEL
    }

    /// Monday = 0 … Sunday = 6.
    pub fn weekday_index(&self) -> u32 {
        self.date.weekday().num_days_from_monday()
    }

    pub fn is_weekend(&self) -> bool {
        self.weekday_index() >= 5
    }

    /// Whether this day belongs in the summary lines.
    ///
    /// Free weekend days and free holidays are left out; everything else stays.
    pub fn is_included(&self) -> bool {
        !((self.is_weekend() || self.is_holiday) && self.is_free())
    }
}

/// One organization group inside a person's week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    /// Weekday indices (Monday = 0) covered by the group.
    pub weekdays: BTreeSet<u32>,
    /// Distinct assignment codes, free days excluded.
    pub codes: BTreeSet<String>,
    pub organization_display: String,
    pub rendered_text: String,
}

/// Summary of one person's week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonWeek {
    pub person: String,
    pub lines: Vec<SummaryLine>,
    pub main_organization: String,
}

impl PersonWeek {
    /// Rendered line texts in output order.
    pub fn line_texts(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.rendered_text.clone())
            .collect()
    }
}

/// Weekly summaries for a set of people, in the order they were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub people: Vec<PersonWeek>,
}

impl WeeklySummary {
    pub fn get(&self, person: &str) -> Option<&PersonWeek> {
        self.people.iter().find(|week| week.person == person)
    }

    /// Distinct main organizations, sorted ascending.
    pub fn organizations(&self) -> Vec<String> {
        self.people
            .iter()
            .map(|week| week.main_organization.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// People whose main organization is `organization`, sorted by name.
    pub fn people_in(&self, organization: &str) -> Vec<&PersonWeek> {
        let mut members: Vec<&PersonWeek> = self
            .people
            .iter()
            .filter(|week| week.main_organization == organization)
            .collect();
        members.sort_by(|a, b| a.person.cmp(&b.person));
        members
    }
}
