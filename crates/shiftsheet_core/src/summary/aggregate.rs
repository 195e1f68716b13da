//! Weekly grouping of day entries by organization.
//!
//! # Responsibility
//! - Compress weekday sets into range notation (`L - V`, `L,X`, `J`).
//! - Group a person's included days into rendered summary lines.
//! - Pick the dominant organization of a full week.
//!
//! # Invariants
//! - Group keys compare case-insensitively; the first display form wins.
//! - Groups are ordered by their earliest weekday (stable on ties).
//! - Main-organization ties break on ascending lexical order.

use crate::model::day::{DayEntry, SummaryLine, FREE_LABEL};
use crate::resolve::codes::CodeResolver;
use std::collections::{BTreeMap, BTreeSet};

/// Weekday letters, Monday first.
const WEEKDAY_LETTERS: [&str; 7] = ["L", "M", "X", "J", "V", "S", "D"];

/// Renders weekday indices (Monday = 0) compactly.
///
/// Indices outside `0..=6` are ignored.
pub fn compress_days(indices: &[u32]) -> String {
    let unique: BTreeSet<u32> = indices.iter().copied().filter(|&i| i < 7).collect();
    let (Some(&min), Some(&max)) = (unique.first(), unique.last()) else {
        return String::new();
    };

    if unique.len() == 1 {
        return weekday_letter(min).to_string();
    }
    if unique.len() as u32 == max - min + 1 {
        return format!("{} - {}", weekday_letter(min), weekday_letter(max));
    }
    unique
        .into_iter()
        .map(weekday_letter)
        .collect::<Vec<_>>()
        .join(",")
}

fn weekday_letter(index: u32) -> &'static str {
    WEEKDAY_LETTERS[index as usize]
}

struct Group {
    key: String,
    display: String,
    weekdays: Vec<u32>,
    codes: BTreeSet<String>,
}

/// Groups `included` days by organization into structured lines.
pub fn build_summary(resolver: &CodeResolver, included: &[DayEntry]) -> Vec<SummaryLine> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index_by_key: BTreeMap<String, usize> = BTreeMap::new();

    for entry in included {
        let (key, display) = if entry.is_free() {
            (FREE_LABEL.to_string(), FREE_LABEL.to_string())
        } else {
            let display = resolver.organization_of(&entry.label);
            (display.to_uppercase(), display)
        };

        let slot = *index_by_key.entry(key.clone()).or_insert_with(|| {
            groups.push(Group {
                key,
                display,
                weekdays: Vec::new(),
                codes: BTreeSet::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.weekdays.push(entry.weekday_index());
        if !entry.is_free() {
            group.codes.insert(entry.label.clone());
        }
    }

    groups.sort_by_key(|group| group.weekdays.iter().min().copied());

    groups
        .into_iter()
        .map(|group| {
            let label = if group.key == FREE_LABEL {
                FREE_LABEL.to_string()
            } else if group.codes.len() == 1 {
                let code = group.codes.iter().next().map(String::as_str).unwrap_or("");
                format!("{code} ({})", group.display)
            } else {
                format!("({})", group.display)
            };
            let rendered_text = format!("{} : {label}", compress_days(&group.weekdays));

            SummaryLine {
                weekdays: group.weekdays.into_iter().collect(),
                codes: group.codes,
                organization_display: group.display,
                rendered_text,
            }
        })
        .collect()
}

/// Rendered summary lines for `included` days, in output order.
pub fn build_summary_lines(resolver: &CodeResolver, included: &[DayEntry]) -> Vec<String> {
    build_summary(resolver, included)
        .into_iter()
        .map(|line| line.rendered_text)
        .collect()
}

/// Organization with the most assigned days; `FREE_LABEL` when none.
pub fn main_organization(resolver: &CodeResolver, full_week: &[DayEntry]) -> String {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in full_week {
        if entry.label.is_empty() || entry.is_free() {
            continue;
        }
        *counts.entry(resolver.organization_of(&entry.label)).or_default() += 1;
    }

    // Ascending key order plus strict `>` keeps the lexically first on ties.
    let mut best: Option<(&String, usize)> = None;
    for (organization, &count) in &counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((organization, count));
        }
    }
    best.map(|(organization, _)| organization.clone())
        .unwrap_or_else(|| FREE_LABEL.to_string())
}
