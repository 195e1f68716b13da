//! Holiday calendar contract.
//!
//! # Invariants
//! - Local overrides take precedence over the regional calendar on the
//!   same date.
//! - Results only contain dates that were asked for.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Source of holiday names for a set of dates.
pub trait HolidayCalendar {
    /// Returns date → holiday name for the holidays among `dates`.
    fn holidays_for(&self, dates: &[NaiveDate]) -> BTreeMap<NaiveDate, String>;
}

/// Combines regional holidays with local overrides, restricted to `dates`.
pub fn merge_holidays(
    dates: &[NaiveDate],
    regional: &BTreeMap<NaiveDate, String>,
    local_overrides: &BTreeMap<NaiveDate, String>,
) -> BTreeMap<NaiveDate, String> {
    let mut merged = BTreeMap::new();
    for date in dates {
        if let Some(name) = local_overrides.get(date).or_else(|| regional.get(date)) {
            merged.insert(*date, name.clone());
        }
    }
    merged
}

/// Table-driven calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticHolidayCalendar {
    regional: BTreeMap<NaiveDate, String>,
    local_overrides: BTreeMap<NaiveDate, String>,
}

impl StaticHolidayCalendar {
    pub fn new(
        regional: BTreeMap<NaiveDate, String>,
        local_overrides: BTreeMap<NaiveDate, String>,
    ) -> Self {
        Self {
            regional,
            local_overrides,
        }
    }
}

impl HolidayCalendar for StaticHolidayCalendar {
    fn holidays_for(&self, dates: &[NaiveDate]) -> BTreeMap<NaiveDate, String> {
        merge_holidays(dates, &self.regional, &self.local_overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::{HolidayCalendar, StaticHolidayCalendar};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn local_override_wins_and_unrequested_dates_are_dropped() {
        let regional = BTreeMap::from([
            (date(2, 28), "Día de Andalucía".to_string()),
            (date(4, 17), "Jueves Santo".to_string()),
        ]);
        let local = BTreeMap::from([(date(4, 17), "Fiesta local".to_string())]);
        let calendar = StaticHolidayCalendar::new(regional, local);

        let found = calendar.holidays_for(&[date(4, 16), date(4, 17)]);
        assert_eq!(found.len(), 1);
        assert_eq!(found.get(&date(4, 17)).map(String::as_str), Some("Fiesta local"));
    }
}
