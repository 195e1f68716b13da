use chrono::NaiveDate;
use shiftsheet_core::{
    build_weekly_summary, locate_month_sheet, weeks_in_month, CodeResolver, HolidayCalendar,
    RawGrid, StaticHolidayCalendar,
};
use std::collections::BTreeMap;

// March 2025: day 3 is a Monday, days 1-2 and 8-9 are weekends.
fn march_sheet() -> shiftsheet_core::MonthSheet {
    let mut rows = vec![vec![String::new(); 33]; 8];
    for day in 1..=31 {
        rows[1][day + 1] = day.to_string();
    }
    let schedules: [(&str, [&str; 7]); 4] = [
        ("Ana Ruiz", ["", "", "AR", "AR", "BF", "BF", "D"]),
        ("Pedro Gómez", ["M1", "", "T1", "N2", "PERt", "", ""]),
        ("Lucía Martín", ["", "D", "", "", "", "D", ""]),
        ("Sergio Vidal", ["", "", "L40", "L60", "L50", "VR", "VR"]),
    ];
    for (offset, (name, codes)) in schedules.iter().enumerate() {
        let row = 3 + offset;
        rows[row][1] = name.to_string();
        for (index, code) in codes.iter().enumerate() {
            rows[row][2 + index] = code.to_string();
        }
    }
    locate_month_sheet(RawGrid::new(rows)).unwrap()
}

fn first_week() -> Vec<NaiveDate> {
    weeks_in_month(2025, 3).unwrap()[0].dates()
}

fn people() -> Vec<String> {
    ["Ana Ruiz", "Pedro Gómez", "Lucía Martín", "Sergio Vidal"]
        .map(String::from)
        .to_vec()
}

#[test]
fn builds_lines_and_main_organization_per_person() {
    let sheet = march_sheet();
    let summary = build_weekly_summary(
        &sheet,
        &CodeResolver::builtin(),
        &people(),
        &first_week(),
        &BTreeMap::new(),
    );

    let ana = summary.get("Ana Ruiz").unwrap();
    assert_eq!(
        ana.line_texts(),
        vec!["L - M : AR (Aranco)", "X - J : BF (Bidafarma)", "V : LIBRE"]
    );
    assert_eq!(ana.main_organization, "Aranco");

    let pedro = summary.get("Pedro Gómez").unwrap();
    assert_eq!(
        pedro.line_texts(),
        vec!["L,M,X,S : (Persan turnos)", "J - V : LIBRE"]
    );
    assert_eq!(pedro.main_organization, "Persan turnos");

    let lucia = summary.get("Lucía Martín").unwrap();
    assert_eq!(lucia.line_texts(), vec!["L - V : LIBRE"]);
    assert_eq!(lucia.main_organization, "LIBRE");

    let sergio = summary.get("Sergio Vidal").unwrap();
    assert_eq!(
        sergio.line_texts(),
        vec![
            "L : L40 (Cocacola reparacion)",
            "M : L60 (Refresco reparacion)",
            "X : L50 (L50)",
            "J - V : VR (Vacaciones)",
        ]
    );
}

#[test]
fn free_holidays_are_left_out_but_worked_holidays_stay() {
    let sheet = march_sheet();
    let dates = first_week();
    let friday = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    let thursday = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();
    let calendar = StaticHolidayCalendar::new(
        BTreeMap::from([(thursday, "Fiesta regional".to_string())]),
        BTreeMap::from([(friday, "Fiesta local".to_string())]),
    );
    let holidays = calendar.holidays_for(&dates);
    assert_eq!(holidays.len(), 2);

    let summary = build_weekly_summary(
        &sheet,
        &CodeResolver::builtin(),
        &people(),
        &dates,
        &holidays,
    );

    let ana = summary.get("Ana Ruiz").unwrap();
    assert_eq!(
        ana.line_texts(),
        vec!["L - M : AR (Aranco)", "X - J : BF (Bidafarma)"]
    );
    let lucia = summary.get("Lucía Martín").unwrap();
    assert_eq!(lucia.line_texts(), vec!["L - X : LIBRE"]);
}

#[test]
fn people_are_grouped_under_sorted_main_organizations() {
    let sheet = march_sheet();
    let mut requested = people();
    requested.push("Nadie Conocido".to_string());
    let summary = build_weekly_summary(
        &sheet,
        &CodeResolver::builtin(),
        &requested,
        &first_week(),
        &BTreeMap::new(),
    );

    assert_eq!(
        summary.organizations(),
        vec!["Aranco", "LIBRE", "Persan turnos", "Vacaciones"]
    );
    let free: Vec<&str> = summary
        .people_in("LIBRE")
        .iter()
        .map(|week| week.person.as_str())
        .collect();
    assert_eq!(free, vec!["Lucía Martín", "Nadie Conocido"]);
}
