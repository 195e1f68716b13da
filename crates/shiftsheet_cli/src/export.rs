//! Plain-text weekly report.
//!
//! Layout: header line, then one block per main organization (sorted),
//! each listing its people (sorted) with indented summary lines.

use chrono::NaiveDate;
use shiftsheet_core::WeeklySummary;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Renders `summary` for the window `start..=end`.
pub fn render_text_report(start: NaiveDate, end: NaiveDate, summary: &WeeklySummary) -> String {
    let mut lines = vec![format!(
        "Resumen semanal {} - {}\n",
        start.format(DATE_FORMAT),
        end.format(DATE_FORMAT)
    )];

    for organization in summary.organizations() {
        let members = summary.people_in(&organization);
        if members.is_empty() {
            continue;
        }
        lines.push(organization.to_uppercase());
        for week in members {
            if week.lines.is_empty() {
                continue;
            }
            lines.push(week.person.clone());
            lines.extend(week.lines.iter().map(|line| format!("  {}", line.rendered_text)));
            lines.push(String::new());
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::render_text_report;
    use chrono::NaiveDate;
    use shiftsheet_core::{PersonWeek, SummaryLine, WeeklySummary};

    fn line(text: &str) -> SummaryLine {
        SummaryLine {
            weekdays: Default::default(),
            codes: Default::default(),
            organization_display: String::new(),
            rendered_text: text.to_string(),
        }
    }

    fn week(person: &str, organization: &str, lines: &[&str]) -> PersonWeek {
        PersonWeek {
            person: person.to_string(),
            lines: lines.iter().map(|text| line(text)).collect(),
            main_organization: organization.to_string(),
        }
    }

    #[test]
    fn report_groups_people_under_upper_cased_organizations() {
        let summary = WeeklySummary {
            people: vec![
                week("Pedro Gómez", "Persan turnos", &["L - V : M1 (Persan turnos)"]),
                week("Ana Ruiz", "Aranco", &["L - M : AR (Aranco)", "X : LIBRE"]),
                week("Luis Sin Datos", "Aranco", &[]),
            ],
        };
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();

        let expected = concat!(
            "Resumen semanal 01/03/2025 - 07/03/2025\n\n",
            "ARANCO\n",
            "Ana Ruiz\n",
            "  L - M : AR (Aranco)\n",
            "  X : LIBRE\n",
            "\n",
            "\n",
            "PERSAN TURNOS\n",
            "Pedro Gómez\n",
            "  L - V : M1 (Persan turnos)\n",
            "\n",
        );
        assert_eq!(render_text_report(start, end, &summary), expected);
    }
}
