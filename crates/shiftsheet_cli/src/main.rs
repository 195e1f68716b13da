//! Command-line front end for weekly shift summaries.
//!
//! # Responsibility
//! - Load the configured month worksheet and list people or weeks.
//! - Print the weekly report grouped by main organization.
//! - Resolve codes ad hoc for catalog maintenance.

mod export;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use shiftsheet_core::{
    build_weekly_summary, init_logging, load_month_sheet, weeks_in_month, CodeResolver,
    HolidayCalendar, MonthSheet, SheetKey,
};
use shiftsheet_source::{configured_source, load_config, SourceConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "shiftsheet", version, about = "Weekly summaries from shift-schedule workbooks")]
struct Cli {
    /// Absolute directory for rotating log files; logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Requested level, or the build's default when none is given.
    fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(shiftsheet_core::default_log_level())
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the week windows of a month.
    Weeks {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
    /// List the people found in a month worksheet.
    People(MonthArgs),
    /// Show description and organization of codes.
    Describe {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Print the weekly report.
    Summary {
        #[command(flatten)]
        month: MonthArgs,
        /// 1-based week window within the month.
        #[arg(long)]
        week: usize,
        /// Restrict the report to these people (default: everyone).
        #[arg(long = "person")]
        people: Vec<String>,
        /// Write the report to a file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct MonthArgs {
    /// JSON source configuration.
    #[arg(long)]
    config: PathBuf,
    #[arg(long)]
    year: i32,
    #[arg(long)]
    month: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        init_logging(cli.log_level(), &log_dir.to_string_lossy())
            .context("cannot start logging")?;
    }

    match cli.command {
        Command::Weeks { year, month } => {
            for (index, window) in weeks_in_month(year, month)?.iter().enumerate() {
                println!(
                    "{}: {} - {}",
                    index + 1,
                    window.start.format("%d/%m/%Y"),
                    window.end.format("%d/%m/%Y")
                );
            }
        }
        Command::People(args) => {
            let (_, sheet) = load_month(&args)?;
            for person in sheet.sorted_people() {
                println!("{person}");
            }
        }
        Command::Describe { config, codes } => {
            let resolver = match config {
                Some(path) => load_config(&path)?.code_resolver(),
                None => CodeResolver::builtin(),
            };
            for code in codes {
                let descriptor = resolver.descriptor(&code);
                println!(
                    "{code}\t{}\t{}",
                    descriptor.description, descriptor.organization
                );
            }
        }
        Command::Summary {
            month,
            week,
            people,
            output,
        } => {
            let windows = weeks_in_month(month.year, month.month)?;
            let Some(window) = week.checked_sub(1).and_then(|index| windows.get(index)) else {
                bail!(
                    "week {week} out of range; {}-{:02} has {} weeks",
                    month.year,
                    month.month,
                    windows.len()
                );
            };

            let (config, sheet) = load_month(&month)?;
            let people = if people.is_empty() {
                sheet.sorted_people()
            } else {
                people
            };
            let dates = window.dates();
            let holidays = config.holiday_calendar().holidays_for(&dates);
            let summary =
                build_weekly_summary(&sheet, &config.code_resolver(), &people, &dates, &holidays);
            let report = export::render_text_report(window.start, window.end, &summary);

            match output {
                Some(path) => {
                    std::fs::write(&path, report)
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    info!(
                        "event=report_written module=cli status=ok people={} path={}",
                        summary.people.len(),
                        path.display()
                    );
                }
                None => print!("{report}"),
            }
        }
    }

    Ok(())
}

fn load_month(args: &MonthArgs) -> Result<(SourceConfig, MonthSheet)> {
    let config = load_config(&args.config)?;
    let source = configured_source(config.clone()).context("cannot open snapshot cache")?;
    let sheet = load_month_sheet(&source, SheetKey::new(args.year, args.month))
        .with_context(|| format!("cannot load sheet {}-{:02}", args.year, args.month))?;
    Ok((config, sheet))
}
