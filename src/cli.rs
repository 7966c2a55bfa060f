use crate::config::AppConfig;
use crate::error::AppError;
use crate::telemetry;
use crate::workflows::{
    first_day_of_iso_week, ArchiveLayout, ErrorStrategy, PhotoScanner, ReferenceDate,
    ReferenceDates, ScanOptions, ScanReport,
};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fotomover",
    about = "Collect photos taken on this day a week, a month or years ago",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the photo archive for dated photos (default command)
    Scan(ScanArgs),
    /// Print the reference dates and the current ISO calendar week
    Dates(DatesArgs),
    /// Print the Monday that starts an ISO week
    WeekStart(WeekStartArgs),
}

#[derive(Args, Debug, Default)]
struct ScanArgs {
    /// Archive directory to search (overrides FOTOMOVER_SOURCE_DIR)
    #[arg(long)]
    source: Option<PathBuf>,
    /// Album directory the matches are collected for (overrides FOTOMOVER_DEST_DIR)
    #[arg(long)]
    destination: Option<PathBuf>,
    /// Reference day (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// fail-fast or continue when an entry cannot be read (overrides FOTOMOVER_ON_ERROR)
    #[arg(long, value_parser = parse_strategy)]
    on_error: Option<ErrorStrategy>,
    /// Walk directories in file-name order
    #[arg(long)]
    sort: bool,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct DatesArgs {
    /// Reference day (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Print the dates as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct WeekStartArgs {
    /// ISO week-numbering year
    #[arg(long)]
    year: i32,
    /// ISO week number
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=53))]
    week: u32,
}

#[derive(Debug, Serialize)]
struct IsoWeekView {
    year: i32,
    week: u32,
}

#[derive(Debug, Serialize)]
struct DatesView<'a> {
    today: NaiveDate,
    iso_week: IsoWeekView,
    reference_dates: &'a [ReferenceDate],
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Scan(ScanArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Scan(args) => run_scan(config, args),
        Command::Dates(args) => run_dates(args),
        Command::WeekStart(args) => run_week_start(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_strategy(raw: &str) -> Result<ErrorStrategy, String> {
    raw.parse()
}

fn run_scan(mut config: AppConfig, args: ScanArgs) -> Result<(), AppError> {
    let ScanArgs {
        source,
        destination,
        today,
        on_error,
        sort,
        json,
    } = args;

    if let Some(source) = source {
        config.archive.source_dir = Some(source);
    }
    if let Some(destination) = destination {
        config.archive.destination_dir = Some(destination);
    }
    if let Some(on_error) = on_error {
        config.scan.on_error = on_error;
    }

    let layout = ArchiveLayout::init(
        config.archive.source_dir()?,
        config.archive.destination_dir()?,
    )?;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let dates = ReferenceDates::for_day(today)?;
    let options = ScanOptions {
        on_error: config.scan.on_error,
        sorted: sort,
    };
    let report = PhotoScanner::new(&dates, options).scan(&layout)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_scan_report(&report);
    }
    Ok(())
}

fn run_dates(args: DatesArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let dates = ReferenceDates::for_day(today)?;
    let (year, week) = dates.current_iso_week();

    if args.json {
        let view = DatesView {
            today,
            iso_week: IsoWeekView { year, week },
            reference_dates: dates.entries(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Reference dates for {today} (ISO week {year}-W{week:02})");
    for entry in dates.entries() {
        println!("- {}: {}", entry.bucket.label(), entry.prefix);
    }
    Ok(())
}

fn run_week_start(args: WeekStartArgs) -> Result<(), AppError> {
    let WeekStartArgs { year, week } = args;
    let monday =
        first_day_of_iso_week(year, week).ok_or(AppError::InvalidWeek { year, week })?;
    println!("{year}-W{week:02} starts on {monday}");
    Ok(())
}

fn render_scan_report(report: &ScanReport) {
    println!("Photo scan for {}", report.today);
    println!(
        "Source: {} -> destination: {} (on error: {})",
        report.source_dir.display(),
        report.destination_dir.display(),
        report.on_error.label()
    );

    println!("\nReference dates");
    for entry in &report.bucket_counts {
        println!(
            "- {}: {} ({} photos)",
            entry.bucket_label, entry.date, entry.matches
        );
    }

    if report.matches.is_empty() {
        println!("\nMatching photos: none");
    } else {
        println!("\nMatching photos");
        for found in &report.matches {
            println!("- {} [{}]", found.path.display(), found.bucket.label());
        }
    }

    if !report.skipped.is_empty() {
        println!("\nSkipped entries");
        for skipped in &report.skipped {
            println!("- {}: {}", skipped.path.display(), skipped.reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_is_the_default_command() {
        let cli = Cli::try_parse_from(["fotomover"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn scan_flags_parse() {
        let cli = Cli::try_parse_from([
            "fotomover",
            "scan",
            "--source",
            "/srv/archive",
            "--today",
            "2024-03-31",
            "--on-error",
            "continue",
            "--sort",
        ])
        .expect("parses");

        let Some(Command::Scan(args)) = cli.command else {
            panic!("expected scan command");
        };
        assert_eq!(args.source, Some(PathBuf::from("/srv/archive")));
        assert!(args.destination.is_none());
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(args.on_error, Some(ErrorStrategy::Continue));
        assert!(args.sort);
        assert!(!args.json);
    }

    #[test]
    fn rejects_malformed_dates_and_weeks() {
        assert!(Cli::try_parse_from(["fotomover", "dates", "--today", "15.03.2024"]).is_err());
        assert!(Cli::try_parse_from(["fotomover", "week-start", "--year", "2024", "--week", "0"])
            .is_err());
        assert!(Cli::try_parse_from(["fotomover", "scan", "--on-error", "retry"]).is_err());
    }

    #[test]
    fn week_start_reports_missing_week() {
        let err = run_week_start(WeekStartArgs {
            year: 2024,
            week: 53,
        })
        .expect_err("2024 has 52 weeks");
        assert!(matches!(err, AppError::InvalidWeek { year: 2024, week: 53 }));
    }
}
