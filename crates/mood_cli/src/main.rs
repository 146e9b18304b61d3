//! Command-line front end for the mood journal.
//!
//! # Responsibility
//! - Map subcommands onto `JournalService` use-cases.
//! - Resolve configuration once and inject the store into the service.
//!
//! # Invariants
//! - Library errors are reported on stderr with a non-zero exit code.
//! - Import row errors are printed, but still exit successfully when at
//!   least one row was imported.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use mood_core::db::open_db;
use mood_core::{
    describe_score, ensure_csv_file_name, export_file_name, format_entry_date,
    init_logging_with_config, next_day, parse_entry_date, previous_day, today_local, EntryDraft,
    EntryId, JournalConfig, JournalService, SqliteEntryRepository, RECENT_DEFAULT_LIMIT,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "mood", version, about = "Daily happiness journal")]
struct Cli {
    /// Journal database file (overrides MOOD_JOURNAL_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Write rolling logs to the configured log directory.
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Record or update the entry for a day (default: today).
    Save {
        /// Score from 1 to 10.
        score: f64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        reflection: Option<String>,
        #[arg(long)]
        intention: Option<String>,
    },
    /// Show the entry for a day (default: today).
    Show {
        #[arg(long)]
        date: Option<String>,
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List all entries, most recent first.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show the most recent entries with relative day labels.
    Recent {
        #[arg(long, default_value_t = RECENT_DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Delete an entry by id.
    Delete { id: String },
    /// Import entries from a CSV file.
    Import { file: PathBuf },
    /// Export all entries as CSV.
    Export {
        /// Output file; a dated file name in the current directory when
        /// omitted, `-` for stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the chart series (latest 30 days with entries).
    Chart,
    /// Health check.
    Ping,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<ExitCode> {
    let mut config = JournalConfig::from_env()?;
    if let Some(db) = cli.db.as_ref() {
        config = config.with_db_path(db);
    }
    if cli.log {
        init_logging_with_config(&config)?;
    }

    if let Command::Ping = cli.command {
        println!("mood_core ping={}", mood_core::ping());
        println!("mood_core version={}", mood_core::core_version());
        return Ok(ExitCode::SUCCESS);
    }

    let conn = open_db(&config.db_path)?;
    let service = JournalService::new(SqliteEntryRepository::new(&conn));
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    match cli.command {
        Command::Save {
            score,
            date,
            reflection,
            intention,
        } => {
            let date = resolve_date(date.as_deref())?;
            let entry = service.save_entry(EntryDraft {
                date,
                score,
                reflection,
                intention,
            })?;
            let verb = if entry.created_at == entry.updated_at {
                "Saved"
            } else {
                "Updated"
            };
            println!("{verb} {} score={} id={}", entry.date_string(), entry.score, entry.id);
            if let Some(description) = describe_score(entry.score) {
                println!("  {description}");
            }
        }
        Command::Show { date, json } => {
            let date = resolve_date(date.as_deref())?;
            match service.entry_for_date(date)? {
                Some(entry) if json => println!("{}", serde_json::to_string_pretty(&entry)?),
                Some(entry) => {
                    println!("{}  score={}  id={}", entry.date_string(), entry.score, entry.id);
                    print_text("reflection", &entry.reflection);
                    print_text("intention", &entry.intention);
                }
                None => {
                    println!("No entry for {}.", format_entry_date(date));
                    print_neighbours(date);
                }
            }
        }
        Command::List { json } => {
            let entries = service.list_entries()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No entries yet.");
            } else {
                for entry in entries {
                    println!("{}  {:>4}  {}", entry.date_string(), entry.score, entry.id);
                }
            }
        }
        Command::Recent { limit } => {
            let recent = service.recent_entries(limit, today_local())?;
            if recent.is_empty() {
                println!("No entries yet.");
            }
            for row in recent {
                println!(
                    "{:<14} {:>4}  [{}]  {}",
                    row.day_label,
                    row.entry.score,
                    row.band.as_str(),
                    row.entry.reflection
                );
            }
        }
        Command::Delete { id } => {
            let id = EntryId::parse_str(id.trim())
                .map_err(|err| format!("invalid entry id `{id}`: {err}"))?;
            if service.delete_entry(id)? {
                println!("Entry deleted.");
            } else {
                println!("Entry not found.");
            }
        }
        Command::Import { file } => {
            ensure_csv_file_name(&file)?;
            let text = std::fs::read_to_string(&file)
                .map_err(|err| format!("failed to read `{}`: {err}", file.display()))?;
            let report = service.import_csv(&text);
            println!("{}", report.summary());
            for line in report.default_preview_errors() {
                println!("  {line}");
            }
            if report.success_count == 0 && report.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Export { out } => {
            let csv = service.export_csv()?;
            match out {
                Some(path) if path.as_os_str() == "-" => println!("{csv}"),
                other => {
                    let path = other
                        .unwrap_or_else(|| PathBuf::from(export_file_name(today_local())));
                    std::fs::write(&path, csv)
                        .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
            }
        }
        Command::Chart => {
            for point in service.chart_points()? {
                let bar = "#".repeat(point.score.round() as usize);
                println!("{:<7} {:>4}  {bar}", point.label, point.score);
            }
        }
        Command::Ping => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn resolve_date(raw: Option<&str>) -> CliResult<NaiveDate> {
    match raw {
        Some(raw) => Ok(parse_entry_date(raw.trim())?),
        None => Ok(today_local()),
    }
}

fn print_neighbours(date: NaiveDate) {
    let previous = previous_day(date).map(format_entry_date);
    let next = next_day(date).map(format_entry_date);
    if let (Some(previous), Some(next)) = (previous, next) {
        println!("  try --date {previous} or --date {next}");
    }
}

fn print_text(label: &str, value: &str) {
    if !value.is_empty() {
        println!("  {label}: {value}");
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Save { .. } => "save",
        Command::Show { .. } => "show",
        Command::List { .. } => "list",
        Command::Recent { .. } => "recent",
        Command::Delete { .. } => "delete",
        Command::Import { .. } => "import",
        Command::Export { .. } => "export",
        Command::Chart => "chart",
        Command::Ping => "ping",
    }
}
