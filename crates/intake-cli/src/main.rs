use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use intake_core::config_file::{self, ConfigFile};
use intake_core::{CollisionPolicy, IntakeError, PaperRecord, RecordStore};
use intake_parsing::{MAX_FILENAME_LEN, RecordBuilder, extract_fields, paper_filename};

mod output;

use output::ColorMode;

/// Survey intake - Turn a GitHub paper submission issue into a database record
///
/// Reads the issue from ISSUE_NUMBER, ISSUE_TITLE and ISSUE_BODY, writes
/// `data/<slug>.json` and adds it to `data/paper-list.json`.
#[derive(Parser, Debug)]
#[command(name = "survey-intake", version, about, long_about = None)]
struct Cli {
    /// Issue number (overrides ISSUE_NUMBER)
    #[arg(long)]
    issue_number: Option<String>,

    /// Issue title (overrides ISSUE_TITLE)
    #[arg(long)]
    issue_title: Option<String>,

    /// Read the issue body from a file instead of ISSUE_BODY
    #[arg(long)]
    body_file: Option<PathBuf>,

    /// Directory holding paper records and the paper list
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Print the record instead of writing anything
    #[arg(long)]
    dry_run: bool,
}

/// Inputs resolved from CLI flags > env vars > config > defaults.
struct Submission {
    issue_number: String,
    issue_title: String,
    issue_body: String,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(!cli.no_color);

    let config = config_file::load_config();

    let Some(issue_number) = cli
        .issue_number
        .clone()
        .or_else(|| env_lossy("ISSUE_NUMBER"))
        .filter(|n| !n.is_empty())
    else {
        println!("Error: {}", IntakeError::MissingIssueNumber);
        std::process::exit(1);
    };

    let issue_title = cli
        .issue_title
        .clone()
        .or_else(|| env_lossy("ISSUE_TITLE"))
        .unwrap_or_default();
    let issue_body = match cli.body_file {
        Some(ref path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read issue body from {}", path.display()))?,
        None => env_lossy("ISSUE_BODY").unwrap_or_default(),
    };

    let submission = Submission {
        issue_number,
        issue_title,
        issue_body,
    };
    run(&cli, &config, &submission)
}

fn run(cli: &Cli, config: &ConfigFile, submission: &Submission) -> anyhow::Result<()> {
    let color = ColorMode(!cli.no_color);
    let mut stdout = std::io::stdout();

    output::print_start(
        &mut stdout,
        &submission.issue_number,
        &submission.issue_title,
        color,
    )?;

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| std::env::var_os("SURVEY_DATA_DIR").map(PathBuf::from))
        .or_else(|| config.data_dir().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(intake_core::DEFAULT_DATA_DIR));
    let mut store = RecordStore::new(data_dir);
    if let Some(list_file) = config.list_file() {
        store = store.with_list_file(list_file);
    }

    let mut builder = RecordBuilder::new();
    if let Some(marker) = config.title_marker() {
        builder = builder.title_marker(marker);
    }

    let fields = extract_fields(&submission.issue_body);
    let mut record = builder.build(&fields, &submission.issue_title);
    resolve_collision(
        &store,
        &mut record,
        &submission.issue_number,
        config.on_collision(),
    )?;

    if cli.dry_run {
        let target = store.record_path(&record.filename);
        return output::print_dry_run(&mut stdout, &record, &target, color);
    }

    store.ensure_dir()?;
    store.write_record(&record)?;
    store.add_to_index(&record.json_filename(), &intake_core::now_timestamp())?;

    output::print_summary(&mut stdout, &record, color)?;
    Ok(())
}

/// Read an environment variable, replacing invalid UTF-8 instead of
/// dropping the value.
fn env_lossy(name: &str) -> Option<String> {
    let raw = std::env::var_os(name)?;
    match raw.into_string() {
        Ok(value) => Some(value),
        Err(raw) => {
            tracing::warn!(var = name, "invalid UTF-8 in environment variable, replacing");
            Some(raw.to_string_lossy().into_owned())
        }
    }
}

/// Attempts at `<slug>-<issue>-<n>` before giving up.
const MAX_RENAME_ATTEMPTS: usize = 100;

/// Handle a slug already used by a record with a different title.
fn resolve_collision(
    store: &RecordStore,
    record: &mut PaperRecord,
    issue_number: &str,
    policy: CollisionPolicy,
) -> anyhow::Result<()> {
    let Some(existing) = store.existing_title(&record.filename) else {
        return Ok(());
    };
    if existing == record.title {
        return Ok(());
    }
    match policy {
        CollisionPolicy::Overwrite => {
            tracing::warn!(
                filename = %record.filename,
                existing = %existing,
                new = %record.title,
                "overwriting record with a different title"
            );
        }
        CollisionPolicy::AppendIssueNumber => {
            let issue = paper_filename(issue_number);
            let renamed = (1..=MAX_RENAME_ATTEMPTS)
                .map(|n| match n {
                    1 => suffixed_slug(&record.filename, &issue),
                    _ => suffixed_slug(&record.filename, &format!("{issue}-{n}")),
                })
                .find(|candidate| {
                    store
                        .existing_title(candidate)
                        .is_none_or(|title| title == record.title)
                })
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "no free file name for \"{}\" after {} attempts",
                        record.title,
                        MAX_RENAME_ATTEMPTS
                    )
                })?;
            tracing::warn!(
                filename = %record.filename,
                renamed = %renamed,
                existing = %existing,
                "slug taken by another paper, appending issue number"
            );
            record.filename = renamed;
        }
    }
    Ok(())
}

/// `<base>-<suffix>`, shortening `base` so the result fits the slug length cap.
fn suffixed_slug(base: &str, suffix: &str) -> String {
    let keep = MAX_FILENAME_LEN.saturating_sub(suffix.chars().count() + 1);
    let head: String = base.chars().take(keep).collect();
    format!("{}-{}", head.trim_end_matches('-'), suffix)
        .chars()
        .take(MAX_FILENAME_LEN)
        .collect()
}

fn init_tracing(ansi: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}
