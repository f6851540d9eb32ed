//! CLI probe for `journify_core`.
//!
//! # Responsibility
//! - Verify core crate wiring against the configured database.
//! - Print per-collection record counts and today's dashboard views in a
//!   stable plain-text form.

use journify_core::{
    CollectionName, Companion, CoreConfig, DayKey, SqliteKvStore, ViewName, ViewPayload,
};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    println!("journify_core ping={}", journify_core::ping());
    println!("journify_core version={}", journify_core::core_version());

    let config = CoreConfig::from_env();
    if let Err(err) = config.init_logging() {
        eprintln!("logging disabled: {err}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CoreConfig) -> Result<(), String> {
    let kv = SqliteKvStore::open(&config.db_path)
        .map_err(|err| format!("failed to open `{}`: {err}", config.db_path.display()))?;
    let opened = Companion::open(Arc::new(kv)).map_err(|err| err.to_string())?;
    for warning in &opened.warnings {
        println!("warning {}: reset to empty ({})", warning.document, warning.reason);
    }

    for collection in CollectionName::ALL {
        let snapshot = opened.companion.snapshot_of(collection);
        println!("records {collection}={}", snapshot.len());
    }

    let today = DayKey::from(chrono::Local::now().date_naive());
    println!("today={today}");
    for (view, payload) in opened.companion.dashboard(today) {
        println!("{}", render(view, &payload));
    }
    Ok(())
}

fn render(view: ViewName, payload: &ViewPayload) -> String {
    let body = match payload {
        ViewPayload::JournalByMonth(groups) => groups
            .iter()
            .map(|group| format!("{}={}", group.label, group.entries.len()))
            .collect::<Vec<_>>()
            .join(" "),
        ViewPayload::WeeklyMood(series) | ViewPayload::WeeklySliderMood(series) => series
            .labels
            .iter()
            .zip(series.scores.iter())
            .map(|(label, score)| format!("{label}={score:.1}"))
            .collect::<Vec<_>>()
            .join(" "),
        ViewPayload::CurrentStreak(days) => format!("{days} day(s)"),
        ViewPayload::MoodHistogram(counts) => counts
            .iter()
            .map(|(symbol, count)| format!("{}={count}", symbol.name()))
            .collect::<Vec<_>>()
            .join(" "),
        ViewPayload::MarkedDates(dates) => format!("{} marked", dates.len()),
        ViewPayload::ProductivityScore(score) => format!("{score}/100"),
        ViewPayload::HabitWindows(windows) => windows
            .iter()
            .map(|window| {
                let cells: String = window
                    .days
                    .iter()
                    .map(|day| if day.completed { 'x' } else { '.' })
                    .collect();
                format!("{}[{cells}]", window.text)
            })
            .collect::<Vec<_>>()
            .join(" "),
    };
    format!("{view:?}: {body}")
}
