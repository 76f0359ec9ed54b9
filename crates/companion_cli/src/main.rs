//! Command-line probe over the companion core.
//!
//! # Responsibility
//! - Exercise note matching and streak tracking against a local database.
//! - Keep output plain and line-oriented for quick local checks.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use companion_core::db::open_db;
use companion_core::{
    init_from_config, sample_notes, sample_prompts, ClassificationQuery, CoreConfig, LocalClock,
    NoteMatcher, SqliteProgressStore, StaticCatalog, StreakTracker,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "companion", version, about = "School companion core probe")]
struct Cli {
    /// Database file; overrides COMPANION_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check core linkage.
    Ping,
    /// Match a classification against the sample curriculum.
    Match {
        #[arg(long)]
        subject: String,
        #[arg(long = "class")]
        class_level: u32,
        #[arg(long, default_value = "")]
        chapter: String,
        /// Repeat for several concepts.
        #[arg(long = "concept")]
        concepts: Vec<String>,
    },
    /// Record practice of a chapter for today.
    Practice { chapter: String },
    /// Show the current streak and the trailing week.
    Streak,
    /// Delete all recorded progress.
    Reset,
    /// Print starter questions drawn from the catalog.
    Prompts {
        #[arg(long, default_value_t = 2)]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CoreConfig::from_env().context("invalid companion configuration")?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Err(err) = init_from_config(&config) {
        eprintln!("warning: file logging disabled: {err}");
    }

    match cli.command {
        Command::Ping => {
            println!("companion_core ping={}", companion_core::ping());
            println!("companion_core version={}", companion_core::core_version());
        }
        Command::Match {
            subject,
            class_level,
            chapter,
            concepts,
        } => {
            let query = ClassificationQuery::new(subject, class_level)
                .with_chapter(chapter)
                .with_concepts(concepts);
            let matches = NoteMatcher::new(StaticCatalog::sample()).match_query(&query);
            if matches.is_empty() {
                println!("no matching notes");
            }
            for excerpt in matches {
                println!("[{}] {}", excerpt.id, excerpt.content);
            }
        }
        Command::Practice { chapter } => {
            let conn = open_db(&config.db_path)
                .with_context(|| format!("failed to open {}", config.db_path.display()))?;
            let mut tracker = StreakTracker::new(SqliteProgressStore::try_new(&conn)?, LocalClock);
            if !tracker.record_practice(&chapter).is_saved() {
                eprintln!("warning: progress was not saved");
            }
            println!("streak={}", tracker.streak());
        }
        Command::Streak => {
            let conn = open_db(&config.db_path)
                .with_context(|| format!("failed to open {}", config.db_path.display()))?;
            let tracker = StreakTracker::new(SqliteProgressStore::try_new(&conn)?, LocalClock);
            println!("streak={}", tracker.streak());
            for day in tracker.streak_data() {
                let mark = if day.practiced { "x" } else { "." };
                println!("{} {} {mark}", day.date.format("%a"), day.date);
            }
            println!("chapters={}", tracker.study_history().join(", "));
        }
        Command::Reset => {
            let conn = open_db(&config.db_path)
                .with_context(|| format!("failed to open {}", config.db_path.display()))?;
            let mut tracker = StreakTracker::new(SqliteProgressStore::try_new(&conn)?, LocalClock);
            if tracker.reset_progress().is_saved() {
                println!("progress reset");
            } else {
                eprintln!("warning: stored progress could not be removed");
            }
        }
        Command::Prompts { count } => {
            for prompt in sample_prompts(sample_notes(), count, &mut rand::thread_rng()) {
                println!("{}: {}", prompt.title, prompt.prompt);
            }
        }
    }

    Ok(())
}
