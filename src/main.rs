use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use sifr::core::action::{Action, Effect, update};
use sifr::core::config;
use sifr::core::state::Session;
use sifr::corpus::{Coordinate, load_corpus};
use sifr::search::SearchMode;
use sifr::search::highlight::highlight;
use sifr::core::tabs::TabContent;
use sifr::store::debounce::ScrollDebouncer;
use sifr::store::file::FileStore;
use sifr::store::StateStore;

#[derive(Parser)]
#[command(name = "sifr", about = "Tabbed scripture reading sessions with diacritic-insensitive search")]
struct Args {
    /// Corpus JSON file (overrides config file and SIFR_CORPUS)
    #[arg(short, long)]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a chapter and print its verses
    Read {
        testament: String,
        book: String,
        chapter: u32,
    },
    /// Search the corpus and print highlighted hits
    Search {
        query: String,
        /// Matching mode (defaults to the configured one)
        #[arg(short, long, value_enum)]
        mode: Option<SearchMode>,
    },
    /// Reopen the last tab recorded in history
    Resume,
    /// List the persisted history log
    History,
    /// Show persisted display preferences
    Prefs {
        /// Set dark mode on or off before showing
        #[arg(long)]
        dark: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize file logger - writes to sifr.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("sifr.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("sifr: {e}");
            return ExitCode::FAILURE;
        }
    };
    let cli_mode = match &args.command {
        Command::Search { mode, .. } => *mode,
        _ => None,
    };
    let resolved = config::resolve(&file_config, args.corpus, cli_mode);

    let Some(corpus_path) = resolved.corpus_path.as_deref() else {
        eprintln!("sifr: no corpus configured (pass --corpus, set SIFR_CORPUS, or add corpus_path to config.toml)");
        return ExitCode::FAILURE;
    };
    // A malformed corpus aborts startup: no coordinate could be trusted.
    let corpus = match load_corpus(corpus_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Corpus load failed: {e}");
            eprintln!("sifr: {e}");
            return ExitCode::FAILURE;
        }
    };

    let store: Arc<dyn StateStore> = Arc::new(FileStore::new(resolved.state_dir.clone()));
    let mut debouncer = ScrollDebouncer::new(Arc::clone(&store));
    let mut session = Session::new();

    match args.command {
        Command::Read {
            testament,
            book,
            chapter,
        } => {
            let action = Action::OpenVerseTab {
                coordinate: Coordinate {
                    testament,
                    book,
                    chapter,
                },
                highlighted_verse: None,
                search_query: None,
            };
            let effect = update(&mut session, &corpus, action);
            apply_effect(effect, &store, &mut debouncer);
            print_active_tab(&session);
        }
        Command::Search { query, .. } => {
            let action = Action::OpenSearchResults {
                query,
                mode: resolved.default_mode,
            };
            let effect = update(&mut session, &corpus, action);
            apply_effect(effect, &store, &mut debouncer);
            print_active_tab(&session);
        }
        Command::Resume => match store.last_opened() {
            Some(entry) => {
                let effect = update(&mut session, &corpus, Action::Replay(entry));
                apply_effect(effect, &store, &mut debouncer);
                print_active_tab(&session);
            }
            None => println!("No history yet."),
        },
        Command::History => {
            let history = store.history();
            if history.is_empty() {
                println!("No history yet.");
            }
            for (i, entry) in history.iter().enumerate() {
                println!("{:>3}. {}  ({})", i + 1, entry.title(), format_timestamp(entry.opened_at()));
            }
        }
        Command::Prefs { dark } => {
            if let Some(on) = dark {
                store.set_dark_mode(on);
            }
            let prefs = store.preferences();
            println!("verse size:          {}px", prefs.verse_size);
            println!("title size:          {}px", prefs.title_size);
            println!("content margin:      {}rem", prefs.content_margin);
            println!("verse number inside: {}", prefs.verse_number_inside);
            println!("combined verse view: {}", prefs.combined_verse_view);
            println!("dark mode:           {}", store.dark_mode());
        }
    }

    // Commit anything still sitting in the debounce window before exit.
    debouncer.flush();
    ExitCode::SUCCESS
}

fn apply_effect(effect: Effect, store: &Arc<dyn StateStore>, debouncer: &mut ScrollDebouncer) {
    match effect {
        Effect::None => {}
        Effect::RecordHistory(entry) => store.append_history(&entry),
        Effect::PersistScroll { tab_id, offset } => debouncer.record(&tab_id, offset),
        Effect::PruneScroll(tab_id) => {
            debouncer.cancel(&tab_id);
            store.remove_scroll_position(&tab_id);
        }
    }
}

/// Print whatever tab the last action left active. When an action was a
/// no-op (lookup miss, empty search) the session's status line says why.
fn print_active_tab(session: &Session) {
    let Some(tab) = session.active_tab() else {
        return;
    };
    match &tab.content {
        TabContent::Verse(payload) => {
            println!("{}", tab.title);
            for verse in &payload.verses {
                let text = match &payload.search_query {
                    Some(query) => highlight(&verse.text, query, SearchMode::Partial),
                    None => verse.text.clone(),
                };
                let marker = if payload.highlighted_verse == Some(verse.number) {
                    "→ "
                } else {
                    ""
                };
                println!("{}{}. {}", marker, verse.number, text);
            }
        }
        TabContent::SearchResults(payload) => {
            println!("{}", tab.title);
            for hit in &payload.hits {
                println!(
                    "{} {}:{}  {}",
                    hit.coordinate.book,
                    hit.coordinate.chapter,
                    hit.verse,
                    highlight(&hit.text, &payload.query, payload.mode)
                );
            }
        }
        TabContent::Navigation | TabContent::SearchInput => {
            // Nothing was opened; the status line carries the reason.
            println!("{}", session.status_message);
        }
    }
}

/// Format a Unix timestamp as "Jan 15" style date.
fn format_timestamp(ts: i64) -> String {
    use chrono::{DateTime, Local, Utc};
    let dt: DateTime<Local> = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&Local);
    dt.format("%b %d").to_string()
}
