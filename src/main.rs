mod cli;

use minimal_list::config;
use minimal_list::list;
use minimal_list::render;
use minimal_list::session;
use minimal_list::storage;
use minimal_list::utils;

use anyhow::{Result, anyhow, bail};
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use list::{ItemId, ListEngine};
use render::ListView;
use session::Session;
use std::fs;
use std::io::Write;
use std::panic;
use std::path::Path;
use storage::FileStore;
use utils::paths::{get_config_path, get_crash_log_path, get_logs_dir};

/// Text appended to the crash log for one panic.
fn crash_report(
    command: &str,
    message: &str,
    location: Option<&str>,
    backtrace: &str,
) -> String {
    let mut report = format!(
        "=== minilist crashed at {} ===\nCommand: {}\nMessage: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        command,
        message
    );
    if let Some(location) = location {
        report.push_str(&format!("Location: {}\n", location));
    }
    report.push_str(&format!("\nBacktrace:\n{}\n\n", backtrace));
    report
}

fn append_crash_report(path: &Path, report: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(report.as_bytes())?;
    Ok(())
}

/// Log panics to the crash log, tagged with the command that was running,
/// then hand over to the default hook.
fn install_crash_handler(command: &Commands) {
    let command = format!("{:?}", command);
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<non-string panic payload>");
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
        let backtrace = std::backtrace::Backtrace::force_capture().to_string();
        let report = crash_report(&command, message, location.as_deref(), &backtrace);

        if let Ok(path) = get_crash_log_path() {
            if append_crash_report(&path, &report).is_ok() {
                eprintln!("\nCrash logged to: {}", path.display());
            }
        }

        default_hook(panic_info);
    }));
}

/// Initialize file-based logging.
///
/// Logs are written to ~/.minimal-list/logs/minilist.log, rolling daily.
/// RUST_LOG takes precedence over the configured level.
fn init_file_logging(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = get_logs_dir().ok()?;

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "minilist.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(guard)
}

/// Resolve a full id or a unique id prefix against the live items.
fn resolve_id(engine: &ListEngine<ListView>, query: &str) -> Result<ItemId> {
    let query = query.trim().trim_start_matches('#');
    if query.is_empty() {
        bail!("Item id must not be empty");
    }

    let mut matches = engine
        .items()
        .iter()
        .map(|item| item.id())
        .filter(|id| id.as_str().starts_with(query));

    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id.clone()),
        (None, _) => Err(anyhow!("No item matches '{}'", query)),
        (Some(_), Some(_)) => {
            // An exact id wins over longer ids sharing it as a prefix
            engine
                .items()
                .iter()
                .map(|item| item.id())
                .find(|id| id.as_str() == query)
                .cloned()
                .ok_or_else(|| anyhow!("'{}' matches more than one item", query))
        }
    }
}

/// Apply one command to the list. Returns false when the list view should
/// not be printed afterwards.
fn apply_command(engine: &mut ListEngine<ListView>, command: Commands) -> Result<bool> {
    match command {
        Commands::List => {}
        Commands::Add { text } => {
            if engine.add_item(text).is_none() {
                eprintln!("Nothing added: item text is empty");
            }
        }
        Commands::Edit { id, text } => {
            let id = resolve_id(engine, &id)?;
            engine.begin_edit(&id);
            engine.end_edit(&id, &text);
        }
        Commands::Check { id } => {
            let id = resolve_id(engine, &id)?;
            engine.set_checked(&id, true);
        }
        Commands::Uncheck { id } => {
            let id = resolve_id(engine, &id)?;
            engine.set_checked(&id, false);
        }
        Commands::Complete { id } => {
            let id = resolve_id(engine, &id)?;
            engine.complete_item(&id);
        }
        Commands::Delete { id } => {
            let id = resolve_id(engine, &id)?;
            engine.delete_item(&id);
        }
        Commands::SelectAll => engine.select_all(),
        Commands::DeselectAll => engine.deselect_all(),
        Commands::CompleteSelected => {
            let count = engine.complete_selected();
            tracing::info!(count, "completed selected items");
        }
        Commands::DeleteSelected => {
            let removed = engine.delete_selected();
            tracing::info!(count = removed.len(), "deleted selected items");
        }
        Commands::Dump => {
            engine.dump_entries();
            for record in engine.records() {
                println!("{}", serde_json::to_string(&record)?);
            }
            return Ok(false);
        }
        Commands::InitConfig => {}
    }
    Ok(true)
}

fn handle_init_config() -> Result<()> {
    let config_path = get_config_path()?;
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }
    Config::default().save()?;
    println!("Wrote default config to {}", config_path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List);
    install_crash_handler(&command);

    if matches!(command, Commands::InitConfig) {
        return handle_init_config();
    }

    let config = Config::load()?;

    // Guard must be kept alive until the session is closed
    let _log_guard = init_file_logging(&config);
    tracing::info!("minilist starting");

    let store = FileStore::new(&config.snapshot_dir()?, &config.storage_key);
    let mut session = Session::open(store, ListView::new())?;

    if let Some(err) = session.recovered_from() {
        eprintln!("Warning: {}; starting with an empty list", err);
        if let Some(moved) = session.store().quarantine()? {
            eprintln!("Unreadable snapshot moved to {}", moved.display());
        }
    }

    if apply_command(session.engine_mut(), command)? {
        print!("{}", session.engine().renderer().render(config.show_buttons));
    }

    session.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(ids: &[&str]) -> ListEngine<ListView> {
        let records: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(
                    r#"{{"id":"{}","text":"item {}","lifecycleState":"Active","selected":false}}"#,
                    id, id
                )
            })
            .collect();
        let mut engine = ListEngine::new(ListView::new());
        engine
            .initialize(Some(&format!("[{}]", records.join(","))))
            .unwrap();
        engine
    }

    #[test]
    fn test_resolve_unique_prefix() {
        let engine = engine_with(&["abc123", "def456"]);
        assert_eq!(resolve_id(&engine, "ab").unwrap().as_str(), "abc123");
        assert_eq!(resolve_id(&engine, "#def").unwrap().as_str(), "def456");
    }

    #[test]
    fn test_resolve_ambiguous_and_missing() {
        let engine = engine_with(&["abc123", "abd456"]);
        assert!(resolve_id(&engine, "ab").is_err());
        assert!(resolve_id(&engine, "zz").is_err());
        assert!(resolve_id(&engine, " ").is_err());
    }

    #[test]
    fn test_resolve_exact_beats_prefix() {
        let engine = engine_with(&["abc", "abcdef"]);
        assert_eq!(resolve_id(&engine, "abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_apply_add_and_check() {
        let mut engine = engine_with(&[]);
        apply_command(&mut engine, Commands::Add { text: "milk".into() }).unwrap();
        let id = engine.items()[0].id().as_str().to_string();

        apply_command(&mut engine, Commands::Check { id: id[..6].to_string() }).unwrap();
        assert_eq!(engine.selected_items().len(), 1);
        assert!(engine.renderer().rows()[0].selected);
    }

    #[test]
    fn test_apply_edit_updates_text_and_view() {
        let mut engine = engine_with(&["abc123"]);
        apply_command(
            &mut engine,
            Commands::Edit {
                id: "abc".into(),
                text: "renamed".into(),
            },
        )
        .unwrap();
        assert_eq!(engine.items()[0].text(), "renamed");
        assert_eq!(engine.renderer().rows()[0].text, "renamed");
        assert!(!engine.is_editing(engine.items()[0].id()));
    }

    #[test]
    fn test_apply_unknown_id_is_an_error() {
        let mut engine = engine_with(&["abc123"]);
        assert!(apply_command(&mut engine, Commands::Delete { id: "zzz".into() }).is_err());
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_crash_report_names_the_command() {
        let command = format!("{:?}", Commands::Complete { id: "abc".into() });
        let report = crash_report(
            &command,
            "index out of bounds",
            Some("src/list/engine.rs:10:5"),
            "<bt>",
        );
        assert!(report.starts_with("=== minilist crashed at "));
        assert!(report.contains("Command: Complete { id: \"abc\" }\n"));
        assert!(report.contains("Message: index out of bounds\n"));
        assert!(report.contains("Location: src/list/engine.rs:10:5\n"));
        assert!(report.ends_with("Backtrace:\n<bt>\n\n"));
    }

    #[test]
    fn test_crash_report_without_location() {
        let report = crash_report("List", "boom", None, "");
        assert!(!report.contains("Location:"));
    }

    #[test]
    fn test_append_crash_report_accumulates() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("crash.log");
        append_crash_report(&path, "first\n").unwrap();
        append_crash_report(&path, "second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_apply_dump_skips_view() {
        let mut engine = engine_with(&["abc123"]);
        assert!(!apply_command(&mut engine, Commands::Dump).unwrap());
    }
}
