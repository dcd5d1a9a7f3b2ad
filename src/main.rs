//! datapad command-line host
//!
//! Drives a headless [`Session`]: the file is opened through `FileMsg::Open`,
//! edits are sent as messages, and the resulting commands are executed here.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::Path;

use datapad::cli::{CliArgs, OutputTarget, StartupConfig, StartupMode};
use datapad::commands::Cmd;
use datapad::config::EditorConfig;
use datapad::favorites::Favorites;
use datapad::messages::{FileMsg, Msg};
use datapad::model::Session;
use datapad::recent_files::{FileRecord, RecentFiles};
use datapad::update::update;
use datapad::util::{filename_for_display, is_data_file, read_document};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    datapad::tracing::init();

    let startup = args.into_config().map_err(|e| anyhow!(e))?;

    match &startup.mode {
        StartupMode::ListRecent => print_records(&RecentFiles::load().entries),
        StartupMode::ListFavorites => print_records(&Favorites::load().entries),
        StartupMode::ShowLogFile => {
            let path = datapad::config_paths::log_file()
                .context("No config directory available")?;
            println!("{}", path.display());
            Ok(())
        }
        StartupMode::Process(path) => process(path, &startup),
    }
}

fn print_records(records: &[FileRecord]) -> Result<()> {
    let mut out = std::io::stdout().lock();
    for record in records {
        writeln!(
            out,
            "{:<5} {:<14} {}",
            record.format.display_name(),
            record.time_ago(),
            record.path.display()
        )?;
    }
    Ok(())
}

fn process(path: &Path, startup: &StartupConfig) -> Result<()> {
    let name = filename_for_display(path);
    let content = read_document(path).map_err(|e| anyhow!(e.user_message(&name)))?;
    if !is_data_file(path) {
        tracing::warn!("{} has no data file extension, reading it as JSON", name);
    }

    let mut config = EditorConfig::load();
    config.record_history &= startup.record_history;
    let mut session = Session::new(config);

    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    dispatch(
        &mut session,
        FileMsg::Open {
            name,
            path: Some(path),
            content,
        }
        .into(),
    )?;

    for edit in &startup.edits {
        dispatch(&mut session, edit.clone().into())?;
    }

    let file = session
        .active_file()
        .context("No file is open")?;

    if startup.show_stats {
        if let Some(stats) = session.stats() {
            eprintln!("Format:     {}", file.format);
            eprintln!("Size:       {} bytes", file.meta.size);
            eprintln!("Nodes:      {}", stats.total_nodes);
            eprintln!("Max depth:  {}", stats.max_depth);
            eprintln!("Objects:    {}", stats.object_count);
            eprintln!("Arrays:     {}", stats.array_count);
            eprintln!("Primitives: {}", stats.primitive_count);
        }
    }

    if let Some(query) = &startup.search {
        dispatch(&mut session, datapad::messages::ViewMsg::Search(query.clone()).into())?;
        for hit in session.search_hits() {
            eprintln!("{}", if hit.is_root() { "(root)".to_string() } else { hit.to_string() });
        }
    }

    if startup.toggle_favorite {
        toggle_favorite(&session)?;
    }

    let text = if startup.emit_types {
        type_definitions(&mut session)?
    } else {
        session.active_file().context("No file is open")?.text.clone()
    };

    match &startup.output {
        OutputTarget::InPlace => write_in_place(&mut session),
        OutputTarget::File(out) => {
            std::fs::write(out, &text)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            tracing::info!("Wrote {}", out.display());
            Ok(())
        }
        OutputTarget::Stdout => {
            let mut out = std::io::stdout().lock();
            out.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

/// Write the edited text back to disk
///
/// The text is written as edited, so minified output stays minified. After a
/// conversion the file has a new name and lands beside the original.
fn write_in_place(session: &mut Session) -> Result<()> {
    let file = session.active_file().context("No file is open")?;
    if let Some(err) = &file.error {
        bail!("Cannot save {}: {}", file.name, err);
    }
    let original = file.path.as_ref().context("File has no location on disk")?;
    let path = original.with_file_name(&file.name);
    std::fs::write(&path, &file.text)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    let id = file.id;
    dispatch(session, FileMsg::Saved { id, path }.into())
}

fn type_definitions(session: &mut Session) -> Result<String> {
    match update(session, FileMsg::GenerateTypes.into()) {
        Some(Cmd::ShowTypes { content, .. }) => Ok(content),
        Some(Cmd::Alert(message)) => bail!(message),
        _ => bail!("No file is open"),
    }
}

fn toggle_favorite(session: &Session) -> Result<()> {
    let record = session
        .active_file()
        .and_then(|f| f.record())
        .context("Only files on disk can be favorites")?;
    let path = record.path.clone();

    let mut favorites = Favorites::load();
    let added = favorites.toggle(record);
    favorites.save().context("Failed to save favorites")?;
    eprintln!(
        "{} {} favorites",
        path.display(),
        if added { "added to" } else { "removed from" }
    );
    Ok(())
}

/// Run one message through the session and execute the commands it returns
fn dispatch(session: &mut Session, msg: Msg) -> Result<()> {
    let Some(cmd) = update(session, msg) else {
        return Ok(());
    };
    for cmd in cmd.flatten() {
        execute(session, cmd)?;
    }
    Ok(())
}

fn execute(session: &mut Session, cmd: Cmd) -> Result<()> {
    match cmd {
        Cmd::None | Cmd::Batch(_) => Ok(()),
        Cmd::Alert(message) => bail!(message),
        Cmd::SaveFile { id, path, content } => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            dispatch(session, FileMsg::Saved { id, path }.into())
        }
        Cmd::ShowSaveDialog { suggested_name, .. } => {
            bail!("No save location for {}; use --output", suggested_name)
        }
        Cmd::AddRecent(record) => {
            let mut recent = RecentFiles::load();
            recent.add(record);
            if let Err(e) = recent.save() {
                tracing::warn!("Failed to save recent files: {}", e);
            }
            Ok(())
        }
        Cmd::ShowTypes { content, .. } => {
            print!("{}", content);
            Ok(())
        }
        Cmd::CopyToClipboard(_) => bail!("No clipboard in headless mode"),
        Cmd::ConfirmClose { id } => bail!("File {} has unsaved changes", id),
    }
}
