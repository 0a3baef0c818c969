//! Argument parsing and command dispatch for the `ministry` binary.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ministry_autosave::{AutoSaveConfig, SaveOutcome};
use ministry_editor::SermonEditor;
use ministry_model::{NewSeries, NewSermon, PopulatedSermon, SermonSeries};
use ministry_storage::{SeriesFilter, SermonStore};
use ministry_types::{SeriesId, SermonId, UserId};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "ministry")]
#[command(about = "Manage sermons and sermon series")]
pub struct Cli {
    /// Path to the sermon database
    #[arg(long, env = "MINISTRY_DB", default_value = "ministry.db")]
    pub db: PathBuf,

    /// Acting user id
    #[arg(short, long, env = "MINISTRY_USER")]
    pub user: Option<UserId>,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a fresh user id
    NewUser,

    /// Manage sermon series
    #[command(subcommand)]
    Series(SeriesCommand),

    /// Manage sermons
    #[command(subcommand)]
    Sermon(SermonCommand),
}

#[derive(Subcommand, Debug)]
pub enum SeriesCommand {
    /// List series, newest first
    List {
        /// Only active series
        #[arg(long, conflicts_with = "archived")]
        active: bool,

        /// Only archived series
        #[arg(long)]
        archived: bool,
    },

    /// Create a series
    Create {
        name: String,

        /// Colour tag (defaults to gray)
        #[arg(long)]
        color: Option<String>,
    },

    /// Archive a series
    Archive { id: SeriesId },

    /// Reactivate an archived series
    Unarchive { id: SeriesId },
}

#[derive(Subcommand, Debug)]
pub enum SermonCommand {
    /// List sermons, newest first
    List,

    /// Create a sermon
    Create {
        title: String,

        /// Series to file the sermon under
        #[arg(long)]
        series: Option<SeriesId>,

        /// Scripture reference
        #[arg(long)]
        scripture: Option<String>,
    },

    /// Show one sermon
    Show { id: SermonId },

    /// Edit a sermon and save it
    Edit {
        id: SermonId,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        scripture: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Move the sermon into this series
        #[arg(long, conflicts_with = "no_series")]
        series: Option<SeriesId>,

        /// Remove the sermon from its series
        #[arg(long)]
        no_series: bool,
    },

    /// Delete a sermon
    Delete { id: SermonId },
}

fn series_filter(active: bool, archived: bool) -> SeriesFilter {
    match (active, archived) {
        (true, _) => SeriesFilter::Active,
        (_, true) => SeriesFilter::Archived,
        _ => SeriesFilter::All,
    }
}

/// Runs one command, writing its output to `out`.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    if let Command::NewUser = cli.command {
        writeln!(out, "{}", UserId::new())?;
        return Ok(());
    }

    let user = cli
        .user
        .context("no user given; pass --user or set MINISTRY_USER")?;
    let store = Arc::new(
        SermonStore::open(&cli.db)
            .with_context(|| format!("failed to open database {}", cli.db.display()))?,
    );
    debug!("acting as {}", user);
    let printer = Printer { json: cli.json };

    match cli.command {
        Command::NewUser => {}
        Command::Series(cmd) => run_series(&store, user, cmd, &printer, out)?,
        Command::Sermon(cmd) => run_sermon(store, user, cmd, &printer, out).await?,
    }
    Ok(())
}

fn run_series(
    store: &SermonStore,
    user: UserId,
    cmd: SeriesCommand,
    printer: &Printer,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        SeriesCommand::List { active, archived } => {
            let series = store.list_series(user, series_filter(active, archived))?;
            printer.series_list(out, &series)
        }
        SeriesCommand::Create { name, color } => {
            let mut input = NewSeries::new(name);
            if let Some(color) = color {
                input = input.with_color(color);
            }
            let series = store.create_series(user, input)?;
            info!("created series {}", series.id);
            printer.series(out, &series)
        }
        SeriesCommand::Archive { id } => {
            let series = store.set_series_active(user, id, false)?;
            printer.series(out, &series)
        }
        SeriesCommand::Unarchive { id } => {
            let series = store.set_series_active(user, id, true)?;
            printer.series(out, &series)
        }
    }
}

async fn run_sermon(
    store: Arc<SermonStore>,
    user: UserId,
    cmd: SermonCommand,
    printer: &Printer,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        SermonCommand::List => {
            let sermons = store.list_sermons(user)?;
            printer.sermon_list(out, &sermons)
        }
        SermonCommand::Create {
            title,
            series,
            scripture,
        } => {
            let mut input = NewSermon::new(title);
            if let Some(series) = series {
                input = input.in_series(series);
            }
            if let Some(scripture) = scripture {
                input = input.with_scripture(scripture);
            }
            let sermon = store.create_sermon(user, input)?;
            info!("created sermon {}", sermon.id);
            printer.sermon(out, &sermon)
        }
        SermonCommand::Show { id } => {
            let sermon = store.get_sermon(user, id)?;
            printer.sermon(out, &sermon)
        }
        SermonCommand::Edit {
            id,
            title,
            scripture,
            notes,
            series,
            no_series,
        } => {
            let editor = SermonEditor::open(store, user, id, AutoSaveConfig::default()).await?;
            editor.edit(|draft| {
                if let Some(title) = title {
                    draft.title = title;
                }
                if let Some(scripture) = scripture {
                    draft.scripture = scripture;
                }
                if let Some(notes) = notes {
                    draft.notes = notes;
                }
                if no_series {
                    draft.series_id = None;
                } else if series.is_some() {
                    draft.series_id = series;
                }
            });

            let outcome = editor.save_now().await;
            editor.close();
            match outcome.context("failed to save sermon")? {
                SaveOutcome::Saved(sermon) => printer.sermon(out, &sermon),
                SaveOutcome::Skipped(reason) => {
                    writeln!(out, "nothing saved: {reason}")?;
                    Ok(())
                }
            }
        }
        SermonCommand::Delete { id } => {
            store.delete_sermon(user, id)?;
            writeln!(out, "deleted {id}")?;
            Ok(())
        }
    }
}

struct Printer {
    json: bool,
}

impl Printer {
    fn write_json<T: Serialize + ?Sized>(&self, out: &mut impl Write, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
        Ok(())
    }

    fn series(&self, out: &mut impl Write, series: &SermonSeries) -> Result<()> {
        if self.json {
            return self.write_json(out, series);
        }
        writeln!(out, "{}", series_line(series))?;
        Ok(())
    }

    fn series_list(&self, out: &mut impl Write, series: &[SermonSeries]) -> Result<()> {
        if self.json {
            return self.write_json(out, series);
        }
        for s in series {
            writeln!(out, "{}", series_line(s))?;
        }
        Ok(())
    }

    fn sermon(&self, out: &mut impl Write, sermon: &PopulatedSermon) -> Result<()> {
        if self.json {
            return self.write_json(out, sermon);
        }
        writeln!(out, "{}  {}", sermon.id, sermon.title)?;
        if let Some(series) = &sermon.series {
            writeln!(out, "  series:    {} ({})", series.name, series.id)?;
        }
        if let Some(scripture) = sermon.body.scripture.as_deref().filter(|s| !s.is_empty()) {
            writeln!(out, "  scripture: {scripture}")?;
        }
        if let Some(notes) = sermon.body.notes.as_deref().filter(|s| !s.is_empty()) {
            writeln!(out, "  notes:     {notes}")?;
        }
        for section in &sermon.body.sections {
            writeln!(out, "  [{}] {}", section.order, section.title)?;
        }
        writeln!(out, "  updated:   {}", sermon.updated_at)?;
        Ok(())
    }

    fn sermon_list(&self, out: &mut impl Write, sermons: &[PopulatedSermon]) -> Result<()> {
        if self.json {
            return self.write_json(out, sermons);
        }
        for sermon in sermons {
            let series = sermon.series.as_ref().map_or("-", |s| s.name.as_str());
            writeln!(out, "{}  {}  [{}]", sermon.id, sermon.title, series)?;
        }
        Ok(())
    }
}

fn series_line(series: &SermonSeries) -> String {
    let state = if series.active { "active" } else { "archived" };
    format!("{}  {}  ({}, {})", series.id, series.name, series.color, state)
}
