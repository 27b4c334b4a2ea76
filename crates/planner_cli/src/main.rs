//! Command-line front end for the weekly planner.
//!
//! # Responsibility
//! - Parse commands and route them to `planner_core::PlannerService`.
//! - Resolve the database and log locations from flags, env or defaults.
//!
//! # Invariants
//! - Every mutating command persists through the service; the CLI never
//!   writes the database directly.
//! - Output goes through one locked stdout handle; a closed pipe ends the
//!   command quietly.

#![forbid(unsafe_code)]

mod render;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use log::info;
use planner_core::db::open_db;
use planner_core::{
    default_log_level, init_logging, Category, CategoryFilter, GistProvider, MetricUpdate,
    MonthKey, NewTask, PlannerService, ServiceResult, SqliteStateRepository, StateRepository,
    TargetOverride, TaskEdit,
};
use std::io::{self, Write};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "weekly-planner";
const DB_FILE_NAME: &str = "planner.sqlite3";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "planner: weekly time-slot planner and habit tracker",
    long_about = None
)]
struct Cli {
    /// SQLite database path.
    #[arg(long, global = true, env = "PLANNER_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, global = true, env = "PLANNER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the weekly board with progress.
    Board,
    /// List tasks.
    Tasks(TasksArgs),
    /// Create a task.
    Add(AddArgs),
    /// Change selected fields of a task; omitted fields keep their value.
    Edit(EditArgs),
    /// Delete a task and clear its slots (undoable).
    Delete { id: String },
    /// Toggle a task's completion.
    ToggleTask { id: String },
    /// Assign a task to a slot, e.g. `Mon|morning`.
    Assign { slot: String, task: String },
    /// Toggle a slot's completion.
    ToggleSlot { slot: String },
    /// Empty a slot (undoable).
    ClearSlot { slot: String },
    /// Reset all slots for a new week (undoable).
    Reset,
    /// Delete every task and reset slots. Cannot be undone.
    ClearAll,
    /// Revert the last delete, clear-slot or reset.
    Undo,
    /// Add any missing default tasks.
    Seed,
    /// Change a metric counter.
    Metric(MetricArgs),
    /// Show metric counters for a month and year-to-date totals.
    Metrics {
        /// Month as YYYY-MM; defaults to the current month.
        #[arg(long)]
        month: Option<String>,
    },
    /// Change settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Store the sync token and optional gist id.
    GistConfig {
        token: String,
        #[arg(default_value = "")]
        gist_id: String,
    },
    /// Upload the current state to the gist.
    Push,
    /// Replace local state with the gist contents.
    Pull,
    /// Print or write the export JSON.
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Import a previously exported JSON file.
    Import { file: PathBuf },
    /// Print versions.
    Version,
}

#[derive(Args, Debug)]
struct TasksArgs {
    /// Case-insensitive match on title and notes.
    #[arg(long, default_value = "")]
    query: String,
    #[arg(long, value_parser = parse_category)]
    category: Option<Category>,
    /// Only tasks not scheduled in any slot.
    #[arg(long)]
    unassigned: bool,
}

#[derive(Args, Debug)]
struct AddArgs {
    title: String,
    #[arg(long, value_parser = parse_category, default_value = "agent")]
    category: Category,
    #[arg(long)]
    est_mins: Option<u32>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long)]
    metric: Option<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
    id: String,
    /// New title.
    title: Option<String>,
    #[arg(long, value_parser = parse_category)]
    category: Option<Category>,
    /// 0 clears the estimate.
    #[arg(long)]
    est_mins: Option<u32>,
    /// Empty text clears the notes.
    #[arg(long)]
    notes: Option<String>,
    /// Empty text unlinks the metric.
    #[arg(long)]
    metric: Option<String>,
}

impl EditArgs {
    /// Layers the supplied flags over `current`.
    fn apply_to(self, mut current: TaskEdit) -> TaskEdit {
        if let Some(title) = self.title {
            current.title = title;
        }
        if let Some(category) = self.category {
            current.category = category;
        }
        if let Some(mins) = self.est_mins {
            current.est_mins = Some(mins);
        }
        if let Some(notes) = self.notes {
            current.notes = Some(notes);
        }
        if let Some(metric) = self.metric {
            current.metric_key = Some(metric);
        }
        current
    }
}

#[derive(Args, Debug)]
struct MetricArgs {
    key: String,
    /// Month as YYYY-MM; defaults to the current month.
    #[arg(long)]
    month: Option<String>,
    #[arg(long, allow_hyphen_values = true, conflicts_with = "set")]
    delta: Option<i64>,
    #[arg(long, allow_hyphen_values = true)]
    set: Option<i64>,
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Couple slot and task completion.
    Mirror {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Re-add default tasks on week reset.
    AutoSeed {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Rename a zone; an empty label restores the default.
    ZoneLabel {
        zone: String,
        #[arg(default_value = "")]
        label: String,
    },
    /// Override metric targets; omit both to restore defaults.
    Targets {
        metric: String,
        #[arg(long)]
        week: Option<u32>,
        #[arg(long)]
        year: Option<u32>,
    },
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::parse(value).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(|category| category.key()).collect();
        format!("unknown category `{value}`; expected one of {}", known.join("|"))
    })
}

fn parse_month(value: Option<&str>) -> anyhow::Result<MonthKey> {
    match value {
        Some(raw) => Ok(MonthKey::parse(raw)?),
        None => Ok(MonthKey::current()),
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

fn setup_logging(cli: &Cli) -> anyhow::Result<()> {
    let log_dir = match &cli.log_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir().join("logs"),
    };
    let log_dir = if log_dir.is_absolute() {
        log_dir
    } else {
        std::env::current_dir()?.join(log_dir)
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &log_dir.to_string_lossy())?;
    Ok(())
}

/// Edits a task starting from its current values. Unknown ids are a no-op.
fn edit_task<R: StateRepository>(
    service: &mut PlannerService<R>,
    args: EditArgs,
) -> ServiceResult<bool> {
    let Some(current) = service.document().task(&args.id).map(TaskEdit::from_task) else {
        return Ok(false);
    };
    let id = args.id.clone();
    service.edit_task(&id, args.apply_to(current))
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|cause| cause.kind() == io::ErrorKind::BrokenPipe)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(cli, &mut out).and_then(|()| Ok(out.flush()?)) {
        Err(err) if is_broken_pipe(&err) => {
            info!("event=cli_output module=cli status=closed reason=broken_pipe");
            Ok(())
        }
        result => result,
    }
}

fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| default_data_dir().join(DB_FILE_NAME));
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    let mut service = PlannerService::open(SqliteStateRepository::new(&conn))?;
    info!("event=cli_command module=cli status=start");

    match cli.command {
        Commands::Board => render::board(out, service.document())?,
        Commands::Tasks(args) => {
            let filter = args.category.map_or(CategoryFilter::All, CategoryFilter::Only);
            render::tasks(
                out,
                service.document(),
                &args.query,
                filter,
                args.unassigned,
            )?;
        }
        Commands::Add(args) => {
            let input = NewTask {
                title: args.title,
                category: args.category,
                est_mins: args.est_mins,
                notes: args.notes,
                metric_key: args.metric,
            };
            match service.add_task(input)? {
                Some(id) => writeln!(out, "added task {id}")?,
                None => bail!("task title cannot be blank"),
            }
        }
        Commands::Edit(args) => {
            render::applied(out, edit_task(&mut service, args)?, "task updated")?
        }
        Commands::Delete { id } => {
            render::applied(out, service.delete_task(&id)?, "task deleted")?
        }
        Commands::ToggleTask { id } => {
            render::applied(out, service.toggle_task_done(&id)?, "task toggled")?
        }
        Commands::Assign { slot, task } => render::applied(
            out,
            service.assign_task_to_slot(&slot, &task)?,
            "slot assigned",
        )?,
        Commands::ToggleSlot { slot } => {
            render::applied(out, service.toggle_slot_done(&slot)?, "slot toggled")?
        }
        Commands::ClearSlot { slot } => {
            render::applied(out, service.clear_slot(&slot)?, "slot cleared")?
        }
        Commands::Reset => {
            service.reset_week()?;
            writeln!(out, "week reset")?;
        }
        Commands::ClearAll => {
            service.clear_all()?;
            writeln!(out, "all tasks cleared")?;
        }
        Commands::Undo => render::applied(out, service.undo()?, "undone")?,
        Commands::Seed => writeln!(out, "added {} seed tasks", service.add_seed_tasks()?)?,
        Commands::Metric(args) => {
            let month = parse_month(args.month.as_deref())?;
            let update = match (args.set, args.delta) {
                (Some(value), _) => MetricUpdate::Set(value),
                (None, Some(delta)) => MetricUpdate::Delta(delta),
                (None, None) => MetricUpdate::Delta(1),
            };
            render::applied(
                out,
                service.update_metric(month, &args.key, update)?,
                "metric updated",
            )?;
        }
        Commands::Metrics { month } => {
            let month = parse_month(month.as_deref())?;
            render::metrics(out, service.document(), month)?;
        }
        Commands::Settings(command) => match command {
            SettingsCommand::Mirror { enabled } => {
                service.set_mirror_done(enabled)?;
                writeln!(out, "mirror_done={enabled}")?;
            }
            SettingsCommand::AutoSeed { enabled } => {
                service.set_auto_seed(enabled)?;
                writeln!(out, "auto_seed={enabled}")?;
            }
            SettingsCommand::ZoneLabel { zone, label } => render::applied(
                out,
                service.set_zone_label(&zone, &label)?,
                "zone label saved",
            )?,
            SettingsCommand::Targets { metric, week, year } => {
                let targets = TargetOverride {
                    week_target: week,
                    year_target: year,
                };
                render::applied(
                    out,
                    service.set_metric_targets(&metric, targets)?,
                    "targets saved",
                )?;
            }
        },
        Commands::GistConfig { token, gist_id } => {
            service.save_gist_config(&token, &gist_id)?;
            writeln!(out, "gist config saved")?;
        }
        Commands::Push => render::sync(out, &service.push(&GistProvider::new())?)?,
        Commands::Pull => render::sync(out, &service.pull(&GistProvider::new())?)?,
        Commands::Export { out: path } => {
            let json = service.export_json()?;
            match path {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    writeln!(out, "exported to {}", path.display())?;
                }
                None => writeln!(out, "{json}")?,
            }
        }
        Commands::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            render::import_report(out, &service.import_json(&raw)?)?;
        }
        Commands::Version => {
            writeln!(out, "planner_cli version={}", env!("CARGO_PKG_VERSION"))?;
            writeln!(out, "planner_core version={}", planner_core::core_version())?;
        }
    }
    Ok(())
}
