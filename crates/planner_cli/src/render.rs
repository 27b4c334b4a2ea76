//! Plain-text rendering of planner views.
//!
//! Every function writes to the given sink and returns its I/O error, so a
//! closed pipe ends the command instead of panicking.

use planner_core::views::board::{
    category_stats, compute_progress, day_slots, slot_is_done, zone_label,
};
use planner_core::views::metrics::{
    active_metrics, effective_targets, month_value, monthly_target, target_percent, yearly_total,
};
use planner_core::views::tasks::{filtered_tasks, unassigned_tasks};
use planner_core::{
    CategoryFilter, FieldOutcome, ImportReport, MonthKey, PlannerDocument, SyncOutcome, Task, DAYS,
};
use std::io::{self, Write};

pub fn applied<W: Write>(out: &mut W, applied: bool, message: &str) -> io::Result<()> {
    if applied {
        writeln!(out, "{message}")
    } else {
        writeln!(out, "nothing changed")
    }
}

pub fn board<W: Write>(out: &mut W, document: &PlannerDocument) -> io::Result<()> {
    let progress = compute_progress(document);
    writeln!(
        out,
        "progress {}/{} ({}%)",
        progress.done, progress.total, progress.pct
    )?;
    for day in DAYS {
        writeln!(out)?;
        writeln!(out, "{day}")?;
        for slot in day_slots(document, day) {
            let mark = if slot_is_done(document, slot) { "x" } else { " " };
            let title = match slot.task_id.as_deref() {
                Some(task_id) => document
                    .task(task_id)
                    .map_or("(missing task)", |task| task.title.as_str()),
                None => "-",
            };
            writeln!(
                out,
                "  [{mark}] {:<24} {title}  ({})",
                zone_label(document, &slot.zone_id),
                slot.id
            )?;
        }
    }
    writeln!(out)?;
    for (category, stat) in category_stats(document)
        .into_iter()
        .filter(|(_, stat)| stat.total > 0)
    {
        writeln!(out, "{:<16} {}/{}", category.label(), stat.done, stat.total)?;
    }
    Ok(())
}

pub fn tasks<W: Write>(
    out: &mut W,
    document: &PlannerDocument,
    query: &str,
    filter: CategoryFilter,
    unassigned: bool,
) -> io::Result<()> {
    let tasks = if unassigned {
        unassigned_tasks(document, query, filter)
    } else {
        filtered_tasks(document, query, filter)
    };
    if tasks.is_empty() {
        return writeln!(out, "no tasks");
    }
    for task in tasks {
        write_task(out, task)?;
    }
    Ok(())
}

fn write_task<W: Write>(out: &mut W, task: &Task) -> io::Result<()> {
    let mark = if task.done { "x" } else { " " };
    write!(out, "[{mark}] {}  {} [{}]", task.id, task.title, task.category.key())?;
    if let Some(mins) = task.est_mins {
        write!(out, " ~{mins}m")?;
    }
    if let Some(metric_key) = task.metric_key.as_deref() {
        write!(out, " metric={metric_key}")?;
    }
    writeln!(out)
}

pub fn metrics<W: Write>(
    out: &mut W,
    document: &PlannerDocument,
    month: MonthKey,
) -> io::Result<()> {
    let metrics = active_metrics(document);
    if metrics.is_empty() {
        return writeln!(out, "no metrics in use");
    }
    writeln!(out, "{month}")?;
    for metric in metrics {
        let targets = effective_targets(document, metric.key);
        let month_goal = monthly_target(targets);
        let value = month_value(document, month, metric.key);
        let year_total = yearly_total(document, metric.key, month.year());
        writeln!(
            out,
            "  {:<20} month {}/{} {} ({}%)  year {}/{} ({}%)",
            metric.label,
            value,
            month_goal,
            metric.unit,
            target_percent(u64::from(value), month_goal),
            year_total,
            targets.year_target,
            target_percent(year_total, targets.year_target)
        )?;
    }
    Ok(())
}

pub fn sync<W: Write>(out: &mut W, outcome: &SyncOutcome) -> io::Result<()> {
    if outcome.ok {
        writeln!(out, "{}", outcome.message)
    } else {
        writeln!(out, "sync failed: {}", outcome.message)
    }
}

pub fn import_report<W: Write>(out: &mut W, report: &ImportReport) -> io::Result<()> {
    let fields = [
        ("tasks", &report.tasks),
        ("slots", &report.slots),
        ("settings", &report.settings),
        ("monthly", &report.monthly),
        ("gist", &report.gist),
    ];
    for (name, outcome) in fields {
        match outcome {
            FieldOutcome::Replaced => writeln!(out, "{name}: imported")?,
            FieldOutcome::Retained { reason } => writeln!(out, "{name}: kept ({reason})")?,
        }
    }
    Ok(())
}
