//! Weekly board projections: progress, per-category stats and day columns.

use crate::model::constants::zone;
use crate::model::document::PlannerDocument;
use crate::model::slot::Slot;
use crate::model::task::Category;
use std::collections::BTreeMap;

/// Completion ratio over assigned slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub done: usize,
    /// Rounded percentage in `0..=100`.
    pub pct: u32,
}

/// Assigned/completed slot counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStat {
    pub total: usize,
    pub done: usize,
}

/// Whether a slot counts as completed: its own flag or its task's.
///
/// A dangling task reference counts as not done.
pub fn slot_is_done(document: &PlannerDocument, slot: &Slot) -> bool {
    slot.done
        || slot
            .task_id
            .as_deref()
            .and_then(|task_id| document.task(task_id))
            .is_some_and(|task| task.done)
}

/// Progress over slots that have a task assigned.
pub fn compute_progress(document: &PlannerDocument) -> Progress {
    let assigned: Vec<&Slot> = document
        .slots
        .iter()
        .filter(|slot| slot.task_id.as_deref().is_some_and(|id| !id.is_empty()))
        .collect();
    let total = assigned.len();
    if total == 0 {
        return Progress::default();
    }
    let done = assigned
        .iter()
        .filter(|slot| slot_is_done(document, slot))
        .count();
    Progress {
        total,
        done,
        pct: percent(done, total),
    }
}

/// Per-category counts over assigned slots whose task still exists.
pub fn category_stats(document: &PlannerDocument) -> BTreeMap<Category, CategoryStat> {
    let mut stats: BTreeMap<Category, CategoryStat> = Category::ALL
        .into_iter()
        .map(|category| (category, CategoryStat::default()))
        .collect();
    for slot in &document.slots {
        let Some(task) = slot.task_id.as_deref().and_then(|id| document.task(id)) else {
            continue;
        };
        let entry = stats.entry(task.category).or_default();
        entry.total += 1;
        if slot.done || task.done {
            entry.done += 1;
        }
    }
    stats
}

/// Slots of one day ordered by zone.
pub fn day_slots<'a>(document: &'a PlannerDocument, day: &str) -> Vec<&'a Slot> {
    let mut slots: Vec<&Slot> = document
        .slots
        .iter()
        .filter(|slot| slot.day == day)
        .collect();
    slots.sort_by_key(|slot| zone(&slot.zone_id).map_or(0, |definition| definition.order));
    slots
}

/// Display label of a zone: user override, constant label, or the raw id.
pub fn zone_label(document: &PlannerDocument, zone_id: &str) -> String {
    if let Some(custom) = document.settings.zone_labels.get(zone_id) {
        return custom.clone();
    }
    zone(zone_id).map_or_else(|| zone_id.to_string(), |definition| definition.label.to_string())
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
