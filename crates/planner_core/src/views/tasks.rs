//! Task list projections.

use crate::model::document::PlannerDocument;
use crate::model::task::{Category, Task};
use std::collections::HashSet;

/// Category filter for task lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    fn accepts(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == category,
        }
    }
}

/// Tasks matching `query` and `filter`.
///
/// Incomplete tasks come first; ties are ordered newest first.
pub fn filtered_tasks<'a>(
    document: &'a PlannerDocument,
    query: &str,
    filter: CategoryFilter,
) -> Vec<&'a Task> {
    let needle = query.trim().to_lowercase();
    let mut tasks: Vec<&Task> = document
        .tasks
        .iter()
        .filter(|task| filter.accepts(task.category))
        .filter(|task| task.matches_text(&needle))
        .collect();
    tasks.sort_by(|a, b| {
        a.done
            .cmp(&b.done)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    tasks
}

/// `filtered_tasks` without tasks currently referenced by a slot.
pub fn unassigned_tasks<'a>(
    document: &'a PlannerDocument,
    query: &str,
    filter: CategoryFilter,
) -> Vec<&'a Task> {
    let assigned: HashSet<&str> = document
        .slots
        .iter()
        .filter_map(|slot| slot.task_id.as_deref())
        .collect();
    filtered_tasks(document, query, filter)
        .into_iter()
        .filter(|task| !assigned.contains(task.id.as_str()))
        .collect()
}
