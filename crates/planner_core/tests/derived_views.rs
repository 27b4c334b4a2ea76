use planner_core::views::board::{category_stats, compute_progress, day_slots, zone_label};
use planner_core::views::metrics::{
    effective_targets, month_values, monthly_target, target_percent, yearly_total,
};
use planner_core::views::tasks::{filtered_tasks, unassigned_tasks};
use planner_core::{
    Category, CategoryFilter, MetricUpdate, MonthKey, NewTask, PlannerDocument, Progress,
    StateStore, TargetOverride,
};

fn empty_store() -> StateStore {
    let mut document = PlannerDocument::new(0);
    document.tasks.clear();
    StateStore::new(document)
}

fn add(store: &mut StateStore, title: &str, category: Category, created_at: i64) -> String {
    store
        .add_task(NewTask::new(title, category), created_at)
        .unwrap()
}

#[test]
fn progress_is_zero_without_assignments() {
    let store = empty_store();
    assert_eq!(
        compute_progress(store.document()),
        Progress {
            total: 0,
            done: 0,
            pct: 0
        }
    );
}

#[test]
fn progress_is_zero_without_any_slots() {
    let mut document = PlannerDocument::new(0);
    document.slots.clear();
    assert_eq!(compute_progress(&document), Progress::default());
}

#[test]
fn progress_counts_assigned_slots_only() {
    let mut store = empty_store();
    let first = add(&mut store, "A", Category::Agent, 1);
    let second = add(&mut store, "B", Category::Toeic, 2);
    store.set_mirror_done(false);
    store.assign_task_to_slot("Mon|morning", &first);
    store.assign_task_to_slot("Mon|noon", &first);
    store.assign_task_to_slot("Tue|morning", &second);
    store.assign_task_to_slot("Tue|noon", &second);

    store.toggle_slot_done("Mon|morning", MonthKey::parse("2026-01").unwrap());
    store.toggle_slot_done("Sat|sat", MonthKey::parse("2026-01").unwrap());
    store.toggle_task_done(&second);

    // Tue slots count through their done task.
    let progress = compute_progress(store.document());
    assert_eq!(progress.total, 4);
    assert_eq!(progress.done, 3);
    assert_eq!(progress.pct, 75);
}

#[test]
fn progress_half_done_is_fifty_percent() {
    let mut store = empty_store();
    let ids: Vec<String> = (0..4)
        .map(|i| add(&mut store, &format!("T{i}"), Category::Leetcode, i))
        .collect();
    for (slot, id) in ["Mon|morning", "Tue|morning", "Wed|morning", "Thu|morning"]
        .iter()
        .zip(&ids)
    {
        store.assign_task_to_slot(slot, id);
    }
    store.toggle_slot_done("Mon|morning", MonthKey::parse("2026-01").unwrap());
    store.toggle_slot_done("Tue|morning", MonthKey::parse("2026-01").unwrap());

    assert_eq!(
        compute_progress(store.document()),
        Progress {
            total: 4,
            done: 2,
            pct: 50
        }
    );
}

#[test]
fn dangling_slot_reference_counts_as_assigned_but_not_done() {
    let mut store = empty_store();
    let raw = r#"{"slots": [{"id": "Mon|morning", "day": "Mon", "zoneId": "morning", "taskId": "ghost"}]}"#;
    store.import_state(raw).unwrap();

    let progress = compute_progress(store.document());
    assert_eq!((progress.total, progress.done, progress.pct), (1, 0, 0));
    assert!(category_stats(store.document())
        .values()
        .all(|stat| stat.total == 0));
}

#[test]
fn category_stats_group_by_task_category() {
    let mut store = empty_store();
    let fit = add(&mut store, "Run", Category::Fitness, 1);
    store.assign_task_to_slot("Mon|evening", &fit);
    store.assign_task_to_slot("Wed|evening", &fit);
    store.toggle_slot_done("Mon|evening", MonthKey::parse("2026-01").unwrap());

    let stats = category_stats(store.document());
    assert_eq!(stats[&Category::Fitness].total, 2);
    assert_eq!(stats[&Category::Fitness].done, 1);
    assert_eq!(stats[&Category::Agent].total, 0);
}

#[test]
fn day_columns_follow_zone_order_and_custom_labels() {
    let mut store = empty_store();
    store.set_zone_label("noon", "Lunch");

    let mon: Vec<&str> = day_slots(store.document(), "Mon")
        .into_iter()
        .map(|slot| slot.zone_id.as_str())
        .collect();
    assert_eq!(mon, ["morning", "noon", "evening"]);
    assert_eq!(day_slots(store.document(), "Sun").len(), 1);

    assert_eq!(zone_label(store.document(), "noon"), "Lunch");
    assert_eq!(zone_label(store.document(), "morning"), "Morning 08:00-09:00");
    assert_eq!(zone_label(store.document(), "unknown"), "unknown");
}

#[test]
fn task_list_puts_open_tasks_first_then_newest() {
    let mut store = empty_store();
    let old = add(&mut store, "Old", Category::Writing, 10);
    let new = add(&mut store, "New", Category::Writing, 20);
    let done = add(&mut store, "Finished", Category::Writing, 30);
    store.toggle_task_done(&done);

    let order: Vec<&str> = filtered_tasks(store.document(), "", CategoryFilter::All)
        .into_iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(order, [new.as_str(), old.as_str(), done.as_str()]);
}

#[test]
fn task_search_matches_title_or_notes_case_insensitively() {
    let mut store = empty_store();
    let mut input = NewTask::new("Vocabulary", Category::Toeic);
    input.notes = Some("Business WORDS".to_string());
    store.add_task(input, 1).unwrap();
    add(&mut store, "Arrays", Category::Leetcode, 2);

    assert_eq!(
        filtered_tasks(store.document(), "words", CategoryFilter::All).len(),
        1
    );
    assert_eq!(
        filtered_tasks(store.document(), "", CategoryFilter::Only(Category::Leetcode)).len(),
        1
    );
    assert!(filtered_tasks(store.document(), "vocab", CategoryFilter::Only(Category::Fitness))
        .is_empty());
}

#[test]
fn unassigned_excludes_scheduled_tasks() {
    let mut store = empty_store();
    let scheduled = add(&mut store, "Scheduled", Category::Agent, 1);
    add(&mut store, "Loose", Category::Agent, 2);
    store.assign_task_to_slot("Fri|noon", &scheduled);

    let loose = unassigned_tasks(store.document(), "", CategoryFilter::All);
    assert_eq!(loose.len(), 1);
    assert_eq!(loose[0].title, "Loose");
}

#[test]
fn metric_targets_and_totals() {
    let mut store = empty_store();
    let jan = MonthKey::parse("2026-01").unwrap();
    store.update_metric(jan, "leetcode", MetricUpdate::Set(10));
    store.update_metric(jan.shift(1), "leetcode", MetricUpdate::Set(5));
    store.update_metric(jan.shift(-1), "leetcode", MetricUpdate::Set(100));

    assert_eq!(yearly_total(store.document(), "leetcode", 2026), 15);
    assert_eq!(month_values(store.document(), jan)["leetcode"], 10);
    assert!(month_values(store.document(), jan.shift(5)).is_empty());

    store.set_metric_targets(
        "leetcode",
        TargetOverride {
            week_target: Some(4),
            year_target: None,
        },
    );
    let targets = effective_targets(store.document(), "leetcode");
    assert_eq!(targets.week_target, 4);
    assert_eq!(monthly_target(targets), 17);
    assert_eq!(target_percent(15, 0), 0);
    assert_eq!(target_percent(30, 20), 100);
}
