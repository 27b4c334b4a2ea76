use planner_core::views::board::compute_progress;
use planner_core::{
    Category, MetricUpdate, MonthKey, NewTask, PlannerDocument, StateStore, TaskEdit,
};

fn month() -> MonthKey {
    MonthKey::parse("2026-03").unwrap()
}

fn store_with_task(metric_key: Option<&str>) -> (StateStore, String) {
    let mut document = PlannerDocument::new(0);
    document.tasks.clear();
    let mut store = StateStore::new(document);
    let mut input = NewTask::new("Read chapter", Category::Agent);
    input.metric_key = metric_key.map(str::to_string);
    let id = store.add_task(input, 100).unwrap();
    (store, id)
}

fn task_done(store: &StateStore, task_id: &str) -> bool {
    store.document().task(task_id).unwrap().done
}

fn slot_done(store: &StateStore, slot_id: &str) -> bool {
    store.document().slot(slot_id).unwrap().done
}

fn metric_value(store: &StateStore, key: &str) -> u32 {
    store
        .document()
        .monthly
        .get("2026-03")
        .and_then(|values| values.get(key))
        .copied()
        .unwrap_or(0)
}

#[test]
fn assigning_resets_slot_completion() {
    let (mut store, id) = store_with_task(None);
    assert!(store.assign_task_to_slot("Mon|morning", &id));
    store.toggle_slot_done("Mon|morning", month());
    assert!(slot_done(&store, "Mon|morning"));

    assert!(store.assign_task_to_slot("Mon|morning", &id));
    assert!(!slot_done(&store, "Mon|morning"));
    assert_eq!(
        store.document().slot("Mon|morning").unwrap().task_id.as_deref(),
        Some(id.as_str())
    );
}

#[test]
fn assigning_unknown_task_or_slot_is_noop() {
    let (mut store, id) = store_with_task(None);
    let before = store.document().clone();

    assert!(!store.assign_task_to_slot("Mon|morning", "missing"));
    assert!(!store.assign_task_to_slot("Mon|midnight", &id));
    assert!(!store.assign_task_to_slot("", &id));
    assert_eq!(store.document(), &before);
}

#[test]
fn mirror_marks_task_done_only_when_every_slot_is_done() {
    let (mut store, id) = store_with_task(None);
    store.assign_task_to_slot("Mon|morning", &id);
    store.assign_task_to_slot("Tue|morning", &id);

    store.toggle_slot_done("Mon|morning", month());
    assert!(!task_done(&store, &id));

    store.toggle_slot_done("Tue|morning", month());
    assert!(task_done(&store, &id));
}

#[test]
fn mirror_unmarks_task_as_soon_as_one_slot_reopens() {
    let (mut store, id) = store_with_task(None);
    store.assign_task_to_slot("Mon|morning", &id);
    store.assign_task_to_slot("Tue|morning", &id);
    store.toggle_slot_done("Mon|morning", month());
    store.toggle_slot_done("Tue|morning", month());

    store.toggle_slot_done("Tue|morning", month());
    assert!(!task_done(&store, &id));
    assert!(slot_done(&store, "Mon|morning"));
}

#[test]
fn mirror_off_leaves_task_untouched() {
    let (mut store, id) = store_with_task(None);
    store.set_mirror_done(false);
    store.assign_task_to_slot("Mon|morning", &id);

    store.toggle_slot_done("Mon|morning", month());
    assert!(!task_done(&store, &id));

    store.toggle_task_done(&id);
    assert!(task_done(&store, &id));
    assert!(slot_done(&store, "Mon|morning"));
}

#[test]
fn toggling_task_propagates_to_all_its_slots() {
    let (mut store, id) = store_with_task(None);
    store.assign_task_to_slot("Mon|morning", &id);
    store.assign_task_to_slot("Wed|evening", &id);

    assert!(store.toggle_task_done(&id));
    assert!(slot_done(&store, "Mon|morning"));
    assert!(slot_done(&store, "Wed|evening"));
    assert!(!slot_done(&store, "Tue|morning"));

    store.toggle_task_done(&id);
    assert!(!slot_done(&store, "Mon|morning"));
    assert!(!slot_done(&store, "Wed|evening"));
}

#[test]
fn toggling_unknown_task_or_slot_is_noop() {
    let (mut store, _) = store_with_task(None);
    let before = store.document().clone();
    assert!(!store.toggle_task_done("missing"));
    assert!(!store.toggle_slot_done("Nowhere|noon", month()));
    assert_eq!(store.document(), &before);
}

#[test]
fn slot_toggle_moves_metric_counter_and_never_below_zero() {
    let (mut store, id) = store_with_task(Some("agent_read"));
    store.assign_task_to_slot("Mon|morning", &id);

    store.toggle_slot_done("Mon|morning", month());
    assert_eq!(metric_value(&store, "agent_read"), 1);

    store.toggle_slot_done("Mon|morning", month());
    assert_eq!(metric_value(&store, "agent_read"), 0);

    store.apply_metric_delta(&id, -5, month());
    assert_eq!(metric_value(&store, "agent_read"), 0);
}

#[test]
fn metric_update_without_key_or_metric_is_noop() {
    let (mut store, id) = store_with_task(None);
    assert!(!store.apply_metric_delta(&id, 1, month()));
    assert!(!store.apply_metric_delta("", 1, month()));
    assert!(!store.update_metric(month(), "", MetricUpdate::Delta(1)));
    assert!(store.document().monthly.is_empty());
}

#[test]
fn empty_slot_toggles_without_metric_change() {
    let (mut store, _) = store_with_task(Some("agent_read"));
    assert!(store.toggle_slot_done("Sat|sat", month()));
    assert!(slot_done(&store, "Sat|sat"));
    assert!(store.document().monthly.is_empty());
}

#[test]
fn delete_task_clears_referencing_slots_and_is_undoable() {
    let (mut store, id) = store_with_task(None);
    store.assign_task_to_slot("Mon|morning", &id);
    store.assign_task_to_slot("Thu|noon", &id);
    store.toggle_slot_done("Thu|noon", month());
    let before = store.document().clone();

    assert!(store.delete_task(&id));
    assert!(store.document().task(&id).is_none());
    assert!(store
        .document()
        .slots
        .iter()
        .all(|slot| slot.task_id.is_none() && !slot.done));

    assert!(store.restore());
    assert_eq!(store.document(), &before);
}

#[test]
fn delete_unknown_task_takes_no_snapshot() {
    let (mut store, _) = store_with_task(None);
    assert!(!store.delete_task("missing"));
    assert!(!store.has_undo());
}

#[test]
fn clear_slot_is_undoable() {
    let (mut store, id) = store_with_task(None);
    store.assign_task_to_slot("Fri|evening", &id);

    assert!(store.clear_slot("Fri|evening"));
    assert!(store.document().slot("Fri|evening").unwrap().task_id.is_none());

    assert!(store.restore());
    assert_eq!(
        store.document().slot("Fri|evening").unwrap().task_id.as_deref(),
        Some(id.as_str())
    );
}

#[test]
fn add_task_trims_and_rejects_blank_titles() {
    let (mut store, _) = store_with_task(None);
    assert!(store
        .add_task(NewTask::new("   ", Category::Writing), 1)
        .is_none());

    let mut input = NewTask::new("  Draft intro  ", Category::Writing);
    input.notes = Some("   ".to_string());
    input.est_mins = Some(0);
    let id = store.add_task(input, 200).unwrap();

    let task = &store.document().tasks[0];
    assert_eq!(task.id, id);
    assert_eq!(task.title, "Draft intro");
    assert_eq!(task.notes, None);
    assert_eq!(task.est_mins, None);
    assert!(!task.done);
    assert_eq!(task.created_at, 200);
}

#[test]
fn edit_task_replaces_fields_but_keeps_identity() {
    let (mut store, id) = store_with_task(None);
    store.toggle_task_done(&id);

    let edit = TaskEdit {
        title: "Design review".to_string(),
        category: Category::Sysdesign,
        est_mins: Some(30),
        notes: Some("cache layer".to_string()),
        metric_key: Some("sysdesign".to_string()),
    };
    assert!(store.edit_task(&id, edit.clone()));

    let task = store.document().task(&id).unwrap();
    assert_eq!(task.title, "Design review");
    assert_eq!(task.category, Category::Sysdesign);
    assert_eq!(task.metric_key.as_deref(), Some("sysdesign"));
    assert!(task.done);
    assert_eq!(task.created_at, 100);

    assert!(!store.edit_task("missing", edit.clone()));

    let blank = TaskEdit {
        title: " ".to_string(),
        ..edit
    };
    assert!(!store.edit_task(&id, blank));
    assert_eq!(store.document().task(&id).unwrap().title, "Design review");
}

#[test]
fn seeding_twice_adds_nothing_the_second_time() {
    let (mut store, _) = store_with_task(None);
    assert_eq!(store.add_seed_tasks_deduped(5), 10);
    assert_eq!(store.document().tasks.len(), 11);
    assert_eq!(store.add_seed_tasks_deduped(6), 0);
    assert_eq!(store.document().tasks.len(), 11);
}

#[test]
fn reset_clears_slots_keeps_tasks_and_can_be_undone() {
    let (mut store, id) = store_with_task(None);
    store.set_auto_seed(false);
    store.assign_task_to_slot("Mon|noon", &id);
    let before = store.document().clone();

    store.do_reset(300);
    assert_eq!(compute_progress(store.document()).total, 0);
    assert_eq!(store.document().tasks.len(), 1);

    assert!(store.restore());
    assert_eq!(store.document(), &before);
}

#[test]
fn reset_with_auto_seed_restores_missing_defaults() {
    let (mut store, _) = store_with_task(None);
    store.do_reset(300);
    assert_eq!(store.document().tasks.len(), 11);
}

#[test]
fn clear_all_cannot_be_undone() {
    let (mut store, _) = store_with_task(None);
    store.do_clear_all();
    assert!(store.document().tasks.is_empty());
    assert!(!store.restore());
    assert!(store.document().tasks.is_empty());
}

#[test]
fn clear_all_keeps_a_snapshot_from_an_earlier_action() {
    let (mut store, id) = store_with_task(None);
    store.delete_task(&id);
    store.do_clear_all();

    assert!(store.restore());
    assert_eq!(store.document().tasks.len(), 1);
}
