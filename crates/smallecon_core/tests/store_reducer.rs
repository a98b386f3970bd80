use chrono::NaiveDate;
use smallecon_core::catalog::default_tasks;
use smallecon_core::{
    Action, EntityKind, Event, Expense, ExpenseCategory, ModelValidationError, Project, SaveState,
    Store, StoreError, Task, TaskCategory, TaskId, Transition,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task_id(slug: &str) -> TaskId {
    TaskId::parse(slug).unwrap()
}

#[test]
fn complete_and_reset_bump_revision_only_on_change() {
    let mut store = Store::new(default_tasks());
    assert_eq!(store.revision(), 0);

    let first = store
        .dispatch(Action::CompleteTask(task_id("personal-budget")))
        .unwrap();
    let second = store
        .dispatch(Action::CompleteTask(task_id("personal-budget")))
        .unwrap();
    assert_eq!(first, Transition::Changed);
    assert_eq!(second, Transition::Unchanged);
    assert_eq!(store.revision(), 1);

    assert_eq!(
        store.reset_task(&task_id("personal-budget")),
        Transition::Changed
    );
    assert_eq!(
        store.reset_task(&task_id("personal-budget")),
        Transition::Unchanged
    );
    assert_eq!(store.revision(), 2);
    assert!(store.completed_task_ids().is_empty());
}

#[test]
fn unknown_task_completion_is_kept_but_not_counted() {
    let mut store = Store::new(default_tasks());
    store.complete_task(task_id("not-a-catalog-task"));

    assert_eq!(store.completed_task_ids().len(), 1);
    assert_eq!(store.progress().completed_count(), 0);
    assert_eq!(store.progress().unlocked_funding(), 0);
}

#[test]
fn add_event_normalizes_attendees() {
    let mut store = Store::new(Vec::new());
    let mut event = Event::new("Market day", date(2024, 5, 4), "Ana");
    event.attendees = vec![
        " Ben ".to_string(),
        "Ben".to_string(),
        "".to_string(),
        "Cy".to_string(),
    ];
    let id = event.id;

    store.dispatch(Action::AddEvent(event)).unwrap();

    assert_eq!(store.event(id).unwrap().attendees, vec!["Ben", "Cy"]);
}

#[test]
fn duplicate_and_missing_ids_are_rejected() {
    let mut store = Store::new(Vec::new());
    let event = Event::new("Market day", date(2024, 5, 4), "Ana");
    store.dispatch(Action::AddEvent(event.clone())).unwrap();

    let duplicate = store.dispatch(Action::AddEvent(event.clone())).unwrap_err();
    assert!(matches!(
        duplicate,
        StoreError::DuplicateId {
            kind: EntityKind::Event,
            ..
        }
    ));

    let missing = Expense::new(date(2024, 5, 4), 500, ExpenseCategory::Supplies, "Paper");
    let err = store
        .dispatch(Action::UpdateExpense(missing.clone()))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound {
            kind: EntityKind::Expense,
            ..
        }
    ));
    assert!(store.dispatch(Action::RemoveExpense(missing.id)).is_err());
    assert_eq!(store.revision(), 1);
}

#[test]
fn invalid_records_never_enter_the_store() {
    let mut store = Store::new(Vec::new());

    let zero = Expense::new(date(2024, 5, 4), 0, ExpenseCategory::Other, "Nothing");
    let err = store.dispatch(Action::AddExpense(zero)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ModelValidationError::ZeroAmount { .. })
    ));

    let mut bad_url = Expense::new(date(2024, 5, 4), 100, ExpenseCategory::Other, "Fee");
    bad_url.receipt_url = Some("ftp://receipts/1".to_string());
    assert!(store.dispatch(Action::AddExpense(bad_url)).is_err());

    let blank = Project::new("   ");
    assert!(store.dispatch(Action::AddProject(blank)).is_err());

    assert!(store.expenses().is_empty());
    assert!(store.projects().is_empty());
    assert_eq!(store.revision(), 0);
}

#[test]
fn update_with_identical_record_is_unchanged() {
    let mut store = Store::new(Vec::new());
    let project = Project::new("Co-op kitchen");
    store.dispatch(Action::AddProject(project.clone())).unwrap();

    let transition = store.dispatch(Action::UpdateProject(project)).unwrap();
    assert_eq!(transition, Transition::Unchanged);
    assert_eq!(store.revision(), 1);
}

#[test]
fn save_state_tracks_dirty_revisions() {
    let mut store = Store::new(default_tasks());
    assert!(store.is_dirty());
    assert_eq!(store.save_state(), &SaveState::Idle);

    store.complete_task(task_id("mission-statement"));
    let snapshot = store.begin_save();
    assert_eq!(
        store.save_state(),
        &SaveState::Saving {
            revision: snapshot.revision
        }
    );
    store.finish_save(snapshot.revision, Ok(()));
    assert!(!store.is_dirty());

    store.complete_task(task_id("community-map"));
    assert!(store.is_dirty());
    let snapshot = store.begin_save();
    store.finish_save(snapshot.revision, Err("disk full".to_string()));
    assert_eq!(
        store.save_state(),
        &SaveState::Failed {
            message: "disk full".to_string()
        }
    );
    assert!(store.is_dirty());
}

#[test]
fn restore_replaces_persisted_slices_and_counts_as_saved() {
    let mut source = Store::new(default_tasks());
    source.complete_task(task_id("personal-budget"));
    source
        .dispatch(Action::AddEvent(Event::new("Fair", date(2024, 6, 1), "Ana")))
        .unwrap();
    let snapshot = source.snapshot();

    let mut target = Store::new(default_tasks());
    target
        .dispatch(Action::AddProject(Project::new("Kept")))
        .unwrap();
    target.restore(snapshot).unwrap();

    assert_eq!(target.completed_task_ids(), source.completed_task_ids());
    assert_eq!(target.events(), source.events());
    assert_eq!(target.projects().len(), 1);
    assert!(!target.is_dirty());
}

#[test]
fn snapshot_serializes_with_plain_ids_and_snake_case_enums() {
    let mut store = Store::new(default_tasks());
    store.complete_task(task_id("project-plan"));
    let expense = Expense::new(date(2024, 5, 4), 750, ExpenseCategory::Supplies, "Markers");
    store.dispatch(Action::AddExpense(expense)).unwrap();

    let value = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(value["completed_task_ids"], serde_json::json!(["project-plan"]));
    assert_eq!(value["expenses"][0]["category"], "supplies");
    assert_eq!(value["expenses"][0]["status"], "pending");
    assert_eq!(value["expenses"][0]["date"], "2024-05-04");

    let bad_id = serde_json::json!({
        "revision": 0,
        "completed_task_ids": ["Not A Slug"],
        "events": [],
        "expenses": []
    });
    assert!(serde_json::from_value::<smallecon_core::StoreSnapshot>(bad_id).is_err());
}

#[test]
fn repeated_catalog_ids_keep_the_first_task() {
    let tasks = vec![
        Task::new(task_id("budget"), "Budget", TaskCategory::Finances, 50),
        Task::new(task_id("budget"), "Budget again", TaskCategory::Finances, 70),
        Task::new(task_id("pitch"), "Pitch", TaskCategory::Business, 300),
    ];
    let mut store = Store::new(tasks);
    store.complete_task(task_id("budget"));

    assert_eq!(store.tasks().len(), 2);
    assert_eq!(store.task(&task_id("budget")).unwrap().title, "Budget");
    let progress = store.progress();
    assert_eq!(progress.completed_count(), 1);
    assert_eq!(progress.unlocked_funding(), 50);
    assert_eq!(progress.total_potential_funding(), 350);
}
