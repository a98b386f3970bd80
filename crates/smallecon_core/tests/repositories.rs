use chrono::NaiveDate;
use smallecon_core::db::open_db_in_memory;
use smallecon_core::repo::completion_repo::{CompletionRepository, SqliteCompletionRepository};
use smallecon_core::repo::event_repo::{EventRepository, SqliteEventRepository};
use smallecon_core::repo::expense_repo::{
    ExpenseListQuery, ExpenseRepository, SqliteExpenseRepository,
};
use smallecon_core::{
    Event, EventFunding, EventImpact, EventMilestone, Expense, ExpenseCategory, ExpenseStatus,
    FundingCategory, RepoError, TaskId,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task_id(slug: &str) -> TaskId {
    TaskId::parse(slug).unwrap()
}

fn full_event() -> Event {
    let mut event = Event::new("Harvest fair", date(2024, 9, 14), "Ana");
    event.description = "Stalls and music".to_string();
    event.location = "Town square".to_string();
    event.attendees = vec!["Ben".to_string(), "Cy".to_string()];
    event.funding = Some(EventFunding {
        total_funded: 400,
        funding_goal: 1_000,
        funding_source: "Local bank".to_string(),
        funding_category: FundingCategory::Sponsorship,
    });
    event.impact = Some(EventImpact {
        participants_reached: 120,
        summary: "Twelve new vendors".to_string(),
    });
    event.milestones = vec![EventMilestone {
        title: "Permit".to_string(),
        completed: true,
        due_date: Some(date(2024, 8, 1)),
    }];
    event
}

#[test]
fn completion_repository_marks_clears_and_replaces() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCompletionRepository::new(&conn);

    assert!(repo.mark_completed(&task_id("project-plan")).unwrap());
    assert!(!repo.mark_completed(&task_id("project-plan")).unwrap());
    assert!(repo.mark_completed(&task_id("business-model")).unwrap());
    assert_eq!(
        repo.list_completed().unwrap(),
        vec![task_id("business-model"), task_id("project-plan")]
    );

    assert!(repo.clear_completed(&task_id("project-plan")).unwrap());
    assert!(!repo.clear_completed(&task_id("project-plan")).unwrap());

    repo.replace_completed(&[task_id("launch-pitch")]).unwrap();
    assert_eq!(repo.list_completed().unwrap(), vec![task_id("launch-pitch")]);
}

#[test]
fn event_repository_keeps_nested_blocks() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);
    let event = full_event();

    repo.create_event(&event).unwrap();
    assert_eq!(repo.get_event(event.id).unwrap(), Some(event.clone()));

    let mut edited = event.clone();
    edited.funding = None;
    edited.milestones[0].completed = false;
    repo.update_event(&edited).unwrap();
    assert_eq!(repo.get_event(event.id).unwrap(), Some(edited));

    repo.delete_event(event.id).unwrap();
    assert_eq!(repo.get_event(event.id).unwrap(), None);
    assert!(matches!(
        repo.delete_event(event.id),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn event_repository_lists_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);
    let late = Event::new("Late", date(2025, 1, 1), "Ana");
    let early = Event::new("Early", date(2024, 1, 1), "Ana");

    repo.create_event(&late).unwrap();
    repo.create_event(&early).unwrap();
    let titles: Vec<String> = repo
        .list_events()
        .unwrap()
        .into_iter()
        .map(|event| event.title)
        .collect();
    assert_eq!(titles, vec!["Late", "Early"]);

    repo.replace_events(&[early.clone()]).unwrap();
    assert_eq!(repo.list_events().unwrap(), vec![early]);
}

#[test]
fn event_repository_rejects_invalid_and_missing_records() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);

    let blank = Event::new("", date(2024, 1, 1), "Ana");
    assert!(matches!(
        repo.create_event(&blank),
        Err(RepoError::Validation(_))
    ));

    let unsaved = Event::new("Unsaved", date(2024, 1, 1), "Ana");
    assert!(matches!(
        repo.update_event(&unsaved),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn expense_repository_filters_by_status_and_category() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExpenseRepository::new(&conn);

    let mut tables = Expense::new(date(2024, 2, 1), 8_000, ExpenseCategory::Equipment, "Tables");
    tables.status = ExpenseStatus::Approved;
    tables.receipt_url = Some("https://example.org/receipts/7".to_string());
    let flyers = Expense::new(date(2024, 2, 2), 1_200, ExpenseCategory::Marketing, "Flyers");
    let fuel = Expense::new(date(2024, 2, 3), 3_000, ExpenseCategory::Travel, "Fuel");
    for expense in [&tables, &flyers, &fuel] {
        repo.create_expense(expense).unwrap();
    }

    assert_eq!(repo.get_expense(tables.id).unwrap(), Some(tables.clone()));

    let pending = repo
        .list_expenses(&ExpenseListQuery {
            status: Some(ExpenseStatus::Pending),
            category: None,
        })
        .unwrap();
    assert_eq!(pending, vec![flyers.clone(), fuel.clone()]);

    let travel = repo
        .list_expenses(&ExpenseListQuery {
            status: None,
            category: Some(ExpenseCategory::Travel),
        })
        .unwrap();
    assert_eq!(travel, vec![fuel.clone()]);

    let mut rejected = flyers.clone();
    rejected.status = ExpenseStatus::Rejected;
    repo.update_expense(&rejected).unwrap();
    assert_eq!(repo.get_expense(flyers.id).unwrap(), Some(rejected));

    repo.delete_expense(fuel.id).unwrap();
    assert!(matches!(
        repo.delete_expense(Uuid::new_v4()),
        Err(RepoError::NotFound(_))
    ));
    assert_eq!(
        repo.list_expenses(&ExpenseListQuery::default()).unwrap().len(),
        2
    );
}

#[test]
fn expense_repository_rejects_unknown_stored_category() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExpenseRepository::new(&conn);
    let expense = Expense::new(date(2024, 2, 1), 500, ExpenseCategory::Other, "Stamps");
    repo.create_expense(&expense).unwrap();

    conn.execute(
        "UPDATE expenses SET category = 'mystery' WHERE uuid = ?1;",
        [expense.id.to_string()],
    )
    .unwrap();

    assert!(matches!(
        repo.get_expense(expense.id),
        Err(RepoError::InvalidData(_))
    ));
}
