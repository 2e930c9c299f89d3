use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    AccountCmd, AccountKind, BudgetCmd, BudgetStatus, CategoryCmd, CategoryType, Engine,
    EngineError, Frequency, GoalCmd, MoneyCents, RecurringRuleCmd, TransactionCmd,
    TransactionKind, TransactionListFilter,
};
use migration::MigratorTrait;

async fn insert_user(db: &DatabaseConnection, username: &str) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password) VALUES (?, ?)",
        vec![username.into(), "password".into()],
    ))
    .await
    .unwrap();
}

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    insert_user(&db, "alice").await;
    insert_user(&db, "bob").await;
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn money(raw: &str) -> MoneyCents {
    raw.parse().unwrap()
}

async fn wallet(engine: &Engine, user: &str) -> i64 {
    engine
        .create_account(user, AccountCmd::new("Wallet", AccountKind::Wallet))
        .await
        .unwrap()
        .id
}

async fn expense_category(engine: &Engine, user: &str, name: &str) -> i64 {
    engine
        .create_category(user, CategoryCmd::new(name, CategoryType::Expense))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn report_for_salary_and_food_month() {
    let (engine, _db) = engine_with_db().await;
    let account = wallet(&engine, "alice").await;
    let food = expense_category(&engine, "alice", "Food").await;

    engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Income, money("1000"), date(2024, 1, 5)),
        )
        .await
        .unwrap();
    engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Expense, money("400"), date(2024, 1, 6))
                .category_id(food),
        )
        .await
        .unwrap();
    engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Transfer, money("50"), date(2024, 1, 7)),
        )
        .await
        .unwrap();
    engine
        .create_budget("alice", BudgetCmd::new(food, 2024, 1, money("300")))
        .await
        .unwrap();

    let report = engine
        .report("alice", Some("2024-01-01"), Some("2024-01-31"), date(2030, 1, 1))
        .await
        .unwrap();

    assert_eq!(report.totals.income.to_string(), "1000.00");
    assert_eq!(report.totals.expense.to_string(), "400.00");
    assert_eq!(report.totals.balance.to_string(), "600.00");
    assert_eq!(report.by_category_expense.len(), 1);
    assert_eq!(report.by_category_expense[0].category.as_deref(), Some("Food"));
    assert_eq!(report.by_category_expense[0].total, money("400"));

    let line = &report.budgets[0];
    assert_eq!(line.category, "Food");
    assert_eq!(line.planned, money("300"));
    assert_eq!(line.spent, money("400"));
    assert_eq!(line.remaining, MoneyCents::ZERO);
    assert_eq!(line.status, BudgetStatus::Over);
}

#[tokio::test]
async fn report_defaults_to_month_of_today() {
    let (engine, _db) = engine_with_db().await;
    let account = wallet(&engine, "alice").await;
    engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Income, money("10"), date(2024, 2, 29)),
        )
        .await
        .unwrap();
    engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Income, money("99"), date(2024, 3, 1)),
        )
        .await
        .unwrap();

    let report = engine
        .report("alice", Some("not-a-date"), None, date(2024, 2, 10))
        .await
        .unwrap();
    assert_eq!(report.period.start, date(2024, 2, 1));
    assert_eq!(report.period.end, date(2024, 2, 29));
    assert_eq!(report.totals.income, money("10"));
}

#[tokio::test]
async fn empty_period_has_zero_totals() {
    let (engine, _db) = engine_with_db().await;
    let report = engine
        .report("alice", Some("2024-01-01"), Some("2024-01-31"), date(2024, 1, 1))
        .await
        .unwrap();
    assert_eq!(report.totals.income.to_string(), "0.00");
    assert_eq!(report.totals.expense.to_string(), "0.00");
    assert_eq!(report.totals.balance.to_string(), "0.00");
    assert!(report.by_category_expense.is_empty());
    assert!(report.budgets.is_empty());
    assert!(report.goals.is_empty());
}

#[tokio::test]
async fn goal_progress_uses_account_history_up_to_period_end() {
    let (engine, _db) = engine_with_db().await;
    let savings = engine
        .create_account(
            "alice",
            AccountCmd::new("Savings", AccountKind::Bank).opening_balance(money("5000")),
        )
        .await
        .unwrap()
        .id;
    for (kind, amount, day) in [
        (TransactionKind::Income, "800", date(2023, 12, 1)),
        (TransactionKind::Expense, "200", date(2024, 1, 10)),
        (TransactionKind::Income, "9000", date(2024, 2, 1)),
    ] {
        engine
            .create_transaction("alice", TransactionCmd::new(savings, kind, money(amount), day))
            .await
            .unwrap();
    }
    engine
        .create_goal(
            "alice",
            GoalCmd::new("Trip", money("1200")).account_id(savings),
        )
        .await
        .unwrap();
    engine
        .create_goal("alice", GoalCmd::new("Someday", money("0")))
        .await
        .unwrap();

    let report = engine
        .report("alice", Some("2024-01-01"), Some("2024-01-31"), date(2024, 1, 1))
        .await
        .unwrap();

    let trip = &report.goals[0];
    assert_eq!(trip.goal, "Trip");
    assert_eq!(trip.account.as_deref(), Some("Savings"));
    assert_eq!(trip.estimated_balance, Some(money("600")));
    assert_eq!(trip.progress_percent, 50);

    let someday = &report.goals[1];
    assert_eq!(someday.account, None);
    assert_eq!(someday.estimated_balance, None);
    assert_eq!(someday.progress_percent, 0);
}

#[tokio::test]
async fn owners_are_isolated() {
    let (engine, _db) = engine_with_db().await;
    let alice_account = wallet(&engine, "alice").await;
    let alice_food = expense_category(&engine, "alice", "Food").await;
    let bob_account = wallet(&engine, "bob").await;

    assert!(engine.list_accounts("bob").await.unwrap().iter().all(|a| a.user_id == "bob"));
    assert!(matches!(
        engine.account("bob", alice_account).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_category("bob", alice_food).await,
        Err(EngineError::KeyNotFound(_))
    ));

    let err = engine
        .create_transaction(
            "bob",
            TransactionCmd::new(alice_account, TransactionKind::Expense, money("1"), date(2024, 1, 1)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine
        .create_transaction(
            "bob",
            TransactionCmd::new(bob_account, TransactionKind::Expense, money("1"), date(2024, 1, 1))
                .category_id(alice_food),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine
        .create_transaction(
            "bob",
            TransactionCmd::new(bob_account, TransactionKind::Expense, money("1"), date(2024, 1, 1))
                .category_id(9_999),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    engine
        .create_transaction(
            "alice",
            TransactionCmd::new(alice_account, TransactionKind::Income, money("70"), date(2024, 1, 2)),
        )
        .await
        .unwrap();
    let bob_report = engine
        .report("bob", Some("2024-01-01"), Some("2024-01-31"), date(2024, 1, 1))
        .await
        .unwrap();
    assert_eq!(bob_report.totals.income, MoneyCents::ZERO);
}

#[tokio::test]
async fn list_orders_and_filters() {
    let (engine, _db) = engine_with_db().await;
    let account = wallet(&engine, "alice").await;
    let card = engine
        .create_account("alice", AccountCmd::new("Card", AccountKind::Card))
        .await
        .unwrap()
        .id;
    let food = expense_category(&engine, "alice", "Food").await;

    let first = engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Expense, money("5"), date(2024, 1, 3))
                .category_id(food),
        )
        .await
        .unwrap();
    let second = engine
        .create_transaction(
            "alice",
            TransactionCmd::new(card, TransactionKind::Income, money("7"), date(2024, 1, 3)),
        )
        .await
        .unwrap();
    let older = engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Expense, money("9"), date(2023, 12, 30)),
        )
        .await
        .unwrap();

    let all = engine
        .list_transactions("alice", &TransactionListFilter::default())
        .await
        .unwrap();
    let ids: Vec<i64> = all.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second.id, first.id, older.id]);

    let expenses = engine
        .list_transactions(
            "alice",
            &TransactionListFilter {
                kind: Some(TransactionKind::Expense),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(expenses.len(), 2);

    let january_account = engine
        .list_transactions(
            "alice",
            &TransactionListFilter {
                start: Some(date(2024, 1, 1)),
                end: Some(date(2024, 1, 31)),
                account_id: Some(account),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(january_account, vec![first.clone()]);

    let by_category = engine
        .list_transactions(
            "alice",
            &TransactionListFilter {
                category_id: Some(food),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_category, vec![first]);
}

#[tokio::test]
async fn export_matches_listing() {
    let (engine, _db) = engine_with_db().await;
    let account = wallet(&engine, "alice").await;
    let food = expense_category(&engine, "alice", "Food").await;
    engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Expense, money("12.5"), date(2024, 1, 3))
                .category_id(food)
                .note("pizza, drinks"),
        )
        .await
        .unwrap();
    engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Income, money("100"), date(2024, 1, 4)),
        )
        .await
        .unwrap();

    let filter = TransactionListFilter::default();
    let listed = engine.list_transactions("alice", &filter).await.unwrap();
    let csv = engine.export_transactions("alice", &filter).await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "id,date,kind,amount,account,category,note");
    assert_eq!(lines.len(), listed.len() + 1);
    assert!(lines[1].starts_with(&format!("{},2024-01-04,INCOME,100.00,Wallet,,", listed[0].id)));
    assert!(lines[2].ends_with(",EXPENSE,12.50,Wallet,Food,\"pizza, drinks\""));

    let empty = engine.export_transactions("bob", &filter).await.unwrap();
    assert_eq!(empty, "id,date,kind,amount,account,category,note\n");
}

#[tokio::test]
async fn category_cycles_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let root = expense_category(&engine, "alice", "Home").await;
    let child = engine
        .create_category(
            "alice",
            CategoryCmd::new("Rent", CategoryType::Expense).parent_id(root),
        )
        .await
        .unwrap();
    assert_eq!(child.parent_id, Some(root));

    let err = engine
        .update_category(
            "alice",
            root,
            CategoryCmd::new("Home", CategoryType::Expense).parent_id(child.id),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidCategory(_)));

    let err = engine
        .update_category(
            "alice",
            root,
            CategoryCmd::new("Home", CategoryType::Expense).parent_id(root),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidCategory(_)));

    engine.delete_category("alice", root).await.unwrap();
    assert_eq!(engine.category("alice", child.id).await.unwrap().parent_id, None);
}

#[tokio::test]
async fn budget_rules() {
    let (engine, _db) = engine_with_db().await;
    let food = expense_category(&engine, "alice", "Food").await;

    let budget = engine
        .create_budget("alice", BudgetCmd::new(food, 2024, 1, money("300")))
        .await
        .unwrap();
    assert!(matches!(
        engine
            .create_budget("alice", BudgetCmd::new(food, 2024, 1, money("10")))
            .await,
        Err(EngineError::ExistingKey(_))
    ));
    assert!(matches!(
        engine
            .create_budget("alice", BudgetCmd::new(food, 2024, 13, money("10")))
            .await,
        Err(EngineError::InvalidDate(_))
    ));
    assert!(matches!(
        engine
            .create_budget("alice", BudgetCmd::new(food, 2024, 2, money("-1")))
            .await,
        Err(EngineError::InvalidAmount(_))
    ));

    let updated = engine
        .update_budget("alice", budget.id, BudgetCmd::new(food, 2024, 1, money("350")))
        .await
        .unwrap();
    assert_eq!(updated.planned, money("350"));

    engine.delete_category("alice", food).await.unwrap();
    assert!(engine.list_budgets("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn transaction_validation() {
    let (engine, _db) = engine_with_db().await;
    let account = wallet(&engine, "alice").await;

    let err = engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Expense, MoneyCents::ZERO, date(2024, 1, 1)),
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Expense, money("1"), date(2024, 1, 1))
                .note("n".repeat(201)),
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = engine
        .create_account("alice", AccountCmd::new("   ", AccountKind::Bank))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}

#[tokio::test]
async fn deleting_account_removes_its_history() {
    let (engine, _db) = engine_with_db().await;
    let account = wallet(&engine, "alice").await;
    let tx = engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Expense, money("30"), date(2024, 1, 1))
                .recurring(true),
        )
        .await
        .unwrap();
    let rule = engine
        .create_recurring_rule(
            "alice",
            RecurringRuleCmd::new(tx.id, Frequency::Monthly, 1, date(2024, 2, 1)),
        )
        .await
        .unwrap();
    let goal = engine
        .create_goal("alice", GoalCmd::new("Car", money("100")).account_id(account))
        .await
        .unwrap();

    engine.delete_account("alice", account).await.unwrap();

    assert!(engine
        .list_transactions("alice", &TransactionListFilter::default())
        .await
        .unwrap()
        .is_empty());
    assert!(matches!(
        engine.recurring_rule("alice", rule.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert_eq!(engine.goal("alice", goal.id).await.unwrap().account_id, None);
}

#[tokio::test]
async fn recurring_rule_schedule() {
    let (engine, _db) = engine_with_db().await;
    let account = wallet(&engine, "alice").await;
    let tx = engine
        .create_transaction(
            "alice",
            TransactionCmd::new(account, TransactionKind::Income, money("2500"), date(2024, 1, 1)),
        )
        .await
        .unwrap();

    let err = engine
        .create_recurring_rule(
            "alice",
            RecurringRuleCmd::new(tx.id, Frequency::Weekly, 8, date(2024, 1, 8)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidSchedule(_)));

    let rule = engine
        .create_recurring_rule(
            "alice",
            RecurringRuleCmd::new(tx.id, Frequency::Monthly, 31, date(2024, 1, 31)),
        )
        .await
        .unwrap();
    assert_eq!(engine.list_recurring_rules("alice").await.unwrap(), vec![rule.clone()]);

    let err = engine
        .create_recurring_rule(
            "bob",
            RecurringRuleCmd::new(tx.id, Frequency::Monthly, 1, date(2024, 1, 31)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    engine.delete_transaction("alice", tx.id).await.unwrap();
    assert!(engine.list_recurring_rules("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn seed_defaults_is_idempotent() {
    let (engine, _db) = engine_with_db().await;

    let first = engine.seed_defaults("alice").await.unwrap();
    assert_eq!(first.categories_created, 10);
    assert_eq!(first.accounts_created, 1);

    let second = engine.seed_defaults("alice").await.unwrap();
    assert_eq!(second.categories_created, 0);
    assert_eq!(second.accounts_created, 0);

    let categories = engine.list_categories("alice").await.unwrap();
    assert_eq!(
        categories
            .iter()
            .filter(|c| c.category_type == CategoryType::Income)
            .count(),
        3
    );
    assert!(engine.list_categories("bob").await.unwrap().is_empty());

    assert!(matches!(
        engine.seed_defaults("carol").await,
        Err(EngineError::KeyNotFound(_))
    ));
}
