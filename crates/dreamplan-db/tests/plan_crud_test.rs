//! Integration tests for plan CRUD and status transitions.
//!
//! Each test creates a unique temporary database, runs migrations, and drops
//! it on completion so tests are fully isolated.

use std::collections::BTreeMap;

use sqlx::PgPool;
use uuid::Uuid;

use dreamplan_db::models::{MotivationFuel, PlanStatus};
use dreamplan_db::queries::plans::{self, NewPlan};
use dreamplan_test_utils::{create_test_db, drop_test_db};

/// Insert a fully-populated plan and return it.
async fn insert_sample_plan(pool: &PgPool) -> dreamplan_db::models::Plan {
    let monthly_costs: BTreeMap<String, f64> =
        [("Mortgage".to_owned(), 2000.0), ("Travel".to_owned(), 800.0)]
            .into_iter()
            .collect();
    let daily_focus = vec!["deep work".to_owned(), "health".to_owned()];
    let things_to_cut = vec!["doomscrolling".to_owned()];
    let daily_wins = vec!["shipped something".to_owned()];

    plans::insert_plan(
        pool,
        &NewPlan {
            has_decided: true,
            habits_to_cut: "late nights",
            new_version_description: "focused and rested",
            motivation_fuel: Some(MotivationFuel::Both),
            fuel_description: "family freedom",
            daily_fuel_reminder: "note on the mirror",
            dream_day: "wake at six, write, train",
            dream_week: "four days deep work",
            ideal_living: "quiet house near the hills",
            monthly_costs: &monthly_costs,
            current_expenses: Some(4500.0),
            dream_expenses: Some(2800.0),
            financial_gap: -1700.0,
            daily_focus: &daily_focus,
            things_to_cut: &things_to_cut,
            environment_changes: "phone out of the bedroom",
            progress_tracking_method: "weekly journal",
            daily_wins: &daily_wins,
            daily_planning_routine: "evening shutdown list",
            action_commitment: "one outreach call per day",
            additional_thoughts: "",
        },
    )
    .await
    .expect("insert_plan should succeed")
}

// -----------------------------------------------------------------------
// Plan CRUD tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn insert_and_get_plan() {
    let (pool, db_name) = create_test_db().await;

    let plan = insert_sample_plan(&pool).await;

    assert_eq!(plan.status, PlanStatus::Draft);
    assert!(plan.has_decided);
    assert_eq!(plan.habits_to_cut, "late nights");
    assert_eq!(plan.motivation_fuel, Some(MotivationFuel::Both));
    assert_eq!(plan.current_expenses, Some(4500.0));
    assert_eq!(plan.dream_expenses, Some(2800.0));
    assert_eq!(plan.financial_gap, -1700.0);
    assert_eq!(plan.monthly_costs.0.get("Mortgage"), Some(&2000.0));
    assert_eq!(plan.daily_focus.len(), 2);
    assert!(plan.completed_at.is_none());

    // Fetch it back.
    let fetched = plans::get_plan(&pool, plan.id)
        .await
        .expect("get_plan should succeed")
        .expect("plan should exist");

    assert_eq!(fetched.id, plan.id);
    assert_eq!(fetched.dream_day, "wake at six, write, train");

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn unset_expenses_persist_as_null() {
    let (pool, db_name) = create_test_db().await;

    let monthly_costs = BTreeMap::new();
    let empty: Vec<String> = Vec::new();
    let plan = plans::insert_plan(
        &pool,
        &NewPlan {
            has_decided: false,
            habits_to_cut: "",
            new_version_description: "",
            motivation_fuel: None,
            fuel_description: "",
            daily_fuel_reminder: "",
            dream_day: "",
            dream_week: "",
            ideal_living: "",
            monthly_costs: &monthly_costs,
            current_expenses: None,
            dream_expenses: None,
            financial_gap: 0.0,
            daily_focus: &empty,
            things_to_cut: &empty,
            environment_changes: "",
            progress_tracking_method: "",
            daily_wins: &empty,
            daily_planning_routine: "",
            action_commitment: "",
            additional_thoughts: "",
        },
    )
    .await
    .expect("insert_plan should succeed");

    let fetched = plans::get_plan(&pool, plan.id).await.unwrap().unwrap();
    assert_eq!(fetched.current_expenses, None);
    assert_eq!(fetched.dream_expenses, None);
    assert_eq!(fetched.motivation_fuel, None);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn get_plan_returns_none_for_missing_id() {
    let (pool, db_name) = create_test_db().await;

    let result = plans::get_plan(&pool, Uuid::new_v4())
        .await
        .expect("get_plan should not error");

    assert!(result.is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn list_plans_returns_newest_first() {
    let (pool, db_name) = create_test_db().await;

    let first = insert_sample_plan(&pool).await;
    let second = insert_sample_plan(&pool).await;

    let all = plans::list_plans(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    let ids: Vec<Uuid> = all.iter().map(|p| p.id).collect();
    assert!(ids.contains(&first.id));
    assert!(ids.contains(&second.id));
    assert!(all[0].created_at >= all[1].created_at);

    pool.close().await;
    drop_test_db(&db_name).await;
}

// -----------------------------------------------------------------------
// Status transition tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn status_transitions_draft_analyzing_completed() {
    let (pool, db_name) = create_test_db().await;

    let plan = insert_sample_plan(&pool).await;
    assert_eq!(plan.status, PlanStatus::Draft);

    plans::update_plan_status(&pool, plan.id, PlanStatus::Analyzing)
        .await
        .expect("update should succeed");
    let updated = plans::get_plan(&pool, plan.id).await.unwrap().unwrap();
    assert_eq!(updated.status, PlanStatus::Analyzing);
    assert!(
        updated.completed_at.is_none(),
        "completed_at should not be set for analyzing"
    );

    plans::update_plan_status(&pool, plan.id, PlanStatus::Completed)
        .await
        .expect("update should succeed");
    let updated = plans::get_plan(&pool, plan.id).await.unwrap().unwrap();
    assert_eq!(updated.status, PlanStatus::Completed);
    assert!(
        updated.completed_at.is_some(),
        "completed_at should be set when transitioning to completed"
    );

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn update_plan_status_fails_for_missing_plan() {
    let (pool, db_name) = create_test_db().await;

    let result = plans::update_plan_status(&pool, Uuid::new_v4(), PlanStatus::Analyzing).await;
    assert!(result.is_err());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn completed_at_is_not_overwritten() {
    let (pool, db_name) = create_test_db().await;

    let plan = insert_sample_plan(&pool).await;

    plans::update_plan_status(&pool, plan.id, PlanStatus::Completed)
        .await
        .unwrap();
    let first = plans::get_plan(&pool, plan.id).await.unwrap().unwrap();
    let original_completed_at = first.completed_at.unwrap();

    // A second transition to completed must keep the original timestamp.
    plans::update_plan_status(&pool, plan.id, PlanStatus::Completed)
        .await
        .unwrap();
    let second = plans::get_plan(&pool, plan.id).await.unwrap().unwrap();
    assert_eq!(
        second.completed_at.unwrap(),
        original_completed_at,
        "completed_at should not be overwritten"
    );

    pool.close().await;
    drop_test_db(&db_name).await;
}
