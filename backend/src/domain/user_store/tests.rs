//! Behaviour of the in-memory user store.

use std::sync::Arc;

use super::*;
use crate::domain::UserDraft;
use crate::test_support::{
    MutableClock, fixed_today, jim_smith, jim_smith_draft, store, store_with_clock,
    user_with_email,
};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn empty_store() -> InMemoryUserStore {
    store(18)
}

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}

fn born_on(birth_date: &str) -> User {
    UserDraft {
        birth_date: birth_date.to_owned(),
        ..jim_smith_draft()
    }
    .validate(fixed_today())
    .expect("valid draft")
}

fn email(raw: &str) -> Email {
    Email::new(raw).expect("valid email")
}

#[rstest]
#[tokio::test]
async fn find_all_preserves_insertion_order(empty_store: InMemoryUserStore) {
    assert!(empty_store.find_all().await.expect("list").is_empty());

    empty_store.create(jim_smith()).await.expect("first");
    empty_store
        .create(user_with_email("test_test@test.com"))
        .await
        .expect("second");

    let emails: Vec<String> = empty_store
        .find_all()
        .await
        .expect("list")
        .iter()
        .map(|user| user.email().to_string())
        .collect();
    assert_eq!(emails, ["test@test.com", "test_test@test.com"]);
}

#[rstest]
#[tokio::test]
async fn create_returns_the_stored_user(empty_store: InMemoryUserStore) {
    let created = empty_store.create(jim_smith()).await.expect("create");
    assert_eq!(created, jim_smith());
    assert_eq!(empty_store.find_all().await.expect("list"), [jim_smith()]);
}

#[rstest]
#[tokio::test]
async fn create_rejects_duplicate_email_regardless_of_other_fields(
    empty_store: InMemoryUserStore,
) {
    empty_store.create(jim_smith()).await.expect("create");
    let twin = UserDraft {
        first_name: "Other".to_owned(),
        phone: "+1".to_owned(),
        ..jim_smith_draft()
    }
    .validate(fixed_today())
    .expect("valid draft");

    let err = empty_store.create(twin).await.expect_err("duplicate");
    assert_eq!(err, UserRepositoryError::conflict("test@test.com"));
    assert_eq!(empty_store.find_all().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn create_rejects_under_age_users(empty_store: InMemoryUserStore) {
    let err = empty_store
        .create(born_on("2010-01-01"))
        .await
        .expect_err("under age");
    assert!(matches!(err, UserRepositoryError::Validation { ref code, .. } if code == "under_age"));
    assert!(empty_store.find_all().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn age_check_runs_before_duplicate_check(empty_store: InMemoryUserStore) {
    empty_store.create(jim_smith()).await.expect("create");
    let err = empty_store
        .create(born_on("2010-01-01"))
        .await
        .expect_err("under age duplicate");
    assert!(matches!(err, UserRepositoryError::Validation { .. }));
}

#[rstest]
#[tokio::test]
async fn eligibility_follows_the_clock() {
    let clock = Arc::new(MutableClock::on(fixed_today()));
    let store = store_with_clock(18, Arc::clone(&clock));
    // Turns eighteen tomorrow.
    let almost = born_on("2006-06-02");

    assert!(store.create(almost.clone()).await.is_err());
    clock.advance_days(1);
    assert!(store.create(almost).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn replace_keeps_position_and_count(empty_store: InMemoryUserStore) {
    empty_store.create(jim_smith()).await.expect("first");
    empty_store
        .create(user_with_email("second@test.com"))
        .await
        .expect("second");

    let updated = UserDraft {
        first_name: "Update first name".to_owned(),
        last_name: "Update last name".to_owned(),
        ..jim_smith_draft()
    }
    .validate(fixed_today())
    .expect("valid draft");
    let saved = empty_store.replace(updated.clone()).await.expect("replace");

    assert_eq!(saved, updated);
    let users = empty_store.find_all().await.expect("list");
    assert_eq!(users.len(), 2);
    assert_eq!(users.first(), Some(&updated));
}

#[rstest]
#[tokio::test]
async fn replace_unknown_email_is_not_found(empty_store: InMemoryUserStore) {
    let err = empty_store
        .replace(jim_smith())
        .await
        .expect_err("missing");
    assert_eq!(err, UserRepositoryError::not_found("test@test.com"));
}

#[rstest]
#[tokio::test]
async fn replace_enforces_the_age_rule(empty_store: InMemoryUserStore) {
    empty_store.create(jim_smith()).await.expect("create");
    let err = empty_store
        .replace(born_on("2010-01-01"))
        .await
        .expect_err("under age");
    assert!(matches!(err, UserRepositoryError::Validation { .. }));
    assert_eq!(empty_store.find_all().await.expect("list"), [jim_smith()]);
}

#[rstest]
#[tokio::test]
async fn partial_update_changes_named_fields_only(empty_store: InMemoryUserStore) {
    empty_store.create(jim_smith()).await.expect("create");

    let updated = empty_store
        .partial_update(&email("test@test.com"), &fields(json!({ "firstName": "Jane" })))
        .await
        .expect("patch");

    assert_eq!(updated.first_name().as_ref(), "Jane");
    assert_eq!(updated.last_name().as_ref(), "Smith");
    assert_eq!(empty_store.find_all().await.expect("list"), [updated]);
}

#[rstest]
#[case(json!({ "nickname": "JJ" }))]
#[case(json!({ "birthDate": "2024-05-31" }))]
#[case(json!({ "birthDate": "" }))]
#[case(json!({ "firstName": "Jane", "unknown": "x" }))]
#[case(json!({ "address": "New street", "birthDate": "2010-01-01" }))]
#[tokio::test]
async fn failed_partial_update_leaves_record_unchanged(
    empty_store: InMemoryUserStore,
    #[case] patch: Value,
) {
    empty_store.create(jim_smith()).await.expect("create");

    let err = empty_store
        .partial_update(&email("test@test.com"), &fields(patch))
        .await
        .expect_err("invalid patch");

    assert!(matches!(err, UserRepositoryError::Validation { .. }));
    assert_eq!(empty_store.find_all().await.expect("list"), [jim_smith()]);
}

#[rstest]
#[tokio::test]
async fn partial_update_unknown_email_is_not_found(empty_store: InMemoryUserStore) {
    let err = empty_store
        .partial_update(&email("test@test.com"), &fields(json!({ "firstName": "Jane" })))
        .await
        .expect_err("missing");
    assert_eq!(err, UserRepositoryError::not_found("test@test.com"));
}

#[rstest]
#[tokio::test]
async fn partial_update_cannot_steal_another_email(empty_store: InMemoryUserStore) {
    empty_store.create(jim_smith()).await.expect("first");
    empty_store
        .create(user_with_email("other@test.com"))
        .await
        .expect("second");

    let err = empty_store
        .partial_update(
            &email("test@test.com"),
            &fields(json!({ "email": "other@test.com" })),
        )
        .await
        .expect_err("taken email");
    assert_eq!(err, UserRepositoryError::conflict("other@test.com"));
}

#[rstest]
#[tokio::test]
async fn partial_update_can_rename_email(empty_store: InMemoryUserStore) {
    empty_store.create(jim_smith()).await.expect("create");
    empty_store
        .partial_update(
            &email("test@test.com"),
            &fields(json!({ "EMAIL": "renamed@test.com" })),
        )
        .await
        .expect("rename");

    assert!(empty_store.delete_by_email(&email("test@test.com")).await.is_err());
    assert!(empty_store.delete_by_email(&email("renamed@test.com")).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn delete_removes_then_reports_not_found(empty_store: InMemoryUserStore) {
    empty_store.create(jim_smith()).await.expect("create");

    empty_store
        .delete_by_email(&email("test@test.com"))
        .await
        .expect("delete");
    assert!(empty_store.find_all().await.expect("list").is_empty());

    let err = empty_store
        .delete_by_email(&email("test@test.com"))
        .await
        .expect_err("second delete");
    assert_eq!(err, UserRepositoryError::not_found("test@test.com"));
}

#[rstest]
#[tokio::test]
async fn create_patch_delete_scenario() {
    let clock = Arc::new(MutableClock::on(fixed_today()));
    let store = store_with_clock(18, clock);
    let key = email("test@test.com");

    store.create(jim_smith()).await.expect("born 2000, aged 24");
    let patched = store
        .partial_update(&key, &fields(json!({ "firstName": "Jane" })))
        .await
        .expect("patch");
    let mut expected = jim_smith();
    expected.set_first_name(
        crate::domain::PersonName::new("firstName", "Jane").expect("valid name"),
    );
    assert_eq!(patched, expected);

    store.delete_by_email(&key).await.expect("delete");
    assert!(store.find_all().await.expect("list").is_empty());
    assert_eq!(
        store.delete_by_email(&key).await,
        Err(UserRepositoryError::not_found("test@test.com"))
    );
}
