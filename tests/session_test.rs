//! Collection view workflows against the in-memory API

use chrono::{TimeZone, Utc};
use student_roster::{
    AutoConfirm, DraftField, EntryForm, MockApi, RosterApi, RosterError, RosterSession, Student,
    StudentId,
};

fn student(id: &str, name: &str, ts: i64) -> Student {
    Student {
        id: StudentId::from(id),
        name: name.to_string(),
        age: 12,
        address: "1 Main St".to_string(),
        grade: 6,
        avatar: String::new(),
        created_at: Some(Utc.timestamp_opt(ts, 0).unwrap()),
    }
}

/// Ann is newer than Bob but stored after him.
async fn loaded_session() -> RosterSession<MockApi> {
    let api = MockApi::new().with_students(vec![student("2", "Bob", 100), student("1", "Ann", 200)]);
    let mut session = RosterSession::new(api);
    session.load().await.unwrap();
    session
}

fn visible_names<A: RosterApi>(session: &RosterSession<A>) -> Vec<String> {
    session.visible().iter().map(|s| s.name.clone()).collect()
}

#[tokio::test]
async fn test_load_orders_newest_first() {
    let session = loaded_session().await;
    assert_eq!(visible_names(&session), vec!["Ann", "Bob"]);
    assert!(!session.state().is_loading());
}

#[tokio::test]
async fn test_load_failure_is_reported() {
    let mut session = RosterSession::new(MockApi::new().with_available(false));
    assert!(session.load().await.is_err());

    assert!(!session.state().is_loading());
    assert!(session.state().records().is_empty());
    assert!(session.state().error().unwrap().contains("503"));

    session.dismiss_error();
    assert!(session.state().error().is_none());
}

#[tokio::test]
async fn test_search_matches_exact_case() {
    let mut session = loaded_session().await;

    session.search("an");
    assert!(session.visible().is_empty());

    session.search("nn");
    assert_eq!(visible_names(&session), vec!["Ann"]);

    session.search("");
    assert_eq!(visible_names(&session), vec!["Ann", "Bob"]);
}

#[tokio::test]
async fn test_confirmed_delete_removes_everywhere() {
    let mut session = loaded_session().await;
    session.search("Bob");

    let deleted = session
        .delete(&StudentId::from("2"), &AutoConfirm(true))
        .await
        .unwrap();
    assert!(deleted);

    assert!(session.visible().is_empty());
    let ids: Vec<_> = session.state().records().iter().map(|s| s.id.to_string()).collect();
    assert_eq!(ids, vec!["1"]);

    // A fresh load agrees with local state
    session.load().await.unwrap();
    assert_eq!(session.state().records().len(), 1);
}

#[tokio::test]
async fn test_declined_delete_makes_no_call() {
    let mut session = loaded_session().await;
    let calls = session.api().call_count();

    let deleted = session
        .delete(&StudentId::from("2"), &AutoConfirm(false))
        .await
        .unwrap();

    assert!(!deleted);
    assert_eq!(session.api().call_count(), calls);
    assert_eq!(session.state().records().len(), 2);
}

#[tokio::test]
async fn test_failed_delete_leaves_state() {
    let mut session = loaded_session().await;
    session.api().set_available(false);

    let result = session.delete(&StudentId::from("2"), &AutoConfirm(true)).await;
    assert!(result.is_err());
    assert_eq!(session.state().records().len(), 2);
    assert!(session.state().error().is_some());
}

#[tokio::test]
async fn test_save_edit_replaces_record() {
    let mut session = loaded_session().await;
    let bob_before = session.state().records()[1].clone();

    session.begin_edit(&StudentId::from("1")).unwrap();
    session.edit_field(DraftField::Name, "Annie");
    session.edit_field(DraftField::Grade, "7");
    let saved = session.save_edit().await.unwrap();

    assert!(!session.state().is_editing());
    assert_eq!(session.state().records()[0], saved);
    assert_eq!(saved.name, "Annie");
    assert_eq!(saved.grade, 7);
    assert_eq!(session.state().records()[1], bob_before);
    assert_eq!(session.api().stored().await[1].name, "Annie");
}

#[tokio::test]
async fn test_saved_edit_respects_active_filter() {
    let mut session = loaded_session().await;
    session.search("Ann");

    session.begin_edit(&StudentId::from("1")).unwrap();
    session.edit_field(DraftField::Name, "Zed");
    session.save_edit().await.unwrap();

    assert!(session.visible().is_empty());
    session.search("");
    assert_eq!(visible_names(&session), vec!["Zed", "Bob"]);
}

#[tokio::test]
async fn test_invalid_draft_stays_open() {
    let mut session = loaded_session().await;
    let calls = session.api().call_count();

    session.begin_edit(&StudentId::from("1")).unwrap();
    session.edit_field(DraftField::Age, "old");

    assert!(matches!(session.save_edit().await, Err(RosterError::Validation(_))));
    assert!(session.state().is_editing());
    assert_eq!(session.api().call_count(), calls);
}

#[tokio::test]
async fn test_cancel_edit_discards_draft() {
    let mut session = loaded_session().await;
    let calls = session.api().call_count();

    session.begin_edit(&StudentId::from("2")).unwrap();
    session.edit_field(DraftField::Name, "Robert");
    session.cancel_edit();

    assert!(!session.state().is_editing());
    assert_eq!(session.state().records()[1].name, "Bob");
    assert_eq!(session.api().call_count(), calls);
}

#[tokio::test]
async fn test_begin_edit_unknown_id() {
    let mut session = loaded_session().await;
    assert!(matches!(
        session.begin_edit(&StudentId::from("404")),
        Err(RosterError::NotFound(_))
    ));
    assert!(!session.state().is_editing());
}

#[tokio::test]
async fn test_save_without_draft() {
    let mut session = loaded_session().await;
    assert!(session.save_edit().await.is_err());
}

#[tokio::test]
async fn test_create_shows_without_reload() {
    let mut session = loaded_session().await;
    let mut form = EntryForm::new();
    form.name = "Cy".into();
    form.age = "10".into();
    form.address = "2 Side St".into();
    form.grade = "4".into();

    let created = session.create(&mut form).await.unwrap();

    // Newest record goes first
    assert_eq!(session.state().records()[0].id, created.id);
    assert_eq!(form, EntryForm::new());
}

#[tokio::test]
async fn test_export_known_record() {
    let dir = tempfile::tempdir().unwrap();
    let session = loaded_session().await;

    let path = session.export(&StudentId::from("1"), dir.path()).unwrap();
    assert_eq!(path, dir.path().join("Ann.pdf"));

    assert!(matches!(
        session.export(&StudentId::from("404"), dir.path()),
        Err(RosterError::NotFound(_))
    ));
}
