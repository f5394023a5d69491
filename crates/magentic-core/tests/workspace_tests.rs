mod common;

use common::{create_test_workspace, USER};
use jiff::{civil::date, tz::TimeZone};
use magentic_core::{
    api::SessionApi, display::Plans, CoreError, Database, ImportError, NewSession,
};
use serde_json::json;

#[tokio::test]
async fn test_sidebar_buckets_stored_sessions() {
    let (_temp_dir, workspace) = create_test_workspace().await;

    {
        let mut db = Database::new(workspace.database_path()).unwrap();
        let rows = [
            ("Morning", Some("2024-06-15T08:00:00Z")),
            ("Late night", Some("2024-06-14T23:30:00")),
            ("Tuesday", Some("2024-06-11 10:00:00")),
            ("Last month", Some("2024-05-20T12:00:00Z")),
            ("Broken", Some("15/06/2024")),
            ("Missing", None),
            ("Ancient", Some("2023-01-01T00:00:00Z")),
        ];
        for (name, created_at) in rows {
            let session = NewSession {
                name: name.to_string(),
                team_id: None,
            };
            db.insert_session_at(&session, USER, created_at).unwrap();
        }
        assert_eq!(db.list_sessions(USER).unwrap().len(), 7);
    }

    let now = date(2024, 6, 15)
        .at(18, 0, 0, 0)
        .to_zoned(TimeZone::UTC)
        .unwrap();
    let sidebar = workspace.sidebar_at(USER, now).await.unwrap();

    let names = |sessions: &[magentic_core::Session]| -> Vec<String> {
        sessions.iter().map(|s| s.name.clone()).collect()
    };
    assert_eq!(names(&sidebar.groups.today), ["Morning"]);
    assert_eq!(names(&sidebar.groups.yesterday), ["Late night"]);
    assert_eq!(names(&sidebar.groups.last7_days), ["Tuesday"]);
    assert_eq!(names(&sidebar.groups.last30_days), ["Last month"]);
    assert_eq!(names(&sidebar.groups.older), ["Ancient", "Broken", "Missing"]);
    assert_eq!(sidebar.groups.len(), sidebar.sorted.len());

    // Unparseable timestamps sort last, keeping their stored order.
    let sorted = names(&sidebar.sorted);
    assert_eq!(&sorted[..2], ["Morning", "Late night"]);
    assert_eq!(&sorted[5..], ["Broken", "Missing"]);

    let rendered = sidebar.to_string();
    assert!(rendered.contains("## Today"));
    assert!(rendered.contains("created unknown"));
}

#[tokio::test]
async fn test_plan_library_round_trip() {
    let (_temp_dir, workspace) = create_test_workspace().await;

    let imported = workspace
        .import_plan(
            "grocery.json",
            Some("application/json"),
            r#"{"task": "Weekly groceries", "steps": [
                {"title": "Check fridge", "details": "Note what is missing"},
                {"title": "Order online", "enabled": false, "agent_name": "web_surfer"}
            ]}"#,
            USER,
        )
        .await
        .unwrap();
    let id = imported.id.unwrap();
    assert!(!imported.steps[1].enabled);

    let fetched = workspace.get_plan(id, USER).await.unwrap();
    assert_eq!(fetched, imported);

    let rendered = Plans(workspace.fetch_plans(USER).await.unwrap()).to_string();
    assert!(rendered.contains("Weekly groceries"));

    let (session, _) = workspace.use_plan(id, USER).await.unwrap();
    let learned = workspace
        .learn_plan(session.id, 1, json!({ "task": "", "steps": "nope" }), USER)
        .await
        .unwrap();
    assert_eq!(learned.task, "Untitled");
    assert!(learned.steps.is_empty());
    assert_eq!(learned.session_id, Some(session.id));

    assert_eq!(workspace.search_plans(USER, "weekly").await.unwrap().len(), 1);
    assert_eq!(workspace.search_plans(USER, "").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_import_rejections_report_messages() {
    let (_temp_dir, workspace) = create_test_workspace().await;

    let err = workspace
        .import_plan("plan.json", None, "{not json", USER)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Import(ImportError::MalformedDocument { .. })
    ));
    assert_eq!(
        err.to_string(),
        "Invalid JSON file format. Please check your file and try again."
    );

    let err = workspace
        .import_plan("plan.json", None, "\"just a string\"", USER)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid plan format. The file does not contain a valid plan structure."
    );

    assert!(workspace.fetch_plans(USER).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_users_are_isolated() {
    let (_temp_dir, workspace) = create_test_workspace().await;

    let plan = workspace.create_blank_plan("alice").await.unwrap();
    let plan_id = plan.id.unwrap();
    let session = workspace
        .create_session("Alice chat", None, "alice")
        .await
        .unwrap();
    workspace.allow_website("alice", "example.com").await.unwrap();

    assert!(workspace.fetch_plans("bob").await.unwrap().is_empty());
    assert!(workspace.list_sessions("bob").await.unwrap().is_empty());
    assert!(workspace
        .settings("bob")
        .await
        .unwrap()
        .allowed_websites
        .is_empty());

    // Knowing an id is not enough to reach another user's records.
    let not_found = |result: Result<_, CoreError>| {
        matches!(
            result,
            Err(CoreError::PlanNotFound { .. } | CoreError::SessionNotFound { .. })
        )
    };
    assert!(not_found(workspace.get_plan(plan_id, "bob").await.map(drop)));
    assert!(not_found(workspace.export_plan(plan_id, "bob").await.map(drop)));
    assert!(not_found(workspace.use_plan(plan_id, "bob").await.map(drop)));
    assert!(not_found(
        workspace
            .update_plan(plan_id, json!({ "task": "Taken" }), "bob")
            .await
            .map(drop)
    ));
    assert!(not_found(workspace.delete_plan(plan_id, "bob").await));
    assert!(not_found(
        workspace
            .rename_session(session.id, "pwned", "bob")
            .await
            .map(drop)
    ));
    assert!(not_found(workspace.delete_session(session.id, "bob").await));

    let kept = workspace.get_plan(plan_id, "alice").await.unwrap();
    assert_eq!(kept.task, "New Plan");
    let sessions = workspace.list_sessions("alice").await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].name, "Alice chat");
    assert!(workspace.list_sessions("bob").await.unwrap().is_empty());
}
