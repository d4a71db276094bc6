//! Admin changelist integration tests
//!
//! Runs the compiled changelist queries against a live database. Every test
//! scopes its search to its own tag, so rows from parallel tests never leak
//! into the counts.

use serde_json::json;
use siteplan_admin::{filter_choices, AdminError, ChangeList, ChangeListParams};
use siteplan_common::Pagination;
use siteplan_projects::{NewBuilding, NewPlayground, NewProject};

use crate::common::TestApp;

mod common;

#[test]
fn test_undeclared_filter_is_rejected() {
    let site = siteplan_admin::default_site().unwrap();
    let admin = site.get("playground").unwrap();

    let params = ChangeListParams::new().filter("coordinates", "[]");
    assert!(matches!(
        ChangeList::new(admin, &params),
        Err(AdminError::FilterNotAllowed { .. })
    ));
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_search_projects_by_owner_username() {
    let app = TestApp::new().await.unwrap();
    let repos = &app.context.projects;
    let owner = app.create_test_user("alice").await.unwrap();

    let owned = repos
        .projects
        .create_with_owner(&NewProject::named(app.name("alpha")), owner.id)
        .await
        .unwrap();
    app.create_test_project("beta").await.unwrap();

    let admin = app.context.admin.get("project").unwrap();
    let params = ChangeListParams::new().search(owner.username.clone());
    let page = ChangeList::new(admin, &params)
        .unwrap()
        .fetch(&app.pool)
        .await
        .unwrap();

    assert_eq!(page.result_count, 1);
    assert_eq!(page.pks(), vec![owned.id]);
    assert_eq!(page.get(0, "name"), Some(&json!(owned.name)));

    // Owner filter narrows to the same project
    let params = ChangeListParams::new()
        .search(app.tag.clone())
        .filter("user", owner.id.to_string());
    let page = ChangeList::new(admin, &params)
        .unwrap()
        .fetch(&app.pool)
        .await
        .unwrap();
    assert_eq!(page.pks(), vec![owned.id]);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_search_buildings_and_playgrounds_by_project_name() {
    let app = TestApp::new().await.unwrap();
    let repos = &app.context.projects;
    let north = app.create_test_project("north").await.unwrap();
    let south = app.create_test_project("south").await.unwrap();

    let first = repos
        .buildings
        .create(&NewBuilding::new(north.id))
        .await
        .unwrap();
    let second = repos
        .buildings
        .create(&NewBuilding::new(north.id).with_floors(5, 3.0))
        .await
        .unwrap();
    repos
        .buildings
        .create(&NewBuilding::new(south.id))
        .await
        .unwrap();
    let playground = repos
        .playgrounds
        .create(&NewPlayground::new(north.id))
        .await
        .unwrap();

    // Every word must match
    let params = ChangeListParams::new().search(app.name("north"));

    let buildings = app.context.admin.get("building").unwrap();
    let page = ChangeList::new(buildings, &params)
        .unwrap()
        .fetch(&app.pool)
        .await
        .unwrap();
    assert_eq!(page.result_count, 2);
    assert_eq!(page.pks(), vec![second.id, first.id]);
    assert_eq!(page.get(0, "project"), Some(&json!(north.name)));
    assert_eq!(page.get(0, "floors"), Some(&json!(5)));
    assert_eq!(
        page.get(0, "floors_height").and_then(|v| v.as_f64()),
        Some(3.0)
    );
    assert_eq!(
        page.get(1, "coordinates"),
        Some(&json!([{"x": 0, "y": 0}]))
    );

    let playgrounds = app.context.admin.get("playground").unwrap();
    let page = ChangeList::new(playgrounds, &params)
        .unwrap()
        .fetch(&app.pool)
        .await
        .unwrap();
    assert_eq!(page.pks(), vec![playground.id]);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_floors_filter_and_paging() {
    let app = TestApp::new().await.unwrap();
    let repos = &app.context.projects;
    let project = app.create_test_project("district").await.unwrap();

    for floors in [1, 5, 5, 9] {
        repos
            .buildings
            .create(&NewBuilding::new(project.id).with_floors(floors, 3.0))
            .await
            .unwrap();
    }

    let admin = app.context.admin.get("building").unwrap();

    let params = ChangeListParams::new()
        .search(app.tag.clone())
        .filter("floors", "5");
    let page = ChangeList::new(admin, &params)
        .unwrap()
        .fetch(&app.pool)
        .await
        .unwrap();
    assert_eq!(page.result_count, 2);
    assert!(page.rows.iter().all(|row| row.cells[2] == json!(5)));

    let params = ChangeListParams::new()
        .search(app.tag.clone())
        .page(Pagination::new(1, 2));
    let page = ChangeList::new(admin, &params)
        .unwrap()
        .fetch(&app.pool)
        .await
        .unwrap();
    assert_eq!(page.result_count, 4);
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.limit, 2);
    assert_eq!(page.offset, 1);

    let choices = filter_choices(admin, "floors", &app.pool).await.unwrap();
    for floors in [1, 5, 9] {
        assert!(choices.iter().any(|c| c.value == json!(floors)));
    }

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_owner_filter_choices_list_users() {
    let app = TestApp::new().await.unwrap();
    let user = app.create_test_user("chooser").await.unwrap();

    let admin = app.context.admin.get("project").unwrap();
    let choices = filter_choices(admin, "user", &app.pool).await.unwrap();
    assert!(choices
        .iter()
        .any(|c| c.value == json!(user.id) && c.label == user.username));

    assert!(matches!(
        filter_choices(admin, "name", &app.pool).await,
        Err(AdminError::FilterNotAllowed { .. })
    ));

    app.cleanup().await.unwrap();
}
