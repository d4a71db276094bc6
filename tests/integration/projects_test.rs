//! Projects domain integration tests
//!
//! Covers defaults, the one-to-one playground relation, cascading deletes and
//! project ownership against a live PostgreSQL database.

use serde_json::json;
use siteplan_common::{Error, Pagination};
use siteplan_projects::{
    Building, BuildingUpdate, Coordinates, NewBuilding, NewPlayground, NewProject, Point,
    DEFAULT_FLOORS, DEFAULT_FLOORS_HEIGHT, DEFAULT_PROJECT_NAME,
};

use crate::common::TestApp;

mod common;

mod test_defaults {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_unnamed_project_gets_placeholder_name() {
        let app = TestApp::new().await.unwrap();
        let repos = &app.context.projects;

        let project = repos.projects.create(&NewProject::default()).await.unwrap();
        assert_eq!(project.name, DEFAULT_PROJECT_NAME);

        repos.projects.delete(project.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_playground_and_building_defaults() {
        let app = TestApp::new().await.unwrap();
        let repos = &app.context.projects;
        let project = app.create_test_project("defaults").await.unwrap();

        let playground = repos
            .playgrounds
            .create(&NewPlayground::new(project.id))
            .await
            .unwrap();
        assert_eq!(playground.coordinates, Coordinates::origin());
        assert_eq!(playground.coordinates.points().unwrap(), vec![Point::ORIGIN]);

        let building = repos
            .buildings
            .create(&NewBuilding::new(project.id))
            .await
            .unwrap();
        assert_eq!(building.floors, DEFAULT_FLOORS);
        assert_eq!(building.floors_height, DEFAULT_FLOORS_HEIGHT);
        assert_eq!(building.coordinates, Coordinates::origin());

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_column_defaults_apply_to_bare_inserts() {
        let app = TestApp::new().await.unwrap();
        let project = app.create_test_project("column defaults").await.unwrap();

        let building = sqlx::query_as::<_, Building>(
            r#"
            INSERT INTO buildings (project_id) VALUES ($1)
            RETURNING id, project_id, coordinates, floors, floors_height
            "#,
        )
        .bind(project.id)
        .fetch_one(&app.pool)
        .await
        .unwrap();

        assert_eq!(building.floors, 1);
        assert_eq!(building.floors_height, 3.0);
        assert_eq!(building.coordinates.as_json(), &json!([{"x": 0, "y": 0}]));

        let (id, name): (i64, String) =
            sqlx::query_as("INSERT INTO projects DEFAULT VALUES RETURNING id, name")
                .fetch_one(&app.pool)
                .await
                .unwrap();
        assert_eq!(name, "Безымянный");
        app.context.projects.projects.delete(id).await.unwrap();

        app.cleanup().await.unwrap();
    }
}

mod test_playgrounds {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_second_playground_for_project_conflicts() {
        let app = TestApp::new().await.unwrap();
        let repos = &app.context.projects;
        let project = app.create_test_project("one playground").await.unwrap();

        repos
            .playgrounds
            .create(&NewPlayground::new(project.id))
            .await
            .unwrap();
        let second = repos
            .playgrounds
            .create(&NewPlayground::new(project.id))
            .await;
        assert!(matches!(second, Err(Error::Conflict(_))));

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_playground_for_missing_project_not_found() {
        let app = TestApp::new().await.unwrap();
        let result = app
            .context
            .projects
            .playgrounds
            .create(&NewPlayground::new(i64::MAX))
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_update_coordinates() {
        let app = TestApp::new().await.unwrap();
        let repos = &app.context.projects;
        let project = app.create_test_project("outline").await.unwrap();
        let playground = repos
            .playgrounds
            .create(&NewPlayground::new(project.id))
            .await
            .unwrap();

        let outline = Coordinates::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.5, 0.0),
            Point::new(10.5, 10.25),
        ]);
        let updated = repos
            .playgrounds
            .update_coordinates(playground.id, &outline)
            .await
            .unwrap();
        assert_eq!(updated.coordinates.points().unwrap().len(), 3);

        let found = repos
            .playgrounds
            .find_by_project(project.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, updated);

        app.cleanup().await.unwrap();
    }
}

mod test_cascade {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_deleting_project_removes_playground_and_buildings() {
        let app = TestApp::new().await.unwrap();
        let repos = &app.context.projects;
        let project = app.create_test_project("cascade").await.unwrap();

        let playground = repos
            .playgrounds
            .create(&NewPlayground::new(project.id))
            .await
            .unwrap();
        let mut building_ids = Vec::new();
        for floors in 1..=3 {
            let building = repos
                .buildings
                .create(&NewBuilding::new(project.id).with_floors(floors, 2.8))
                .await
                .unwrap();
            building_ids.push(building.id);
        }

        repos.projects.delete(project.id).await.unwrap();

        assert!(repos.projects.find(project.id).await.unwrap().is_none());
        assert!(repos.playgrounds.find(playground.id).await.unwrap().is_none());
        for id in building_ids {
            assert!(repos.buildings.find(id).await.unwrap().is_none());
        }
        assert!(repos
            .buildings
            .list_by_project(project.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_deleting_missing_project_not_found() {
        let app = TestApp::new().await.unwrap();
        let result = app.context.projects.projects.delete(i64::MAX).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}

mod test_buildings {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_update_and_list_buildings() {
        let app = TestApp::new().await.unwrap();
        let repos = &app.context.projects;
        let project = app.create_test_project("buildings").await.unwrap();

        let first = repos
            .buildings
            .create(&NewBuilding::new(project.id))
            .await
            .unwrap();
        let second = repos
            .buildings
            .create(&NewBuilding::new(project.id).with_floors(9, 3.3))
            .await
            .unwrap();

        let updated = repos
            .buildings
            .update(
                first.id,
                &BuildingUpdate {
                    coordinates: Coordinates::from_points(&[Point::new(5.0, 5.0)]),
                    floors: 4,
                    floors_height: 2.5,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.floors, 4);
        assert_eq!(updated.height(), 10.0);

        let listed = repos.buildings.list_by_project(project.id).await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);

        repos.buildings.delete(second.id).await.unwrap();
        assert!(matches!(
            repos.buildings.delete(second.id).await,
            Err(Error::NotFound(_))
        ));

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_project_details() {
        let app = TestApp::new().await.unwrap();
        let repos = &app.context.projects;
        let project = app.create_test_project("details").await.unwrap();

        let details = repos.projects.details(project.id).await.unwrap();
        assert!(details.buildings.is_empty());
        assert!(details.playground.is_none());

        repos
            .playgrounds
            .create(&NewPlayground::new(project.id))
            .await
            .unwrap();
        repos
            .buildings
            .create(&NewBuilding::new(project.id))
            .await
            .unwrap();

        let details = repos.projects.details(project.id).await.unwrap();
        assert_eq!(details.project, project);
        assert_eq!(details.buildings.len(), 1);
        assert!(details.playground.is_some());

        app.cleanup().await.unwrap();
    }
}

mod test_owners {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_create_with_owner_and_list_for_user() {
        let app = TestApp::new().await.unwrap();
        let repos = &app.context.projects;
        let user = app.create_test_user("owner").await.unwrap();

        let project = repos
            .projects
            .create_with_owner(&NewProject::named(app.name("owned")), user.id)
            .await
            .unwrap();

        let owners = repos.projects.owners(project.id).await.unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].username, user.username);

        let projects = repos.projects.list_for_user(user.id).await.unwrap();
        assert_eq!(projects, vec![project.clone()]);

        assert!(repos.projects.remove_owner(project.id, user.id).await.unwrap());
        assert!(!repos.projects.remove_owner(project.id, user.id).await.unwrap());

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_create_with_missing_owner_rolls_back() {
        let app = TestApp::new().await.unwrap();
        let repos = &app.context.projects;
        let name = app.name("orphan");

        let result = repos
            .projects
            .create_with_owner(&NewProject::named(name.clone()), i64::MAX)
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE name = $1")
            .bind(&name)
            .fetch_one(&app.pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_deleting_user_keeps_project() {
        let app = TestApp::new().await.unwrap();
        let repos = &app.context.projects;
        let keeper = app.create_test_user("keeper").await.unwrap();
        let leaver = app.create_test_user("leaver").await.unwrap();

        let project = repos
            .projects
            .create_with_owner(&NewProject::named(app.name("shared")), keeper.id)
            .await
            .unwrap();
        repos.projects.add_owner(project.id, leaver.id).await.unwrap();
        // Adding an existing owner is a no-op
        repos.projects.add_owner(project.id, leaver.id).await.unwrap();
        assert_eq!(repos.projects.owners(project.id).await.unwrap().len(), 2);

        app.delete_user(leaver.id).await.unwrap();

        assert!(repos.projects.find(project.id).await.unwrap().is_some());
        let owners = repos.projects.owners(project.id).await.unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, keeper.id);

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_rename_and_list() {
        let app = TestApp::new().await.unwrap();
        let repos = &app.context.projects;
        let project = app.create_test_project("before").await.unwrap();

        let renamed = repos
            .projects
            .rename(project.id, &app.name("after"))
            .await
            .unwrap();
        assert_eq!(renamed.name, app.name("after"));

        let page = repos.projects.list(Pagination::new(0, 200)).await.unwrap();
        assert!(page.len() <= 200);

        let accounts = app.context.accounts.find_many(&[]).await.unwrap();
        assert!(accounts.is_empty());

        app.cleanup().await.unwrap();
    }
}
