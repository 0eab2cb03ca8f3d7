use std::collections::BTreeMap;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::{Extension, Router};
use tower::ServiceExt;

use liga_auth::middleware::{require_all_permissions, require_any_permission, require_permission};
use liga_auth::permissions::Capability;
use liga_auth::{AuthError, AuthState, AuthUser, GrantTable, Role, SharedGrants, create_jwt};

const SECRET: &str = "route-guard-secret";

async fn create_championship(user: AuthUser) -> Result<&'static str, AuthError> {
    require_permission(&user, Capability::CreateChampionship)?;
    Ok("created")
}

async fn schedule_board(user: AuthUser) -> Result<&'static str, AuthError> {
    require_any_permission(&user, &[Capability::CreateMatch, Capability::ManageRoles])?;
    Ok("board")
}

async fn edit_own_team(user: AuthUser) -> Result<&'static str, AuthError> {
    require_all_permissions(&user, &[Capability::ViewTeams, Capability::EditOwnTeam])?;
    Ok("team")
}

/// User management is open to administrators and organizers only.
async fn list_users(user: AuthUser) -> Result<&'static str, AuthError> {
    require_any_permission(&user, &[Capability::ViewUsers, Capability::EditChampionship])?;
    Ok("users")
}

fn app(grants: SharedGrants) -> Router {
    Router::new()
        .route("/championships", post(create_championship))
        .route("/schedule", get(schedule_board))
        .route("/my-team", post(edit_own_team))
        .route("/users", get(list_users))
        .layer(Extension(AuthState {
            jwt_secret: SECRET.to_string(),
            grants,
        }))
}

fn request(method: &str, uri: &str, role: Option<Role>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        let token = create_jwt("1", "tester", Some(role), SECRET, 1).unwrap();
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn status(app: &Router, method: &str, uri: &str, role: Option<Role>) -> StatusCode {
    app.clone()
        .oneshot(request(method, uri, role))
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn organizer_can_create_championship_delegate_cannot() {
    let app = app(SharedGrants::default());
    assert_eq!(
        status(&app, "POST", "/championships", Some(Role::Organizer)).await,
        StatusCode::OK
    );
    assert_eq!(
        status(&app, "POST", "/championships", Some(Role::Delegate)).await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        status(&app, "POST", "/championships", None).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn any_and_all_guards() {
    let app = app(SharedGrants::default());
    assert_eq!(
        status(&app, "GET", "/schedule", Some(Role::Administrator)).await,
        StatusCode::OK
    );
    assert_eq!(
        status(&app, "GET", "/schedule", Some(Role::Organizer)).await,
        StatusCode::OK
    );
    assert_eq!(
        status(&app, "GET", "/schedule", Some(Role::Player)).await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        status(&app, "POST", "/my-team", Some(Role::Delegate)).await,
        StatusCode::OK
    );
    assert_eq!(
        status(&app, "POST", "/my-team", Some(Role::Player)).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn user_management_is_admin_or_organizer() {
    let app = app(SharedGrants::default());
    for role in [Role::Administrator, Role::Organizer] {
        assert_eq!(status(&app, "GET", "/users", Some(role)).await, StatusCode::OK);
    }
    for role in [Role::Delegate, Role::Player] {
        assert_eq!(
            status(&app, "GET", "/users", Some(role)).await,
            StatusCode::FORBIDDEN
        );
    }
    assert_eq!(
        status(&app, "GET", "/users", None).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn invalid_token_is_unauthorized() {
    let app = app(SharedGrants::default());
    let req = Request::builder()
        .method("POST")
        .uri("/championships")
        .header("Authorization", "Bearer nope")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn replaced_table_applies_to_later_requests() {
    let grants = SharedGrants::default();
    let app = app(grants.clone());
    assert_eq!(
        status(&app, "POST", "/my-team", Some(Role::Delegate)).await,
        StatusCode::OK
    );

    let mut overrides = BTreeMap::new();
    overrides.insert("delegate".to_string(), vec!["view_teams".to_string()]);
    grants.replace(GrantTable::from_overrides(&overrides).unwrap());

    assert_eq!(
        status(&app, "POST", "/my-team", Some(Role::Delegate)).await,
        StatusCode::FORBIDDEN
    );
}
