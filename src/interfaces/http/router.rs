//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AuthService, StaffService};
use crate::domain::{AdminRepositoryInterface, StaffRepositoryInterface};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, health, staff};
use crate::shared::Page;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /v1/auth/admin-login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::admin_login,
        staff::create_staff,
        staff::list_staff,
        staff::get_staff,
    ),
    components(
        schemas(
            ApiResponse<String>,
            Page<staff::StaffDto>,
            health::HealthResponse,
            health::ComponentHealth,
            auth::AdminLoginRequest,
            auth::AdminLoginResponse,
            auth::AdminDto,
            auth::AuthTokensDto,
            auth::TokenDto,
            staff::StaffDto,
            staff::CreatedByDto,
            staff::CreateStaffRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Admin login and token issuance"),
        (name = "Staff", description = "Staff management with filtering, sorting and pagination"),
    ),
    info(
        title = "Staff Service API",
        version = "1.0.0",
        description = "REST API for managing hospital staff",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    staff_repo: Arc<dyn StaffRepositoryInterface>,
    admin_repo: Arc<dyn AdminRepositoryInterface>,
    jwt_config: JwtConfig,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let staff_service: Arc<StaffService<dyn StaffRepositoryInterface>> =
        Arc::new(StaffService::new(staff_repo));
    let auth_service: Arc<AuthService<dyn AdminRepositoryInterface>> =
        Arc::new(AuthService::new(admin_repo, jwt_config));

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/admin-login", post(auth::admin_login))
        .with_state(auth::AuthHandlerState { auth_service });

    // Staff routes (protected)
    let staff_routes = Router::new()
        .route("/", get(staff::list_staff).post(staff::create_staff))
        .route("/{staff_id}", get(staff::get_staff))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(staff::StaffHandlerState {
            staff_service: staff_service.clone(),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            staff_service,
            started_at: Arc::new(Instant::now()),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/v1/auth", auth_routes)
        .nest("/v1/staff", staff_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};

    use crate::infrastructure::storage::InMemoryStore;

    struct TestApp {
        router: Router,
    }

    impl TestApp {
        async fn new() -> Self {
            let store = Arc::new(InMemoryStore::new());
            let jwt_config = JwtConfig {
                secret: "router-test-secret".into(),
                ..JwtConfig::default()
            };
            AuthService::new(store.clone(), jwt_config.clone())
                .bootstrap_admin("root", "password123", "Root")
                .await
                .unwrap();

            Self {
                router: create_api_router(store.clone(), store, jwt_config),
            }
        }

        async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
            use tower::Service;
            let mut svc = self.router.clone().into_service();
            let resp = svc.call(req).await.unwrap();
            let status = resp.status();
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, body)
        }

        async fn login(&self) -> (StatusCode, Value) {
            let req = Request::builder()
                .method("POST")
                .uri("/v1/auth/admin-login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"username": "root", "password": "password123"}).to_string(),
                ))
                .unwrap();
            self.send(req).await
        }

        async fn access_token(&self) -> String {
            let (_, body) = self.login().await;
            body["tokens"]["access"]["token"]
                .as_str()
                .unwrap()
                .to_string()
        }

        async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
            let mut builder = Request::builder().uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            self.send(builder.body(Body::empty()).unwrap()).await
        }

        async fn create(&self, token: &str, body: Value) -> (StatusCode, Value) {
            let req = Request::builder()
                .method("POST")
                .uri("/v1/staff")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap();
            self.send(req).await
        }
    }

    fn staff_body(name: &str, email: &str, role: &str) -> Value {
        json!({"name": name, "email": email, "role": role, "shiftPreferences": ["night"]})
    }

    #[tokio::test]
    async fn login_returns_user_and_token_pair() {
        let app = TestApp::new().await;

        let (status, body) = app.login().await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "root");
        assert!(body["user"].get("passwordHash").is_none());
        assert!(body["tokens"]["access"]["token"].is_string());
        assert!(body["tokens"]["refresh"]["expires"].is_string());
    }

    #[tokio::test]
    async fn login_with_bad_password_is_401() {
        let app = TestApp::new().await;
        let req = Request::builder()
            .method("POST")
            .uri("/v1/auth/admin-login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"username": "root", "password": "wrong-password"}).to_string(),
            ))
            .unwrap();

        let (status, body) = app.send(req).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Incorrect username or password");
    }

    #[tokio::test]
    async fn staff_routes_require_access_token() {
        let app = TestApp::new().await;

        let (status, _) = app.get("/v1/staff", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, login) = app.login().await;
        let refresh = login["tokens"]["refresh"]["token"].as_str().unwrap();
        let (status, _) = app.get("/v1/staff", Some(refresh)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_then_fetch_staff() {
        let app = TestApp::new().await;
        let token = app.access_token().await;

        let (status, created) = app
            .create(&token, staff_body("  Amy  ", "AMY@X.IO", "nurse"))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Amy");
        assert_eq!(created["email"], "amy@x.io");
        assert!(created["createdBy"].is_string());

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = app.get(&format!("/v1/staff/{}", id), Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["shiftPreferences"], json!(["night"]));
    }

    #[tokio::test]
    async fn duplicate_email_is_409() {
        let app = TestApp::new().await;
        let token = app.access_token().await;
        app.create(&token, staff_body("Amy", "amy@x.io", "nurse")).await;

        let (status, body) = app
            .create(&token, staff_body("Other", "Amy@x.io", "doctor"))
            .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email already taken");
    }

    #[tokio::test]
    async fn invalid_body_is_422() {
        let app = TestApp::new().await;
        let token = app.access_token().await;

        let (status, body) = app
            .create(&token, staff_body("Amy", "not-an-email", "janitor"))
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn unknown_staff_is_404() {
        let app = TestApp::new().await;
        let token = app.access_token().await;

        let (status, body) = app.get("/v1/staff/missing", Some(&token)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Staff not found");
    }

    #[tokio::test]
    async fn list_paginates_sorts_and_populates() {
        let app = TestApp::new().await;
        let token = app.access_token().await;
        for (name, email, role) in [
            ("Cy", "c@x.io", "doctor"),
            ("Al", "a@x.io", "nurse"),
            ("Bo", "b@x.io", "doctor"),
        ] {
            app.create(&token, staff_body(name, email, role)).await;
        }

        let (status, page) = app
            .get("/v1/staff?sortBy=name:desc&limit=2&page=1", Some(&token))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["totalResults"], 3);
        assert_eq!(page["totalPages"], 2);
        assert_eq!(page["results"][0]["name"], "Cy");
        assert_eq!(page["results"][1]["name"], "Bo");

        let (_, filtered) = app
            .get("/v1/staff?role=doctor&populate=createdBy", Some(&token))
            .await;
        assert_eq!(filtered["totalResults"], 2);
        assert_eq!(filtered["results"][0]["createdBy"]["username"], "root");
    }

    #[tokio::test]
    async fn junk_paging_falls_back_to_defaults() {
        let app = TestApp::new().await;
        let token = app.access_token().await;

        let (status, page) = app
            .get("/v1/staff?limit=abc&page=-3", Some(&token))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["limit"], 10);
        assert_eq!(page["page"], 1);
        assert_eq!(page["totalPages"], 0);
        assert_eq!(page["results"], json!([]));
    }

    #[tokio::test]
    async fn unknown_sort_field_is_400() {
        let app = TestApp::new().await;
        let token = app.access_token().await;

        let (status, body) = app.get("/v1/staff?sortBy=password", Some(&token)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Cannot sort staff by 'password'");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = TestApp::new().await;

        let (status, body) = app.get("/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["store"]["status"], "ok");
    }
}
