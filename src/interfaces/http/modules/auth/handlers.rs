//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::{AdminLoginRequest, AdminLoginResponse};
use crate::application::AuthService;
use crate::domain::AdminRepositoryInterface;
use crate::interfaces::http::common::{ApiError, ValidatedJson};

#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth_service: Arc<AuthService<dyn AdminRepositoryInterface>>,
}

#[utoipa::path(
    post,
    path = "/v1/auth/admin-login",
    tag = "Authentication",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Successful login", body = AdminLoginResponse),
        (status = 401, description = "Incorrect username or password"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn admin_login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, ApiError> {
    let result = state
        .auth_service
        .login_admin(&request.username, &request.password)
        .await?;

    Ok(Json(result.into()))
}
