//! Staff API handlers
//!
//! Thin wrappers over `StaffService`; all routes require an access token.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateStaffRequest, ListStaffParams, StaffDto};
use crate::application::StaffService;
use crate::domain::{DomainError, StaffRepositoryInterface};
use crate::interfaces::http::common::{ApiError, ValidatedJson, ValidatedQuery};
use crate::interfaces::http::middleware::AuthenticatedAdmin;
use crate::shared::Page;

#[derive(Clone)]
pub struct StaffHandlerState {
    pub staff_service: Arc<StaffService<dyn StaffRepositoryInterface>>,
}

#[utoipa::path(
    post,
    path = "/v1/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = CreateStaffRequest,
    responses(
        (status = 201, description = "Staff member created", body = StaffDto),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_staff(
    State(state): State<StaffHandlerState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    ValidatedJson(request): ValidatedJson<CreateStaffRequest>,
) -> Result<(StatusCode, Json<StaffDto>), ApiError> {
    let dto = request.into_dto(Some(admin.admin_id))?;
    let staff = state.staff_service.create_staff(dto).await?;

    Ok((StatusCode::CREATED, Json(staff.into())))
}

#[utoipa::path(
    get,
    path = "/v1/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(ListStaffParams),
    responses(
        (status = 200, description = "One page of staff", body = Page<StaffDto>),
        (status = 400, description = "Invalid filter, sort or populate field"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_staff(
    State(state): State<StaffHandlerState>,
    ValidatedQuery(params): ValidatedQuery<ListStaffParams>,
) -> Result<Json<Page<StaffDto>>, ApiError> {
    let (filter, options) = params.into_query()?;
    let page = state.staff_service.query_staff(&filter, &options).await?;

    Ok(Json(page.map(StaffDto::from)))
}

#[utoipa::path(
    get,
    path = "/v1/staff/{staffId}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("staffId" = String, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Staff details", body = StaffDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Staff not found")
    )
)]
pub async fn get_staff(
    State(state): State<StaffHandlerState>,
    Path(staff_id): Path<String>,
) -> Result<Json<StaffDto>, ApiError> {
    let Some(staff) = state.staff_service.get_staff_by_id(&staff_id).await? else {
        return Err(DomainError::NotFound {
            entity: "Staff",
            field: "id",
            value: staff_id,
        }
        .into());
    };

    Ok(Json(staff.into()))
}
