//! Owner registry REST handlers.
//!
//! Plain CRUD over the owner repository. Store failures are logged and
//! surfaced as a generic 500 body with no SQL detail.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use pet_hospital::owner::{NewOwner, Owner, OwnerError, OwnerId};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct CreateOwnerResponse {
    pub insert_id: OwnerId,
}

type OwnerApiError = (StatusCode, Json<ErrorResponse>);

fn map_error(e: OwnerError) -> OwnerApiError {
    match e {
        OwnerError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Owner {id} not found"),
            }),
        ),
        OwnerError::Database(e) => {
            tracing::error!(error = %e, "owner store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal Server Error".to_string(),
                }),
            )
        }
    }
}

/// List all owners.
pub async fn list_owners(
    State(state): State<AppState>,
) -> Result<Json<Vec<Owner>>, OwnerApiError> {
    let owners = state.owners.list_owners().await.map_err(map_error)?;
    Ok(Json(owners))
}

/// Create an owner record.
pub async fn create_owner(
    State(state): State<AppState>,
    Json(new_owner): Json<NewOwner>,
) -> Result<Json<CreateOwnerResponse>, OwnerApiError> {
    let insert_id = state
        .owners
        .create_owner(&new_owner)
        .await
        .map_err(map_error)?;
    Ok(Json(CreateOwnerResponse { insert_id }))
}

/// Fetch a single owner.
pub async fn get_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<OwnerId>,
) -> Result<Json<Owner>, OwnerApiError> {
    let owner = state
        .owners
        .find_owner(owner_id)
        .await
        .map_err(map_error)?
        .ok_or_else(|| map_error(OwnerError::NotFound(owner_id)))?;
    Ok(Json(owner))
}

/// Update an owner record.
pub async fn update_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<OwnerId>,
    Json(update): Json<NewOwner>,
) -> Result<StatusCode, OwnerApiError> {
    state
        .owners
        .update_owner(owner_id, &update)
        .await
        .map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an owner record. Deleting an unknown id still succeeds.
pub async fn delete_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<OwnerId>,
) -> Result<StatusCode, OwnerApiError> {
    state
        .owners
        .delete_owner(owner_id)
        .await
        .map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}
