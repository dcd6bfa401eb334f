//! Wishlist CRUD, membership, and invite-code handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use wishhub_core::error::AppError;
use wishhub_core::types::{UserId, WishlistId};
use wishhub_entity::wishlist::{CreateWishlist, UpdateWishlistFields, WishlistDetail, WishlistView};

use crate::dto::request::{CreateWishlistRequest, JoinWishlistRequest, UpdateWishlistRequest};
use crate::dto::response::{ApiResponse, InviteCodeResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/wishlists
pub async fn create_wishlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateWishlistRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WishlistView>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let view = state.wishlist_service.create(
        &auth,
        CreateWishlist {
            name: req.name,
            description: req.description,
            is_private: req.is_private,
        },
    )?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(view))))
}

/// GET /api/wishlists/my
pub async fn my_wishlists(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<WishlistView>>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.wishlist_service.list_mine(&auth))))
}

/// GET /api/wishlists/{id}
pub async fn get_wishlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<WishlistId>,
) -> Result<Json<ApiResponse<WishlistDetail>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.wishlist_service.get(&auth, id)?)))
}

/// PUT /api/wishlists/{id}
pub async fn update_wishlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<WishlistId>,
    Json(req): Json<UpdateWishlistRequest>,
) -> Result<Json<ApiResponse<WishlistView>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let view = state.wishlist_service.update(
        &auth,
        id,
        UpdateWishlistFields {
            name: req.name,
            description: req.description,
            is_private: req.is_private,
        },
    )?;

    Ok(Json(ApiResponse::ok(view)))
}

/// DELETE /api/wishlists/{id}
pub async fn delete_wishlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<WishlistId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.wishlist_service.delete(&auth, id)?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Wishlist deleted successfully",
    ))))
}

/// POST /api/wishlists/join
pub async fn join_wishlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<JoinWishlistRequest>,
) -> Result<Json<ApiResponse<WishlistView>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let view = state
        .wishlist_service
        .join_by_code(&auth, &req.invite_code)?;
    Ok(Json(ApiResponse::ok(view)))
}

/// DELETE /api/wishlists/{id}/collaborators/{user_id}
pub async fn remove_collaborator(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(WishlistId, UserId)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .wishlist_service
        .remove_collaborator(&auth, id, user_id)?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Collaborator removed successfully",
    ))))
}

/// POST /api/wishlists/{id}/invite
pub async fn rotate_invite_code(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<WishlistId>,
) -> Result<Json<ApiResponse<InviteCodeResponse>>, ApiError> {
    let invite_code = state.wishlist_service.rotate_invite_code(&auth, id)?;
    Ok(Json(ApiResponse::ok(InviteCodeResponse { invite_code })))
}
