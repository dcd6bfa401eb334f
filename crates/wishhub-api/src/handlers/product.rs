//! Product CRUD, comment, and reaction handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use wishhub_core::error::AppError;
use wishhub_core::types::ProductId;
use wishhub_entity::product::{CommentView, CreateProduct, ProductView, ReactionView, UpdateProductFields};

use crate::dto::request::{
    AddCommentRequest, CreateProductRequest, ToggleReactionRequest, UpdateProductRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/products
pub async fn add_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductView>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let view = state.product_service.add(
        &auth,
        CreateProduct {
            name: req.name,
            price: req.price,
            description: req.description,
            image_url: req.image_url,
            wishlist_id: req.wishlist_id,
        },
    )?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(view))))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProductId>,
) -> Result<Json<ApiResponse<ProductView>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.product_service.get(&auth, id)?)))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProductId>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<ProductView>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let view = state.product_service.update(
        &auth,
        id,
        UpdateProductFields {
            name: req.name,
            description: req.description,
            price: req.price,
            image_url: req.image_url,
        },
    )?;

    Ok(Json(ApiResponse::ok(view)))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProductId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.product_service.delete(&auth, id)?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Product deleted successfully",
    ))))
}

/// POST /api/products/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProductId>,
    Json(req): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentView>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let comment = state.product_service.add_comment(&auth, id, &req.text)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(comment))))
}

/// POST /api/products/{id}/reactions
pub async fn toggle_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProductId>,
    Json(req): Json<ToggleReactionRequest>,
) -> Result<Json<ApiResponse<Vec<ReactionView>>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let reactions = state
        .product_service
        .toggle_reaction(&auth, id, &req.emoji)?;
    Ok(Json(ApiResponse::ok(reactions)))
}
