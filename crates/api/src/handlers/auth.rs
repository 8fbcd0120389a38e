use axum::{extract::State, http::StatusCode, Json};
use courtbook_core::{
    errors::CourtbookError,
    models::{
        common::ApiResponse,
        user::{AuthResponse, LoginRequest, NewUser, RegisterRequest, Role, User, UserProfile},
    },
};
use courtbook_db::repositories::UserRepository;
use std::sync::Arc;
use tracing::info;

use crate::{
    middleware::{
        auth::{self, AuthUser},
        error_handling::AppError,
    },
    ApiState,
};

const MIN_PASSWORD_LENGTH: usize = 6;
const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn auth_response(state: &ApiState, user: &User) -> Result<AuthResponse, AppError> {
    let token = auth::issue_token(
        user.id,
        user.role,
        &state.auth.jwt_secret,
        state.auth.token_ttl_hours,
    )
    .map_err(|e| CourtbookError::Internal(format!("{e:#}").into()))?;

    Ok(AuthResponse {
        token,
        user: user.profile(),
    })
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let name = super::require_non_empty("Name", &payload.name)?;
    let email = super::require_non_empty("Email", &payload.email)?.to_lowercase();
    if !email.contains('@') {
        return Err(CourtbookError::Validation("Email address is invalid".into()).into());
    }
    if payload.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CourtbookError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ))
        .into());
    }

    let role = payload.role.unwrap_or(Role::User);
    if role == Role::Admin {
        return Err(CourtbookError::Validation("Admin accounts cannot be self-registered".into()).into());
    }

    let password_hash = auth::hash_password_blocking(payload.password)
        .await
        .map_err(|e| CourtbookError::Internal(format!("{e:#}").into()))?;

    let user = state
        .store
        .create_user(NewUser {
            name,
            email,
            password_hash,
            role,
        })
        .await?
        .ok_or_else(|| CourtbookError::Conflict("Email is already registered".into()))?;

    info!(user_id = %user.id, role = %user.role, "Registered user");

    let response = auth_response(&state, &user)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(response))))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let user = state
        .store
        .get_user_by_email(payload.email.trim())
        .await?
        .ok_or_else(|| CourtbookError::Authentication(INVALID_CREDENTIALS.into()))?;

    let verified = auth::verify_password_blocking(payload.password, user.password_hash.clone())
        .await
        .map_err(|e| CourtbookError::Internal(format!("{e:#}").into()))?;
    if !verified {
        return Err(CourtbookError::Authentication(INVALID_CREDENTIALS.into()).into());
    }

    let response = auth_response(&state, &user)?;
    Ok(Json(ApiResponse::ok(response)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn me(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let user = state
        .store
        .get_user_by_id(principal.user_id)
        .await?
        .ok_or_else(|| CourtbookError::NotFound(format!("User with ID {} not found", principal.user_id)))?;

    Ok(Json(ApiResponse::ok(user.profile())))
}
