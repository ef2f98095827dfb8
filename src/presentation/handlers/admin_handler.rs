use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        error::DomainError,
        models::{check_in::CheckIn, registration::Registration},
        repositories::record_store::RecordStore,
        services::{password_service::PasswordHasher, token_service::TokenService},
    },
    presentation::error::AppError,
    usecase::{
        admin_login_usecase::AdminLoginUsecase, check_in_usecase::CheckInUsecase,
        lookup_usecase::LookupUsecase,
    },
};

/// json for admin login request
#[derive(Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// json for admin login response
#[derive(Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
}

/// Admin routes: login plus the per-day views, which need a bearer token.
pub fn create_admin_router<R, C, P, T>(
    admin_service: Arc<AdminLoginUsecase<P, T>>,
    lookup_service: Arc<LookupUsecase<R>>,
    check_in_service: Arc<CheckInUsecase<R, C>>,
) -> Router
where
    R: RecordStore<Registration> + 'static,
    C: RecordStore<CheckIn> + 'static,
    P: PasswordHasher + Send + Sync + 'static,
    T: TokenService + 'static,
{
    let state = AdminState {
        admin_service,
        lookup_service,
        check_in_service,
    };

    Router::new()
        .route("/admin/login", post(login::<R, C, P, T>))
        .route(
            "/admin/registrations/daily/{date}",
            get(daily_registrations::<R, C, P, T>),
        )
        .route(
            "/admin/checkins/daily/{date}",
            get(daily_check_ins::<R, C, P, T>),
        )
        .with_state(state)
}

pub struct AdminState<R, C, P, T>
where
    R: RecordStore<Registration>,
    C: RecordStore<CheckIn>,
    P: PasswordHasher,
    T: TokenService,
{
    pub admin_service: Arc<AdminLoginUsecase<P, T>>,
    pub lookup_service: Arc<LookupUsecase<R>>,
    pub check_in_service: Arc<CheckInUsecase<R, C>>,
}

impl<R, C, P, T> Clone for AdminState<R, C, P, T>
where
    R: RecordStore<Registration>,
    C: RecordStore<CheckIn>,
    P: PasswordHasher,
    T: TokenService,
{
    fn clone(&self) -> Self {
        Self {
            admin_service: Arc::clone(&self.admin_service),
            lookup_service: Arc::clone(&self.lookup_service),
            check_in_service: Arc::clone(&self.check_in_service),
        }
    }
}

/// helper function that extracts the token from `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Domain(DomainError::AuthenticationFailed))
}

fn parse_day(date: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{date}', expected YYYY-MM-DD")))
}

async fn login<R, C, P, T>(
    State(state): State<AdminState<R, C, P, T>>,
    payload: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    R: RecordStore<Registration>,
    C: RecordStore<CheckIn>,
    P: PasswordHasher + Send + Sync,
    T: TokenService,
{
    let Json(request) = payload?;
    let token = state
        .admin_service
        .login(&request.username, &request.password)?;
    tracing::info!(username = %request.username, "Admin logged in");
    Ok(Json(AdminLoginResponse { token }))
}

async fn daily_registrations<R, C, P, T>(
    State(state): State<AdminState<R, C, P, T>>,
    headers: HeaderMap,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    R: RecordStore<Registration>,
    C: RecordStore<CheckIn>,
    P: PasswordHasher + Send + Sync,
    T: TokenService,
{
    state.admin_service.authorize(bearer_token(&headers)?)?;
    let day = parse_day(&date)?;
    Ok(Json(state.lookup_service.registrations_on(day).await?))
}

async fn daily_check_ins<R, C, P, T>(
    State(state): State<AdminState<R, C, P, T>>,
    headers: HeaderMap,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    R: RecordStore<Registration>,
    C: RecordStore<CheckIn>,
    P: PasswordHasher + Send + Sync,
    T: TokenService,
{
    state.admin_service.authorize(bearer_token(&headers)?)?;
    let day = parse_day(&date)?;
    Ok(Json(state.check_in_service.list_on(day).await?))
}
