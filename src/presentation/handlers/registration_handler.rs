use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::registration::{Registration, VisitorProfile},
        repositories::record_store::RecordStore,
    },
    presentation::{error::AppError, handlers::CreatedResponse},
    usecase::{lookup_usecase::LookupUsecase, register_visitor_usecase::RegisterVisitorUsecase},
};

// Request

/// json for email availability check
#[derive(Serialize, Deserialize)]
pub struct CheckEmailRequest {
    pub email: String,
}

/// json for user id lookup
#[derive(Serialize, Deserialize)]
pub struct CheckUserIdRequest {
    pub user_id: String,
}

// Response

#[derive(Serialize, Deserialize)]
pub struct CheckEmailResponse {
    pub exists: bool,
}

#[derive(Serialize, Deserialize)]
pub struct CheckUserIdResponse {
    pub exists: bool,
    pub user: Option<Registration>,
}

/* Router Function and Handler Function */

/// Routes for the registration form. Suppose to be nested under `/api`.
pub fn create_registration_router<R: RecordStore<Registration> + 'static>(
    register_service: Arc<RegisterVisitorUsecase<R>>,
    lookup_service: Arc<LookupUsecase<R>>,
) -> Router {
    let state = RegistrationState {
        register_service,
        lookup_service,
    };

    Router::new()
        .route(
            "/registrations",
            get(list_registrations::<R>).post(create_registration::<R>),
        )
        .route("/check-email", post(check_email::<R>))
        .route("/check-userid", post(check_user_id::<R>))
        .with_state(state)
}

pub struct RegistrationState<R: RecordStore<Registration>> {
    pub register_service: Arc<RegisterVisitorUsecase<R>>,
    pub lookup_service: Arc<LookupUsecase<R>>,
}

impl<R: RecordStore<Registration>> Clone for RegistrationState<R> {
    fn clone(&self) -> Self {
        Self {
            register_service: Arc::clone(&self.register_service),
            lookup_service: Arc::clone(&self.lookup_service),
        }
    }
}

// handler function

async fn list_registrations<R: RecordStore<Registration>>(
    State(state): State<RegistrationState<R>>,
) -> Result<impl IntoResponse, AppError> {
    let registrations = state.register_service.list().await?;
    Ok(Json(registrations))
}

async fn create_registration<R: RecordStore<Registration>>(
    State(state): State<RegistrationState<R>>,
    payload: Result<Json<VisitorProfile>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(profile) = payload?;
    let registration = state.register_service.register(profile).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(registration)),
    ))
}

async fn check_email<R: RecordStore<Registration>>(
    State(state): State<RegistrationState<R>>,
    payload: Result<Json<CheckEmailRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let exists = state.lookup_service.email_exists(&request.email).await?;
    Ok(Json(CheckEmailResponse { exists }))
}

async fn check_user_id<R: RecordStore<Registration>>(
    State(state): State<RegistrationState<R>>,
    payload: Result<Json<CheckUserIdRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let user = state.lookup_service.find_by_user_id(&request.user_id).await?;
    Ok(Json(CheckUserIdResponse {
        exists: user.is_some(),
        user,
    }))
}
