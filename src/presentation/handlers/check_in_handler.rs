use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::{check_in::CheckIn, registration::Registration},
        repositories::record_store::RecordStore,
    },
    presentation::{error::AppError, handlers::CreatedResponse},
    usecase::check_in_usecase::CheckInUsecase,
};

/// json for check-in request
#[derive(Serialize, Deserialize)]
pub struct CheckInRequest {
    pub user_id: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn create_check_in_router<R, C>(check_in_service: Arc<CheckInUsecase<R, C>>) -> Router
where
    R: RecordStore<Registration> + 'static,
    C: RecordStore<CheckIn> + 'static,
{
    Router::new()
        .route(
            "/checkins",
            get(list_check_ins::<R, C>).post(create_check_in::<R, C>),
        )
        .with_state(check_in_service)
}

async fn list_check_ins<R: RecordStore<Registration>, C: RecordStore<CheckIn>>(
    State(service): State<Arc<CheckInUsecase<R, C>>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(service.list().await?))
}

async fn create_check_in<R: RecordStore<Registration>, C: RecordStore<CheckIn>>(
    State(service): State<Arc<CheckInUsecase<R, C>>>,
    payload: Result<Json<CheckInRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let check_in = service
        .check_in(&request.user_id, request.service, request.notes)
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(check_in))))
}
