pub mod admin_handler;
pub mod check_in_handler;
pub mod registration_handler;

use std::sync::Arc;

use axum::Router;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::{check_in::CheckIn, registration::Registration},
        repositories::record_store::RecordStore,
        services::{password_service::PasswordHasher, token_service::TokenService},
    },
    usecase::{
        admin_login_usecase::AdminLoginUsecase, check_in_usecase::CheckInUsecase,
        lookup_usecase::LookupUsecase, register_visitor_usecase::RegisterVisitorUsecase,
    },
};

/// json for a successfully stored record
#[derive(Serialize, Deserialize)]
pub struct CreatedResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> CreatedResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Every JSON endpoint, meant to be nested under `/api`.
pub fn create_api_router<R, C, P, T>(
    register_service: RegisterVisitorUsecase<R>,
    lookup_service: LookupUsecase<R>,
    check_in_service: CheckInUsecase<R, C>,
    admin_service: AdminLoginUsecase<P, T>,
) -> Router
where
    R: RecordStore<Registration> + 'static,
    C: RecordStore<CheckIn> + 'static,
    P: PasswordHasher + Send + Sync + 'static,
    T: TokenService + 'static,
{
    let lookup_service = Arc::new(lookup_service);
    let check_in_service = Arc::new(check_in_service);

    Router::new()
        .merge(registration_handler::create_registration_router(
            Arc::new(register_service),
            Arc::clone(&lookup_service),
        ))
        .merge(check_in_handler::create_check_in_router(Arc::clone(
            &check_in_service,
        )))
        .merge(admin_handler::create_admin_router(
            Arc::new(admin_service),
            lookup_service,
            check_in_service,
        ))
}
