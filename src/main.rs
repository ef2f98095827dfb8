mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    domain::{
        models::{check_in::CheckIn, registration::Registration},
        services::{id_allocator::IdAllocator, password_service::PasswordHasher},
    },
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher, json_file_store::JsonFileStore,
        jwt_token_generator::JwtTokenGenerator,
    },
    presentation::handlers::create_api_router,
    usecase::{
        admin_login_usecase::AdminLoginUsecase, check_in_usecase::CheckInUsecase,
        lookup_usecase::LookupUsecase, register_visitor_usecase::RegisterVisitorUsecase,
    },
};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "visitor_checkin=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// `visitor-checkin hash-password <password>` prints a value for `ADMIN_PASSWORD_HASH`.
fn hash_password(password: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let password = password.ok_or("usage: visitor-checkin hash-password <password>")?;
    let hash = Argon2PasswordHasher::new().hash(&password)?;
    println!("{}", hash.as_str());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => {}
        Some("hash-password") => return hash_password(args.next()),
        Some(other) => return Err(format!("unknown command: {other}").into()),
    }

    init_tracing();
    let config = AppConfig::from_env()?;

    let registration_store =
        JsonFileStore::<Registration>::open(&config.data_dir, "registrations").await?;
    let check_in_store = JsonFileStore::<CheckIn>::open(&config.data_dir, "checkins").await?;
    tracing::info!(
        registrations = %registration_store.total_path().display(),
        checkins = %check_in_store.total_path().display(),
        "Record files ready"
    );

    let (admin_credential, token_generator) = match &config.admin {
        Some(admin) => (
            Some(admin.credential()),
            JwtTokenGenerator::with_expiration(admin.token_secret.clone(), admin.token_ttl_hours),
        ),
        None => {
            tracing::warn!("ADMIN_USERNAME not set, admin endpoints are disabled");
            // placeholder secret; with no credential no token is ever issued
            (None, JwtTokenGenerator::new(String::new()))
        }
    };

    let register_visitor_usecase = RegisterVisitorUsecase::new(
        registration_store.clone(),
        IdAllocator::new(config.user_id_prefix.clone()),
    );
    let lookup_usecase = LookupUsecase::new(registration_store.clone());
    let check_in_usecase = CheckInUsecase::new(registration_store, check_in_store);
    let admin_login_usecase =
        AdminLoginUsecase::new(admin_credential, Argon2PasswordHasher::new(), token_generator);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api",
            create_api_router(
                register_visitor_usecase,
                lookup_usecase,
                check_in_usecase,
                admin_login_usecase,
            ),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, data_dir = %config.data_dir.display(), "Visitor check-in server listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use rstest::*;
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::{
        domain::{
            error::DomainError,
            models::{
                admin::{AdminCredential, HashedPassword},
                check_in::CheckIn,
                registration::Registration,
            },
            services::{id_allocator::IdAllocator, password_service::PasswordHasher},
        },
        infrastructure::{jwt_token_generator::JwtTokenGenerator, memory_store::InMemoryStore},
        presentation::{
            error::ErrorResponse,
            handlers::{
                CreatedResponse, admin_handler::AdminLoginResponse, create_api_router,
                registration_handler::{CheckEmailResponse, CheckUserIdResponse},
            },
        },
        usecase::{
            admin_login_usecase::AdminLoginUsecase, check_in_usecase::CheckInUsecase,
            lookup_usecase::LookupUsecase, register_visitor_usecase::RegisterVisitorUsecase,
        },
    };

    const ADMIN_PASSWORD: &str = "front-desk-admin";

    #[derive(Clone)]
    struct MockPasswordHasher;

    impl PasswordHasher for MockPasswordHasher {
        fn hash(&self, _plain_password: &str) -> Result<HashedPassword, DomainError> {
            Ok(HashedPassword::new("mock_hash".to_string()))
        }

        fn verify(
            &self,
            plain_password: &str,
            _hashed_password: &HashedPassword,
        ) -> Result<bool, DomainError> {
            Ok(plain_password == ADMIN_PASSWORD)
        }
    }

    fn build_app(
        registrations: InMemoryStore<Registration>,
        check_ins: InMemoryStore<CheckIn>,
    ) -> Router {
        let credential = AdminCredential::new(
            "admin".to_string(),
            HashedPassword::new("mock_hash".to_string()),
        );

        // setup router: sync settings of main.app
        Router::new().nest(
            "/api",
            create_api_router(
                RegisterVisitorUsecase::new(registrations.clone(), IdAllocator::default()),
                LookupUsecase::new(registrations.clone()),
                CheckInUsecase::new(registrations, check_ins),
                AdminLoginUsecase::new(
                    Some(credential),
                    MockPasswordHasher,
                    JwtTokenGenerator::new("test-secret".to_string()),
                ),
            ),
        )
    }

    #[fixture]
    async fn test_app() -> Router {
        build_app(InMemoryStore::default(), InMemoryStore::default())
    }

    /// # Description
    ///
    /// General request helpers shared by the test cases below

    async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        app.clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register(app: &Router, email: &str) -> Response {
        post_json(
            app,
            "/api/registrations",
            json!({
                "firstName": "Juan",
                "lastName": "Dela Cruz",
                "email": email,
                "city": "Tuguegarao",
                "services": ["Free Wi-Fi", "Printing"],
            }),
        )
        .await
    }

    // Registration

    #[rstest]
    #[tokio::test]
    async fn test_register_positive(#[future] test_app: Router) {
        let app = test_app.await;

        let response = register(&app, "a@x.com").await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: CreatedResponse<Registration> = read_json(response).await;
        assert!(created.success);
        assert_eq!(created.data.registration_number(), 1);
        assert_eq!(created.data.user_id().as_str(), "DT-00001");
        assert_eq!(created.data.profile().city, "Tuguegarao");
        assert_eq!(created.data.profile().services.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_sequence_and_duplicate_email_negative(#[future] test_app: Router) {
        let app = test_app.await;

        let first: CreatedResponse<Registration> = read_json(register(&app, "a@x.com").await).await;
        let second: CreatedResponse<Registration> = read_json(register(&app, "b@x.com").await).await;
        assert_eq!(first.data.user_id().as_str(), "DT-00001");
        assert_eq!(second.data.registration_number(), 2);
        assert_eq!(second.data.user_id().as_str(), "DT-00002");

        let response = register(&app, "A@x.com").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.code, "DUPLICATE_EMAIL");

        let all: Vec<Registration> = read_json(get(&app, "/api/registrations", None).await).await;
        assert_eq!(all.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_malformed_body_negative(#[future] test_app: Router) {
        let app = test_app.await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/registrations")
                    .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                    .body(Body::from("{ not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.code, "BAD_REQUEST");

        let response = post_json(&app, "/api/registrations", json!({ "firstName": "No Email" })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_storage_failure_negative() {
        let registrations = InMemoryStore::default();
        registrations.fail_saves();
        let app = build_app(registrations, InMemoryStore::default());

        let response = register(&app, "a@x.com").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.code, "INTERNAL_ERROR");
        assert_eq!(error.error, "Internal server error");
    }

    // Lookup

    #[rstest]
    #[tokio::test]
    async fn test_check_email(#[future] test_app: Router) {
        let app = test_app.await;
        register(&app, "Maria@Example.com").await;

        let found: CheckEmailResponse =
            read_json(post_json(&app, "/api/check-email", json!({ "email": "maria@example.com" })).await).await;
        assert!(found.exists);

        let missing: CheckEmailResponse =
            read_json(post_json(&app, "/api/check-email", json!({ "email": "nobody@example.com" })).await).await;
        assert!(!missing.exists);
    }

    #[rstest]
    #[tokio::test]
    async fn test_check_user_id(#[future] test_app: Router) {
        let app = test_app.await;
        register(&app, "a@x.com").await;

        let found: CheckUserIdResponse =
            read_json(post_json(&app, "/api/check-userid", json!({ "user_id": "dt-00001" })).await).await;
        assert!(found.exists);
        assert_eq!(found.user.unwrap().email(), "a@x.com");

        let missing: CheckUserIdResponse =
            read_json(post_json(&app, "/api/check-userid", json!({ "user_id": "DT-00002" })).await).await;
        assert!(!missing.exists);
        assert!(missing.user.is_none());
    }

    // Check-in

    #[rstest]
    #[tokio::test]
    async fn test_check_in_positive(#[future] test_app: Router) {
        let app = test_app.await;
        register(&app, "a@x.com").await;

        let response = post_json(
            &app,
            "/api/checkins",
            json!({ "user_id": "dt-00001", "service": "Printing", "notes": "10 pages" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: CreatedResponse<CheckIn> = read_json(response).await;
        assert_eq!(created.data.user_id().as_str(), "DT-00001");
        assert_eq!(created.data.registration_number(), 1);

        let all: Vec<CheckIn> = read_json(get(&app, "/api/checkins", None).await).await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].service(), "Printing");
        assert_eq!(all[0].notes(), Some("10 pages"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_check_in_unknown_user_negative(#[future] test_app: Router) {
        let app = test_app.await;
        register(&app, "a@x.com").await;

        let response = post_json(
            &app,
            "/api/checkins",
            json!({ "user_id": "DT-00099", "service": "Printing" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.code, "USER_NOT_FOUND");

        let all: Vec<CheckIn> = read_json(get(&app, "/api/checkins", None).await).await;
        assert!(all.is_empty());
    }

    // Admin

    async fn admin_token(app: &Router) -> String {
        let response = post_json(
            app,
            "/api/admin/login",
            json!({ "username": "admin", "password": ADMIN_PASSWORD }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let login: AdminLoginResponse = read_json(response).await;
        login.token
    }

    #[rstest]
    #[tokio::test]
    async fn test_admin_login_invalid_password_negative(#[future] test_app: Router) {
        let app = test_app.await;

        let response = post_json(
            &app,
            "/api/admin/login",
            json!({ "username": "admin", "password": "Password123!" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[tokio::test]
    async fn test_admin_daily_views(#[future] test_app: Router) {
        let app = test_app.await;
        let created: CreatedResponse<Registration> = read_json(register(&app, "a@x.com").await).await;
        post_json(&app, "/api/checkins", json!({ "user_id": "DT-00001", "service": "Wi-Fi" })).await;

        let day = created.data.registered_at().format("%Y-%m-%d").to_string();
        let token = admin_token(&app).await;

        let registrations: Vec<Registration> = read_json(
            get(&app, &format!("/api/admin/registrations/daily/{day}"), Some(&token)).await,
        )
        .await;
        assert_eq!(registrations.len(), 1);

        let response = get(&app, "/api/admin/checkins/daily/1999-01-01", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let check_ins: Vec<CheckIn> = read_json(response).await;
        assert!(check_ins.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_admin_daily_views_require_token_negative(#[future] test_app: Router) {
        let app = test_app.await;

        let response = get(&app, "/api/admin/registrations/daily/2025-03-01", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = get(&app, "/api/admin/checkins/daily/2025-03-01", Some("forged")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let token = admin_token(&app).await;
        let response = get(&app, "/api/admin/checkins/daily/yesterday", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
