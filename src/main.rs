use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use doctor_registration_backend::config::{
    CorsConfig, DatabaseConfig, PasswordConfig, RateLimitConfig, ServerConfig, StorageBackend,
};
use doctor_registration_backend::db::Database;
use doctor_registration_backend::repositories::users::{
    InMemoryUserRepository, MongoUserRepository, UserRepository,
};
use doctor_registration_backend::routes::configure_all_routes;
use doctor_registration_backend::services::users::RegistrationService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 의사 회원가입 서비스 시작중...");

    let user_repo = initialize_user_repository().await?;
    let bcrypt_cost = PasswordConfig::bcrypt_cost();
    info!("🔐 bcrypt cost: {}", bcrypt_cost);

    let registration_service = web::Data::new(RegistrationService::new(user_repo, bcrypt_cost));

    start_http_server(registration_service).await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 표준 에러로 출력한다
    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 설정된 저장소 구현을 생성합니다
///
/// MongoDB를 사용하는 경우 연결 확인과 인덱스 생성을 함께 수행합니다.
async fn initialize_user_repository() -> std::io::Result<Arc<dyn UserRepository>> {
    match StorageBackend::current() {
        StorageBackend::Memory => {
            info!("🧪 메모리 저장소 사용 (재시작 시 데이터가 사라집니다)");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
        StorageBackend::MongoDb => {
            let config = DatabaseConfig::from_env();
            info!("📡 데이터베이스 연결 중... (transactions={})", config.use_transactions);

            let database = Database::connect(&config).await.map_err(|e| {
                error!("❌ 데이터베이스 연결 실패: {}", e);
                std::io::Error::other(e.to_string())
            })?;

            let repo = MongoUserRepository::new(Arc::new(database), config.use_transactions);
            repo.create_indexes().await.map_err(|e| {
                error!("❌ 인덱스 생성 실패: {}", e);
                std::io::Error::other(e.to_string())
            })?;
            info!("✅ users/addresses 인덱스 준비 완료");

            Ok(Arc::new(repo))
        }
    }
}

async fn start_http_server(service: web::Data<RegistrationService>) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Register: POST http://{}/register", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("rate limit 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = CorsConfig::allowed_origins();

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(service.clone())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}

/// CORS 설정을 구성합니다
fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}
