//! API 라우트 설정 모듈
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/health` | 헬스체크 |
//! | `POST` | `/register` | 의사 회원가입 (라우트 이름 `register`) |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(registration_service))
//!     .configure(configure_all_routes);
//! ```

use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::handlers;
use crate::services::users::RegistrationService;

/// 모든 라우트를 설정합니다
///
/// `RegistrationService`는 호출 측에서 `app_data`로 등록해야 합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::users::json_config());

    // Health check endpoint
    cfg.service(health_check);

    cfg.service(handlers::users::register);
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "doctor_registration",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00+00:00",
///   "storage": "mongodb"
/// }
/// ```
#[get("/health")]
async fn health_check(service: web::Data<RegistrationService>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "doctor_registration",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "storage": service.storage_backend(),
    }))
}
