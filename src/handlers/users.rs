//! # Registration HTTP Handlers
//!
//! | 메서드 | 경로 | 라우트 이름 | 성공 | 검증 실패 |
//! |--------|------|-------------|------|-----------|
//! | `POST` | `/register` | `register` | 201 Created | 422 Unprocessable Entity |
//!
//! 본문은 `serde_json::Value`로 받습니다. 필드 누락이나 타입 오류도
//! 역직렬화 단계에서 실패하지 않고 필드별 422 에러로 보고하기 위함입니다.
//! JSON 문법 자체가 잘못된 본문은 [`json_config`]의 에러 핸들러가 400으로 응답합니다.
//!
//! ```bash
//! curl -X POST http://localhost:8080/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"name":"John Doe","email":"test@example.com","phone_number":"(96) 98765-4321",
//!        "crm":"123456","crm_uf":"SP","password":"password","password_confirmation":"password",
//!        "addresses":[{"location_name":"Clínica X","full_address":"Rua A, 123","cep":"12345-678"}],
//!        "terms_accepted":true}'
//! ```

use actix_web::{HttpRequest, HttpResponse, error::JsonPayloadError, post, web};
use serde_json::Value;

use crate::core::errors::AppError;
use crate::services::users::RegistrationService;

#[post("/register", name = "register")]
pub async fn register(
    payload: web::Json<Value>,
    service: web::Data<RegistrationService>,
) -> Result<HttpResponse, AppError> {
    let response = service.register(&payload).await?;

    Ok(HttpResponse::Created().json(response))
}

/// JSON 추출기 설정
///
/// 해석할 수 없는 본문을 `AppError::BadRequest` JSON 응답으로 변환합니다.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        log::warn!("요청 본문 해석 실패: {}", err);
        AppError::BadRequest(err.to_string()).into()
    })
}
