//! # Application Error Handling System
//!
//! 회원가입 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! 모든 에러는 `actix_web::ResponseError`를 통해 일관된 JSON 응답으로 변환됩니다.
//!
//! ## 상태 코드 매핑
//!
//! | 변형 | 상태 코드 | 응답 본문 |
//! |------|-----------|-----------|
//! | `ValidationError` | 422 | `{"message": ..., "errors": {필드 경로: [메시지]}}` |
//! | `BadRequest` | 400 | `{"error": ...}` |
//! | `DatabaseError` | 500 | `{"error": ...}` |
//! | `InternalError` | 500 | `{"error": ...}` |
//!
//! ## 필드 에러
//!
//! 검증 에러는 [`FieldErrors`]로 수집됩니다. 키는 점(`.`)으로 구분된
//! 필드 경로(`addresses.0.cep`)이며, 값은 사람이 읽을 수 있는 메시지 목록입니다.
//! 하나의 요청에서 발견된 모든 위반 사항이 한 번에 보고됩니다.
//!
//! ```rust,ignore
//! let mut errors = FieldErrors::new();
//! errors.add("email", "O campo email deve ser um endereço de e-mail válido.");
//!
//! if !errors.is_empty() {
//!     return Err(AppError::ValidationError(errors));
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// 필드 경로별 검증 에러 모음
///
/// `BTreeMap`을 사용하므로 응답의 필드 순서가 항상 정렬되어 있습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드에 에러 메시지를 추가합니다.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 에러가 있는 필드 수
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn total_messages(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn first_message(&self) -> Option<&str> {
        self.0
            .values()
            .flat_map(|messages| messages.iter())
            .next()
            .map(String::as_str)
    }

    /// 아직 에러가 없는 필드의 에러만 병합합니다.
    ///
    /// 타입 에러(예: 문자열이 아닌 값)가 먼저 기록된 필드에
    /// 규칙 검증 에러가 중복으로 쌓이지 않도록 합니다.
    pub fn merge_absent(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_insert(messages);
        }
    }

    /// 다른 에러 모음을 `prefix.` 경로 아래로 옮겨 담습니다.
    pub fn extend_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0
                .entry(format!("{}.{}", prefix, field))
                .or_default()
                .extend(messages);
        }
    }

    /// 응답 본문의 `message` 요약
    ///
    /// 첫 번째 메시지에 나머지 에러 개수를 덧붙입니다.
    pub fn summary(&self) -> String {
        let first = self.first_message().unwrap_or("Os dados fornecidos são inválidos.");
        match self.total_messages().saturating_sub(1) {
            0 => first.to_string(),
            1 => format!("{} (e mais 1 erro)", first),
            n => format!("{} (e mais {} erros)", first, n),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields [{}]", fields.join(", "))
    }
}

impl From<&validator::ValidationErrors> for FieldErrors {
    fn from(errors: &validator::ValidationErrors) -> Self {
        let mut collected = FieldErrors::new();

        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("O campo {} é inválido.", field));
                collected.add(field.to_string(), message);
            }
        }

        collected
    }
}

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 저장소 연산 실패
    ///
    /// 연결 실패, 트랜잭션 중단, 사전 검사를 통과한 뒤 발생한
    /// 유니크 제약 위반 등이 여기에 해당합니다. 500으로 응답합니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 필드 단위 입력 검증 실패 (422)
    #[error("Validation error: {0}")]
    ValidationError(FieldErrors),

    /// 요청 본문을 JSON으로 해석할 수 없는 경우 (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 예상하지 못한 시스템 오류 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        match self {
            AppError::ValidationError(errors) => {
                actix_web::HttpResponse::build(status).json(serde_json::json!({
                    "message": errors.summary(),
                    "errors": errors,
                }))
            }
            // 내부 에러의 상세 내용은 로그에만 남깁니다.
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                actix_web::HttpResponse::build(status).json(serde_json::json!({
                    "error": "Erro interno do servidor."
                }))
            }
            AppError::BadRequest(_) => {
                actix_web::HttpResponse::build(status).json(serde_json::json!({
                    "error": self.to_string()
                }))
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 컨텍스트를 붙여 `AppError::InternalError`로 변환합니다.
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::body::MessageBody;

    fn body_json(error: AppError) -> serde_json::Value {
        let bytes = error
            .error_response()
            .into_body()
            .try_into_bytes()
            .ok()
            .expect("body should be in memory");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[test]
    fn test_validation_error_response() {
        let mut errors = FieldErrors::new();
        errors.add("email", "O campo email é obrigatório.");
        let response = AppError::ValidationError(errors).error_response();

        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_validation_error_body_lists_every_field() {
        let mut errors = FieldErrors::new();
        errors.add("name", "O campo nome é obrigatório.");
        errors.add("addresses.0.cep", "O campo CEP é obrigatório.");
        errors.add("addresses.0.cep", "O CEP deve estar no formato 00000-000.");

        let body = body_json(AppError::ValidationError(errors));

        assert_eq!(body["errors"]["name"][0], "O campo nome é obrigatório.");
        assert_eq!(body["errors"]["addresses.0.cep"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["message"], "O campo CEP é obrigatório. (e mais 2 erros)");
    }

    #[test]
    fn test_bad_request_response() {
        let error = AppError::BadRequest("expected value at line 1".to_string());
        assert_eq!(
            error.error_response().status(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_error_hides_details() {
        let body = body_json(AppError::DatabaseError("E11000 duplicate key".to_string()));
        assert_eq!(body["error"], "Erro interno do servidor.");
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }

    #[test]
    fn test_merge_absent_keeps_existing_messages() {
        let mut errors = FieldErrors::new();
        errors.add("crm", "O campo crm deve ser um texto.");

        let mut rules = FieldErrors::new();
        rules.add("crm", "O CRM deve conter apenas números.");
        rules.add("name", "O campo nome é obrigatório.");

        errors.merge_absent(rules);

        assert_eq!(errors.messages("crm"), Some(&["O campo crm deve ser um texto.".to_string()][..]));
        assert!(errors.has("name"));
    }

    #[test]
    fn test_extend_prefixed() {
        let mut nested = FieldErrors::new();
        nested.add("cep", "O campo CEP é obrigatório.");

        let mut errors = FieldErrors::new();
        errors.extend_prefixed("addresses.1", nested);

        assert!(errors.has("addresses.1.cep"));
        assert_eq!(errors.len(), 1);
    }
}
