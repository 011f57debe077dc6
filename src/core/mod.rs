//! # Core Module
//!
//! 서비스 전 계층이 공유하는 에러 타입을 제공합니다.
//!
//! - [`errors::AppError`]: HTTP 응답으로 자동 변환되는 전역 에러
//! - [`errors::FieldErrors`]: 필드 경로별 검증 에러 모음
//! - [`errors::ErrorContext`]: 외부 에러에 컨텍스트를 붙이는 확장 트레이트

pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext, FieldErrors};
