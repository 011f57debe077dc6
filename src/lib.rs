//! # Doctor Registration Backend
//!
//! 브라질 의사 회원가입 API 서버입니다.
//!
//! ```text
//! routes -> handlers -> services -> repositories -> MongoDB | in-memory
//!                 \-> domain (dto / entities)
//! ```
//!
//! - [`routes`]: 엔드포인트 등록
//! - [`handlers`]: HTTP 요청/응답 변환
//! - [`services`]: 검증, 중복 검사, 해싱, 저장 흐름
//! - [`repositories`]: 회원/주소 저장소 트레이트와 구현
//! - [`domain`]: 요청/응답 DTO, 엔티티
//! - [`core`]: 에러 타입
//! - [`config`]: 환경 변수 설정
//! - [`db`]: MongoDB 연결
//! - [`utils`]: 문자열 정규화, 형식 규칙

pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
