//! 설정 모듈
//!
//! 데이터베이스, 서버, 환경 및 보안 관련 설정을 관리합니다.

pub mod data_config;

pub use data_config::*;
