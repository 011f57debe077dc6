//! 애플리케이션 설정 관리 모듈
//!
//! 실행 환경, 서버, 데이터베이스, 비밀번호 해싱, Rate Limiting, CORS 설정을
//! 환경 변수에서 읽어옵니다. 모든 값은 합리적인 기본값을 가지므로
//! `.env` 파일 없이도 로컬 개발 환경에서 바로 실행할 수 있습니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        env::var("ENVIRONMENT")
            .map(|value| Self::from_str(&value))
            .unwrap_or(Environment::Production)
    }

    /// 문자열에서 실행 환경을 파싱합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 비밀번호 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt 해싱 비용을 반환합니다.
    ///
    /// `BCRYPT_COST` 환경 변수가 4~15 범위의 정수이면 그 값을,
    /// 아니면 실행 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|value| Self::parse_cost(&value))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    pub fn parse_cost(value: &str) -> Option<u32> {
        value
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|cost| (4..=15).contains(cost))
    }

    /// 실행 환경별 기본 bcrypt 비용
    ///
    /// | 환경 | 비용 |
    /// |------|------|
    /// | Development | 4 |
    /// | Test | 4 |
    /// | Staging | 10 |
    /// | Production | 12 |
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 사용자 저장소 구현 선택
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageBackend {
    /// MongoDB (`users`, `addresses` 컬렉션)
    MongoDb,
    /// 프로세스 메모리 (로컬 실행, 테스트)
    Memory,
}

impl StorageBackend {
    /// `STORAGE_BACKEND` 환경 변수를 읽습니다. 기본값은 `MongoDb`입니다.
    pub fn current() -> Self {
        env::var("STORAGE_BACKEND")
            .map(|value| Self::from_str(&value))
            .unwrap_or(StorageBackend::MongoDb)
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StorageBackend::Memory,
            _ => StorageBackend::MongoDb,
        }
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database_name: String,
    /// 사용자와 주소 삽입을 하나의 트랜잭션으로 묶을지 여부
    ///
    /// 트랜잭션은 레플리카 셋에서만 동작하므로 단일 서버 개발 환경에서는
    /// `MONGODB_TRANSACTIONS=false`로 보상 삭제 방식을 사용합니다.
    pub use_transactions: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "doctor_registration_dev".to_string()),
            use_transactions: env::var("MONGODB_TRANSACTIONS")
                .map(|value| parse_bool(&value, true))
                .unwrap_or(true),
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// `RATE_LIMIT_PER_SECOND`(기본 100), `RATE_LIMIT_BURST_SIZE`(기본 200)를 읽습니다.
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        Self {
            per_second,
            burst_size,
        }
    }
}

/// CORS 허용 Origin 설정
pub struct CorsConfig;

impl CorsConfig {
    const DEFAULT_ORIGINS: [&'static str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

    /// `CORS_ALLOWED_ORIGINS` (쉼표 구분) 값을 읽습니다.
    pub fn allowed_origins() -> Vec<String> {
        env::var("CORS_ALLOWED_ORIGINS")
            .map(|value| Self::parse_origins(&value))
            .unwrap_or_else(|_| Self::default_origins())
    }

    pub fn parse_origins(value: &str) -> Vec<String> {
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() {
            Self::default_origins()
        } else {
            origins
        }
    }

    fn default_origins() -> Vec<String> {
        Self::DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect()
    }
}

fn parse_bool(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => default,
    }
}
