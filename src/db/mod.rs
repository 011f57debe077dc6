//! MongoDB 연결 관리 모듈
//!
//! 클라이언트 생성, 연결 확인(ping), 데이터베이스 핸들 제공을 담당합니다.
//! 트랜잭션 세션은 [`Database::client`]에서 시작합니다.

use log::info;
use mongodb::{Client, options::ClientOptions};

use crate::config::DatabaseConfig;

/// MongoDB 데이터베이스 연결 래퍼
///
/// `Client`는 내부적으로 커넥션 풀을 공유하므로 복제 비용이 낮습니다.
#[derive(Clone)]
pub struct Database {
    /// MongoDB 클라이언트 인스턴스
    client: Client,
    /// 사용할 데이터베이스 이름
    database_name: String,
}

impl Database {
    /// 설정에 따라 MongoDB에 연결하고 `ping`으로 연결을 확인합니다.
    ///
    /// # Errors
    ///
    /// URI 파싱 실패, 클라이언트 생성 실패, ping 실패 시 에러를 반환합니다.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;

        // 모니터링 도구에서 식별하기 위한 애플리케이션 이름
        client_options.app_name = Some("doctor_registration".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&config.database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", config.database_name);

        Ok(Self {
            client,
            database_name: config.database_name.clone(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
