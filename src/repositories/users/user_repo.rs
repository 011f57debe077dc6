//! # User Repository
//!
//! 회원(`users`)과 주소(`addresses`) 저장소 인터페이스와 MongoDB 구현입니다.
//!
//! ## 원자성
//!
//! 회원과 주소는 항상 함께 저장되거나 함께 저장되지 않아야 합니다.
//!
//! - 트랜잭션 사용 (`MONGODB_TRANSACTIONS=true`, 레플리카 셋):
//!   하나의 세션 트랜잭션 안에서 두 컬렉션에 삽입하고 실패 시 abort
//! - 트랜잭션 미사용 (단일 서버): 회원 삽입 후 주소 삽입이 실패하면
//!   이미 저장된 회원과 주소를 삭제하는 보상 처리
//!
//! ## 유니크 제약
//!
//! 서비스 계층의 중복 검사는 빠른 사전 검사일 뿐이며, 최종 보장은 인덱스가 담당합니다.
//!
//! | 인덱스 | 키 | 옵션 |
//! |--------|----|------|
//! | `email_unique` | `email` | unique |
//! | `crm_uf_unique` | `crm`, `crm_uf` | unique |
//! | `user_id_idx` | `addresses.user_id` | |

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{error, warn};
use mongodb::{
    Collection, IndexModel,
    bson::{DateTime, doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};

use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::users::{Address, NewAddress, User},
};

const USERS_COLLECTION: &str = "users";
const ADDRESSES_COLLECTION: &str = "addresses";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 회원 저장소 인터페이스
///
/// 핸들러와 서비스는 이 트레이트에만 의존하므로 테스트에서는
/// [`InMemoryUserRepository`](super::InMemoryUserRepository)로 교체할 수 있습니다.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    async fn crm_exists(&self, crm: &str, crm_uf: &str) -> AppResult<bool>;

    /// 회원과 주소를 원자적으로 저장합니다.
    ///
    /// 회원 ID를 할당하고 모든 주소의 `user_id`를 그 ID로 연결합니다.
    /// 유니크 제약 위반을 포함한 모든 저장 실패는 `AppError::DatabaseError`이며,
    /// 이 경우 어떤 문서도 남지 않습니다.
    async fn create_with_addresses(
        &self,
        user: User,
        addresses: Vec<NewAddress>,
    ) -> AppResult<(User, Vec<Address>)>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_addresses_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Address>>;

    async fn count_users(&self) -> AppResult<u64>;

    async fn count_addresses(&self) -> AppResult<u64>;

    /// 저장소 구현 이름 (헬스체크 응답용)
    fn backend_name(&self) -> &'static str;
}

/// 회원 ID를 할당하고 주소를 연결합니다.
pub(crate) fn assign_ids(mut user: User, addresses: Vec<NewAddress>) -> (User, Vec<Address>) {
    let user_id = ObjectId::new();
    let now = DateTime::now();
    user.id = Some(user_id);

    let addresses = addresses
        .into_iter()
        .map(|address| address.into_address(user_id, now))
        .collect();

    (user, addresses)
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::InsertMany(insert_error) => insert_error
            .write_errors
            .as_ref()
            .is_some_and(|errors| errors.iter().any(|e| e.code == DUPLICATE_KEY_CODE)),
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

fn database_error(error: mongodb::error::Error) -> AppError {
    AppError::DatabaseError(error.to_string())
}

/// MongoDB 회원 저장소
pub struct MongoUserRepository {
    db: Arc<Database>,
    use_transactions: bool,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>, use_transactions: bool) -> Self {
        Self {
            db,
            use_transactions,
        }
    }

    fn users(&self) -> Collection<User> {
        self.db.get_database().collection(USERS_COLLECTION)
    }

    fn addresses(&self) -> Collection<Address> {
        self.db.get_database().collection(ADDRESSES_COLLECTION)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let crm_index = IndexModel::builder()
            .keys(doc! { "crm": 1, "crm_uf": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("crm_uf_unique".to_string())
                .build())
            .build();

        self.users()
            .create_indexes([email_index, crm_index])
            .await
            .map_err(database_error)?;

        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .name("user_id_idx".to_string())
                .build())
            .build();

        self.addresses()
            .create_index(user_id_index)
            .await
            .map_err(database_error)?;

        Ok(())
    }

    async fn insert_in_transaction(
        &self,
        user: &User,
        addresses: &[Address],
    ) -> mongodb::error::Result<()> {
        let mut session = self.db.client().start_session().await?;
        session.start_transaction().await?;

        let result = async {
            self.users().insert_one(user).session(&mut session).await?;
            if !addresses.is_empty() {
                self.addresses()
                    .insert_many(addresses)
                    .session(&mut session)
                    .await?;
            }
            Ok::<(), mongodb::error::Error>(())
        }
        .await;

        match result {
            Ok(()) => session.commit_transaction().await,
            Err(e) => {
                if let Err(abort_error) = session.abort_transaction().await {
                    error!("트랜잭션 abort 실패: {}", abort_error);
                }
                Err(e)
            }
        }
    }

    async fn insert_with_compensation(
        &self,
        user: &User,
        addresses: &[Address],
    ) -> mongodb::error::Result<()> {
        self.users().insert_one(user).await?;

        if addresses.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.addresses().insert_many(addresses).await {
            if let Some(user_id) = user.id {
                // 부분 삽입된 주소와 회원을 되돌린다
                if let Err(cleanup) = self.addresses().delete_many(doc! { "user_id": user_id }).await {
                    error!("주소 보상 삭제 실패 (user_id={}): {}", user_id, cleanup);
                }
                if let Err(cleanup) = self.users().delete_one(doc! { "_id": user_id }).await {
                    error!("회원 보상 삭제 실패 (user_id={}): {}", user_id, cleanup);
                }
            }
            return Err(e);
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn crm_exists(&self, crm: &str, crm_uf: &str) -> AppResult<bool> {
        let count = self
            .users()
            .count_documents(doc! { "crm": crm, "crm_uf": crm_uf })
            .await
            .map_err(database_error)?;

        Ok(count > 0)
    }

    async fn create_with_addresses(
        &self,
        user: User,
        addresses: Vec<NewAddress>,
    ) -> AppResult<(User, Vec<Address>)> {
        let (user, addresses) = assign_ids(user, addresses);

        let result = if self.use_transactions {
            self.insert_in_transaction(&user, &addresses).await
        } else {
            self.insert_with_compensation(&user, &addresses).await
        };

        match result {
            Ok(()) => Ok((user, addresses)),
            Err(e) if is_duplicate_key(&e) => {
                warn!("⚠️ 사전 검사 이후 유니크 제약 위반 (동시 가입): {}", e);
                Err(database_error(e))
            }
            Err(e) => {
                error!("❌ 회원 저장 실패: {}", e);
                Err(database_error(e))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users()
            .find_one(doc! { "email": email })
            .await
            .map_err(database_error)
    }

    async fn find_addresses_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Address>> {
        self.addresses()
            .find(doc! { "user_id": *user_id })
            .await
            .map_err(database_error)?
            .try_collect()
            .await
            .map_err(database_error)
    }

    async fn count_users(&self) -> AppResult<u64> {
        self.users()
            .count_documents(doc! {})
            .await
            .map_err(database_error)
    }

    async fn count_addresses(&self) -> AppResult<u64> {
        self.addresses()
            .count_documents(doc! {})
            .await
            .map_err(database_error)
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;
    use mongodb::error::{Error, WriteError};

    fn write_error(code: i32) -> Error {
        let write_error: WriteError = bson::from_document(doc! {
            "code": code,
            "codeName": "DuplicateKey",
            "errmsg": "E11000 duplicate key error collection: users index: email_unique",
        })
        .expect("write error document");

        Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    #[test]
    fn test_duplicate_key_write_error_is_detected() {
        assert!(is_duplicate_key(&write_error(DUPLICATE_KEY_CODE)));
    }

    #[test]
    fn test_other_write_errors_are_not_duplicates() {
        assert!(!is_duplicate_key(&write_error(121)));
    }

    #[test]
    fn test_database_error_keeps_message() {
        match database_error(write_error(DUPLICATE_KEY_CODE)) {
            AppError::DatabaseError(message) => assert!(message.contains("E11000")),
            other => panic!("Expected DatabaseError, got {:?}", other),
        }
    }
}
