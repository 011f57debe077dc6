//! 프로세스 메모리 회원 저장소
//!
//! 통합 테스트와 `STORAGE_BACKEND=memory` 로컬 실행에 사용합니다.
//! MongoDB 인덱스와 같은 유니크 제약을 하나의 잠금 안에서 검사하고 삽입하므로
//! 회원과 주소는 함께 저장되거나 함께 거부됩니다.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use log::warn;
use mongodb::bson::oid::ObjectId;

use super::user_repo::{UserRepository, assign_ids};
use crate::{
    core::errors::{AppError, AppResult},
    domain::entities::users::{Address, NewAddress, User},
};

#[derive(Default)]
struct Store {
    users: Vec<User>,
    addresses: Vec<Address>,
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> AppResult<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| AppError::InternalError("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.store()?.users.iter().any(|u| u.email == email))
    }

    async fn crm_exists(&self, crm: &str, crm_uf: &str) -> AppResult<bool> {
        Ok(self
            .store()?
            .users
            .iter()
            .any(|u| u.crm == crm && u.crm_uf == crm_uf))
    }

    async fn create_with_addresses(
        &self,
        user: User,
        addresses: Vec<NewAddress>,
    ) -> AppResult<(User, Vec<Address>)> {
        let mut store = self.store()?;

        if store.users.iter().any(|u| u.email == user.email) {
            warn!("⚠️ 유니크 제약 위반: email_unique");
            return Err(AppError::DatabaseError(
                "duplicate key error: email_unique".to_string(),
            ));
        }
        if store
            .users
            .iter()
            .any(|u| u.crm == user.crm && u.crm_uf == user.crm_uf)
        {
            warn!("⚠️ 유니크 제약 위반: crm_uf_unique");
            return Err(AppError::DatabaseError(
                "duplicate key error: crm_uf_unique".to_string(),
            ));
        }

        let (user, addresses) = assign_ids(user, addresses);
        store.users.push(user.clone());
        store.addresses.extend(addresses.iter().cloned());

        Ok((user, addresses))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .store()?
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_addresses_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Address>> {
        Ok(self
            .store()?
            .addresses
            .iter()
            .filter(|a| &a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_users(&self) -> AppResult<u64> {
        Ok(self.store()?.users.len() as u64)
    }

    async fn count_addresses(&self) -> AppResult<u64> {
        Ok(self.store()?.addresses.len() as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
