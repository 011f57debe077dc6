//! Address Entity
//!
//! 회원의 진료 장소 주소입니다. `addresses` 컬렉션에 저장되며
//! `user_id`로 소유 회원을 참조합니다. 한 회원은 여러 주소를 가질 수 있습니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub location_name: String,
    pub full_address: String,
    #[serde(default)]
    pub complement: Option<String>,
    /// 숫자 8자리
    pub cep: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 소유 회원이 정해지기 전의 주소 값
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub location_name: String,
    pub full_address: String,
    pub complement: Option<String>,
    pub cep: String,
}

impl NewAddress {
    /// 회원 ID를 연결해 저장 가능한 주소로 변환합니다.
    pub fn into_address(self, user_id: ObjectId, now: DateTime) -> Address {
        Address {
            id: ObjectId::new(),
            user_id,
            location_name: self.location_name,
            full_address: self.full_address,
            complement: self.complement,
            cep: self.cep,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_address_links_user() {
        let user_id = ObjectId::new();
        let address = NewAddress {
            location_name: "Clínica X".to_string(),
            full_address: "Rua A, 123".to_string(),
            complement: None,
            cep: "12345678".to_string(),
        }
        .into_address(user_id, DateTime::now());

        assert_eq!(address.user_id, user_id);
        assert_ne!(address.id, user_id);
        assert_eq!(address.cep, "12345678");
    }
}
