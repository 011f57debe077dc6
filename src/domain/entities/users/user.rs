//! User Entity Implementation
//!
//! 의사 회원 엔티티입니다. MongoDB `users` 컬렉션의 문서와 1:1로 대응합니다.

use std::fmt;

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// 의사 회원 엔티티
///
/// `password`에는 평문이 아닌 bcrypt 해시만 저장됩니다.
/// `Debug` 출력에서도 해시는 가려집니다.
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// 소문자로 정규화된 이메일 (unique)
    pub email: String,
    /// 숫자만 남긴 전화번호
    pub phone_number: String,
    pub crm: String,
    /// 대문자 UF 약어. `(crm, crm_uf)` 조합은 unique
    pub crm_uf: String,
    /// bcrypt 해시
    pub password: String,
    /// 저장 시 1/0 정수
    #[serde(with = "bool_as_int")]
    pub terms_accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_accepted_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 회원 생성에 필요한 정규화된 값
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub crm: String,
    pub crm_uf: String,
    pub password_hash: String,
}

impl User {
    /// 약관 동의 시각을 기록한 새 회원을 생성합니다. `id`는 저장 시 할당됩니다.
    pub fn new(new_user: NewUser, accepted_at: DateTime) -> Self {
        Self {
            id: None,
            name: new_user.name,
            email: new_user.email,
            phone_number: new_user.phone_number,
            crm: new_user.crm,
            crm_uf: new_user.crm_uf,
            password: new_user.password_hash,
            terms_accepted: true,
            terms_accepted_at: Some(accepted_at),
            created_at: accepted_at,
            updated_at: accepted_at,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("crm", &self.crm)
            .field("crm_uf", &self.crm_uf)
            .field("password", &"[REDACTED]")
            .field("terms_accepted", &self.terms_accepted)
            .field("terms_accepted_at", &self.terms_accepted_at)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// `bool` <-> 1/0 정수 직렬화
mod bool_as_int {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(if *value { 1 } else { 0 })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum IntOrBool {
            Int(i64),
            Bool(bool),
        }

        match IntOrBool::deserialize(deserializer)? {
            IntOrBool::Int(0) => Ok(false),
            IntOrBool::Int(1) => Ok(true),
            IntOrBool::Int(other) => Err(de::Error::custom(format!(
                "terms_accepted must be 0 or 1, got {}",
                other
            ))),
            IntOrBool::Bool(value) => Ok(value),
        }
    }
}
