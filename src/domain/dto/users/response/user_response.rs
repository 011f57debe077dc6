use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::{Address, User};

/// 가입 완료 응답
///
/// 비밀번호 해시는 포함하지 않습니다. 시각은 RFC 3339 UTC 문자열로 직렬화됩니다.
///
/// ```json
/// {
///   "id": "665f1f77bcf86cd799439011",
///   "name": "John Doe",
///   "email": "test@example.com",
///   "phone_number": "96987654321",
///   "crm": "123456",
///   "crm_uf": "SP",
///   "terms_accepted": true,
///   "terms_accepted_at": "2024-06-07T12:00:00Z",
///   "created_at": "2024-06-07T12:00:00Z",
///   "addresses": [
///     {
///       "id": "665f1f77bcf86cd799439012",
///       "user_id": "665f1f77bcf86cd799439011",
///       "location_name": "Clínica X",
///       "full_address": "Rua A, 123, Bairro B, Cidade C, Estado D",
///       "complement": "Sala 1",
///       "cep": "12345678"
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub crm: String,
    pub crm_uf: String,
    pub terms_accepted: bool,
    pub terms_accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub addresses: Vec<AddressResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: String,
    pub user_id: String,
    pub location_name: String,
    pub full_address: String,
    pub complement: Option<String>,
    pub cep: String,
}

fn to_chrono(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.to_hex(),
            user_id: address.user_id.to_hex(),
            location_name: address.location_name,
            full_address: address.full_address,
            complement: address.complement,
            cep: address.cep,
        }
    }
}

impl UserResponse {
    pub fn new(user: User, addresses: Vec<Address>) -> Self {
        let User {
            id,
            name,
            email,
            phone_number,
            crm,
            crm_uf,
            terms_accepted,
            terms_accepted_at,
            created_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            name,
            email,
            phone_number,
            crm,
            crm_uf,
            terms_accepted,
            terms_accepted_at: terms_accepted_at.map(to_chrono),
            created_at: to_chrono(created_at),
            addresses: addresses.into_iter().map(AddressResponse::from).collect(),
        }
    }
}
