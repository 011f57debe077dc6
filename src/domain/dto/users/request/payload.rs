//! # JSON 본문 읽기
//!
//! 요청 본문을 `serde_json::Value`로 받은 뒤 필드 단위로 읽어
//! [`RegisterRequest`]를 만듭니다.
//!
//! 구조체로 바로 역직렬화하면 타입이 하나만 틀려도 요청 전체가 실패하므로,
//! 필드별로 읽으면서 타입 에러를 [`FieldErrors`]에 기록하고 계속 진행합니다.
//!
//! | JSON 값 | 문자열 필드 | `terms_accepted` | `addresses` |
//! |---------|-------------|------------------|-------------|
//! | 누락 / `null` | `None` | `None` | `None` |
//! | 문자열 | 공백 제거 후 값 (빈 문자열은 `None`) | 미동의 | 리스트 타입 에러 |
//! | 숫자 | 10진수 문자열 | 미동의 | 리스트 타입 에러 |
//! | 불리언 | 텍스트 타입 에러 | 값 그대로 | 리스트 타입 에러 |
//! | 배열 / 객체 | 텍스트 타입 에러 | 미동의 | 배열만 허용 |

use serde_json::{Map, Value};

use super::{AddressRequest, RegisterRequest};
use crate::core::errors::FieldErrors;
use crate::utils::string_utils::clean_optional_string;

/// 읽기 결과: 요청 DTO와 타입 에러
#[derive(Debug, Default)]
pub struct RegisterPayload {
    pub request: RegisterRequest,
    pub type_errors: FieldErrors,
}

impl RegisterPayload {
    /// JSON 본문을 읽습니다. 객체가 아닌 본문은 빈 요청으로 취급합니다.
    pub fn from_json(body: &Value) -> Self {
        let empty = Map::new();
        let object = body.as_object().unwrap_or(&empty);
        let mut type_errors = FieldErrors::new();

        let request = RegisterRequest {
            name: read_string(object, "name", "name", &mut type_errors),
            email: read_string(object, "email", "email", &mut type_errors),
            phone_number: read_string(object, "phone_number", "phone_number", &mut type_errors),
            crm: read_string(object, "crm", "crm", &mut type_errors),
            crm_uf: read_string(object, "crm_uf", "crm_uf", &mut type_errors),
            password: read_secret(object, "password", &mut type_errors),
            password_confirmation: read_secret(object, "password_confirmation", &mut type_errors),
            addresses: read_addresses(object, &mut type_errors),
            terms_accepted: read_accepted(object, "terms_accepted"),
        };

        Self {
            request,
            type_errors,
        }
    }

    /// 타입 에러와 규칙 위반을 합친 전체 검증 결과
    ///
    /// 타입 에러가 있는 필드에는 규칙 위반을 덧붙이지 않습니다.
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = self.type_errors.clone();
        errors.merge_absent(self.request.field_errors());
        errors
    }
}

fn not_text(path: &str) -> String {
    format!("O campo {} deve ser um texto.", path)
}

/// 문자열 필드를 읽습니다. 숫자는 10진수 표현으로 받아들입니다.
fn read_string(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => clean_optional_string(Some(s.clone())),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(_) => {
            errors.add(path, not_text(path));
            None
        }
    }
}

/// 비밀번호 필드는 공백을 제거하지 않고 그대로 보존합니다.
fn read_secret(object: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> Option<String> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.add(key, not_text(key));
            None
        }
    }
}

/// 불리언 `true`만 동의로 인정합니다. 다른 타입은 미동의(`false`)입니다.
fn read_accepted(object: &Map<String, Value>, key: &str) -> Option<bool> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Bool(accepted)) => Some(*accepted),
        Some(_) => Some(false),
    }
}

fn read_addresses(
    object: &Map<String, Value>,
    errors: &mut FieldErrors,
) -> Option<Vec<AddressRequest>> {
    let items = match object.get("addresses") {
        None | Some(Value::Null) => return None,
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.add("addresses", "O campo endereços deve ser uma lista.");
            return None;
        }
    };

    let addresses = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let prefix = format!("addresses.{}", index);
            match item.as_object() {
                Some(fields) => read_address(fields, &prefix, errors),
                None => {
                    errors.add(prefix.clone(), format!("O item {} deve ser um objeto.", prefix));
                    AddressRequest::default()
                }
            }
        })
        .collect();

    Some(addresses)
}

fn read_address(fields: &Map<String, Value>, prefix: &str, errors: &mut FieldErrors) -> AddressRequest {
    let path = |key: &str| format!("{}.{}", prefix, key);

    AddressRequest {
        location_name: read_string(fields, "location_name", &path("location_name"), errors),
        full_address: read_string(fields, "full_address", &path("full_address"), errors),
        complement: read_string(fields, "complement", &path("complement"), errors),
        cep: read_string(fields, "cep", &path("cep"), errors),
    }
}
