//! # 주소 요청 DTO
//!
//! 회원가입 요청의 `addresses` 배열 원소 하나를 표현합니다.
//! 검증 에러는 필드 이름(`cep`) 기준으로 생성되며,
//! 상위 요청에서 `addresses.{i}.` 경로를 붙여 보고합니다.

use serde::Serialize;
use validator::Validate;

use crate::core::errors::FieldErrors;
use crate::utils::validators::CEP_REGEX;

/// 진료 장소 주소
///
/// 모든 필드는 `Option`입니다. 누락/`null`/공백 문자열은 `None`으로 읽히고
/// `required` 검증에서 걸러집니다.
///
/// # JSON 예제
///
/// ```json
/// {
///   "location_name": "Clínica X",
///   "full_address": "Rua A, 123, Bairro B, Cidade C, Estado D",
///   "complement": "Sala 1",
///   "cep": "12345-678"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct AddressRequest {
    #[validate(
        required(message = "O campo nome do local é obrigatório."),
        length(max = 255, message = "O campo nome do local não pode ter mais de 255 caracteres.")
    )]
    pub location_name: Option<String>,

    #[validate(
        required(message = "O campo endereço completo é obrigatório."),
        length(max = 1000, message = "O campo endereço completo não pode ter mais de 1000 caracteres.")
    )]
    pub full_address: Option<String>,

    #[validate(length(max = 255, message = "O campo complemento não pode ter mais de 255 caracteres."))]
    pub complement: Option<String>,

    #[validate(
        required(message = "O campo CEP é obrigatório."),
        regex(path = *CEP_REGEX, message = "O CEP deve estar no formato 00000-000.")
    )]
    pub cep: Option<String>,
}

impl AddressRequest {
    /// 규칙 위반을 필드 이름 기준으로 반환합니다.
    pub fn field_errors(&self) -> FieldErrors {
        match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => FieldErrors::from(&errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_address() -> AddressRequest {
        AddressRequest {
            location_name: Some("Clínica X".to_string()),
            full_address: Some("Rua A, 123, Bairro B, Cidade C, Estado D".to_string()),
            complement: Some("Sala 1".to_string()),
            cep: Some("12345-678".to_string()),
        }
    }

    #[test]
    fn test_valid_address_has_no_errors() {
        assert!(valid_address().field_errors().is_empty());
    }

    #[test]
    fn test_empty_address_requires_fields() {
        let errors = AddressRequest::default().field_errors();

        assert!(errors.has("location_name"));
        assert!(errors.has("full_address"));
        assert!(errors.has("cep"));
        assert!(!errors.has("complement"));
    }

    #[test]
    fn test_location_name_max_length() {
        let address = AddressRequest {
            location_name: Some("a".repeat(256)),
            ..valid_address()
        };
        assert!(address.field_errors().has("location_name"));

        let address = AddressRequest {
            location_name: Some("a".repeat(255)),
            ..valid_address()
        };
        assert!(address.field_errors().is_empty());
    }

    #[test]
    fn test_cep_format() {
        let address = AddressRequest {
            cep: Some("12345678".to_string()),
            ..valid_address()
        };
        let errors = address.field_errors();

        assert_eq!(
            errors.messages("cep"),
            Some(&["O CEP deve estar no formato 00000-000.".to_string()][..])
        );
    }

    #[test]
    fn test_full_address_and_complement_max_length() {
        let address = AddressRequest {
            full_address: Some("a".repeat(1001)),
            complement: Some("a".repeat(256)),
            ..valid_address()
        };
        let errors = address.field_errors();

        assert!(errors.has("full_address"));
        assert!(errors.has("complement"));

        let address = AddressRequest {
            full_address: Some("a".repeat(1000)),
            complement: Some("a".repeat(255)),
            ..valid_address()
        };
        assert!(address.field_errors().is_empty());
    }

    #[test]
    fn test_length_limits_count_characters() {
        let address = AddressRequest {
            location_name: Some("é".repeat(255)),
            complement: Some("ç".repeat(255)),
            ..valid_address()
        };
        assert!(address.field_errors().is_empty());
    }
}
