//! # 의사 회원가입 요청 DTO
//!
//! `POST /register` 요청 본문을 표현하고 필드 단위 규칙을 검증합니다.
//!
//! ## 검증 규칙
//!
//! | 필드 | 규칙 |
//! |------|------|
//! | `name` | 필수, 최대 255자 |
//! | `email` | 필수, 이메일 형식, 최대 255자 (중복 검사는 서비스 계층) |
//! | `phone_number` | 필수, [`PHONE_REGEX`] |
//! | `crm` | 필수, 숫자 6자리 |
//! | `crm_uf` | 필수, 27개 UF 중 하나 |
//! | `password` | 필수, `password_confirmation`과 일치 |
//! | `addresses` | 필수, 1개 이상의 배열 |
//! | `addresses.{i}.*` | [`AddressRequest`] 규칙 |
//! | `terms_accepted` | 필수, `true` |
//!
//! 모든 규칙은 한 번에 평가되며, 위반 사항은 필드 경로별로 모두 보고됩니다.

use validator::{Validate, ValidationError};

use super::address_request::AddressRequest;
use crate::core::errors::FieldErrors;
use crate::utils::validators::{PHONE_REGEX, validate_crm, validate_uf};

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "O campo nome é obrigatório."),
        length(max = 255, message = "O campo nome não pode ter mais de 255 caracteres.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "O campo e-mail é obrigatório."),
        email(message = "O campo e-mail deve ser um endereço de e-mail válido."),
        length(max = 255, message = "O campo e-mail não pode ter mais de 255 caracteres.")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "O campo telefone é obrigatório."),
        regex(
            path = *PHONE_REGEX,
            message = "O telefone deve estar em um formato válido, como (96) 98765-4321."
        )
    )]
    pub phone_number: Option<String>,

    #[validate(
        required(message = "O campo CRM é obrigatório."),
        custom(function = "validate_crm")
    )]
    pub crm: Option<String>,

    #[validate(
        required(message = "O campo UF do CRM é obrigatório."),
        custom(function = "validate_uf")
    )]
    pub crm_uf: Option<String>,

    #[validate(required(message = "O campo senha é obrigatório."))]
    pub password: Option<String>,

    pub password_confirmation: Option<String>,

    #[validate(
        required(message = "O campo endereços é obrigatório."),
        length(min = 1, message = "O campo endereços é obrigatório.")
    )]
    pub addresses: Option<Vec<AddressRequest>>,

    #[validate(
        required(message = "O campo termos de uso é obrigatório."),
        custom(function = "validate_accepted")
    )]
    pub terms_accepted: Option<bool>,
}

fn validate_accepted(value: &bool) -> Result<(), ValidationError> {
    if *value {
        Ok(())
    } else {
        Err(ValidationError::new("accepted")
            .with_message("Os termos de uso devem ser aceitos.".into()))
    }
}

impl RegisterRequest {
    /// 모든 규칙 위반을 필드 경로별로 수집합니다.
    ///
    /// 최상위 필드, 각 주소(`addresses.{i}.필드`), 비밀번호 확인을 함께 검사합니다.
    /// 저장소 조회가 필요한 중복 검사는 포함하지 않습니다.
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(&e),
        };

        if let Some(addresses) = &self.addresses {
            for (index, address) in addresses.iter().enumerate() {
                errors.extend_prefixed(&format!("addresses.{}", index), address.field_errors());
            }
        }

        if let Some(password) = &self.password {
            if self.password_confirmation.as_ref() != Some(password) {
                errors.add("password", "A confirmação da senha não corresponde.");
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            name: Some("John Doe".to_string()),
            email: Some("test@example.com".to_string()),
            phone_number: Some("(96) 98765-4321".to_string()),
            crm: Some("123456".to_string()),
            crm_uf: Some("SP".to_string()),
            password: Some("password".to_string()),
            password_confirmation: Some("password".to_string()),
            addresses: Some(vec![AddressRequest {
                location_name: Some("Clínica X".to_string()),
                full_address: Some("Rua A, 123, Bairro B, Cidade C, Estado D".to_string()),
                complement: Some("Sala 1".to_string()),
                cep: Some("12345-678".to_string()),
            }]),
            terms_accepted: Some(true),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().field_errors().is_empty());
    }

    #[test]
    fn test_empty_request_reports_all_required_fields() {
        let errors = RegisterRequest::default().field_errors();

        for field in [
            "name",
            "email",
            "phone_number",
            "crm",
            "crm_uf",
            "password",
            "addresses",
            "terms_accepted",
        ] {
            assert!(errors.has(field), "missing error for {}", field);
        }
        assert_eq!(errors.len(), 8);
    }

    #[test]
    fn test_empty_address_object_reports_nested_paths() {
        let request = RegisterRequest {
            addresses: Some(vec![AddressRequest::default()]),
            ..RegisterRequest::default()
        };
        let errors = request.field_errors();

        assert!(errors.has("addresses.0.location_name"));
        assert!(errors.has("addresses.0.full_address"));
        assert!(errors.has("addresses.0.cep"));
        assert!(!errors.has("addresses"));
    }

    #[test]
    fn test_empty_address_list_is_rejected() {
        let request = RegisterRequest {
            addresses: Some(vec![]),
            ..valid_request()
        };
        assert!(request.field_errors().has("addresses"));
    }

    #[test]
    fn test_password_confirmation_mismatch() {
        let request = RegisterRequest {
            password_confirmation: Some("different".to_string()),
            ..valid_request()
        };
        let errors = request.field_errors();

        assert!(errors.has("password"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_missing_confirmation_is_a_mismatch() {
        let request = RegisterRequest {
            password_confirmation: None,
            ..valid_request()
        };
        assert!(request.field_errors().has("password"));
    }

    #[test]
    fn test_terms_must_be_accepted() {
        let request = RegisterRequest {
            terms_accepted: Some(false),
            ..valid_request()
        };
        assert_eq!(
            request.field_errors().messages("terms_accepted"),
            Some(&["Os termos de uso devem ser aceitos.".to_string()][..])
        );
    }

    #[test]
    fn test_format_rules() {
        let request = RegisterRequest {
            email: Some("invalid-email".to_string()),
            phone_number: Some("invalid-phone".to_string()),
            crm: Some("ABC123".to_string()),
            crm_uf: Some("XX".to_string()),
            ..valid_request()
        };
        let errors = request.field_errors();

        assert!(errors.has("email"));
        assert!(errors.has("phone_number"));
        assert!(errors.has("crm"));
        assert!(errors.has("crm_uf"));
        assert!(!errors.has("name"));
    }

    #[test]
    fn test_second_address_errors_use_its_index() {
        let mut request = valid_request();
        if let Some(addresses) = request.addresses.as_mut() {
            let second = AddressRequest {
                cep: Some("invalid-cep".to_string()),
                ..addresses[0].clone()
            };
            addresses.push(second);
        }
        let errors = request.field_errors();

        assert!(errors.has("addresses.1.cep"));
        assert!(!errors.has("addresses.0.cep"));
    }

    #[test]
    fn test_name_and_email_max_length() {
        let request = RegisterRequest {
            name: Some("a".repeat(256)),
            email: Some(format!("doctor@{}.com", vec!["a".repeat(50); 5].join("."))),
            ..valid_request()
        };
        let errors = request.field_errors();

        assert!(errors.has("name"));
        assert!(errors.has("email"));

        let request = RegisterRequest {
            name: Some("a".repeat(255)),
            email: Some(format!("{}@example.com", "a".repeat(60))),
            ..valid_request()
        };
        assert!(request.field_errors().is_empty());
    }

    #[test]
    fn test_name_limit_counts_characters() {
        let request = RegisterRequest {
            name: Some("é".repeat(255)),
            ..valid_request()
        };
        assert!(request.field_errors().is_empty());

        let request = RegisterRequest {
            name: Some("é".repeat(256)),
            ..valid_request()
        };
        assert!(request.field_errors().has("name"));
    }

    #[test]
    fn test_phone_requires_real_digit_groups() {
        let request = RegisterRequest {
            phone_number: Some("9-8-7-6-5-4-3-2-1".to_string()),
            ..valid_request()
        };
        assert_eq!(
            request.field_errors().messages("phone_number"),
            Some(&["O telefone deve estar em um formato válido, como (96) 98765-4321.".to_string()][..])
        );
    }
}
