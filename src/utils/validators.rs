//! # 형식 검증 규칙
//!
//! 브라질 의사 회원가입에 필요한 형식 규칙 모음입니다.
//! 정규식 규칙은 DTO에서 `#[validate(regex(path = *PHONE_REGEX, ...))]`로,
//! `validate_*` 함수는 `#[validate(custom(function = "..."))]`로 사용합니다.
//!
//! | 규칙 | 허용 형식 |
//! |------|-----------|
//! | 전화번호 | `(96) 98765-4321`, `96 98765 4321`, `98765-4321`, `96987654321` |
//! | CEP | `12345-678` |
//! | CRM | 숫자 6자리 |
//! | CRM UF | 브라질 27개 연방 단위 약어 |

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// 브라질 연방 단위(UF) 약어 목록
pub const VALID_UFS: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA",
    "PB", "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

pub const CRM_LENGTH: usize = 6;

/// 전화번호 형식
///
/// 선택적인 지역번호(`(DD)` 또는 `DD`, 첫 자리 1~9) 뒤에
/// 4~5자리와 4자리 그룹이 옵니다. 그룹 사이에는 `-`, `.`, 공백 하나를 둘 수 있습니다.
pub static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\([1-9][0-9]\) ?|[1-9][0-9][-. ]?)?[0-9]{4,5}[-. ]?[0-9]{4}$")
        .expect("Invalid phone regex")
});

/// CEP 형식: 정확히 `NNNNN-NNN`
pub static CEP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-[0-9]{3}$").expect("Invalid CEP regex"));

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

pub fn is_valid_uf(value: &str) -> bool {
    VALID_UFS.contains(&value.trim().to_uppercase().as_str())
}

/// CRM 검사
///
/// 숫자가 아닌 문자가 있으면 `crm_not_numeric`,
/// 숫자로만 되어 있지만 6자리가 아니면 `crm_length`를 반환합니다.
pub fn validate_crm(value: &str) -> Result<(), ValidationError> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(error("crm_not_numeric", "O CRM deve conter apenas números."));
    }
    if value.len() != CRM_LENGTH {
        return Err(error("crm_length", "O CRM deve conter exatamente 6 dígitos."));
    }
    Ok(())
}

pub fn validate_uf(value: &str) -> Result<(), ValidationError> {
    if is_valid_uf(value) {
        Ok(())
    } else {
        Err(error("invalid_uf", "A UF do CRM selecionada é inválida."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_formats() {
        for phone in [
            "(96) 98765-4321",
            "(96)98765-4321",
            "(11) 3456-7890",
            "98765-4321",
            "98765.4321",
            "96 98765 4321",
            "96987654321",
            "1134567890",
        ] {
            assert!(PHONE_REGEX.is_match(phone), "{} should be accepted", phone);
        }
    }

    #[test]
    fn test_phone_rejects_garbage() {
        for phone in [
            "invalid-phone",
            "",
            "(96 98765-4321",
            "(06) 98765-4321",
            "(96) 98765--4321",
            "(96) 1234567",
            "(96) 9876543210",
            "-98765-4321",
            "06987654321",
            "9-8-7-6-5-4-3-2-1",
            "98-76-54-32-1",
        ] {
            assert!(!PHONE_REGEX.is_match(phone), "{} should be rejected", phone);
        }
    }

    #[test]
    fn test_cep_format() {
        assert!(CEP_REGEX.is_match("12345-678"));
        assert!(!CEP_REGEX.is_match("12345678"));
        assert!(!CEP_REGEX.is_match("invalid-cep"));
        assert!(!CEP_REGEX.is_match("1234-5678"));
        assert!(!CEP_REGEX.is_match("12345-6789"));
    }

    #[test]
    fn test_crm_error_codes() {
        assert!(validate_crm("123456").is_ok());
        assert_eq!(validate_crm("ABC123").unwrap_err().code, "crm_not_numeric");
        assert_eq!(validate_crm("12").unwrap_err().code, "crm_length");
        assert_eq!(validate_crm("1234567").unwrap_err().code, "crm_length");
    }

    #[test]
    fn test_uf_list() {
        assert_eq!(VALID_UFS.len(), 27);
        assert!(is_valid_uf("SP"));
        assert!(is_valid_uf(" rj "));
        assert!(!is_valid_uf("XX"));
        assert!(!is_valid_uf(""));
    }
}
