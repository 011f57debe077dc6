//! # 문자열 유틸리티
//!
//! 입력 정리와 정규화에 사용하는 공통 함수들입니다.

/// 선택적 문자열 정리
///
/// 앞뒤 공백을 제거하고, 빈 문자열이나 공백만 있는 경우 `None`을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::clean_optional_string;
///
/// assert_eq!(clean_optional_string(Some("  Sala 1  ".into())), Some("Sala 1".into()));
/// assert_eq!(clean_optional_string(Some("   ".into())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 숫자만 추출합니다.
///
/// 전화번호와 CEP를 저장 형식으로 정규화할 때 사용합니다.
///
/// ```rust,ignore
/// assert_eq!(digits_only("(96) 98765-4321"), "96987654321");
/// assert_eq!(digits_only("12345-678"), "12345678");
/// ```
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// 이메일 정규화 (공백 제거 + 소문자)
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}
