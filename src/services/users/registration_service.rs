//! # Registration Service
//!
//! 의사 회원가입의 비즈니스 로직을 담당합니다.
//!
//! ## 처리 흐름
//!
//! ```text
//! JSON 본문
//!   -> 필드 읽기 (타입 에러 수집)
//!   -> 규칙 검증 (필수, 형식, 길이, 비밀번호 확인, 주소별 검증)
//!   -> 중복 검사 (email, (crm, crm_uf))     형식이 올바른 필드만
//!   -> 에러가 하나라도 있으면 422, 저장 없음
//!   -> 정규화 (전화번호/CEP 숫자만, 이메일 소문자, UF 대문자)
//!   -> bcrypt 해싱, 약관 동의 시각 기록
//!   -> 회원 + 주소 원자적 저장
//! ```

use std::sync::Arc;
use std::time::Instant;

use bcrypt::{hash, verify};
use mongodb::bson::DateTime;
use serde_json::Value;

use crate::{
    core::errors::{AppError, AppResult, ErrorContext, FieldErrors},
    domain::{
        dto::users::{
            request::{AddressRequest, RegisterPayload, RegisterRequest},
            response::UserResponse,
        },
        entities::users::{NewAddress, NewUser, User},
    },
    repositories::users::UserRepository,
    utils::string_utils::{digits_only, normalize_email},
};

/// 회원가입 서비스
///
/// 저장소 구현과 bcrypt 비용을 주입받습니다.
/// `web::Data`로 감싸 모든 워커가 공유합니다.
pub struct RegistrationService {
    user_repo: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

/// 검증을 통과한 가입 정보
struct ValidRegistration {
    user: NewUser,
    password: String,
    addresses: Vec<NewAddress>,
}

fn missing(field: &str) -> AppError {
    AppError::InternalError(format!("validated field missing: {}", field))
}

impl ValidRegistration {
    /// 검증을 통과한 요청을 저장 형식으로 정규화합니다.
    fn from_request(request: RegisterRequest) -> AppResult<Self> {
        let addresses = request
            .addresses
            .ok_or_else(|| missing("addresses"))?
            .into_iter()
            .map(Self::address)
            .collect::<AppResult<Vec<_>>>()?;

        let user = NewUser {
            name: request.name.ok_or_else(|| missing("name"))?,
            email: normalize_email(&request.email.ok_or_else(|| missing("email"))?),
            phone_number: digits_only(&request.phone_number.ok_or_else(|| missing("phone_number"))?),
            crm: request.crm.ok_or_else(|| missing("crm"))?,
            crm_uf: request.crm_uf.ok_or_else(|| missing("crm_uf"))?.to_uppercase(),
            password_hash: String::new(),
        };

        Ok(Self {
            user,
            password: request.password.ok_or_else(|| missing("password"))?,
            addresses,
        })
    }

    fn address(address: AddressRequest) -> AppResult<NewAddress> {
        Ok(NewAddress {
            location_name: address.location_name.ok_or_else(|| missing("location_name"))?,
            full_address: address.full_address.ok_or_else(|| missing("full_address"))?,
            complement: address.complement,
            cep: digits_only(&address.cep.ok_or_else(|| missing("cep"))?),
        })
    }
}

impl RegistrationService {
    pub fn new(user_repo: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self {
            user_repo,
            bcrypt_cost,
        }
    }

    pub fn storage_backend(&self) -> &'static str {
        self.user_repo.backend_name()
    }

    /// 회원가입을 처리합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 하나 이상의 필드 규칙 위반 (저장 없음)
    /// * `AppError::DatabaseError` - 저장소 실패 또는 동시 가입으로 인한 유니크 제약 위반
    /// * `AppError::InternalError` - 비밀번호 해싱 실패
    pub async fn register(&self, body: &Value) -> AppResult<UserResponse> {
        let start_time = Instant::now();

        let payload = RegisterPayload::from_json(body);
        let mut errors = payload.field_errors();
        self.check_uniqueness(&payload.request, &mut errors).await?;

        if !errors.is_empty() {
            let fields: Vec<&str> = errors.fields().collect();
            log::warn!("회원가입 요청 거부: {:?}", fields);
            return Err(AppError::ValidationError(errors));
        }

        let registration = ValidRegistration::from_request(payload.request)?;
        let accepted_at = DateTime::now();

        let hash_start = Instant::now();
        let password_hash = hash(&registration.password, self.bcrypt_cost)
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = User::new(
            NewUser {
                password_hash,
                ..registration.user
            },
            accepted_at,
        );

        let (user, addresses) = self
            .user_repo
            .create_with_addresses(user, registration.addresses)
            .await?;

        log::info!(
            "✅ 회원가입 완료: user_id={}, addresses={}",
            user.id_string().unwrap_or_default(),
            addresses.len()
        );
        log::info!("Total registration took: {:?}", start_time.elapsed());

        Ok(UserResponse::new(user, addresses))
    }

    /// 형식 검증을 통과한 필드에 대해서만 중복을 조회합니다.
    async fn check_uniqueness(
        &self,
        request: &RegisterRequest,
        errors: &mut FieldErrors,
    ) -> AppResult<()> {
        if let Some(email) = request.email.as_deref().filter(|_| !errors.has("email")) {
            if self.user_repo.email_exists(&normalize_email(email)).await? {
                errors.add("email", "Este e-mail já está em uso.");
            }
        }

        if !errors.has("crm") && !errors.has("crm_uf") {
            if let (Some(crm), Some(crm_uf)) = (request.crm.as_deref(), request.crm_uf.as_deref()) {
                if self.user_repo.crm_exists(crm, &crm_uf.to_uppercase()).await? {
                    errors.add("crm", "Este CRM já está cadastrado para a UF informada.");
                }
            }
        }

        Ok(())
    }
}

/// 평문 비밀번호가 저장된 bcrypt 해시와 일치하는지 확인합니다.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    verify(password, password_hash).context("비밀번호 검증 실패")
}
