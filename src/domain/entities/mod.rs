//! # Domain Entities Module
//!
//! MongoDB 컬렉션과 직접 매핑되는 문서 구조체들입니다.
//!
//! | 엔티티 | 컬렉션 |
//! |--------|--------|
//! | [`users::User`] | `users` |
//! | [`users::Address`] | `addresses` |

pub mod users;

pub use users::*;
