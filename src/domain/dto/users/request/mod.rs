pub mod address_request;
pub mod payload;
pub mod register_request;

pub use address_request::AddressRequest;
pub use payload::RegisterPayload;
pub use register_request::RegisterRequest;
