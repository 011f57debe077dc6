//! Users Entity Module

pub mod address;
pub mod user;

pub use address::{Address, NewAddress};
pub use user::{NewUser, User};
