//! Value Object Module

pub mod admin_password;
pub mod email;
