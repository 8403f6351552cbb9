//! Entity Module

pub mod admin;
pub mod session;
