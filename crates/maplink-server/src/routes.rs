//! HTTP route handlers

pub mod geocode;
pub mod resolve;
