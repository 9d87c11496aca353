//! API models for requests and responses

pub mod geocode;
pub mod landing;
pub mod resolve;

// Re-export commonly used types
pub use geocode::*;
pub use landing::*;
pub use resolve::*;
