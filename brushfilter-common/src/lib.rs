pub mod error;

#[cfg(feature = "json")]
pub use serde_json;
