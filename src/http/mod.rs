//! HTTP protocol layer module
//!
//! Response builders and protocol helpers shared by the static
//! responder and the contact relay. No business logic lives here.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_health_response, build_json_response, build_options_response,
};
