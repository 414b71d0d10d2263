//! Request handler module
//!
//! Routing dispatch and the two request handlers: static site serving
//! and the contact-form relay.

pub mod contact;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
