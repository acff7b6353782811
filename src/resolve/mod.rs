//! Checksum policy resolution.
//!
//! Runs before anything is sent. Decides which algorithm protects the request
//! body and where it goes, and which algorithms the response may be checked
//! with, recording both on the request context for the applicator.

mod request;
mod response;


use std::collections::HashMap;

pub use request::resolve_request_checksum;
pub use response::{resolve_response_checksum, set_default_checksum_mode};

/// Caller-supplied operation parameters, by member name.
pub type CallerParams = HashMap<String, String>;

/// Value `set_default_checksum_mode` writes into the validation-mode member.
pub const CHECKSUM_MODE_ENABLED: &str = "ENABLED";
