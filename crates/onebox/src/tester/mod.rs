//! API request tester
//!
//! This module provides:
//! - The direct request runner, which always hits the network
//! - CORS relay prefixes
//! - Helpers for the tester's form input (header rows, JSON body)

mod relay;
mod request;
mod runner;

pub use relay::RelayProxy;
pub use request::{HeaderRow, collect_headers, format_json, parse_body};
pub use runner::{DirectRequest, DirectRequestRunner, ResponseMetadata};
