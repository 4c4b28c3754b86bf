//! Domain logic shared by the MAPP GenAI gateways.
//!
//! Contains settings, errors, request/response types, the engine traits
//! and their canned implementations, and health report composition. No
//! HTTP dependencies live here.

pub mod error;
pub mod gateway;
pub mod health;
pub mod observations;
pub mod planning;
pub mod reports;
pub mod settings;
pub mod types;

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
