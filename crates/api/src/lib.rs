//! MAPP GenAI gateways.
//!
//! One library backs three binaries (`observations-ai`, `planning-ai`,
//! `reports-ai`). Each binary calls [`server::run`] with its
//! [`Gateway`](mapp_genai_core::gateway::Gateway); integration tests build
//! the same routers through [`router`].

pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod server;
pub mod state;
