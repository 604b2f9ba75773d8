//! Core module - configuration, state and server loop

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{build_app, build_router, Server};
pub use state::ServerState;
