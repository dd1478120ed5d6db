//! blogforge HTTP service
//!
//! Thin axum adapter over [`blogforge_core::BlogPipeline`]. The binary in
//! `main.rs` only bootstraps logging, `.env`, configuration and the listener.

pub mod server;

pub use server::{AppState, router, serve};
