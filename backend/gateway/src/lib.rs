//! EduCheck Gateway HTTP API Server
//!
//! Thin proxy routes in front of the remote OCR and grammar endpoints,
//! applying the same fallback logic server-side as a second line of defense.

pub mod grammar_api;
pub mod health_api;
pub mod ocr_api;
pub mod server;

pub use server::{build_router, start_server, GatewayState};
