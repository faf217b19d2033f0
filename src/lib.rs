//! Solace - a terminal mental health companion
//!
//! This library exposes the session core: conversation state, provider
//! dispatch, the UI bridge, and the breathing animation driver. The
//! terminal front-end lives in the binary.

pub mod breathing;
pub mod cli_output;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod render;
pub mod session;
