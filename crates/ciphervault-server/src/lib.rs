//! ciphervault-server: HTTP front end for the ciphervault core.
//!
//! Exposes file upload/download with AES-256-GCM, text encryption in GCM or
//! ECB mode, and known-prefix key recovery for ECB ciphertexts.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
