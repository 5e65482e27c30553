// === Public Modules (The Canonical Paths) ===
pub mod alerts;
pub mod clipboard;
pub mod config;
pub mod currency;
pub mod error;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod store;
pub mod transport;
