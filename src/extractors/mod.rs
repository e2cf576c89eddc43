//! extractors/mod.rs

pub mod auth_extractor;
