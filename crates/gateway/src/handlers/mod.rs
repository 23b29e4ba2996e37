//! HTTP request handlers

pub mod analysis;
pub mod citations;
pub mod graph;
pub mod health;
pub mod import;
pub mod papers;
