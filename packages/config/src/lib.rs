// ABOUTME: Shared configuration crate for the BAAC workspace
// ABOUTME: Exposes environment variable names and the env-backed Config loader

pub mod constants;
pub mod env;

pub use env::Config;
