pub mod assessment;
pub mod config;
pub mod credentials;
pub mod output;
pub mod questions;
pub mod scoring;
