//! Result types shared by the redaction filters

pub mod common;

pub use common::*;
