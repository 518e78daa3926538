//! gradecalc-cli: configuration, transcript files and reports for the
//! `gradecalc` binary.

pub mod config;
pub mod report;
pub mod transcript;
