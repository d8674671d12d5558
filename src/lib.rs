//! Logsort library crate.
//!
//! The stable, supported API surface is exposed via [`crate::api`] and
//! [`crate::prelude`]. These modules are intended for embedding logsort in
//! Rust applications and follow SemVer.
//!
//! The pipeline is strictly sequential: [`logs::parse_log_files`] reads JSON
//! Lines files, [`commands::filter_by_date`] narrows them to one calendar day,
//! [`commands::aggregate_url_metrics`] groups them per URL and
//! [`commands::render_metrics`] writes the ranked result to any
//! [`std::io::Write`] sink.

pub mod api;
pub mod prelude;

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logs;
