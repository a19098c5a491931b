//! Monthly timesheet approval engine
//!
//! This crate records employees' daily hours for a month, computes monthly
//! overtime and leave totals, and moves each monthly timesheet through the
//! draft → submitted → approved → verified review workflow, enforcing who may
//! act at each step.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod workflow;
