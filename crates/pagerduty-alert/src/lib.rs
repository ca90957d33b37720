//! Trigger a PagerDuty incident describing the GitHub Actions run that
//! invoked the binary.
//!
//! The flow is linear: [`context::RunContext`] and [`config::Inputs`] feed
//! [`payload::AlertEvent::build`], [`sender::AlertSender`] posts the event once,
//! and [`action::deliver`] folds the result into an [`action::Outcome`].

pub mod action;
pub mod build_info;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod payload;
pub mod sender;
pub mod workflow_commands;
