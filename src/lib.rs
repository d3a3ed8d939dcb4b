//! # Context Statusline
//!
//! Renders a one-line terminal status display for a Claude Code session.
//!
//! ## Overview
//!
//! The host pipes a JSON session snapshot to stdin. This crate:
//! - estimates context-window usage from the tail of the session transcript
//! - formats model, directory, context bar and session cost/duration/diff metrics
//! - prints exactly one line, falling back to a minimal line on any failure
//!
//! ## Features
//!
//! - `colors` (default): Enables terminal color output via owo-colors

/// Command-line argument parsing and configuration
pub mod cli;

/// Segment formatting for text and JSON output
pub mod display;

/// Data models for the hook payload, transcript records and context estimates
pub mod models;

/// Guarded stdin-to-line pipeline
pub mod render;

/// Color palette
pub mod style;

/// Context estimation from transcript tails
pub mod transcript;

/// Utility functions for paths and number formatting
pub mod utils;
