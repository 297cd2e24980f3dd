//! Repoguard Core Library
//!
//! Repository standards auditing and the documentation rename engine:
//! - Canonical document names and the slug normalizer
//! - Inline markdown link parsing and rewriting
//! - Rename planning, execution and link fix-up
//! - Audit rules for markdown, JSON and comment conventions

pub mod audit;
pub mod config;
pub mod discovery;
pub mod enforce;
pub mod error;
pub mod link;
pub mod logging;
pub mod rename;
pub mod slug;
