//! Command implementations for repoguard

pub mod check;
pub mod dispatch;
pub mod enforce;
