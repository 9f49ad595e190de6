//! Utility functions module

pub mod retry;
