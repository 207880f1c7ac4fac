//! Data models for receipts, providers and configuration.

pub mod config;
pub mod payment;
