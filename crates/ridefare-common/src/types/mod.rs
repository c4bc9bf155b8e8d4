//! Core data types for RideFare

pub mod fee_config;
pub mod money;
pub mod pricing;
pub mod trip;
