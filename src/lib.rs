//! Redirect Checkout - Hosted payment page redirects and 3-D Secure completion
//!
//! This crate signs outbound payment page forms, verifies the signed result
//! the shopper brings back, and drives one payment attempt per shopper
//! session from cart lock to order placement.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
