//! HTTP handlers for the counter service.

pub mod counter;
pub mod health;
