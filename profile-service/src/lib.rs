//! profile-service: REST API over a hosted document store for user profiles
//! and their financial goals.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
