//! HTTP route handlers

pub mod admin;
pub mod auth;
pub mod questions;
pub mod review;
pub mod stats;
pub mod users;
