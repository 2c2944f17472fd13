pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod humanize;
pub mod normalize;
pub mod observability;
pub mod poll;
