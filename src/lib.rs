#![forbid(unsafe_code)]

pub mod app;
pub mod check;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod flash;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod register;
pub mod repository;
