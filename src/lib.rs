pub mod category;
pub mod commands;
pub mod config;
pub mod db;
pub mod embed;
pub mod environment;
pub mod errors;
pub mod guard;
pub mod limits;
pub mod normalization;
pub mod pending;
pub mod persistence;
pub mod platform;
pub mod recipe;
pub mod routes;
pub mod weekend;
