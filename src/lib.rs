//! dogpost - terminal client for the dog post service
//!
//! This library provides the session store, resource clients, validation and
//! views of the client; the `dogpost` binary drives them from a terminal.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod shell;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
