#![allow(clippy::module_inception)]

pub mod constants;
pub mod models;
pub mod runtime;
pub mod types;

pub use cotiza_derive::Model;

#[cfg(test)]
mod unit_tests;
