#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod controller;
pub mod dedup;
pub mod error;
pub mod model;
pub mod n8n_client;
mod schema;
pub mod strategy;
pub mod util;

#[cfg(test)]
mod test_util;
