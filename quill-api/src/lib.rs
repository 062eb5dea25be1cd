#[macro_use]
extern crate serde_derive;

pub mod auth;
pub mod posts;
