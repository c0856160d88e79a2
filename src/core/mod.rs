// src/core/mod.rs

pub mod links;
pub mod net;
pub mod routes;
pub mod sanitize;
pub mod scan;
