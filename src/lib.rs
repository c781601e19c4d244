pub mod api;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod geo;
pub mod polyline;
pub mod server;

pub mod simulation;
