pub mod constants;
pub mod engine;
pub mod ghost;
pub mod maze;
pub mod player;
pub mod position;
pub mod rng;
pub mod server_protocol;
pub mod types;
