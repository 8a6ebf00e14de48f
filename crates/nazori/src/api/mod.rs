pub mod game;
pub mod present;
pub mod types;
