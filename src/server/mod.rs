pub mod config;
mod emotion_routes;
mod http_layers;
pub mod metrics;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub(self) use emotion_routes::make_emotion_routes;
pub use server::{make_app, run_server};
