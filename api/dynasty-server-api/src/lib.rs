use std::sync::Arc;

use dynasty_server_app::Application;

mod auth;
mod error;
mod http;
mod jwt;

pub use error::ApiError;
pub use http::run;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}
