pub mod api_error;
pub mod cli;
pub mod emojis;
pub mod error;
pub mod health;
pub mod http_state;
pub mod ingest;
pub mod logger;
pub mod routes;
pub mod server;

#[cfg(test)]
mod tests;

pub use api_error::{ApiError, Result as ApiResult};
pub use cli::Cli;
pub use error::{Result as ServerErrorResult, ServerError};
pub use http_state::HttpState;
pub use routes::{build_http_router, build_ws_router};
pub use server::Relay;
