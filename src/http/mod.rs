//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, JSON body decoding)
//!     → handlers/ (validate, call proxy or workflow)
//!     → response.rs (CommandResult → JSON, error → status code)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{JsonBody, UuidRequestId, X_REQUEST_ID};
pub use response::ApiResult;
pub use server::{AppState, HttpServer};
