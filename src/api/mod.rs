//! API Module
//!
//! HTTP handlers and routing for the cache facade.
//!
//! # Endpoints
//! - `PUT /cache/:category` - Cache a payload
//! - `GET /cache/:category` - Read a payload
//! - `DELETE /cache/:category` - Remove a category
//! - `DELETE /cache` - Remove every category
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
