//! Service endpoints outside `/api`: liveness and the API index.

pub mod controller;
pub mod model;
pub mod router;

pub use router::init_system_router;
