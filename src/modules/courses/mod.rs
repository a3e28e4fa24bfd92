pub mod controller;
pub mod ownership;
pub mod router;
pub mod service;

pub use router::init_courses_router;
