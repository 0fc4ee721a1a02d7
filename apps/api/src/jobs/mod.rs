pub mod handlers;
pub mod repository;
pub mod requirement;
pub mod service;

pub use requirement::RequirementFields;
