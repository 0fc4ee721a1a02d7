//! Candidate ranking engine, usable without the HTTP service.

pub mod ranking;
