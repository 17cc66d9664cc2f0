//! Command-line workflow glue

pub mod orchestration;
