//! Port traits the pipeline depends on.

pub mod config_port;
pub mod dataset_port;
pub mod page_port;
