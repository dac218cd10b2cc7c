pub mod config;
pub mod error;
pub mod feedback;
pub mod output_contract;
pub mod source;
