pub mod config;
pub mod error;
pub mod ingest;
pub mod types;

pub use config::Config;
pub use error::RekapError;
pub use ingest::decode_records;
pub use types::*;
