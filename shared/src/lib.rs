pub mod card;
pub mod constants;
pub mod data_url;
pub mod error;
pub mod thumbnail;
pub mod types;
pub mod utils;
