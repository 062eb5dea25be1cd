pub mod request;
pub mod utils;
