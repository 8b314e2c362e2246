pub mod http;

pub use http::{JsonClient, JSON_CONTENT_TYPE};
