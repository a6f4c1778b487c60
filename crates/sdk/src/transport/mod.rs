//! Transport layer for the Harness SDK.

pub mod http;

pub use http::{flatten_query, HttpTransport, Retried, API_KEY_HEADER};
