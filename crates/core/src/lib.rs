// Core types for the Harness MCP server: scope, pagination and API records

pub mod types;
pub mod scope;
pub mod pagination;
pub mod pipeline;
pub mod pullrequest;
pub mod repository;
pub mod logs;
pub mod connector;

pub use types::*;
pub use scope::Scope;
pub use pagination::{PageLimitOptions, PageLimits, PaginationOptions};
