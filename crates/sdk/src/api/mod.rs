//! API endpoint groups, one per Harness resource family.

mod connectors;
mod logs;
mod pipelines;
mod pull_requests;
mod repositories;

pub use connectors::ConnectorsApi;
pub use logs::LogsApi;
pub use pipelines::PipelinesApi;
pub use pull_requests::PullRequestsApi;
pub use repositories::RepositoriesApi;
