use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Query parameters for a single request.
///
/// A value containing commas is sent as repeated entries of the same key.
/// Keys are ordered so that request URLs are stable.
pub type QueryParams = BTreeMap<String, String>;

/// `{status, data}` envelope used by the pipeline APIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity<T> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    pub data: T,
}

/// Paged list envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListOutput<T> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default)]
    pub data: ListOutputData<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutputData<T> {
    #[serde(default)]
    pub total_elements: i64,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub content: Vec<T>,
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub sort: SortInfo,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub pageable: PageableInfo,
    #[serde(default)]
    pub number_of_elements: i64,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
}

impl<T> Default for ListOutputData<T> {
    fn default() -> Self {
        Self {
            total_elements: 0,
            total_pages: 0,
            size: 0,
            content: Vec::new(),
            number: 0,
            sort: SortInfo::default(),
            first: false,
            pageable: PageableInfo::default(),
            number_of_elements: 0,
            last: false,
            empty: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortInfo {
    pub empty: bool,
    pub unsorted: bool,
    pub sorted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageableInfo {
    pub offset: i64,
    pub sort: SortInfo,
    pub paged: bool,
    pub unpaged: bool,
    pub page_size: i64,
    pub page_number: i64,
}

/// Structured error document returned with 4xx/5xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub code: String,
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub message: String,
}

// Error documents sometimes carry an explicit `null` code.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ErrorResponse {
    /// Only a document with a code or a message counts as a structured error.
    pub fn is_present(&self) -> bool {
        !self.code.is_empty() || !self.message.is_empty()
    }
}
