//! Page-size normalization.
//!
//! The platform exposes two pagination conventions. Pipeline endpoints take a
//! zero-indexed `page` with a `size`, while the code-hosting endpoints (pull
//! requests, repositories) take a one-indexed `page` with a `limit`. Each
//! convention keeps its own normalizer.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 20;

/// Default and ceiling applied to every list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

impl PageLimits {
    pub fn new(default_size: u32, max_size: u32) -> Self {
        Self {
            default_size,
            max_size,
        }
    }

    /// Zero-indexed `page/size` form. The page is left as given.
    pub fn normalize(&self, opts: &mut PaginationOptions) {
        if opts.size == 0 {
            opts.size = self.default_size;
        }
        if opts.size > self.max_size {
            opts.size = self.max_size;
        }
    }

    /// One-indexed `page/limit` form. Pages at or below zero become page 1.
    pub fn normalize_one_indexed(&self, opts: &mut PageLimitOptions) {
        if opts.page <= 0 {
            opts.page = 1;
        }
        if opts.limit <= 0 {
            opts.limit = self.default_size as i64;
        } else if opts.limit > self.max_size as i64 {
            opts.limit = self.max_size as i64;
        }
    }
}

/// Zero-indexed pagination (`page`, `size`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationOptions {
    pub page: u32,
    pub size: u32,
}

impl PaginationOptions {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

/// One-indexed pagination (`page`, `limit`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimitOptions {
    pub page: i64,
    pub limit: i64,
}

impl PageLimitOptions {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }
}
