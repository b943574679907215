//! Cache module for recipe list responses
//!
//! This module provides an in-process response cache keyed by request. Each
//! entry records when it was stored so callers can apply a freshness window;
//! entries with no recorded time are reported as fresh.

mod manager;

pub use manager::{CacheKey, CachedData, ResponseCache};
