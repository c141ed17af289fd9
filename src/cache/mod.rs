//! Cache module for memoizing API responses within a session
//!
//! This module provides a read-through cache with a per-entry TTL
//! (time-to-live). Each session owns its own tables; nothing is shared or
//! written to disk.

mod ttl;

pub use ttl::TtlCache;
