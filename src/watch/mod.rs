// src/watch/mod.rs

//! Change detection.
//!
//! This module is responsible for:
//! - Fingerprinting a watched file's content (`hash`).
//! - Remembering the last fingerprint seen per absolute path (`cache`).
//! - Loading and persisting that memory across runs (`store`).
//!
//! It does **not** know which command belongs to which file; it only answers
//! "did this path's bytes change since we last looked".

pub mod cache;
pub mod hash;
pub mod store;

pub use cache::ChangeCache;
pub use hash::{fingerprint, Fingerprint, HASH_CHUNK_SIZE};
pub use store::{
    ensure_cache_file, load_last_invocation, save_last_invocation, CacheDocument, CacheStore,
    JsonCacheStore, MemoryCacheStore, CACHE_FILE_PATH,
};
