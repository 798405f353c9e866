// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime-observable errors.
//!
//! Almost every misuse of a tag map is rejected at build time (absent tag, non-record path step,
//! absent property). The variants here cover the few checks that only make sense on values that
//! were computed at run time, such as a position read from user input or a schema assembled by
//! repeated `insert_front` calls.

use thiserror::Error;

/// Errors reported by runtime schema checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The same tag occurs twice in one tag map.
    #[error("duplicate tag `{tag}` at positions {first} and {second}")]
    DuplicateTag {
        tag: &'static str,
        first: usize,
        second: usize,
    },

    /// A positional query went past the end of the map.
    #[error("position {position} out of range for tag map of size {size}")]
    PositionOutOfRange { position: usize, size: usize },
}

/// Result type for runtime schema checks.
pub type Result<T> = std::result::Result<T, Error>;
