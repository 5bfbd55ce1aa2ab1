// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

//! Version of this tool itself, as opposed to the product version it reads.

/// The version string from Cargo.toml (e.g., "0.1.0")
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
