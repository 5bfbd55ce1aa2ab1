// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

//! Read the product version out of a `wails.json` configuration document,
//! either bundled into the binary or read from disk, and check it against
//! the latest published release.

pub mod config;
pub mod error;
pub mod lookup;
pub mod provider;
pub mod source;
pub mod upgrade;
pub mod version;

pub use config::{Config, SourceKind, UpdateSettings};
pub use error::{Error, Result};
pub use provider::{VERSION_PATH, VersionProvider};
pub use source::{ConfigSource, DEFAULT_FILE_NAME, EmbeddedSource, FileSource};
pub use upgrade::{UpgradeStatus, check_for_upgrade};
