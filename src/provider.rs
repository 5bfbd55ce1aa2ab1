// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

//! Product version accessor.

use std::path::PathBuf;

use crate::error::Result;
use crate::lookup;
use crate::source::{ConfigSource, EmbeddedSource, FileSource};

/// Location of the version field inside the configuration document.
pub const VERSION_PATH: &str = "info.ProductVersion";

/// Reads the product version from a configuration document.
///
/// Holds no state besides its source. Every call to [`get_version`] reads and
/// parses the document again.
///
/// [`get_version`]: VersionProvider::get_version
#[derive(Debug, Clone)]
pub struct VersionProvider<S> {
    source: S,
}

impl VersionProvider<EmbeddedSource> {
    /// Provider backed by the `wails.json` compiled into this binary.
    pub fn embedded() -> Self {
        Self::new(EmbeddedSource::bundled())
    }
}

impl VersionProvider<FileSource> {
    /// Provider backed by `wails.json` in the current working directory.
    pub fn from_working_dir() -> Self {
        Self::new(FileSource::default())
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSource::new(path))
    }
}

impl VersionProvider<Box<dyn ConfigSource + Send + Sync>> {
    /// Erase the source type so the choice can be made at run time.
    pub fn boxed<S>(source: S) -> Self
    where
        S: ConfigSource + Send + Sync + 'static,
    {
        Self::new(Box::new(source))
    }
}

impl<S: ConfigSource> VersionProvider<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the value at `info.ProductVersion`.
    ///
    /// An absent field or a malformed document gives an empty string. Only a
    /// missing embedded document or an unreadable file is an error.
    pub fn get_version(&self) -> Result<String> {
        let document = self.source.read()?;
        Ok(lookup::get_string(&document, VERSION_PATH))
    }
}
