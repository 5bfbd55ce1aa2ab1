// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

//! Where the configuration document comes from.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// File name of the configuration artifact, relative to the working directory.
pub const DEFAULT_FILE_NAME: &str = "wails.json";

/// Document bundled into the binary at build time.
const BUNDLED_DOCUMENT: &str = include_str!("../wails.json");

/// Supplies the raw text of a configuration document.
pub trait ConfigSource {
    /// Return the full document text.
    fn read(&self) -> Result<Cow<'_, str>>;

    /// Short description used in diagnostics.
    fn describe(&self) -> String;
}

impl<S: ConfigSource + ?Sized> ConfigSource for Box<S> {
    fn read(&self) -> Result<Cow<'_, str>> {
        (**self).read()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// A document compiled into the program.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    document: &'static str,
}

impl EmbeddedSource {
    pub const fn new(document: &'static str) -> Self {
        Self { document }
    }

    /// The `wails.json` shipped with this build.
    pub const fn bundled() -> Self {
        Self::new(BUNDLED_DOCUMENT)
    }
}

impl Default for EmbeddedSource {
    fn default() -> Self {
        Self::bundled()
    }
}

impl ConfigSource for EmbeddedSource {
    fn read(&self) -> Result<Cow<'_, str>> {
        if self.document.is_empty() {
            return Err(Error::ConfigurationMissing);
        }
        Ok(Cow::Borrowed(self.document))
    }

    fn describe(&self) -> String {
        "embedded document".to_string()
    }
}

/// A document read from disk on every call.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSource {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl ConfigSource for FileSource {
    fn read(&self) -> Result<Cow<'_, str>> {
        debug!(path = %self.path.display(), "reading configuration document");
        let bytes = fs::read(&self.path).map_err(|source| Error::ConfigurationUnreadable {
            path: self.path.clone(),
            source,
        })?;
        // Undecodable bytes are malformed content, not a read failure.
        Ok(Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
