// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The document bundled at build time is empty, which means the build
    /// packaged a broken artifact.
    #[error("Embedded configuration document is missing or empty")]
    ConfigurationMissing,

    #[error("Failed to read {}: {source}", .path.display())]
    ConfigurationUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl Error {
    /// Whether the error means the version document itself cannot be used,
    /// as opposed to a failure in something layered on top of it.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::ConfigurationMissing | Error::ConfigurationUnreadable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
