// SPDX-License-Identifier: MPL-2.0
//! Error types for configuration loading and rendering host calls.
//!
//! The notification API itself never surfaces these to callers: every
//! failure on that path degrades to a logged warning. They only escape
//! through [`crate::config`] and through [`HostError`] values returned by
//! a [`crate::notifications::ViewRegistry`] implementation.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Host Error: {0}")]
    Host(#[from] HostError),
}

/// Failures reported by a rendering host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// No rendering surface is attached (headless process, host detached).
    #[error("no rendering host is available")]
    Unavailable,

    /// The host refused to mount a view.
    #[error("failed to mount view: {0}")]
    MountFailed(String),

    /// Destroying a previously mounted view failed.
    #[error("failed to unmount view: {0}")]
    UnmountFailed(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
