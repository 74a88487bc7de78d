//! Error types for the translation engine and its I/O collaborators

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, VmError>;

#[derive(Error, Debug)]
pub enum VmError {
    /// The address list could not be read
    #[error("failed to read address file {path}: {source}")]
    InputIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line of the address list is not a non-negative decimal integer
    #[error("malformed address on line {line}: {text:?}")]
    MalformedAddress { line: usize, text: String },

    /// The backing store could not supply a page
    #[error("failed to read page {page} from backing store: {source}")]
    BackingStore {
        page: usize,
        #[source]
        source: io::Error,
    },

    /// The backing store file could not be opened
    #[error("failed to open backing store {path}: {source}")]
    BackingStoreOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown replacement policy {0:?} (expected `fifo` or `lru`)")]
    UnknownReplacementPolicy(String),

    /// Virtual address does not fit in 16 bits
    #[error("virtual address {0} is outside the 16-bit address space")]
    AddressOutOfRange(u64),

    #[error("failed to write output: {0}")]
    OutputIo(#[from] io::Error),

    /// A rate was requested before any address was translated
    #[error("no addresses were translated, rates are undefined")]
    EmptyRun,
}

impl VmError {
    /// Exit code reported by the binary for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InputIo { .. } | Self::MalformedAddress { .. } => ExitCode::from(3),
            Self::BackingStore { .. } | Self::BackingStoreOpen { .. } => ExitCode::from(4),
            Self::UnknownReplacementPolicy(_) => ExitCode::from(2),
            Self::AddressOutOfRange(_) => ExitCode::from(5),
            Self::OutputIo(_) => ExitCode::from(7),
            Self::EmptyRun => ExitCode::from(6),
        }
    }

    /// Whether the run may continue past this error
    pub fn is_per_address(&self) -> bool {
        matches!(self, Self::AddressOutOfRange(_))
    }
}
