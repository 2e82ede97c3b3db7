//! Error types for the CAN queue engine
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Invalid arguments to `configure`
//! - [`BackendError`]: Failures reported by the peripheral backend
//! - [`ChannelError`]: Channel state errors reported by async helpers
//!
//! Most foreground operations do not return errors at all: an unconfigured
//! channel yields a zero count, `false`, or a no-op. Only `configure` and the
//! async helpers return [`Result`].

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
///
/// These errors are detected by the engine before the backend is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Channel identifier is outside the registry
    InvalidChannel,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidChannel => "invalid channel",
        }
    }
}

// =============================================================================
// Backend Errors
// =============================================================================

/// Errors reported by a [`CanBackend`](crate::CanBackend) during physical
/// initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackendError {
    /// Controller did not leave initialization mode
    InitFailed,
    /// Peripheral clock could not be enabled
    ClockError,
    /// Acceptance filter identifiers could not be mapped onto a filter bank
    FilterError,
    /// Hardware handshake timed out
    Timeout,
}

impl core::fmt::Display for BackendError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BackendError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BackendError::InitFailed => "controller initialization failed",
            BackendError::ClockError => "peripheral clock error",
            BackendError::FilterError => "acceptance filter not supported",
            BackendError::Timeout => "hardware timeout",
        }
    }
}

// =============================================================================
// Channel Errors
// =============================================================================

/// Channel state errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// Channel is not configured (or was unconfigured while waiting)
    NotConfigured,
}

impl core::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ChannelError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChannelError::NotConfigured => "channel not configured",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match engine.configure(ChannelId::CAN1, ChannelConfig::new()) {
///     Err(Error::Config(ConfigError::InvalidChannel)) => { /* ... */ }
///     Err(Error::Backend(BackendError::Timeout)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Backend error
    Backend(BackendError),
    /// Channel state error
    Channel(ChannelError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Backend(e) => write!(f, "backend: {}", e.as_str()),
            Error::Channel(e) => write!(f, "channel: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<BackendError> for Error {
    fn from(e: BackendError) -> Self {
        Error::Backend(e)
    }
}

impl From<ChannelError> for Error {
    fn from(e: ChannelError) -> Self {
        Error::Channel(e)
    }
}

/// Result type alias for engine operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for backend operations
pub type BackendResult<T> = core::result::Result<T, BackendError>;

// =============================================================================
// Unit Tests
// =============================================================================
