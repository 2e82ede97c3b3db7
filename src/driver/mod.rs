//! Core driver components of the CAN queue engine.
//!
//! This module contains the building blocks for configuring channels and
//! moving frames between the application and the peripheral:
//!
//! - [`backend`] - The hardware-facing [`CanBackend`] trait
//! - [`channel`] - Channel identifiers and callback slots
//! - [`config`] - Configuration types and builder patterns
//! - [`engine`] - The [`CanEngine`] registry, lifecycle and status queries
//! - [`error`] - Error types and result aliases
//! - [`interrupt`] - Interrupt source sets
//! - `transmit` / `receive` - The two interrupt-driven data paths
//!
//! # Example
//!
//! ```ignore
//! use can_isr_queue::driver::{BaudRate, ChannelConfig, WorkMode};
//!
//! let config = ChannelConfig::new()
//!     .with_mode(WorkMode::LoopBack)
//!     .with_baud_rate(BaudRate::Kbps500);
//! ```

// Submodules
pub mod backend;
pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod interrupt;
mod receive;
mod transmit;

// Re-exports for convenience
pub use backend::CanBackend;
pub use channel::{Callback, ChannelId};
pub use config::{AcceptanceFilter, BaudRate, ChannelConfig, Lifecycle, WorkMode};
pub use engine::{CanEngine, CanEngineDefault, CanEngineSmall};
pub use error::{
    BackendError, BackendResult, ChannelError, ConfigError, Error, Result,
};
pub use interrupt::InterruptSources;
