//! Interrupt-Driven CAN Queue Engine
//!
//! A `no_std`, `no_alloc` buffered transmit/receive engine for CAN
//! peripherals.
//!
//! Each channel gets a fixed-capacity transmit queue and receive queue. The
//! application enqueues and dequeues frames without blocking, while the
//! peripheral's interrupt handlers drain the transmit queue one frame at a
//! time and fill the receive queue as frames arrive.
//!
//! # Architecture
//!
//! The crate is organized into three layers:
//!
//! 1. **Engine** ([`driver::engine`]): Channel registry, lifecycle, status
//!    queries and the two interrupt hooks
//! 2. **Backend** ([`driver::backend`]): The [`CanBackend`] trait a HAL
//!    implements to perform the physical send, receive and register setup
//! 3. **Sync** ([`sync`]): Critical-section cell and async wakers that make the
//!    engine shareable between foreground code and interrupts
//!
//! ## Guarantees
//!
//! - At most one frame is in flight per channel at any time
//! - Frames leave and arrive in FIFO order
//! - Overflow never errors: enqueue reports a short count, receive drops the
//!   newest frame
//! - Hooks delivered after `unconfigure` are ignored
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting and lifecycle logging
//! - `async`: Enable `receive_async` / `flush_async` with per-channel wakers
//!
//! # Example
//!
//! ```ignore
//! use can_isr_queue::{CanEngine, CanFrame, ChannelConfig, ChannelId, WorkMode};
//!
//! can_isr_queue::can_engine_static!(CAN, Bxcan, Bxcan::new());
//!
//! fn tx_done() {
//!     // runs in interrupt context once the queue drained
//! }
//!
//! CAN.configure(ChannelId::CAN1, ChannelConfig::new().with_mode(WorkMode::LoopBack))?;
//! CAN.set_transmit_done_callback(ChannelId::CAN1, Some(tx_done));
//!
//! let id = can_isr_queue::frame::standard_id(0x123).unwrap();
//! let frame = CanFrame::data_frame(id, &[0xDE, 0xAD]).unwrap();
//! CAN.enqueue_transmit(ChannelId::CAN1, &[frame]);
//!
//! while CAN.is_rx_empty(ChannelId::CAN1) {}
//! let mut rx = [CanFrame::EMPTY; 1];
//! CAN.dequeue_receive(ChannelId::CAN1, &mut rx);
//!
//! #[interrupt]
//! fn CAN1_TX() {
//!     CAN.on_transmit_complete(ChannelId::CAN1);
//! }
//!
//! #[interrupt]
//! fn CAN1_RX0() {
//!     CAN.on_frame_received(ChannelId::CAN1);
//! }
//! ```
//!
//! # Memory Requirements
//!
//! With the default configuration (2 channels, 16-frame queues each way):
//! - Roughly 1 KB of static RAM, all reserved at compile time

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod frame;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::backend::CanBackend;
pub use driver::channel::{Callback, ChannelId};
pub use driver::config::{AcceptanceFilter, BaudRate, ChannelConfig, Lifecycle, WorkMode};
pub use driver::engine::{CanEngine, CanEngineDefault, CanEngineSmall};
pub use driver::error::{
    BackendError, BackendResult, ChannelError, ConfigError, Error, Result,
};
pub use driver::interrupt::InterruptSources;
pub use frame::{CanFrame, FrameKind};

// Re-export embedded-can identifier types so backends need no extra import
pub use embedded_can::{ExtendedId, Id, StandardId};

/// Shared engine constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on engine types and integration points.
pub mod constants {
    pub use crate::internal::constants::{
        // Default configurations
        DEFAULT_CHANNELS,
        DEFAULT_RX_QUEUE_LEN,
        DEFAULT_TX_QUEUE_LEN,
        // Frame limits
        EXTENDED_ID_MAX,
        // Interrupt bits
        IER_FMPIE0,
        IER_TMEIE,
        MAX_DLC,
        STANDARD_ID_MAX,
    };
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare a static, ISR-safe CAN engine.
///
/// The short form uses two channels with 16-frame queues. The long form takes
/// the channel count and both queue capacities.
///
/// # Examples
///
/// ```ignore
/// can_isr_queue::can_engine_static!(CAN, Bxcan, Bxcan::new());
/// can_isr_queue::can_engine_static!(CAN_SMALL, Bxcan, Bxcan::new(), 1, 4, 4);
///
/// CAN.configure(ChannelId::CAN1, ChannelConfig::new()).unwrap();
/// ```
#[macro_export]
macro_rules! can_engine_static {
    ($name:ident, $backend:ty, $init:expr) => {
        $crate::can_engine_static!(
            $name,
            $backend,
            $init,
            $crate::constants::DEFAULT_CHANNELS,
            $crate::constants::DEFAULT_TX_QUEUE_LEN,
            $crate::constants::DEFAULT_RX_QUEUE_LEN
        );
    };
    ($name:ident, $backend:ty, $init:expr, $channels:expr, $tx:expr, $rx:expr) => {
        static $name: $crate::CanEngine<$backend, { $channels }, { $tx }, { $rx }> =
            $crate::CanEngine::new($init);
    };
}

// =============================================================================
// Unit Tests
// =============================================================================
