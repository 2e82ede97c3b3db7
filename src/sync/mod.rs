//! Synchronization and Concurrency Support
//!
//! This module provides the synchronization primitives that make the queue
//! engine safe to share between the foreground loop and interrupt handlers:
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!   - `AtomicWaker` - Async waker storage for interrupts (feature `async`)
//!
//! - **Async Support** (`asynch`): Async/await helpers on top of the engine
//!   - `CanEngine::receive_async` / `CanEngine::flush_async`
//!
//! # Feature Flags
//!
//! - `async`: Enables the `asynch` module and `AtomicWaker`
//!
//! # Example
//!
//! ```ignore
//! use can_isr_queue::{CanEngine, ChannelId};
//!
//! static CAN: CanEngine<MyBackend, 2, 16, 16> = CanEngine::new(MyBackend::new());
//!
//! #[interrupt]
//! fn CAN1_TX() {
//!     CAN.on_transmit_complete(ChannelId::CAN1);
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

#[cfg(feature = "async")]
pub use primitives::AtomicWaker;

#[cfg(feature = "async")]
pub(crate) mod asynch;
