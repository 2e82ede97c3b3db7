//! Peripheral backend abstraction.
//!
//! The engine never touches registers. Clock gating, pin multiplexing,
//! bit-timing computation, filter-bank allocation and interrupt priorities
//! all live behind [`CanBackend`], which lets the same queueing logic run on
//! any controller and be tested with a mock on the host.

use super::channel::ChannelId;
use super::config::ChannelConfig;
use super::error::BackendResult;
use super::interrupt::InterruptSources;
use crate::frame::CanFrame;

/// Hardware-facing collaborator of the queue engine.
///
/// All methods are called from inside a critical section, so they must not
/// block for long and must not call back into the engine. The two hooks
/// ([`CanEngine::on_transmit_complete`](crate::CanEngine::on_transmit_complete)
/// and [`CanEngine::on_frame_received`](crate::CanEngine::on_frame_received))
/// are invoked by the application's interrupt handlers, never from inside
/// these methods.
pub trait CanBackend {
    /// Physically initialize the controller for `channel`.
    ///
    /// The acceptance filter identifiers in `config` arrive unvalidated. A
    /// backend that cannot map them onto its filter banks returns
    /// [`BackendError::FilterError`](crate::BackendError::FilterError). On
    /// error the engine leaves the channel unconfigured.
    fn init(&mut self, channel: ChannelId, config: &ChannelConfig) -> BackendResult<()>;

    /// Return the controller for `channel` to its reset state.
    ///
    /// A transmission still in the hardware may be aborted asynchronously.
    fn deinit(&mut self, channel: ChannelId);

    /// Enable the given interrupt sources for `channel`.
    fn enable_interrupts(&mut self, channel: ChannelId, sources: InterruptSources);

    /// Disable the given interrupt sources for `channel`.
    fn disable_interrupts(&mut self, channel: ChannelId, sources: InterruptSources);

    /// Hand one frame to the hardware. Completion is reported later through
    /// the transmit-complete hook.
    fn send_frame(&mut self, channel: ChannelId, frame: &CanFrame);

    /// Read the frame that triggered the receive-ready interrupt.
    ///
    /// Called exactly once per receive-ready hook invocation.
    fn receive_frame(&mut self, channel: ChannelId) -> CanFrame;
}
