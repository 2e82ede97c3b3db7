//! Per-channel state record.
//!
//! One [`ChannelState`] exists for every physical channel in the registry.
//! It is only ever touched inside the engine's critical section.

use super::config::Lifecycle;
use crate::frame::CanFrame;
use crate::internal::ring::RingBuffer;

/// Handler invoked from interrupt context on transmit-done or frame-received.
///
/// A slot holds at most one handler. Registering a new one silently replaces
/// the previous one; handlers are never composed.
pub type Callback = fn();

/// Identifier of a channel in the registry (zero-based index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId(u8);

impl ChannelId {
    /// First controller
    pub const CAN1: Self = Self(0);
    /// Second controller
    pub const CAN2: Self = Self(1);

    /// Create an identifier from a zero-based index
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Zero-based registry index
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Queues, flags and callback slots of one channel.
pub(crate) struct ChannelState<const TX: usize, const RX: usize> {
    pub(crate) lifecycle: Lifecycle,
    /// One frame handed to the backend and not yet completed
    pub(crate) transmitting: bool,
    pub(crate) tx_queue: RingBuffer<CanFrame, TX>,
    pub(crate) rx_queue: RingBuffer<CanFrame, RX>,
    pub(crate) on_transmit_done: Option<Callback>,
    pub(crate) on_received: Option<Callback>,
    /// Frames discarded because `rx_queue` was full
    pub(crate) rx_dropped: u32,
}

impl<const TX: usize, const RX: usize> ChannelState<TX, RX> {
    pub(crate) const fn new() -> Self {
        Self {
            lifecycle: Lifecycle::NotConfigured,
            transmitting: false,
            tx_queue: RingBuffer::new(CanFrame::EMPTY),
            rx_queue: RingBuffer::new(CanFrame::EMPTY),
            on_transmit_done: None,
            on_received: None,
            rx_dropped: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn is_configured(&self) -> bool {
        self.lifecycle == Lifecycle::Configured
    }

    /// Claim the queues and clear flags and slots.
    pub(crate) fn activate(&mut self) {
        self.tx_queue.reset();
        self.rx_queue.reset();
        self.transmitting = false;
        self.on_transmit_done = None;
        self.on_received = None;
        self.rx_dropped = 0;
        self.lifecycle = Lifecycle::Configured;
    }

    /// Release the queues and return to `NotConfigured`, whatever is in flight.
    pub(crate) fn release(&mut self) {
        self.lifecycle = Lifecycle::NotConfigured;
        self.transmitting = false;
        self.on_transmit_done = None;
        self.on_received = None;
        self.tx_queue.reset();
        self.rx_queue.reset();
    }
}
