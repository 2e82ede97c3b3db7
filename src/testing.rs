//! Testing utilities and mock implementations
//!
//! This module provides a mock [`CanBackend`] for exercising the queue engine
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

#[cfg(feature = "async")]
use core::sync::atomic::{AtomicUsize, Ordering};
#[cfg(feature = "async")]
use core::task::Waker;
#[cfg(feature = "async")]
use std::sync::Arc;
#[cfg(feature = "async")]
use std::task::Wake;
use std::vec::Vec;

use embedded_can::StandardId;

use crate::driver::backend::CanBackend;
use crate::driver::channel::ChannelId;
use crate::driver::config::ChannelConfig;
use crate::driver::error::{BackendError, BackendResult};
use crate::driver::interrupt::InterruptSources;
use crate::frame::CanFrame;

/// Highest channel index the mock tracks interrupt masks for
const MOCK_CHANNELS: usize = 8;

// =============================================================================
// Mock Backend
// =============================================================================

/// Mock CAN peripheral that records every call made by the engine.
///
/// Frames handed to `send_frame` land in [`sent`](Self::sent). Frames queued
/// with [`push_incoming`](Self::push_incoming) are returned by
/// `receive_frame` in order, per channel.
///
/// # Example
///
/// ```ignore
/// let engine: CanEngine<MockBackend, 2, 4, 4> = CanEngine::new(MockBackend::new());
/// engine.configure(ChannelId::CAN1, ChannelConfig::new()).unwrap();
///
/// engine.with_backend(|mock| mock.push_incoming(ChannelId::CAN1, frame(0x10)));
/// engine.on_frame_received(ChannelId::CAN1);
/// ```
#[derive(Debug, Default)]
pub struct MockBackend {
    /// Successful `init` calls
    pub inits: Vec<(ChannelId, ChannelConfig)>,
    /// `deinit` calls
    pub deinits: Vec<ChannelId>,
    /// Frames handed to `send_frame`
    pub sent: Vec<(ChannelId, CanFrame)>,
    /// Frames waiting to be returned by `receive_frame`
    pub incoming: Vec<(ChannelId, CanFrame)>,
    /// Number of `receive_frame` calls
    pub receive_calls: usize,
    /// Error returned by the next `init` calls
    pub fail_init: Option<BackendError>,
    /// Raw interrupt-enable mask per channel
    interrupts: [u32; MOCK_CHANNELS],
}

impl MockBackend {
    /// Create an idle mock (const, usable in statics)
    pub const fn new() -> Self {
        Self {
            inits: Vec::new(),
            deinits: Vec::new(),
            sent: Vec::new(),
            incoming: Vec::new(),
            receive_calls: 0,
            fail_init: None,
            interrupts: [0; MOCK_CHANNELS],
        }
    }

    /// Queue a frame for the next `receive_frame` on `channel`
    pub fn push_incoming(&mut self, channel: ChannelId, frame: CanFrame) {
        self.incoming.push((channel, frame));
    }

    /// Number of frames still waiting on `channel`
    pub fn incoming_len(&self, channel: ChannelId) -> usize {
        self.incoming.iter().filter(|(ch, _)| *ch == channel).count()
    }

    /// Feed the last frame sent on `channel` back as incoming
    pub fn loop_back(&mut self, channel: ChannelId) {
        if let Some(frame) = self.sent_on(channel).last().copied() {
            self.push_incoming(channel, frame);
        }
    }

    /// Frames sent on `channel`, oldest first
    pub fn sent_on(&self, channel: ChannelId) -> Vec<CanFrame> {
        self.sent
            .iter()
            .filter(|(ch, _)| *ch == channel)
            .map(|(_, frame)| *frame)
            .collect()
    }

    /// Interrupt sources currently enabled on `channel`
    pub fn enabled(&self, channel: ChannelId) -> InterruptSources {
        InterruptSources::from_raw(self.interrupts[channel.index()])
    }
}

impl CanBackend for MockBackend {
    fn init(&mut self, channel: ChannelId, config: &ChannelConfig) -> BackendResult<()> {
        if let Some(err) = self.fail_init {
            return Err(err);
        }
        self.inits.push((channel, *config));
        Ok(())
    }

    fn deinit(&mut self, channel: ChannelId) {
        self.deinits.push(channel);
    }

    fn enable_interrupts(&mut self, channel: ChannelId, sources: InterruptSources) {
        self.interrupts[channel.index()] |= sources.to_raw();
    }

    fn disable_interrupts(&mut self, channel: ChannelId, sources: InterruptSources) {
        self.interrupts[channel.index()] &= !sources.to_raw();
    }

    fn send_frame(&mut self, channel: ChannelId, frame: &CanFrame) {
        self.sent.push((channel, *frame));
    }

    fn receive_frame(&mut self, channel: ChannelId) -> CanFrame {
        self.receive_calls += 1;
        self.incoming
            .iter()
            .position(|(ch, _)| *ch == channel)
            .map_or(CanFrame::EMPTY, |pos| self.incoming.remove(pos).1)
    }
}

// =============================================================================
// Frame Helpers
// =============================================================================

/// Data frame with standard identifier `id` and the identifier as payload
///
/// # Panics
///
/// Panics if `id` exceeds 11 bits.
pub fn frame(id: u16) -> CanFrame {
    let std_id = StandardId::new(id).expect("standard id out of range");
    CanFrame::data_frame(std_id, &id.to_be_bytes()).expect("payload fits")
}

// =============================================================================
// Waker Helpers
// =============================================================================

/// Waker that counts how often it was woken
#[cfg(feature = "async")]
#[derive(Debug, Default)]
pub struct WakeCounter {
    hits: AtomicUsize,
}

#[cfg(feature = "async")]
impl WakeCounter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn waker(self: &Arc<Self>) -> Waker {
        Waker::from(Arc::clone(self))
    }

    pub fn count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[cfg(feature = "async")]
impl Wake for WakeCounter {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_records_lifecycle_calls() {
        let mut mock = MockBackend::new();
        let config = ChannelConfig::new();

        mock.init(ChannelId::CAN2, &config).unwrap();
        mock.enable_interrupts(ChannelId::CAN2, InterruptSources::ENGINE);
        assert_eq!(mock.enabled(ChannelId::CAN2), InterruptSources::ENGINE);

        mock.disable_interrupts(ChannelId::CAN2, InterruptSources::ENGINE);
        mock.deinit(ChannelId::CAN2);

        assert_eq!(mock.inits, [(ChannelId::CAN2, config)]);
        assert_eq!(mock.deinits, [ChannelId::CAN2]);
        assert_eq!(mock.enabled(ChannelId::CAN2), InterruptSources::NONE);
    }

    #[test]
    fn mock_receive_is_per_channel_fifo() {
        let mut mock = MockBackend::new();
        mock.push_incoming(ChannelId::CAN1, frame(1));
        mock.push_incoming(ChannelId::CAN2, frame(2));
        mock.push_incoming(ChannelId::CAN1, frame(3));

        assert_eq!(mock.receive_frame(ChannelId::CAN1), frame(1));
        assert_eq!(mock.receive_frame(ChannelId::CAN1), frame(3));
        assert_eq!(mock.receive_frame(ChannelId::CAN1), CanFrame::EMPTY);
        assert_eq!(mock.incoming_len(ChannelId::CAN2), 1);
        assert_eq!(mock.receive_calls, 3);
    }

    #[test]
    fn mock_init_failure() {
        let mut mock = MockBackend::new();
        mock.fail_init = Some(BackendError::ClockError);
        assert_eq!(
            mock.init(ChannelId::CAN1, &ChannelConfig::new()),
            Err(BackendError::ClockError)
        );
        assert!(mock.inits.is_empty());
    }

    #[test]
    fn frame_helper_builds_standard_data_frame() {
        let f = frame(0x123);
        assert_eq!(f.raw_id(), 0x123);
        assert!(!f.is_extended());
        assert_eq!(f.data(), &[0x01, 0x23]);
    }
}
