//! Receive path of the CAN queue engine.
//!
//! The receive-ready hook is the only producer into the receive queue and the
//! foreground is the only consumer. On overflow the newest frame is dropped
//! and the buffered ones are kept.

use super::backend::CanBackend;
use super::channel::{Callback, ChannelId};
use super::engine::CanEngine;
use crate::frame::CanFrame;

impl<B: CanBackend, const CHANNELS: usize, const TX: usize, const RX: usize>
    CanEngine<B, CHANNELS, TX, RX>
{
    /// Receive-ready hook. Call from the channel's receive interrupt.
    ///
    /// Reads exactly one frame from the backend and buffers it if there is
    /// room. The frame-received handler runs afterwards in every case, also
    /// when the frame was dropped.
    ///
    /// No-op if the channel is not configured; the backend is not read then.
    pub fn on_frame_received(&self, channel: ChannelId) {
        let handler: Option<Option<Callback>> = self.inner.with(|registry| {
            let Some((backend, state)) = registry.configured(channel) else {
                #[cfg(feature = "defmt")]
                defmt::debug!("{}: rx ignored, not configured", channel);
                return None;
            };

            let frame = backend.receive_frame(channel);
            if !state.rx_queue.push_one(frame) {
                state.rx_dropped = state.rx_dropped.saturating_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("{}: rx queue full, dropped {}", channel, frame);
            }

            Some(state.on_received)
        });

        let Some(handler) = handler else {
            return;
        };

        #[cfg(feature = "async")]
        self.wake_rx(channel);

        if let Some(handler) = handler {
            handler();
        }
    }

    /// Move up to `out.len()` buffered frames into `out`, oldest first.
    ///
    /// # Returns
    /// Number of frames written. `0` if the channel is not configured or
    /// nothing is buffered; slots past the returned count are left untouched.
    pub fn dequeue_receive(&self, channel: ChannelId, out: &mut [CanFrame]) -> usize {
        self.inner.with(|registry| {
            registry
                .configured(channel)
                .map_or(0, |(_, state)| state.rx_queue.pop(out))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
