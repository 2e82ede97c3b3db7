//! Transmit path of the CAN queue engine.
//!
//! The foreground fills the transmit queue and starts the first physical
//! send. The transmit-complete hook then drains the queue one frame at a time,
//! so at most one frame is ever in flight per channel.

use super::backend::CanBackend;
use super::channel::{Callback, ChannelId};
use super::engine::CanEngine;
use crate::frame::CanFrame;

impl<B: CanBackend, const CHANNELS: usize, const TX: usize, const RX: usize>
    CanEngine<B, CHANNELS, TX, RX>
{
    /// Queue frames for transmission.
    ///
    /// Accepts as many of `frames` as fit in the transmit queue, in order. If
    /// nothing is in flight, the oldest queued frame is handed to the backend
    /// immediately; later frames are sent from the transmit-complete hook.
    ///
    /// # Returns
    /// Number of frames accepted. `0` if the channel is not configured, if
    /// `frames` is empty or if the queue is full.
    ///
    /// # Example
    /// ```ignore
    /// let batch = [frame_a, frame_b, frame_c];
    /// let mut sent = 0;
    /// while sent < batch.len() {
    ///     sent += CAN.enqueue_transmit(ChannelId::CAN1, &batch[sent..]);
    /// }
    /// ```
    pub fn enqueue_transmit(&self, channel: ChannelId, frames: &[CanFrame]) -> usize {
        self.inner.with(|registry| {
            let Some((backend, state)) = registry.configured(channel) else {
                return 0;
            };

            let accepted = state.tx_queue.push(frames);
            if accepted > 0 && !state.transmitting {
                if let Some(head) = state.tx_queue.pop_one() {
                    state.transmitting = true;
                    backend.send_frame(channel, &head);
                }
            }

            #[cfg(feature = "defmt")]
            if accepted < frames.len() {
                defmt::debug!(
                    "{}: tx queue accepted {}/{} frames",
                    channel,
                    accepted,
                    frames.len()
                );
            }

            accepted
        })
    }

    /// Transmit-complete hook. Call from the channel's transmit interrupt.
    ///
    /// Sends the next queued frame if there is one. Otherwise the channel goes
    /// idle and the transmit-done handler runs, after the critical section has
    /// been released.
    ///
    /// Ignored if the channel is not configured or has nothing in flight, so a
    /// completion that races with `unconfigure` never touches released state.
    ///
    /// A completion that arrives while the channel is already idle does not
    /// run the transmit-done handler again. Controllers that raise the
    /// mailbox-empty interrupt once per free mailbox would otherwise report a
    /// single drained queue several times; here each drain is reported
    /// exactly once.
    pub fn on_transmit_complete(&self, channel: ChannelId) {
        let done: Option<Option<Callback>> = self.inner.with(|registry| {
            let Some((backend, state)) = registry.configured(channel) else {
                #[cfg(feature = "defmt")]
                defmt::debug!("{}: tx complete ignored, not configured", channel);
                return None;
            };
            if !state.transmitting {
                #[cfg(feature = "defmt")]
                defmt::debug!("{}: tx complete ignored, nothing in flight", channel);
                return None;
            }

            match state.tx_queue.pop_one() {
                Some(next) => {
                    backend.send_frame(channel, &next);
                    None
                }
                None => {
                    state.transmitting = false;
                    Some(state.on_transmit_done)
                }
            }
        });

        let Some(handler) = done else {
            return;
        };

        #[cfg(feature = "async")]
        self.wake_tx(channel);

        if let Some(handler) = handler {
            handler();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
