//! Async/await support for the CAN queue engine.
//!
//! Each channel owns a transmit and a receive [`AtomicWaker`]. The hooks wake
//! them after releasing the critical section, so a task awaiting
//! [`CanEngine::receive_async`] or [`CanEngine::flush_async`] is polled again
//! as soon as there is something to observe.

use core::future::poll_fn;
use core::task::Poll;

use super::primitives::AtomicWaker;
use crate::driver::backend::CanBackend;
use crate::driver::channel::ChannelId;
use crate::driver::engine::CanEngine;
use crate::driver::error::{ChannelError, Error, Result};
use crate::frame::CanFrame;

/// Wakers of one channel.
pub(crate) struct ChannelWakers {
    /// Woken when the channel goes idle
    tx: AtomicWaker,
    /// Woken after every receive-ready event
    rx: AtomicWaker,
}

impl ChannelWakers {
    pub(crate) const fn new() -> Self {
        Self {
            tx: AtomicWaker::new(),
            rx: AtomicWaker::new(),
        }
    }
}

impl<B, const CHANNELS: usize, const TX: usize, const RX: usize> CanEngine<B, CHANNELS, TX, RX> {
    #[inline]
    pub(crate) fn wake_tx(&self, channel: ChannelId) {
        if let Some(wakers) = self.wakers.get(channel.index()) {
            wakers.tx.wake();
        }
    }

    #[inline]
    pub(crate) fn wake_rx(&self, channel: ChannelId) {
        if let Some(wakers) = self.wakers.get(channel.index()) {
            wakers.rx.wake();
        }
    }

    /// Wake every task waiting on `channel`, e.g. after teardown.
    pub(crate) fn wake_all(&self, channel: ChannelId) {
        self.wake_tx(channel);
        self.wake_rx(channel);
    }
}

impl<B: CanBackend, const CHANNELS: usize, const TX: usize, const RX: usize>
    CanEngine<B, CHANNELS, TX, RX>
{
    /// Wait until at least one frame is buffered, then dequeue into `out`.
    ///
    /// Resolves immediately with `Ok(0)` if `out` is empty.
    ///
    /// # Errors
    /// `NotConfigured` if the channel is not configured when polled, including
    /// when it is unconfigured while the future is pending.
    ///
    /// # Example
    /// ```ignore
    /// let mut rx = [CanFrame::EMPTY; 4];
    /// loop {
    ///     let n = CAN.receive_async(ChannelId::CAN1, &mut rx).await?;
    ///     for frame in &rx[..n] {
    ///         handle(frame);
    ///     }
    /// }
    /// ```
    pub async fn receive_async(&self, channel: ChannelId, out: &mut [CanFrame]) -> Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }

        poll_fn(|cx| {
            if let Some(wakers) = self.wakers.get(channel.index()) {
                wakers.rx.register(cx.waker());
            }

            let popped = self.inner.with(|registry| {
                registry
                    .configured(channel)
                    .map(|(_, state)| state.rx_queue.pop(out))
            });

            match popped {
                None => Poll::Ready(Err(Error::Channel(ChannelError::NotConfigured))),
                Some(0) => Poll::Pending,
                Some(count) => Poll::Ready(Ok(count)),
            }
        })
        .await
    }

    /// Wait until the transmit queue is empty and nothing is in flight.
    ///
    /// # Errors
    /// `NotConfigured` if the channel is not configured when polled.
    pub async fn flush_async(&self, channel: ChannelId) -> Result<()> {
        poll_fn(|cx| {
            if let Some(wakers) = self.wakers.get(channel.index()) {
                wakers.tx.register(cx.waker());
            }

            let idle = self.inner.with(|registry| {
                registry
                    .state(channel)
                    .map(|state| !state.transmitting && state.tx_queue.is_empty())
            });

            match idle {
                None => Poll::Ready(Err(Error::Channel(ChannelError::NotConfigured))),
                Some(false) => Poll::Pending,
                Some(true) => Poll::Ready(Ok(())),
            }
        })
        .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
