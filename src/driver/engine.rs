//! Channel registry and lifecycle for the CAN queue engine.
//!
//! This module contains the main [`CanEngine`] structure and the operations
//! that are neither transmit nor receive specific:
//!
//! - Configure / unconfigure
//! - Callback registration
//! - Status and maintenance queries
//! - Interrupt dispatch
//!
//! For the transmit path, see the [`transmit`](super::transmit) module.
//! For the receive path, see the [`receive`](super::receive) module.

use super::backend::CanBackend;
use super::channel::{Callback, ChannelId, ChannelState};
use super::config::{ChannelConfig, Lifecycle};
use super::error::{ConfigError, Result};
use super::interrupt::InterruptSources;
use crate::internal::constants::{DEFAULT_CHANNELS, DEFAULT_RX_QUEUE_LEN, DEFAULT_TX_QUEUE_LEN};
use crate::sync::CriticalSectionCell;

#[cfg(feature = "async")]
use crate::sync::asynch::ChannelWakers;

// =============================================================================
// Registry
// =============================================================================

/// Backend plus one state record per channel, guarded as a unit.
pub(crate) struct Registry<B, const CHANNELS: usize, const TX: usize, const RX: usize> {
    pub(crate) backend: B,
    pub(crate) channels: [ChannelState<TX, RX>; CHANNELS],
}

impl<B, const CHANNELS: usize, const TX: usize, const RX: usize> Registry<B, CHANNELS, TX, RX> {
    /// State of `channel` if it is configured
    #[inline]
    pub(crate) fn state(&self, channel: ChannelId) -> Option<&ChannelState<TX, RX>> {
        self.channels
            .get(channel.index())
            .filter(|state| state.is_configured())
    }

    /// Backend and state of `channel` if it is configured
    #[inline]
    pub(crate) fn configured(
        &mut self,
        channel: ChannelId,
    ) -> Option<(&mut B, &mut ChannelState<TX, RX>)> {
        let state = self.channels.get_mut(channel.index())?;
        if !state.is_configured() {
            return None;
        }
        Some((&mut self.backend, state))
    }
}

// =============================================================================
// CAN Engine
// =============================================================================

/// Buffered, interrupt-driven CAN transmit/receive engine.
///
/// Owns the backend and a registry of `CHANNELS` independent channels, each
/// with a `TX`-frame transmit queue and an `RX`-frame receive queue. Every
/// operation runs inside a critical section, so the engine can be placed in a
/// `static` and shared between the application loop and interrupt handlers.
///
/// # Type Parameters
/// * `B` - Peripheral backend
/// * `CHANNELS` - Number of channels in the registry
/// * `TX` - Transmit queue capacity per channel (non-zero)
/// * `RX` - Receive queue capacity per channel (non-zero)
///
/// # Example
/// ```ignore
/// static CAN: CanEngine<Bxcan, 2, 16, 16> = CanEngine::new(Bxcan::new());
///
/// CAN.configure(ChannelId::CAN1, ChannelConfig::new().with_mode(WorkMode::LoopBack))?;
/// CAN.enqueue_transmit(ChannelId::CAN1, &[frame]);
///
/// while CAN.is_rx_empty(ChannelId::CAN1) {}
/// let mut rx = [CanFrame::EMPTY; 1];
/// CAN.dequeue_receive(ChannelId::CAN1, &mut rx);
///
/// #[interrupt]
/// fn CAN1_TX() {
///     CAN.on_transmit_complete(ChannelId::CAN1);
/// }
///
/// #[interrupt]
/// fn CAN1_RX0() {
///     CAN.on_frame_received(ChannelId::CAN1);
/// }
/// ```
pub struct CanEngine<B, const CHANNELS: usize, const TX: usize, const RX: usize> {
    pub(crate) inner: CriticalSectionCell<Registry<B, CHANNELS, TX, RX>>,
    #[cfg(feature = "async")]
    pub(crate) wakers: [ChannelWakers; CHANNELS],
}

impl<B, const CHANNELS: usize, const TX: usize, const RX: usize> CanEngine<B, CHANNELS, TX, RX> {
    /// Create a new engine with every channel `NotConfigured`.
    ///
    /// This is a const function suitable for static initialization.
    pub const fn new(backend: B) -> Self {
        Self {
            inner: CriticalSectionCell::new(Registry {
                backend,
                channels: [const { ChannelState::new() }; CHANNELS],
            }),
            #[cfg(feature = "async")]
            wakers: [const { ChannelWakers::new() }; CHANNELS],
        }
    }

    /// Number of channels in the registry
    #[inline(always)]
    pub const fn channel_count(&self) -> usize {
        CHANNELS
    }
}

impl<B: CanBackend, const CHANNELS: usize, const TX: usize, const RX: usize>
    CanEngine<B, CHANNELS, TX, RX>
{
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Configure `channel` and start interrupt-driven operation.
    ///
    /// Claims both queues, clears the in-flight flag and both callback slots,
    /// initializes the hardware through the backend and enables the
    /// transmit-mailbox-empty and receive-FIFO-pending interrupt sources.
    ///
    /// Calling this on a channel that is already configured is a no-op that
    /// returns `Ok(())` and preserves queues, flags and callbacks.
    ///
    /// # Errors
    /// - `InvalidChannel` - `channel` is outside the registry
    /// - Any [`BackendError`](crate::BackendError) from `init`, including
    ///   `FilterError` for filter identifiers the backend cannot map; the
    ///   channel stays `NotConfigured`
    pub fn configure(&self, channel: ChannelId, config: ChannelConfig) -> Result<()> {
        self.inner.with(|registry| -> Result<()> {
            let Registry { backend, channels } = registry;
            let state = channels
                .get_mut(channel.index())
                .ok_or(ConfigError::InvalidChannel)?;

            if state.is_configured() {
                return Ok(());
            }

            if let Err(e) = backend.init(channel, &config) {
                #[cfg(feature = "defmt")]
                defmt::error!("{}: backend init failed: {}", channel, e);
                return Err(e.into());
            }

            state.activate();
            backend.enable_interrupts(channel, InterruptSources::ENGINE);

            #[cfg(feature = "defmt")]
            defmt::info!("{}: configured ({}, {})", channel, config.mode, config.baud_rate);

            Ok(())
        })
    }

    /// Tear `channel` down.
    ///
    /// Disables the channel's interrupt sources, deinitializes the hardware,
    /// drops any queued frames, clears the in-flight flag and both callback
    /// slots. A frame already handed to the backend is abandoned; a late
    /// completion for it is ignored. No-op if the channel is not configured.
    pub fn unconfigure(&self, channel: ChannelId) {
        let released = self.inner.with(|registry| {
            let Some((backend, state)) = registry.configured(channel) else {
                return false;
            };

            backend.disable_interrupts(channel, InterruptSources::ENGINE);
            backend.deinit(channel);
            state.release();

            #[cfg(feature = "defmt")]
            defmt::info!("{}: unconfigured", channel);

            true
        });

        #[cfg(feature = "async")]
        if released {
            self.wake_all(channel);
        }
        #[cfg(not(feature = "async"))]
        let _ = released;
    }

    /// Current lifecycle of `channel` (`NotConfigured` if outside the registry)
    pub fn lifecycle(&self, channel: ChannelId) -> Lifecycle {
        self.query(channel, Lifecycle::NotConfigured, |state| state.lifecycle)
    }

    /// Whether `channel` is configured
    pub fn is_configured(&self, channel: ChannelId) -> bool {
        self.lifecycle(channel) == Lifecycle::Configured
    }

    // =========================================================================
    // Callback Registration
    // =========================================================================

    /// Set or clear the transmit-done handler of `channel`.
    ///
    /// The handler runs in interrupt context once the transmit queue has
    /// drained and the last in-flight frame completed. It replaces any
    /// previous handler. Ignored if the channel is not configured.
    pub fn set_transmit_done_callback(&self, channel: ChannelId, handler: Option<Callback>) {
        self.inner.with(|registry| {
            if let Some((_, state)) = registry.configured(channel) {
                state.on_transmit_done = handler;
            }
        });
    }

    /// Set or clear the frame-received handler of `channel`.
    ///
    /// The handler runs in interrupt context after every receive-ready event,
    /// including events whose frame was dropped because the receive queue was
    /// full. It replaces any previous handler. Ignored if the channel is not
    /// configured.
    pub fn set_received_callback(&self, channel: ChannelId, handler: Option<Callback>) {
        self.inner.with(|registry| {
            if let Some((_, state)) = registry.configured(channel) {
                state.on_received = handler;
            }
        });
    }

    // =========================================================================
    // Status Queries
    // =========================================================================

    /// Frames waiting in the transmit queue (excludes the in-flight frame)
    pub fn used_tx(&self, channel: ChannelId) -> usize {
        self.query(channel, 0, |state| state.tx_queue.len())
    }

    /// Frames waiting in the receive queue
    pub fn used_rx(&self, channel: ChannelId) -> usize {
        self.query(channel, 0, |state| state.rx_queue.len())
    }

    /// Free slots in the transmit queue
    pub fn unused_tx(&self, channel: ChannelId) -> usize {
        self.query(channel, 0, |state| state.tx_queue.available())
    }

    /// Free slots in the receive queue
    pub fn unused_rx(&self, channel: ChannelId) -> usize {
        self.query(channel, 0, |state| state.rx_queue.available())
    }

    /// Whether the transmit queue is empty (`false` if not configured)
    pub fn is_tx_empty(&self, channel: ChannelId) -> bool {
        self.query(channel, false, |state| state.tx_queue.is_empty())
    }

    /// Whether the transmit queue is full (`false` if not configured)
    pub fn is_tx_full(&self, channel: ChannelId) -> bool {
        self.query(channel, false, |state| state.tx_queue.is_full())
    }

    /// Whether the receive queue is empty (`false` if not configured)
    pub fn is_rx_empty(&self, channel: ChannelId) -> bool {
        self.query(channel, false, |state| state.rx_queue.is_empty())
    }

    /// Whether the receive queue is full (`false` if not configured)
    pub fn is_rx_full(&self, channel: ChannelId) -> bool {
        self.query(channel, false, |state| state.rx_queue.is_full())
    }

    /// Whether a frame is in flight on `channel`
    pub fn is_transmitting(&self, channel: ChannelId) -> bool {
        self.query(channel, false, |state| state.transmitting)
    }

    /// Frames dropped on receive overflow since the channel was configured
    pub fn rx_dropped(&self, channel: ChannelId) -> u32 {
        self.query(channel, 0, |state| state.rx_dropped)
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Discard all queued transmit frames.
    ///
    /// The in-flight frame, if any, still completes and `is_transmitting`
    /// stays `true` until its completion is observed.
    pub fn clear_tx(&self, channel: ChannelId) {
        self.inner.with(|registry| {
            if let Some((_, state)) = registry.configured(channel) {
                state.tx_queue.reset();
            }
        });
    }

    /// Discard all buffered received frames
    pub fn clear_rx(&self, channel: ChannelId) {
        self.inner.with(|registry| {
            if let Some((_, state)) = registry.configured(channel) {
                state.rx_queue.reset();
            }
        });
    }

    // =========================================================================
    // Interrupt Dispatch
    // =========================================================================

    /// Dispatch a pending-interrupt snapshot of `channel` to the hooks.
    ///
    /// Runs the transmit-complete hook first, then the frame-received hook.
    /// The backend is responsible for clearing the pending bits.
    ///
    /// # Example
    /// ```ignore
    /// #[interrupt]
    /// fn CAN1_SCE() {
    ///     let pending = InterruptSources::from_raw(bxcan::pending(CAN1));
    ///     CAN.handle_interrupt(ChannelId::CAN1, pending);
    /// }
    /// ```
    pub fn handle_interrupt(&self, channel: ChannelId, pending: InterruptSources) {
        if pending.tx_mailbox_empty {
            self.on_transmit_complete(channel);
        }
        if pending.rx_fifo_pending {
            self.on_frame_received(channel);
        }
    }

    /// Run `f` with exclusive access to the backend.
    ///
    /// Interrupts are disabled for the duration of the closure.
    pub fn with_backend<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut B) -> R,
    {
        self.inner.with(|registry| f(&mut registry.backend))
    }

    /// Read a configured channel's state, or return `default`.
    #[inline]
    fn query<R, F>(&self, channel: ChannelId, default: R, f: F) -> R
    where
        F: FnOnce(&ChannelState<TX, RX>) -> R,
    {
        self.inner
            .with(|registry| registry.state(channel).map(f))
            .unwrap_or(default)
    }
}

/// Two channels with 16-frame queues, matching the dual-controller layout.
pub type CanEngineDefault<B> =
    CanEngine<B, DEFAULT_CHANNELS, DEFAULT_TX_QUEUE_LEN, DEFAULT_RX_QUEUE_LEN>;

/// Single channel with 4-frame queues for memory-constrained systems.
pub type CanEngineSmall<B> = CanEngine<B, 1, 4, 4>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::driver::config::WorkMode;
    use crate::driver::error::{BackendError, Error};
    use crate::frame::CanFrame;
    use crate::testing::{MockBackend, frame};

    type TestEngine = CanEngine<MockBackend, 2, 4, 2>;

    fn configured() -> TestEngine {
        let engine = TestEngine::new(MockBackend::new());
        engine.configure(ChannelId::CAN1, ChannelConfig::new()).unwrap();
        engine
    }

    #[test]
    fn new_engine_reports_not_configured() {
        let engine = TestEngine::new(MockBackend::new());

        assert_eq!(engine.channel_count(), 2);
        assert_eq!(engine.lifecycle(ChannelId::CAN1), Lifecycle::NotConfigured);
        assert!(!engine.is_configured(ChannelId::CAN2));
    }

    #[test]
    fn configure_initializes_backend_and_enables_two_sources() {
        let engine = TestEngine::new(MockBackend::new());
        let config = ChannelConfig::new().with_filter_ids(0x1AA, 0x55AA);

        engine.configure(ChannelId::CAN2, config).unwrap();

        assert!(engine.is_configured(ChannelId::CAN2));
        assert!(!engine.is_configured(ChannelId::CAN1));
        engine.with_backend(|backend| {
            assert_eq!(backend.inits, [(ChannelId::CAN2, config)]);
            assert_eq!(backend.enabled(ChannelId::CAN2), InterruptSources::ENGINE);
            assert_eq!(backend.enabled(ChannelId::CAN1), InterruptSources::NONE);
        });
        assert_eq!(engine.unused_tx(ChannelId::CAN2), 4);
        assert_eq!(engine.unused_rx(ChannelId::CAN2), 2);
        assert!(!engine.is_transmitting(ChannelId::CAN2));
    }

    #[test]
    fn configure_rejects_channel_outside_registry() {
        let engine = TestEngine::new(MockBackend::new());
        let result = engine.configure(ChannelId::new(2), ChannelConfig::new());

        assert_eq!(result, Err(Error::Config(ConfigError::InvalidChannel)));
        engine.with_backend(|backend| assert!(backend.inits.is_empty()));
    }

    #[test]
    fn configure_passes_wide_filter_ids_to_backend() {
        let engine = TestEngine::new(MockBackend::new());
        let config = ChannelConfig::new()
            .with_mode(WorkMode::LoopBack)
            .with_filter_ids(0xAA55, 0x55AA);

        assert_eq!(engine.configure(ChannelId::CAN1, config), Ok(()));

        assert!(engine.is_configured(ChannelId::CAN1));
        engine.with_backend(|backend| {
            assert_eq!(backend.inits, [(ChannelId::CAN1, config)]);
            assert_eq!(backend.inits[0].1.filter.standard_id, 0xAA55);
            assert_eq!(backend.inits[0].1.filter.extended_id, 0x55AA);
        });
    }

    #[test]
    fn configure_surfaces_backend_filter_error() {
        let mut backend = MockBackend::new();
        backend.fail_init = Some(BackendError::FilterError);
        let engine = TestEngine::new(backend);
        let config = ChannelConfig::new()
            .with_mode(WorkMode::LoopBack)
            .with_filter_ids(0xAA55, 0x55AA);

        let result = engine.configure(ChannelId::CAN1, config);

        assert_eq!(result, Err(Error::Backend(BackendError::FilterError)));
        assert_eq!(engine.lifecycle(ChannelId::CAN1), Lifecycle::NotConfigured);
        engine.with_backend(|backend| {
            assert!(backend.inits.is_empty());
            assert_eq!(backend.enabled(ChannelId::CAN1), InterruptSources::NONE);
        });
    }

    #[test]
    fn configure_propagates_backend_failure() {
        let mut backend = MockBackend::new();
        backend.fail_init = Some(BackendError::Timeout);
        let engine = TestEngine::new(backend);

        let result = engine.configure(ChannelId::CAN1, ChannelConfig::new());

        assert_eq!(result, Err(Error::Backend(BackendError::Timeout)));
        assert!(!engine.is_configured(ChannelId::CAN1));
        assert_eq!(engine.enqueue_transmit(ChannelId::CAN1, &[frame(1)]), 0);
        engine.with_backend(|backend| {
            assert_eq!(backend.enabled(ChannelId::CAN1), InterruptSources::NONE);
            assert!(backend.sent.is_empty());
        });
    }

    #[test]
    fn configure_twice_preserves_queues_flags_and_callbacks() {
        static DONE: AtomicUsize = AtomicUsize::new(0);
        static RECEIVED: AtomicUsize = AtomicUsize::new(0);
        fn on_done() {
            DONE.fetch_add(1, Ordering::SeqCst);
        }
        fn on_received() {
            RECEIVED.fetch_add(1, Ordering::SeqCst);
        }

        let engine = configured();
        engine.set_transmit_done_callback(ChannelId::CAN1, Some(on_done));
        engine.set_received_callback(ChannelId::CAN1, Some(on_received));
        engine.enqueue_transmit(ChannelId::CAN1, &[frame(1), frame(2)]);
        engine.with_backend(|backend| backend.push_incoming(ChannelId::CAN1, frame(9)));
        engine.on_frame_received(ChannelId::CAN1);
        assert_eq!(RECEIVED.load(Ordering::SeqCst), 1);

        let second = ChannelConfig::new().with_baud_rate(crate::BaudRate::Kbps1000);
        assert_eq!(engine.configure(ChannelId::CAN1, second), Ok(()));

        assert_eq!(engine.used_tx(ChannelId::CAN1), 1);
        assert_eq!(engine.unused_tx(ChannelId::CAN1), 3);
        assert_eq!(engine.used_rx(ChannelId::CAN1), 1);
        assert!(engine.is_transmitting(ChannelId::CAN1));
        engine.with_backend(|backend| assert_eq!(backend.inits.len(), 1));

        let mut out = [CanFrame::EMPTY; 2];
        assert_eq!(engine.dequeue_receive(ChannelId::CAN1, &mut out), 1);
        assert_eq!(out[0], frame(9));

        engine.with_backend(|backend| backend.push_incoming(ChannelId::CAN1, frame(10)));
        engine.on_frame_received(ChannelId::CAN1);
        assert_eq!(RECEIVED.load(Ordering::SeqCst), 2);

        engine.on_transmit_complete(ChannelId::CAN1);
        engine.on_transmit_complete(ChannelId::CAN1);
        assert_eq!(DONE.load(Ordering::SeqCst), 1);
        engine.with_backend(|backend| {
            assert_eq!(backend.sent_on(ChannelId::CAN1), [frame(1), frame(2)]);
        });
    }

    #[test]
    fn unconfigure_tears_down_and_queries_report_defaults() {
        let engine = configured();
        engine.enqueue_transmit(ChannelId::CAN1, &[frame(1), frame(2), frame(3)]);
        engine.with_backend(|backend| backend.push_incoming(ChannelId::CAN1, frame(7)));
        engine.on_frame_received(ChannelId::CAN1);

        engine.unconfigure(ChannelId::CAN1);

        let ch = ChannelId::CAN1;
        assert!(!engine.is_configured(ch));
        assert!(!engine.is_transmitting(ch));
        assert_eq!(engine.used_tx(ch), 0);
        assert_eq!(engine.used_rx(ch), 0);
        assert_eq!(engine.unused_tx(ch), 0);
        assert_eq!(engine.unused_rx(ch), 0);
        assert!(!engine.is_tx_empty(ch));
        assert!(!engine.is_tx_full(ch));
        assert!(!engine.is_rx_empty(ch));
        assert!(!engine.is_rx_full(ch));
        assert_eq!(engine.rx_dropped(ch), 0);

        let mut out = [CanFrame::EMPTY; 2];
        assert_eq!(engine.dequeue_receive(ch, &mut out), 0);

        engine.with_backend(|backend| {
            assert_eq!(backend.deinits, [ChannelId::CAN1]);
            assert_eq!(backend.enabled(ChannelId::CAN1), InterruptSources::NONE);
        });
    }

    #[test]
    fn unconfigure_is_idempotent() {
        let engine = configured();
        engine.unconfigure(ChannelId::CAN1);
        engine.unconfigure(ChannelId::CAN1);
        engine.unconfigure(ChannelId::CAN2);
        engine.unconfigure(ChannelId::new(9));

        engine.with_backend(|backend| assert_eq!(backend.deinits.len(), 1));
    }

    #[test]
    fn reconfigure_after_unconfigure_starts_fresh() {
        static DONE: AtomicUsize = AtomicUsize::new(0);
        fn on_done() {
            DONE.fetch_add(1, Ordering::SeqCst);
        }

        let engine = configured();
        engine.set_transmit_done_callback(ChannelId::CAN1, Some(on_done));
        engine.enqueue_transmit(ChannelId::CAN1, &[frame(1), frame(2)]);
        engine.unconfigure(ChannelId::CAN1);

        engine.configure(ChannelId::CAN1, ChannelConfig::new()).unwrap();

        assert!(engine.is_tx_empty(ChannelId::CAN1));
        assert!(!engine.is_transmitting(ChannelId::CAN1));
        engine.enqueue_transmit(ChannelId::CAN1, &[frame(3)]);
        engine.on_transmit_complete(ChannelId::CAN1);
        assert_eq!(DONE.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn callbacks_ignored_when_not_configured() {
        static HITS: AtomicUsize = AtomicUsize::new(0);
        fn hit() {
            HITS.fetch_add(1, Ordering::SeqCst);
        }

        let engine = TestEngine::new(MockBackend::new());
        engine.set_received_callback(ChannelId::CAN1, Some(hit));
        engine.configure(ChannelId::CAN1, ChannelConfig::new()).unwrap();

        engine.with_backend(|backend| backend.push_incoming(ChannelId::CAN1, frame(1)));
        engine.on_frame_received(ChannelId::CAN1);

        assert_eq!(HITS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn registering_replaces_previous_callback() {
        static FIRST: AtomicUsize = AtomicUsize::new(0);
        static SECOND: AtomicUsize = AtomicUsize::new(0);
        fn first() {
            FIRST.fetch_add(1, Ordering::SeqCst);
        }
        fn second() {
            SECOND.fetch_add(1, Ordering::SeqCst);
        }

        let engine = configured();
        engine.set_received_callback(ChannelId::CAN1, Some(first));
        engine.set_received_callback(ChannelId::CAN1, Some(second));
        engine.on_frame_received(ChannelId::CAN1);

        engine.set_received_callback(ChannelId::CAN1, None);
        engine.on_frame_received(ChannelId::CAN1);

        assert_eq!(FIRST.load(Ordering::SeqCst), 0);
        assert_eq!(SECOND.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn status_queries_track_queue_levels() {
        let engine = configured();
        let ch = ChannelId::CAN1;

        assert!(engine.is_tx_empty(ch));
        assert!(engine.is_rx_empty(ch));

        // Head of the queue goes straight to the backend.
        engine.enqueue_transmit(ch, &[frame(1), frame(2), frame(3), frame(4), frame(5)]);
        assert_eq!(engine.used_tx(ch), 3);
        assert_eq!(engine.unused_tx(ch), 1);
        assert!(!engine.is_tx_full(ch));
        assert!(!engine.is_tx_empty(ch));

        assert_eq!(engine.enqueue_transmit(ch, &[frame(6), frame(7)]), 1);
        assert_eq!(engine.used_tx(ch), 4);
        assert_eq!(engine.unused_tx(ch), 0);
        assert!(engine.is_tx_full(ch));

        engine.on_frame_received(ch);
        engine.on_frame_received(ch);
        assert_eq!(engine.used_rx(ch), 2);
        assert!(engine.is_rx_full(ch));
        assert!(!engine.is_rx_empty(ch));
    }

    #[test]
    fn clear_tx_keeps_in_flight_frame() {
        static DONE: AtomicUsize = AtomicUsize::new(0);
        fn on_done() {
            DONE.fetch_add(1, Ordering::SeqCst);
        }

        let engine = configured();
        let ch = ChannelId::CAN1;
        engine.set_transmit_done_callback(ch, Some(on_done));
        engine.enqueue_transmit(ch, &[frame(1), frame(2), frame(3)]);

        engine.clear_tx(ch);

        assert_eq!(engine.used_tx(ch), 0);
        assert!(engine.is_transmitting(ch));

        engine.on_transmit_complete(ch);
        assert!(!engine.is_transmitting(ch));
        assert_eq!(DONE.load(Ordering::SeqCst), 1);
        engine.with_backend(|backend| assert_eq!(backend.sent.len(), 1));
    }

    #[test]
    fn clear_rx_discards_buffered_frames() {
        let engine = configured();
        let ch = ChannelId::CAN1;
        engine.enqueue_transmit(ch, &[frame(1)]);
        engine.on_frame_received(ch);

        engine.clear_rx(ch);

        assert_eq!(engine.used_rx(ch), 0);
        assert!(engine.is_rx_empty(ch));
        assert!(engine.is_transmitting(ch));
    }

    #[test]
    fn clear_on_unconfigured_channel_is_noop() {
        let engine = TestEngine::new(MockBackend::new());
        engine.clear_tx(ChannelId::CAN1);
        engine.clear_rx(ChannelId::CAN1);
        assert!(!engine.is_configured(ChannelId::CAN1));
    }

    #[test]
    fn handle_interrupt_dispatches_both_hooks() {
        let engine = configured();
        let ch = ChannelId::CAN1;
        engine.enqueue_transmit(ch, &[frame(1), frame(2)]);
        engine.with_backend(|backend| backend.push_incoming(ch, frame(0x40)));

        engine.handle_interrupt(ch, InterruptSources::ENGINE);

        assert_eq!(engine.used_tx(ch), 0);
        assert_eq!(engine.used_rx(ch), 1);
        engine.with_backend(|backend| assert_eq!(backend.sent.len(), 2));

        engine.handle_interrupt(ch, InterruptSources::NONE);
        assert!(engine.is_transmitting(ch));
    }

    #[test]
    fn channels_are_independent() {
        let engine = configured();
        engine.configure(ChannelId::CAN2, ChannelConfig::new()).unwrap();

        engine.enqueue_transmit(ChannelId::CAN1, &[frame(1), frame(2)]);

        assert!(engine.is_transmitting(ChannelId::CAN1));
        assert!(!engine.is_transmitting(ChannelId::CAN2));
        assert_eq!(engine.used_tx(ChannelId::CAN1), 1);
        assert_eq!(engine.used_tx(ChannelId::CAN2), 0);

        engine.unconfigure(ChannelId::CAN2);
        assert!(engine.is_configured(ChannelId::CAN1));
        assert_eq!(engine.used_tx(ChannelId::CAN1), 1);
    }

    #[test]
    fn type_aliases_have_expected_shape() {
        let default: CanEngineDefault<MockBackend> = CanEngine::new(MockBackend::new());
        assert_eq!(default.channel_count(), 2);

        let small: CanEngineSmall<MockBackend> = CanEngine::new(MockBackend::new());
        small.configure(ChannelId::CAN1, ChannelConfig::new()).unwrap();
        assert_eq!(small.unused_tx(ChannelId::CAN1), 4);
        assert!(small.configure(ChannelId::CAN2, ChannelConfig::new()).is_err());
    }
}
