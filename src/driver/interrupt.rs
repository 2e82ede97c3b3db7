//! Interrupt source handling for CAN channels.
//!
//! This module provides the [`InterruptSources`] structure used in both
//! directions between the engine and the backend: the engine asks the backend
//! to enable or disable a set of sources, and the backend reports a pending
//! set to [`CanEngine::handle_interrupt`](crate::CanEngine::handle_interrupt).

use crate::internal::constants::{IER_FMPIE0, IER_TMEIE};

// =============================================================================
// Interrupt Sources
// =============================================================================

/// Interrupt sources relevant to the queue engine.
///
/// Raw values follow the bxCAN interrupt-enable register layout, so a backend
/// for that controller can pass them through unchanged.
///
/// # Example
///
/// ```ignore
/// let pending = InterruptSources::from_raw(regs.ier() & regs.pending());
/// if pending.tx_mailbox_empty {
///     // transmit complete
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptSources {
    /// Transmit mailbox empty - the in-flight frame left the controller
    pub tx_mailbox_empty: bool,
    /// Receive FIFO 0 pending - at least one frame is waiting
    pub rx_fifo_pending: bool,
}

impl InterruptSources {
    /// The two sources enabled by `configure`
    pub const ENGINE: Self = Self {
        tx_mailbox_empty: true,
        rx_fifo_pending: true,
    };

    /// No sources
    pub const NONE: Self = Self {
        tx_mailbox_empty: false,
        rx_fifo_pending: false,
    };

    /// Create from a raw interrupt-enable/status value
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            tx_mailbox_empty: (raw & IER_TMEIE) != 0,
            rx_fifo_pending: (raw & IER_FMPIE0) != 0,
        }
    }

    /// Convert to a raw interrupt-enable value
    #[inline]
    pub const fn to_raw(&self) -> u32 {
        let mut val = 0u32;
        if self.tx_mailbox_empty {
            val |= IER_TMEIE;
        }
        if self.rx_fifo_pending {
            val |= IER_FMPIE0;
        }
        val
    }

    /// Check if any source is set
    #[inline]
    pub const fn any(&self) -> bool {
        self.tx_mailbox_empty || self.rx_fifo_pending
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
