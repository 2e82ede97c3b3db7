//! Centralized Constants
//!
//! This module provides a single source of truth for the magic numbers used
//! throughout the engine.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Frame limits**: Classic CAN payload and identifier ranges
//! - **Default configurations**: Queue capacities and channel count
//! - **Interrupt bits**: Interrupt-enable bit positions of a bxCAN-style controller

// =============================================================================
// Frame Limits
// =============================================================================

/// Maximum data length code (and payload size) of a classic CAN frame
pub const MAX_DLC: usize = 8;

/// Largest valid standard (11-bit) identifier
pub const STANDARD_ID_MAX: u16 = 0x7FF;

/// Largest valid extended (29-bit) identifier
pub const EXTENDED_ID_MAX: u32 = 0x1FFF_FFFF;

// =============================================================================
// Default Configurations
// =============================================================================

/// Default transmit queue capacity per channel, in frames
pub const DEFAULT_TX_QUEUE_LEN: usize = 16;

/// Default receive queue capacity per channel, in frames
pub const DEFAULT_RX_QUEUE_LEN: usize = 16;

/// Default number of channels (CAN1 and CAN2 on connectivity-line parts)
pub const DEFAULT_CHANNELS: usize = 2;

// =============================================================================
// Interrupt Enable Bits
// =============================================================================

/// Transmit mailbox empty interrupt enable
pub const IER_TMEIE: u32 = 1 << 0;

/// FIFO 0 message pending interrupt enable
pub const IER_FMPIE0: u32 = 1 << 1;
