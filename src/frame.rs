//! Classic CAN frame value type.
//!
//! [`CanFrame`] is the record stored in both the transmit and the receive
//! queues. It is `Copy`, so moving frames through a ring buffer is a plain
//! copy-in/copy-out with no ownership concerns.

use embedded_can::{ExtendedId, Id, StandardId};

use crate::internal::constants::MAX_DLC;

/// Frame kind: data frame or remote transmission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    /// Data frame carrying up to 8 payload bytes
    #[default]
    Data,
    /// Remote transmission request (no payload)
    Remote,
}

/// A classic CAN frame (standard or extended identifier, up to 8 bytes).
///
/// Implements [`embedded_can::Frame`], so it can be handed to any HAL that
/// accepts generic frames.
///
/// # Example
///
/// ```
/// use can_isr_queue::CanFrame;
/// use embedded_can::StandardId;
///
/// let id = StandardId::new(0x123).unwrap();
/// let frame = CanFrame::data_frame(id, &[1, 2, 3]).unwrap();
/// assert_eq!(frame.dlc(), 3);
/// assert_eq!(frame.data(), &[1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanFrame {
    id: Id,
    kind: FrameKind,
    dlc: u8,
    data: [u8; MAX_DLC],
}

impl CanFrame {
    /// Zeroed standard data frame with identifier 0 and no payload.
    ///
    /// Used to fill queue storage before any frame is written.
    pub const EMPTY: Self = Self {
        id: Id::Standard(StandardId::ZERO),
        kind: FrameKind::Data,
        dlc: 0,
        data: [0; MAX_DLC],
    };

    /// Create a data frame.
    ///
    /// Returns `None` if `data` is longer than 8 bytes.
    pub fn data_frame(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > MAX_DLC {
            return None;
        }

        let mut payload = [0u8; MAX_DLC];
        payload[..data.len()].copy_from_slice(data);

        Some(Self {
            id: id.into(),
            kind: FrameKind::Data,
            dlc: data.len() as u8,
            data: payload,
        })
    }

    /// Create a remote transmission request for `dlc` bytes.
    ///
    /// Returns `None` if `dlc` exceeds 8.
    pub fn remote_frame(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > MAX_DLC {
            return None;
        }

        Some(Self {
            id: id.into(),
            kind: FrameKind::Remote,
            dlc: dlc as u8,
            data: [0; MAX_DLC],
        })
    }

    /// Frame identifier
    #[inline]
    pub const fn id(&self) -> Id {
        self.id
    }

    /// Raw identifier value (11 or 29 significant bits)
    #[inline]
    pub fn raw_id(&self) -> u32 {
        match self.id {
            Id::Standard(id) => id.as_raw() as u32,
            Id::Extended(id) => id.as_raw(),
        }
    }

    /// Whether the identifier is extended (29-bit)
    #[inline]
    pub const fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    /// Frame kind
    #[inline]
    pub const fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Data length code (0-8)
    #[inline]
    pub const fn dlc(&self) -> usize {
        self.dlc as usize
    }

    /// Payload bytes. Empty for remote frames.
    #[inline]
    pub fn data(&self) -> &[u8] {
        match self.kind {
            FrameKind::Data => &self.data[..self.dlc as usize],
            FrameKind::Remote => &[],
        }
    }
}

impl Default for CanFrame {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        Self::data_frame(id, data)
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        Self::remote_frame(id, dlc)
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.kind == FrameKind::Remote
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc as usize
    }

    fn data(&self) -> &[u8] {
        CanFrame::data(self)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CanFrame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "CanFrame {{ id: {=u32:#x}, extended: {}, kind: {}, data: {=[u8]} }}",
            self.raw_id(),
            self.is_extended(),
            self.kind,
            self.data()
        );
    }
}

/// Build a standard identifier, returning `None` above `0x7FF`.
#[inline]
pub fn standard_id(raw: u16) -> Option<Id> {
    StandardId::new(raw).map(Id::Standard)
}

/// Build an extended identifier, returning `None` above `0x1FFF_FFFF`.
#[inline]
pub fn extended_id(raw: u32) -> Option<Id> {
    ExtendedId::new(raw).map(Id::Extended)
}

// =============================================================================
// Unit Tests
// =============================================================================
