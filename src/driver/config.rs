//! Configuration types for CAN channels

/// Controller operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WorkMode {
    /// Normal bus operation
    #[default]
    Normal,
    /// Internal loopback: transmitted frames are received by the same channel
    LoopBack,
}

/// Nominal bus bit rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudRate {
    /// 1 Mbit/s
    Kbps1000,
    /// 500 kbit/s
    Kbps500,
    /// 250 kbit/s
    #[default]
    Kbps250,
    /// 125 kbit/s
    Kbps125,
    /// 100 kbit/s
    Kbps100,
    /// 50 kbit/s
    Kbps50,
    /// 20 kbit/s
    Kbps20,
    /// 10 kbit/s
    Kbps10,
}

impl BaudRate {
    /// Bit rate in bits per second
    #[must_use]
    pub const fn bits_per_second(self) -> u32 {
        match self {
            BaudRate::Kbps1000 => 1_000_000,
            BaudRate::Kbps500 => 500_000,
            BaudRate::Kbps250 => 250_000,
            BaudRate::Kbps125 => 125_000,
            BaudRate::Kbps100 => 100_000,
            BaudRate::Kbps50 => 50_000,
            BaudRate::Kbps20 => 20_000,
            BaudRate::Kbps10 => 10_000,
        }
    }

    /// Look up a supported bit rate
    #[must_use]
    pub const fn from_bits_per_second(bps: u32) -> Option<Self> {
        match bps {
            1_000_000 => Some(BaudRate::Kbps1000),
            500_000 => Some(BaudRate::Kbps500),
            250_000 => Some(BaudRate::Kbps250),
            125_000 => Some(BaudRate::Kbps125),
            100_000 => Some(BaudRate::Kbps100),
            50_000 => Some(BaudRate::Kbps50),
            20_000 => Some(BaudRate::Kbps20),
            10_000 => Some(BaudRate::Kbps10),
            _ => None,
        }
    }
}

/// Acceptance filter identifiers
///
/// The engine passes both identifiers to the backend untouched. Mapping them
/// onto filter-bank registers is up to the backend, which reports
/// [`BackendError::FilterError`](crate::BackendError::FilterError) from `init`
/// if it cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcceptanceFilter {
    /// Standard identifier to match
    pub standard_id: u32,
    /// Extended identifier to match
    pub extended_id: u32,
}

impl AcceptanceFilter {
    /// Create a filter from a standard and an extended identifier
    #[must_use]
    pub const fn new(standard_id: u32, extended_id: u32) -> Self {
        Self {
            standard_id,
            extended_id,
        }
    }
}

/// Complete channel configuration passed to `configure`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// Operating mode
    pub mode: WorkMode,
    /// Bus bit rate
    pub baud_rate: BaudRate,
    /// Acceptance filter
    pub filter: AcceptanceFilter,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelConfig {
    /// Create a new configuration with defaults (normal mode, 250 kbit/s, filter 0/0)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: WorkMode::Normal,
            baud_rate: BaudRate::Kbps250,
            filter: AcceptanceFilter::new(0, 0),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the operating mode
    #[must_use]
    pub const fn with_mode(mut self, mode: WorkMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the bus bit rate
    #[must_use]
    pub const fn with_baud_rate(mut self, baud_rate: BaudRate) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the acceptance filter
    #[must_use]
    pub const fn with_filter(mut self, filter: AcceptanceFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the acceptance filter from raw identifiers
    #[must_use]
    pub const fn with_filter_ids(mut self, standard_id: u32, extended_id: u32) -> Self {
        self.filter = AcceptanceFilter::new(standard_id, extended_id);
        self
    }
}

/// Channel lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Queues released, hooks ignored
    #[default]
    NotConfigured,
    /// Queues live, interrupt sources enabled
    Configured,
}

// =============================================================================
// Unit Tests
// =============================================================================
