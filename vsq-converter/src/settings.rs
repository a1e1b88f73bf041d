//! Conversion settings
//!
//! This module defines the configuration surface accepted by the pipeline.
//! Settings are supplied by the caller once per conversion and are never
//! read from process-wide state - concurrent conversions share nothing.

use serde::{Deserialize, Serialize};

/// Default timeout applied when a row carries no usable timeout (ms)
pub const DEFAULT_TIMEOUT_MS: u32 = 3000;

/// Default cycle interval for cyclic transmission (ms)
pub const DEFAULT_CYCLE_MS: u32 = 50;

/// How each frame record is turned into action lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum EncodingMode {
    /// One "send frame" action per record
    Simple,
    /// A start/send/stop cyclic-transmission group per record
    Cyclic {
        /// Cycle interval in milliseconds
        interval_ms: u32,
    },
}

impl Default for EncodingMode {
    fn default() -> Self {
        EncodingMode::Simple
    }
}

/// Configuration for one conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSettings {
    /// Timeout applied when the table has no timeout column or the cell
    /// is unusable (ms)
    #[serde(default = "default_timeout")]
    pub default_timeout_ms: u32,

    /// CAN channel label written into every action line (e.g. "CAN1")
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Sequence name written into the document header
    #[serde(default = "default_sequence_name")]
    pub sequence_name: String,

    /// Encoding mode (simple send vs. bounded cyclic transmission)
    #[serde(default)]
    pub mode: EncodingMode,

    /// Treat every identifier as extended, regardless of its value
    #[serde(default)]
    pub force_extended: bool,
}

fn default_timeout() -> u32 {
    DEFAULT_TIMEOUT_MS
}

fn default_channel() -> String {
    "CAN1".to_string()
}

fn default_sequence_name() -> String {
    "GeneratedSequence".to_string()
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_timeout(),
            channel: default_channel(),
            sequence_name: default_sequence_name(),
            mode: EncodingMode::default(),
            force_extended: false,
        }
    }
}

impl ConversionSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the default timeout in milliseconds
    pub fn with_default_timeout(mut self, timeout_ms: u32) -> Self {
        self.default_timeout_ms = timeout_ms;
        self
    }

    /// Builder method: set the CAN channel label
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    /// Builder method: set the sequence name used in the document header
    pub fn with_sequence_name(mut self, name: impl Into<String>) -> Self {
        self.sequence_name = name.into();
        self
    }

    /// Builder method: select the encoding mode
    pub fn with_mode(mut self, mode: EncodingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method: select cyclic transmission with the given interval
    pub fn with_cyclic(mut self, interval_ms: u32) -> Self {
        self.mode = EncodingMode::Cyclic { interval_ms };
        self
    }

    /// Builder method: force every identifier to extended
    pub fn with_force_extended(mut self, enabled: bool) -> Self {
        self.force_extended = enabled;
        self
    }
}
