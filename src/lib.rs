// TULIP3-CODEC: register codec for TULIP3 identification and configuration uplinks
// Copyright 2026 - Licensed under GPLv3

pub mod bitwise;
pub mod core;
pub mod error;
pub mod messages;
pub mod registers;

// Re-export commonly used types
pub use crate::core::{
    constants::*,
    profile::{ChannelProfile, DeviceProfile, MeasurementRange, SensorProfile},
    validation,
};
pub use error::{Result, Tulip3Error};
pub use messages::{
    decode_configuration_read, decode_configuration_read_with, decode_configuration_write,
    decode_identification_read, decode_identification_read_with, decode_identification_write,
    decode_uplink, DecodedUplink, Frame, FrameData, Tulip3Message,
};
pub use registers::{DecodeOptions, RegisterBlock, RegisterDecoder, RegisterLookup};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
