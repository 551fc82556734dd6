// Message envelope checks: length, message type and sub-type

use crate::core::constants::SUB_TYPE_MASK;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeaderError {
    #[error("Message too short: got {actual} bytes, need at least {min}")]
    TooShort { actual: usize, min: usize },

    #[error("Unknown message type 0x{0:02X}")]
    UnknownMessageType(u8),

    #[error("Invalid message type 0x{actual:02X}, expected 0x{expected:02X}")]
    InvalidMessageType { actual: u8, expected: u8 },

    #[error(
        "Unsupported sub-type 0x{actual:02X} for message type 0x{message_type:02X} (allowed: {})",
        format_sub_types(.allowed)
    )]
    UnsupportedSubType {
        message_type: u8,
        actual: u8,
        allowed: Vec<u8>,
    },
}

pub type Result<T> = std::result::Result<T, HeaderError>;

fn format_sub_types(sub_types: &[u8]) -> String {
    sub_types
        .iter()
        .map(|s| format!("0x{:02X}", s))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate the envelope of @data and return (message type, sub-type)
///
/// Only the lower 6 bits of byte 1 are the sub-type.
pub fn validate_header(
    data: &[u8],
    expected_type: u8,
    allowed_sub_types: &[u8],
    min_length: usize,
) -> Result<(u8, u8)> {
    let min = min_length.max(2);
    if data.len() < min {
        return Err(HeaderError::TooShort {
            actual: data.len(),
            min,
        });
    }

    let message_type = data[0];
    if message_type != expected_type {
        return Err(HeaderError::InvalidMessageType {
            actual: message_type,
            expected: expected_type,
        });
    }

    let sub_type = data[1] & SUB_TYPE_MASK;
    if !allowed_sub_types.contains(&sub_type) {
        return Err(HeaderError::UnsupportedSubType {
            message_type,
            actual: sub_type,
            allowed: allowed_sub_types.to_vec(),
        });
    }

    Ok((message_type, sub_type))
}
