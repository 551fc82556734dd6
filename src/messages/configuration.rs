// Configuration messages (type 0x15): register reads and write acknowledgements

use super::frame::{decode_frames, FrameData};
use super::header::validate_header;
use super::{Tulip3Message, MIN_READ_LENGTH, MIN_WRITE_LENGTH};
use crate::core::constants::{ResourceFamily, SUB_TYPE_WRITE_RESPONSE};
use crate::core::profile::DeviceProfile;
use crate::core::validation::validate_and_transform_configuration;
use crate::error::Result;
use crate::registers::{configuration_lookup, decode_register_read, DecodeOptions};
use serde_json::Value;

const FAMILY: ResourceFamily = ResourceFamily::Configuration;

/// Decode a configuration read (sub-types 0x01, 0x02) with default options
pub fn decode_configuration_read(
    data: &[u8],
    profile: &DeviceProfile,
) -> Result<Tulip3Message<Value>> {
    decode_configuration_read_with(data, profile, &DecodeOptions::default())
}

/// Decode a configuration read with explicit block parser options
pub fn decode_configuration_read_with(
    data: &[u8],
    profile: &DeviceProfile,
    options: &DecodeOptions,
) -> Result<Tulip3Message<Value>> {
    let (message_type, sub_type) = validate_header(
        data,
        FAMILY.message_type(),
        FAMILY.read_sub_types(),
        MIN_READ_LENGTH,
    )?;

    let lookup = configuration_lookup();
    let mut result = decode_register_read(data, &lookup, options)?;
    validate_and_transform_configuration(&mut result, profile)?;

    Ok(Tulip3Message::new(FAMILY, message_type, sub_type, result))
}

/// Decode a configuration write acknowledgement (sub-type 0x03)
pub fn decode_configuration_write(data: &[u8]) -> Result<Tulip3Message<FrameData>> {
    let (message_type, sub_type) = validate_header(
        data,
        FAMILY.message_type(),
        &[SUB_TYPE_WRITE_RESPONSE],
        MIN_WRITE_LENGTH,
    )?;
    let frames = decode_frames(FAMILY, data)?;
    Ok(Tulip3Message::new(FAMILY, message_type, sub_type, frames))
}
