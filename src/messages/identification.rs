// Identification messages (type 0x14): register reads and write acknowledgements

use super::frame::{decode_frames, FrameData};
use super::header::validate_header;
use super::{Tulip3Message, MIN_READ_LENGTH, MIN_WRITE_LENGTH};
use crate::core::constants::{ResourceFamily, SUB_TYPE_WRITE_RESPONSE};
use crate::core::profile::DeviceProfile;
use crate::core::validation::validate_and_transform_identification;
use crate::error::Result;
use crate::registers::{decode_register_read, identification_lookup, DecodeOptions};
use serde_json::Value;

const FAMILY: ResourceFamily = ResourceFamily::Identification;

/// Decode an identification read (sub-types 0x01, 0x02, 0x04) with default options
pub fn decode_identification_read(
    data: &[u8],
    profile: &DeviceProfile,
) -> Result<Tulip3Message<Value>> {
    decode_identification_read_with(data, profile, &DecodeOptions::default())
}

/// Decode an identification read with explicit block parser options
pub fn decode_identification_read_with(
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

    let lookup = identification_lookup();
    let mut result = decode_register_read(data, &lookup, options)?;
    validate_and_transform_identification(&mut result, profile)?;

    Ok(Tulip3Message::new(FAMILY, message_type, sub_type, result))
}

/// Decode an identification write acknowledgement (sub-type 0x03)
pub fn decode_identification_write(data: &[u8]) -> Result<Tulip3Message<FrameData>> {
    let (message_type, sub_type) = validate_header(
        data,
        FAMILY.message_type(),
        &[SUB_TYPE_WRITE_RESPONSE],
        MIN_WRITE_LENGTH,
    )?;
    let frames = decode_frames(FAMILY, data)?;
    Ok(Tulip3Message::new(FAMILY, message_type, sub_type, frames))
}
