// Message decoders: envelope check, register decoding and profile validation per family
pub mod configuration;
pub mod frame;
pub mod header;
pub mod identification;

pub use configuration::{
    decode_configuration_read, decode_configuration_read_with, decode_configuration_write,
};
pub use frame::{decode_frames, Frame, FrameData, FrameError};
pub use header::{validate_header, HeaderError};
pub use identification::{
    decode_identification_read, decode_identification_read_with, decode_identification_write,
};

use crate::core::constants::{
    ResourceFamily, MESSAGE_TYPE_CONFIGURATION, MESSAGE_TYPE_IDENTIFICATION, SUB_TYPE_MASK,
    SUB_TYPE_WRITE_RESPONSE,
};
use crate::core::profile::DeviceProfile;
use crate::error::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Smallest read message: header plus one addressing field
pub const MIN_READ_LENGTH: usize = 4;

/// Smallest write response: header plus one frame
pub const MIN_WRITE_LENGTH: usize = 4;

/// A decoded message with its type metadata
///
/// Serializes as `{messageType, messageSubType, identification | configuration}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tulip3Message<T> {
    pub family: ResourceFamily,
    pub message_type: u8,
    pub message_sub_type: u8,
    pub body: T,
}

impl<T> Tulip3Message<T> {
    pub fn new(family: ResourceFamily, message_type: u8, message_sub_type: u8, body: T) -> Self {
        Self {
            family,
            message_type,
            message_sub_type,
            body,
        }
    }
}

impl<T: Serialize> Serialize for Tulip3Message<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("messageType", &self.message_type)?;
        map.serialize_entry("messageSubType", &self.message_sub_type)?;
        map.serialize_entry(self.family.sensor_key(), &self.body)?;
        map.end()
    }
}

/// Any message this crate understands
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedUplink {
    IdentificationRead(Tulip3Message<Value>),
    IdentificationWrite(Tulip3Message<FrameData>),
    ConfigurationRead(Tulip3Message<Value>),
    ConfigurationWrite(Tulip3Message<FrameData>),
}

impl Serialize for DecodedUplink {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            DecodedUplink::IdentificationRead(m) | DecodedUplink::ConfigurationRead(m) => {
                m.serialize(serializer)
            }
            DecodedUplink::IdentificationWrite(m) | DecodedUplink::ConfigurationWrite(m) => {
                m.serialize(serializer)
            }
        }
    }
}

/// Decode an identification or configuration uplink, dispatching on type and sub-type
pub fn decode_uplink(data: &[u8], profile: &DeviceProfile) -> Result<DecodedUplink> {
    if data.len() < 2 {
        return Err(HeaderError::TooShort {
            actual: data.len(),
            min: 2,
        }
        .into());
    }

    let is_write = data[1] & SUB_TYPE_MASK == SUB_TYPE_WRITE_RESPONSE;
    let decoded = match (data[0], is_write) {
        (MESSAGE_TYPE_IDENTIFICATION, false) => {
            DecodedUplink::IdentificationRead(decode_identification_read(data, profile)?)
        }
        (MESSAGE_TYPE_IDENTIFICATION, true) => {
            DecodedUplink::IdentificationWrite(decode_identification_write(data)?)
        }
        (MESSAGE_TYPE_CONFIGURATION, false) => {
            DecodedUplink::ConfigurationRead(decode_configuration_read(data, profile)?)
        }
        (MESSAGE_TYPE_CONFIGURATION, true) => {
            DecodedUplink::ConfigurationWrite(decode_configuration_write(data)?)
        }
        (other, _) => return Err(HeaderError::UnknownMessageType(other).into()),
    };
    Ok(decoded)
}
