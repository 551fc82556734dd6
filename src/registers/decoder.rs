// Register value decoders, one variant per on-wire representation

use crate::bitwise::{
    decode_float32, decode_float32_thresholded, parse_char_array, parse_date, parse_semver,
    read_i16_be, read_i32_be, read_i8, read_u16_be, read_u32_be, read_u8, ElementError,
};
use crate::core::constants::{
    channel_key, lookup_name, sensor_key, CHANNEL_COUNT, CHANNEL_PLANS, MEASURANDS,
    PRODUCT_SUB_IDS, PROTOCOL_DATA_TYPES, SENSOR_COUNT, UNITS,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error(transparent)]
    Element(#[from] ElementError),

    #[error("Unknown {table} value: {value} (0x{value:02X})")]
    UnknownEnumValue { table: &'static str, value: u8 },

    #[error("Invalid date bytes: {0:02X?}")]
    InvalidDate(Vec<u8>),
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Enumeration tables a 1-byte register can be decoded against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumTable {
    Measurand,
    Unit,
    ProductSubId,
    ProtocolDataType,
    ChannelPlan,
}

impl EnumTable {
    pub fn name(&self) -> &'static str {
        match self {
            EnumTable::Measurand => "measurand",
            EnumTable::Unit => "unit",
            EnumTable::ProductSubId => "product sub id",
            EnumTable::ProtocolDataType => "protocol data type",
            EnumTable::ChannelPlan => "channel plan",
        }
    }

    fn entries(&self) -> &'static [(u8, &'static str)] {
        match self {
            EnumTable::Measurand => MEASURANDS,
            EnumTable::Unit => UNITS,
            EnumTable::ProductSubId => PRODUCT_SUB_IDS,
            EnumTable::ProtocolDataType => PROTOCOL_DATA_TYPES,
            EnumTable::ChannelPlan => CHANNEL_PLANS,
        }
    }

    pub fn resolve(&self, value: u8) -> Result<&'static str> {
        lookup_name(self.entries(), value).ok_or(DecodeError::UnknownEnumValue {
            table: self.name(),
            value,
        })
    }
}

/// How the bytes of a register turn into a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterDecoder {
    Uint8,
    Uint16,
    Uint32,
    Int8,
    Int16,
    Int32,
    Float32,
    /// Float32 snapped to clean 2-decimal values
    Float32Thresholded,
    SemVer,
    Date,
    /// Fixed-length ASCII text of the given byte count
    Ascii(u8),
    /// bit0..bit7 -> channel1..channel8
    ChannelBitmap,
    /// bit0..bit3 -> sensor1..sensor4
    SensorBitmap,
    /// u16 in thousandths of a percent
    AccuracyPercent,
    Enum(EnumTable),
}

impl RegisterDecoder {
    /// Number of register bytes this decoder consumes
    pub fn size(&self) -> usize {
        match self {
            RegisterDecoder::Uint8
            | RegisterDecoder::Int8
            | RegisterDecoder::ChannelBitmap
            | RegisterDecoder::SensorBitmap
            | RegisterDecoder::Enum(_) => 1,
            RegisterDecoder::Uint16 | RegisterDecoder::Int16 | RegisterDecoder::AccuracyPercent => {
                2
            }
            RegisterDecoder::SemVer | RegisterDecoder::Date => 3,
            RegisterDecoder::Uint32
            | RegisterDecoder::Int32
            | RegisterDecoder::Float32
            | RegisterDecoder::Float32Thresholded => 4,
            RegisterDecoder::Ascii(len) => usize::from(*len),
        }
    }

    /// Decode exactly `self.size()` bytes into a JSON value
    pub fn decode(&self, data: &[u8]) -> Result<Value> {
        let expected = self.size();
        if data.len() != expected {
            return Err(ElementError::LengthMismatch {
                expected,
                actual: data.len(),
            }
            .into());
        }

        let value = match self {
            RegisterDecoder::Uint8 => json!(read_u8(data)?),
            RegisterDecoder::Uint16 => json!(read_u16_be(data)?),
            RegisterDecoder::Uint32 => json!(read_u32_be(data)?),
            RegisterDecoder::Int8 => json!(read_i8(data)?),
            RegisterDecoder::Int16 => json!(read_i16_be(data)?),
            RegisterDecoder::Int32 => json!(read_i32_be(data)?),
            RegisterDecoder::Float32 => json!(decode_float32(data)?),
            RegisterDecoder::Float32Thresholded => json!(decode_float32_thresholded(data)?),
            RegisterDecoder::SemVer => {
                let (_, version) = parse_semver(data).map_err(|_| {
                    ElementError::InvalidValue(format!("semantic version {:02X?}", data))
                })?;
                Value::String(version)
            }
            RegisterDecoder::Date => {
                let (_, date) =
                    parse_date(data).map_err(|_| DecodeError::InvalidDate(data.to_vec()))?;
                Value::String(date.to_string())
            }
            RegisterDecoder::Ascii(len) => {
                let (_, text) = parse_char_array(usize::from(*len))(data).map_err(|_| {
                    ElementError::InvalidValue(format!("ascii text {:02X?}", data))
                })?;
                Value::String(text)
            }
            RegisterDecoder::ChannelBitmap => {
                Value::Object(bitmap(read_u8(data)?, CHANNEL_COUNT, channel_key))
            }
            RegisterDecoder::SensorBitmap => {
                Value::Object(bitmap(read_u8(data)?, SENSOR_COUNT, sensor_key))
            }
            RegisterDecoder::AccuracyPercent => json!(accuracy_percent(read_u16_be(data)?)),
            RegisterDecoder::Enum(table) => json!(table.resolve(read_u8(data)?)?),
        };
        Ok(value)
    }
}

/// Map the lowest @count bits of @bits to `key(1)..key(count)` booleans
fn bitmap(bits: u8, count: u8, key: fn(u8) -> String) -> Map<String, Value> {
    (0..count)
        .map(|bit| (key(bit + 1), Value::Bool(bits & (1 << bit) != 0)))
        .collect()
}

/// Thousandths of a percent to percent
fn accuracy_percent(raw: u16) -> f64 {
    f64::from(raw) / 1000.0
}
