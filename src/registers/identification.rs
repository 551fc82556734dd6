// Identification register map: communication module, sensor and channel identity

use super::decoder::{EnumTable, RegisterDecoder};
use super::lookup::{LookupBuilder, RegisterField, RegisterLookup};
use crate::core::constants::{
    channel_key, sensor_key, CHANNEL_COUNT, COMMUNICATION_MODULE_KEY, IDENTIFICATION_KEY,
    SENSOR_COUNT,
};
use crate::core::profile::DeviceProfile;

/// First sensor region, right after the communication module
pub const SENSOR_REGION_START: u16 = 0x03C;
pub const COMMUNICATION_MODULE_SIZE: u16 = 60;
pub const SENSOR_REGION_SIZE: u16 = 60;
pub const CHANNEL_REGION_SIZE: u16 = 50;
/// Distance between two consecutive sensor regions (sensor + its 8 channels)
pub const SENSOR_STRIDE: u16 = 460;

pub const COMMUNICATION_MODULE_FIELDS: &[RegisterField] = &[
    RegisterField::new(0x00, "productId", RegisterDecoder::Uint8),
    RegisterField::new(0x01, "productSubId", RegisterDecoder::Enum(EnumTable::ProductSubId)),
    RegisterField::new(0x02, "channelPlan", RegisterDecoder::Enum(EnumTable::ChannelPlan)),
    RegisterField::new(0x03, "connectedSensors", RegisterDecoder::SensorBitmap),
    RegisterField::new(0x04, "firmwareVersion", RegisterDecoder::SemVer),
    RegisterField::new(0x07, "hardwareVersion", RegisterDecoder::SemVer),
    RegisterField::new(0x0A, "productionDate", RegisterDecoder::Date),
    RegisterField::new(0x0D, "serialNumber", RegisterDecoder::Ascii(11)),
];

pub const SENSOR_FIELDS: &[RegisterField] = &[
    RegisterField::new(0x00, "sensorType", RegisterDecoder::Uint16),
    RegisterField::new(0x02, "existingChannels", RegisterDecoder::ChannelBitmap),
    RegisterField::new(0x03, "firmwareVersion", RegisterDecoder::SemVer),
    RegisterField::new(0x06, "hardwareVersion", RegisterDecoder::SemVer),
    RegisterField::new(0x09, "productionDate", RegisterDecoder::Date),
    RegisterField::new(0x0C, "serialNumber", RegisterDecoder::Ascii(11)),
];

pub const CHANNEL_FIELDS: &[RegisterField] = &[
    RegisterField::new(0x00, "measurand", RegisterDecoder::Enum(EnumTable::Measurand)),
    RegisterField::new(0x01, "unit", RegisterDecoder::Enum(EnumTable::Unit)),
    RegisterField::new(0x02, "minMeasureRange", RegisterDecoder::Float32Thresholded),
    RegisterField::new(0x06, "maxMeasureRange", RegisterDecoder::Float32Thresholded),
    RegisterField::new(0x0A, "minPhysicalLimit", RegisterDecoder::Float32Thresholded),
    RegisterField::new(0x0E, "maxPhysicalLimit", RegisterDecoder::Float32Thresholded),
    RegisterField::new(0x12, "accuracy", RegisterDecoder::AccuracyPercent),
    RegisterField::new(0x14, "offset", RegisterDecoder::Float32),
    RegisterField::new(0x18, "gain", RegisterDecoder::Float32),
    RegisterField::new(0x1C, "calibrationDate", RegisterDecoder::Date),
];

/// Base address of sensor @n's identification region (1-based)
pub fn sensor_base(n: u8) -> u16 {
    SENSOR_REGION_START + (u16::from(n) - 1) * SENSOR_STRIDE
}

/// Base address of channel @m of sensor @n (both 1-based)
pub fn channel_base(n: u8, m: u8) -> u16 {
    let (n, m) = (u16::from(n), u16::from(m));
    SENSOR_REGION_START
        + (n - 1) * u16::from(CHANNEL_COUNT) * CHANNEL_REGION_SIZE
        + n * SENSOR_REGION_SIZE
        + (m - 1) * CHANNEL_REGION_SIZE
}

/// Build the identification lookup
///
/// The address map is the same for every device: all 4 sensors and 8 channels are always
/// present. The profile only matters to the validation pass run after decoding.
pub fn build_identification_lookup(_profile: Option<&DeviceProfile>) -> RegisterLookup {
    let mut builder =
        LookupBuilder::new().region(0x000, COMMUNICATION_MODULE_KEY, COMMUNICATION_MODULE_FIELDS);

    for n in 1..=SENSOR_COUNT {
        let sensor = sensor_key(n);
        builder = builder.region(
            sensor_base(n),
            &format!("{}.{}", sensor, IDENTIFICATION_KEY),
            SENSOR_FIELDS,
        );
        for m in 1..=CHANNEL_COUNT {
            builder = builder.region(
                channel_base(n, m),
                &format!("{}.{}", sensor, channel_key(m)),
                CHANNEL_FIELDS,
            );
        }
    }

    builder.build()
}
