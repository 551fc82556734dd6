// Configuration register map: measuring/transmission settings, sampling and alarms

use super::decoder::{EnumTable, RegisterDecoder};
use super::lookup::{GuardField, LookupBuilder, RegisterField, RegisterLookup};
use crate::core::constants::{
    channel_key, sensor_key, CHANNEL_COUNT, COMMUNICATION_MODULE_KEY, CONFIGURATION_KEY,
    SENSOR_COUNT,
};
use crate::core::profile::DeviceProfile;

pub const SENSOR_REGION_START: u16 = 0x02A;
pub const COMMUNICATION_MODULE_SIZE: u16 = 42;
pub const SENSOR_REGION_SIZE: u16 = 29;
pub const CHANNEL_REGION_SIZE: u16 = 58;
pub const SENSOR_STRIDE: u16 = 493;

pub const COMMUNICATION_MODULE_FIELDS: &[RegisterField] = &[
    RegisterField::new(0x00, "measuringPeriodAlarmOff", RegisterDecoder::Uint32),
    RegisterField::new(0x04, "measuringPeriodAlarmOn", RegisterDecoder::Uint32),
    RegisterField::new(0x08, "transmissionRateAlarmOff", RegisterDecoder::Uint16),
    RegisterField::new(0x0A, "transmissionRateAlarmOn", RegisterDecoder::Uint16),
    RegisterField::new(0x0C, "overVoltageThreshold", RegisterDecoder::Uint16),
    RegisterField::new(0x0E, "underVoltageThreshold", RegisterDecoder::Uint16),
    RegisterField::new(0x10, "overTemperatureCmChip", RegisterDecoder::Int8),
    RegisterField::new(0x11, "underTemperatureCmChip", RegisterDecoder::Int8),
    RegisterField::new(0x12, "downlinkAnswerTimeout", RegisterDecoder::Uint32),
    RegisterField::new(0x16, "fetchAdditionalDownlinkTimeInterval", RegisterDecoder::Uint8),
    RegisterField::new(0x17, "enableBleAdvertising", RegisterDecoder::Uint8),
];

/// Command registers: writable by downlink, never reported back
pub const COMMUNICATION_MODULE_GUARDS: &[GuardField] = &[
    GuardField {
        offset: 0x20,
        size: 1,
        message: "Register 0x020 (factory reset command) is write-only and cannot be read",
    },
    GuardField {
        offset: 0x21,
        size: 1,
        message: "Register 0x021 (device restart command) is write-only and cannot be read",
    },
];

pub const SENSOR_FIELDS: &[RegisterField] = &[
    RegisterField::new(0x00, "samplingChannels", RegisterDecoder::ChannelBitmap),
    RegisterField::new(0x01, "bootTime", RegisterDecoder::Uint16),
    RegisterField::new(0x03, "communicationTimeout", RegisterDecoder::Uint16),
    RegisterField::new(0x05, "communicationRetryCount", RegisterDecoder::Uint8),
];

pub const CHANNEL_FIELDS: &[RegisterField] = &[
    RegisterField::new(
        0x00,
        "protocolDataType",
        RegisterDecoder::Enum(EnumTable::ProtocolDataType),
    ),
    RegisterField::new(0x01, "processAlarmEnabled", RegisterDecoder::Uint8),
    RegisterField::new(0x02, "processAlarmDeadBand", RegisterDecoder::Float32Thresholded),
    RegisterField::new(0x06, "lowThresholdAlarmValue", RegisterDecoder::Float32Thresholded),
    RegisterField::new(0x0A, "highThresholdAlarmValue", RegisterDecoder::Float32Thresholded),
    RegisterField::new(0x0E, "fallingSlopeAlarmValue", RegisterDecoder::Float32Thresholded),
    RegisterField::new(0x12, "risingSlopeAlarmValue", RegisterDecoder::Float32Thresholded),
    RegisterField::new(
        0x16,
        "lowThresholdWithDelayAlarmValue",
        RegisterDecoder::Float32Thresholded,
    ),
    RegisterField::new(0x1A, "lowThresholdWithDelayAlarmDelay", RegisterDecoder::Uint16),
    RegisterField::new(
        0x1C,
        "highThresholdWithDelayAlarmValue",
        RegisterDecoder::Float32Thresholded,
    ),
    RegisterField::new(0x20, "highThresholdWithDelayAlarmDelay", RegisterDecoder::Uint16),
    RegisterField::new(0x22, "measureOffset", RegisterDecoder::Float32),
    RegisterField::new(0x26, "startUpTime", RegisterDecoder::Uint16),
];

/// Base address of sensor @n's configuration region (1-based)
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

/// Build the configuration lookup
///
/// Like the identification map this covers every sensor and channel; the profile is only
/// consulted by the validation pass.
pub fn build_configuration_lookup(_profile: Option<&DeviceProfile>) -> RegisterLookup {
    let mut builder = LookupBuilder::new()
        .region(0x000, COMMUNICATION_MODULE_KEY, COMMUNICATION_MODULE_FIELDS)
        .guards(0x000, COMMUNICATION_MODULE_GUARDS);

    for n in 1..=SENSOR_COUNT {
        let sensor = sensor_key(n);
        builder = builder.region(
            sensor_base(n),
            &format!("{}.{}", sensor, CONFIGURATION_KEY),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::lookup::LookupSlot;

    fn layout_end(fields: &[RegisterField]) -> u16 {
        fields
            .iter()
            .map(|f| f.offset + f.decoder.size() as u16)
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_strides() {
        assert_eq!(sensor_base(1), 0x02A);
        assert_eq!(sensor_base(2), 0x02A + 493);
        assert_eq!(channel_base(1, 1), 0x02A + 29);
        assert_eq!(channel_base(2, 3), 0x02A + 464 + 58 + 2 * 58);
        for n in 1..SENSOR_COUNT {
            assert_eq!(channel_base(n, 8) + CHANNEL_REGION_SIZE, sensor_base(n + 1));
        }
        assert!(channel_base(4, 8) + CHANNEL_REGION_SIZE <= 0x800);
    }

    #[test]
    fn test_layouts_fit_their_regions() {
        assert!(layout_end(COMMUNICATION_MODULE_FIELDS) <= COMMUNICATION_MODULE_SIZE);
        assert!(layout_end(SENSOR_FIELDS) <= SENSOR_REGION_SIZE);
        assert!(layout_end(CHANNEL_FIELDS) <= CHANNEL_REGION_SIZE);
        for guard in COMMUNICATION_MODULE_GUARDS {
            assert!(guard.offset + guard.size as u16 <= COMMUNICATION_MODULE_SIZE);
        }
    }

    #[test]
    fn test_known_registers() {
        let lookup = build_configuration_lookup(None);

        let (address, entry) = lookup
            .find_path("communicationModule.transmissionRateAlarmOff")
            .unwrap();
        assert_eq!(address, 0x008);
        assert_eq!(entry.size, 2);

        let (address, _) = lookup.find_path("sensor1.configuration.samplingChannels").unwrap();
        assert_eq!(address, 0x02A);

        for n in 1..=SENSOR_COUNT {
            for m in 1..=CHANNEL_COUNT {
                let path = format!("sensor{}.channel{}.protocolDataType", n, m);
                assert_eq!(lookup.find_path(&path).unwrap().0, channel_base(n, m));
            }
        }

        assert!(matches!(lookup.get(0x020), Some(LookupSlot::Guard(_))));
        assert!(matches!(lookup.get(0x021), Some(LookupSlot::Guard(_))));
    }

    #[test]
    fn test_no_overlap() {
        let lookup = build_configuration_lookup(Some(&DeviceProfile::new()));
        let slots: Vec<(u16, usize)> = lookup.iter().map(|(a, s)| (a, s.size())).collect();
        for pair in slots.windows(2) {
            let (address, size) = pair[0];
            assert!(address as usize + size <= pair[1].0 as usize);
        }
        assert!(slots.iter().all(|(a, s)| *a as usize + s <= 0x800));
    }

    #[test]
    fn test_reserved_ranges_empty() {
        let lookup = build_configuration_lookup(None);
        for address in 0x018..0x020 {
            assert!(lookup.get(address).is_none());
        }
        for address in 0x022..SENSOR_REGION_START {
            assert!(lookup.get(address).is_none());
        }
        for n in 1..=SENSOR_COUNT {
            let base = sensor_base(n);
            let reserved = base + layout_end(SENSOR_FIELDS)..base + SENSOR_REGION_SIZE;
            for address in reserved {
                assert!(lookup.get(address).is_none());
            }
            for m in 1..=CHANNEL_COUNT {
                let base = channel_base(n, m);
                for address in base + layout_end(CHANNEL_FIELDS)..base + CHANNEL_REGION_SIZE {
                    assert!(lookup.get(address).is_none());
                }
            }
        }
    }
}
