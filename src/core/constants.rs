// Constants used across the codec - message types, enumeration tables, frame statuses

/// Message type byte of identification messages
pub const MESSAGE_TYPE_IDENTIFICATION: u8 = 0x14;

/// Message type byte of configuration messages
pub const MESSAGE_TYPE_CONFIGURATION: u8 = 0x15;

/// Only the lower 6 bits of byte 1 carry the sub-type
pub const SUB_TYPE_MASK: u8 = 0x3F;

/// Register read response to a downlink request
pub const SUB_TYPE_READ_RESPONSE: u8 = 0x01;

/// Register read sent spontaneously by the device
pub const SUB_TYPE_SPONTANEOUS_READ: u8 = 0x02;

/// Write acknowledgement (frame/status list)
pub const SUB_TYPE_WRITE_RESPONSE: u8 = 0x03;

/// Extended identification read
pub const SUB_TYPE_EXTENDED_READ: u8 = 0x04;

/// Number of sensors a device can expose
pub const SENSOR_COUNT: u8 = 4;

/// Number of channels per sensor
pub const CHANNEL_COUNT: u8 = 8;

/// Key of the fixed communication module branch in decoded results
pub const COMMUNICATION_MODULE_KEY: &str = "communicationModule";

/// Key of the per-sensor identification branch
pub const IDENTIFICATION_KEY: &str = "identification";

/// Key of the per-sensor configuration branch
pub const CONFIGURATION_KEY: &str = "configuration";

/// The two register resource families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFamily {
    Identification,
    Configuration,
}

impl ResourceFamily {
    /// Message type byte used by this family
    pub fn message_type(&self) -> u8 {
        match self {
            ResourceFamily::Identification => MESSAGE_TYPE_IDENTIFICATION,
            ResourceFamily::Configuration => MESSAGE_TYPE_CONFIGURATION,
        }
    }

    /// Capitalised name, as used in status texts
    pub fn title(&self) -> &'static str {
        match self {
            ResourceFamily::Identification => "Identification",
            ResourceFamily::Configuration => "Configuration",
        }
    }

    /// Key of the per-sensor branch (`sensorN.<key>`)
    pub fn sensor_key(&self) -> &'static str {
        match self {
            ResourceFamily::Identification => IDENTIFICATION_KEY,
            ResourceFamily::Configuration => CONFIGURATION_KEY,
        }
    }

    /// Sub-types accepted for register read messages of this family
    pub fn read_sub_types(&self) -> &'static [u8] {
        match self {
            ResourceFamily::Identification => &[
                SUB_TYPE_READ_RESPONSE,
                SUB_TYPE_SPONTANEOUS_READ,
                SUB_TYPE_EXTENDED_READ,
            ],
            ResourceFamily::Configuration => &[SUB_TYPE_READ_RESPONSE, SUB_TYPE_SPONTANEOUS_READ],
        }
    }
}

impl std::fmt::Display for ResourceFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sensor_key())
    }
}

/// Physical quantity measured by a channel
pub const MEASURANDS: &[(u8, &str)] = &[
    (1, "Temperature"),
    (2, "Temperature difference"),
    (3, "Pressure (gauge)"),
    (4, "Pressure (absolute)"),
    (5, "Pressure (differential)"),
    (6, "Flow (vol.)"),
    (7, "Flow (mass)"),
    (8, "Force"),
    (9, "Mass"),
    (10, "Level"),
    (11, "Length"),
    (12, "Volume"),
    (13, "Current"),
    (14, "Voltage"),
    (15, "Resistance"),
    (16, "Capacitance"),
    (17, "Inductance"),
    (18, "Relative"),
    (19, "Time"),
    (20, "Frequency"),
    (21, "Speed"),
    (22, "Acceleration"),
    (23, "Density"),
    (24, "Density (gauge pressure at 20 °C)"),
    (25, "Density (absolute pressure at 20 °C)"),
    (26, "Humidity (relative)"),
    (27, "Humidity (absolute)"),
    (28, "Angle of rotation / inclination"),
    (60, "Device specific"),
    (61, "Device specific"),
    (62, "Device specific"),
];

/// Engineering units
pub const UNITS: &[(u8, &str)] = &[
    (1, "°C"),
    (2, "°F"),
    (3, "K"),
    (4, "°R"),
    (7, "bar"),
    (8, "mbar"),
    (9, "µbar"),
    (10, "Pa"),
    (11, "hPa"),
    (12, "kPa"),
    (13, "MPa"),
    (14, "psi"),
    (15, "lbf/ft²"),
    (16, "kN/m²"),
    (17, "N/cm²"),
    (18, "atm"),
    (19, "kg/cm²"),
    (20, "kg/mm²"),
    (21, "µmHg"),
    (22, "mmHg"),
    (23, "cmHg"),
    (24, "inHg"),
    (25, "mmH2O"),
    (26, "mH2O"),
    (27, "inH2O"),
    (28, "ftH2O"),
    (45, "%"),
    (46, "‰"),
    (47, "ppm"),
    (55, "°"),
    (56, "rad"),
    (60, "m³/h"),
    (61, "l/min"),
    (62, "kg/h"),
    (70, "mA"),
    (71, "V"),
    (72, "mV"),
    (73, "Ω"),
    (80, "m"),
    (81, "cm"),
    (82, "mm"),
    (83, "in"),
    (84, "ft"),
    (90, "s"),
    (91, "ms"),
    (92, "Hz"),
    (93, "kHz"),
    (100, "N"),
    (101, "kN"),
    (102, "g"),
    (103, "kg"),
    (104, "l"),
    (105, "m³"),
    (106, "m/s"),
    (107, "m/s²"),
    (108, "kg/m³"),
    (109, "g/cm³"),
];

/// Radio variant of the communication module
pub const PRODUCT_SUB_IDS: &[(u8, &str)] = &[
    (0, "LoRaWAN"),
    (1, "LoRaWAN + BLE"),
    (2, "mioty"),
    (3, "mioty + BLE"),
];

/// Encoding used for process values of a channel
pub const PROTOCOL_DATA_TYPES: &[(u8, &str)] = &[
    (0, "float - IEEE754"),
    (1, "int 24 - Fixed-point s16.7 (Q16.7)"),
    (2, "int 16 - Fixed-point s10.5 (Q10.5)"),
];

/// LoRaWAN regional channel plans
pub const CHANNEL_PLANS: &[(u8, &str)] = &[
    (1, "EU868"),
    (2, "US915"),
    (3, "CN779"),
    (4, "EU433"),
    (5, "AU915"),
    (6, "CN470"),
    (7, "AS923"),
    (8, "AS923-2"),
    (9, "AS923-3"),
    (10, "KR920"),
    (11, "IN865"),
    (12, "RU864"),
    (13, "AS923-4"),
];

/// Look up @value in a (code, text) table
pub fn lookup_name(table: &[(u8, &'static str)], value: u8) -> Option<&'static str> {
    table
        .iter()
        .find(|(code, _)| *code == value)
        .map(|(_, name)| *name)
}

/// Number of defined write-acknowledgement status codes
pub const FRAME_STATUS_COUNT: u8 = 9;

/// Text of a write-acknowledgement status code for @family
pub fn frame_status_text(family: ResourceFamily, code: u8) -> Option<String> {
    let title = family.title();
    let lower = family.sensor_key();
    let text = match code {
        0 => format!("{} received but not applied", title),
        1 => format!("{} received and applied with success", title),
        2 => format!("{} rejected - Tried to write a read only register", title),
        3 => format!("{} rejected - At least one register has an invalid value", title),
        4 => format!(
            "{} rejected - The combination register start address/number of bytes is wrong",
            title
        ),
        5 => format!(
            "Entire {} discarded because of invalid parameter combination",
            lower
        ),
        6 => format!("Entire {} discarded because no answer from the cloud", lower),
        7 => "Frame rejected - missing frame".to_string(),
        8 => "Frame rejected - frame number already received".to_string(),
        _ => return None,
    };
    Some(text)
}

/// Key of sensor @n (1-based) in results and profiles
pub fn sensor_key(n: u8) -> String {
    format!("sensor{}", n)
}

/// Key of channel @m (1-based) in results and profiles
pub fn channel_key(m: u8) -> String {
    format!("channel{}", m)
}
