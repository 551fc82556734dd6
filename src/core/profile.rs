// Device sensor profile: which sensors and channels a concrete device instance exposes

use super::constants::{channel_key, sensor_key, CHANNEL_COUNT, SENSOR_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read profile file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "Unknown sensor key '{0}' in profile (expected sensor1..sensor{max})",
        max = SENSOR_COUNT
    )]
    UnknownSensor(String),

    #[error(
        "Unknown channel key '{channel}' for {sensor} in profile (expected channel1..channel{max})",
        max = CHANNEL_COUNT
    )]
    UnknownChannel { sensor: String, channel: String },
}

pub type Result<T> = std::result::Result<T, ProfileError>;

/// Measurement range configured for a channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRange {
    pub start: f64,
    pub end: f64,
}

/// A single channel declared by the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    /// Display name copied onto decoded channels
    pub channel_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_range: Option<MeasurementRange>,
}

impl ChannelProfile {
    pub fn new(channel_name: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
            measurement_range: None,
        }
    }

    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.measurement_range = Some(MeasurementRange { start, end });
        self
    }
}

/// Channels of one sensor, keyed `channel1`..`channel8`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorProfile {
    pub channels: BTreeMap<String, ChannelProfile>,
}

impl SensorProfile {
    pub fn channel(&self, key: &str) -> Option<&ChannelProfile> {
        self.channels.get(key)
    }

    pub fn has_channel(&self, key: &str) -> bool {
        self.channels.contains_key(key)
    }
}

/// Caller-supplied description of the sensors/channels present on a device
///
/// Keys follow the decoded result shape: `sensor1`..`sensor4`, each holding
/// `channel1`..`channel8`. An absent key means the sensor or channel does not exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceProfile {
    pub sensors: BTreeMap<String, SensorProfile>,
}

impl DeviceProfile {
    /// Create an empty profile (no sensors)
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare channel @channel of sensor @sensor (both 1-based)
    pub fn with_channel(mut self, sensor: u8, channel: u8, profile: ChannelProfile) -> Self {
        self.sensors
            .entry(sensor_key(sensor))
            .or_default()
            .channels
            .insert(channel_key(channel), profile);
        self
    }

    /// Declare sensor @sensor without any channels
    pub fn with_sensor(mut self, sensor: u8) -> Self {
        self.sensors.entry(sensor_key(sensor)).or_default();
        self
    }

    pub fn sensor(&self, key: &str) -> Option<&SensorProfile> {
        self.sensors.get(key)
    }

    pub fn has_sensor(&self, key: &str) -> bool {
        self.sensors.contains_key(key)
    }

    /// Check that every key names a sensor/channel the protocol can address
    pub fn validate(&self) -> Result<()> {
        let valid_sensors: Vec<String> = (1..=SENSOR_COUNT).map(sensor_key).collect();
        let valid_channels: Vec<String> = (1..=CHANNEL_COUNT).map(channel_key).collect();

        for (sensor, profile) in &self.sensors {
            if !valid_sensors.contains(sensor) {
                return Err(ProfileError::UnknownSensor(sensor.clone()));
            }
            if let Some(channel) = profile
                .channels
                .keys()
                .find(|channel| !valid_channels.contains(channel))
            {
                return Err(ProfileError::UnknownChannel {
                    sensor: sensor.clone(),
                    channel: channel.clone(),
                });
            }
        }
        Ok(())
    }

    /// Deserialize and validate a profile from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load and validate a profile from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PROFILE_JSON: &str = r#"{
        "sensor1": {
            "channel1": {"channelName": "pressure", "measurementRange": {"start": 0, "end": 10}},
            "channel2": {"channelName": "temperature"}
        },
        "sensor3": {}
    }"#;

    #[test]
    fn test_from_json() {
        let profile = DeviceProfile::from_json(PROFILE_JSON).unwrap();
        assert!(profile.has_sensor("sensor1"));
        assert!(profile.has_sensor("sensor3"));
        assert!(!profile.has_sensor("sensor2"));

        let sensor1 = profile.sensor("sensor1").unwrap();
        let channel1 = sensor1.channel("channel1").unwrap();
        assert_eq!(channel1.channel_name, "pressure");
        assert_eq!(
            channel1.measurement_range,
            Some(MeasurementRange {
                start: 0.0,
                end: 10.0
            })
        );
        assert!(sensor1.channel("channel2").unwrap().measurement_range.is_none());
        assert!(!sensor1.has_channel("channel3"));
    }

    #[test]
    fn test_builder_matches_json() {
        let built = DeviceProfile::new()
            .with_channel(1, 1, ChannelProfile::new("pressure").with_range(0.0, 10.0))
            .with_channel(1, 2, ChannelProfile::new("temperature"))
            .with_sensor(3);
        assert_eq!(built, DeviceProfile::from_json(PROFILE_JSON).unwrap());

        let json = built.to_json().unwrap();
        assert_eq!(DeviceProfile::from_json(&json).unwrap(), built);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = DeviceProfile::from_json(r#"{"sensor5": {}}"#).unwrap_err();
        assert!(matches!(err, ProfileError::UnknownSensor(ref s) if s == "sensor5"));

        let err =
            DeviceProfile::from_json(r#"{"sensor1": {"channel9": {"channelName": "x"}}}"#)
                .unwrap_err();
        assert!(err.to_string().contains("channel9"));

        assert!(matches!(
            DeviceProfile::from_json("not json"),
            Err(ProfileError::Json(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PROFILE_JSON.as_bytes()).unwrap();

        let profile = DeviceProfile::from_file(file.path()).unwrap();
        assert_eq!(profile.sensors.len(), 2);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            DeviceProfile::from_file(missing),
            Err(ProfileError::Io(_))
        ));
    }
}
