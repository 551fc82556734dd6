// Post-decode validation against the device profile, plus channel name enrichment

use super::constants::{COMMUNICATION_MODULE_KEY, CONFIGURATION_KEY, IDENTIFICATION_KEY};
use super::path::get_at_path;
use super::profile::DeviceProfile;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Connected sensors do not match the device profile: {}", format_connections(.0))]
    ConnectedSensorMismatch(Vec<SensorConnection>),

    #[error("Sensors not declared in the device profile: {}", .0.join(", "))]
    UndeclaredSensors(Vec<String>),

    #[error(
        "Enabled sampling channels not declared in the device profile: {}",
        format_channel_offenders(.0)
    )]
    UndeclaredSamplingChannels(Vec<(String, Vec<String>)>),
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// A sensor whose reported connection disagrees with the profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorConnection {
    pub sensor: String,
    /// As reported by the device
    pub connected: bool,
    /// Whether the profile declares the sensor
    pub declared: bool,
}

fn format_connections(mismatches: &[SensorConnection]) -> String {
    mismatches
        .iter()
        .map(|m| {
            format!(
                "{} (device: {}, profile: {})",
                m.sensor,
                if m.connected { "connected" } else { "not connected" },
                if m.declared { "declared" } else { "not declared" }
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_channel_offenders(offenders: &[(String, Vec<String>)]) -> String {
    offenders
        .iter()
        .map(|(sensor, channels)| format!("{}: {}", sensor, channels.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check the connectedSensors bitmap against the sensors declared in @profile
///
/// Every disagreeing sensor is reported, not just the first one.
pub fn check_connected_sensors(result: &Value, profile: &DeviceProfile) -> Result<()> {
    let path = format!("{}.connectedSensors", COMMUNICATION_MODULE_KEY);
    let Some(connected) = get_at_path(result, &path).and_then(Value::as_object) else {
        return Ok(());
    };

    let mismatches: Vec<SensorConnection> = connected
        .iter()
        .map(|(sensor, flag)| SensorConnection {
            sensor: sensor.clone(),
            connected: flag.as_bool().unwrap_or(false),
            declared: profile.has_sensor(sensor),
        })
        .filter(|m| m.connected != m.declared)
        .collect();

    if mismatches.is_empty() {
        Ok(())
    } else {
        tracing::warn!("Connected sensors disagree with profile: {:?}", mismatches);
        Err(ValidationError::ConnectedSensorMismatch(mismatches))
    }
}

/// Every top-level sensor key of @result must be declared in @profile
pub fn check_declared_sensors(result: &Value, profile: &DeviceProfile) -> Result<()> {
    let Some(object) = result.as_object() else {
        return Ok(());
    };

    let undeclared: Vec<String> = object
        .keys()
        .filter(|key| key.as_str() != COMMUNICATION_MODULE_KEY && !profile.has_sensor(key))
        .cloned()
        .collect();

    if undeclared.is_empty() {
        Ok(())
    } else {
        tracing::warn!("Undeclared sensors in decoded result: {:?}", undeclared);
        Err(ValidationError::UndeclaredSensors(undeclared))
    }
}

/// Every enabled sampling channel must be declared in @profile
///
/// Disabled channels never need a declaration.
pub fn check_sampling_channels(result: &Value, profile: &DeviceProfile) -> Result<()> {
    let Some(object) = result.as_object() else {
        return Ok(());
    };

    let mut offenders = Vec::new();
    for (sensor, content) in object {
        if sensor == COMMUNICATION_MODULE_KEY {
            continue;
        }
        let Some(sampling) = content
            .get(CONFIGURATION_KEY)
            .and_then(|config| config.get("samplingChannels"))
            .and_then(Value::as_object)
        else {
            continue;
        };

        let declared = profile.sensor(sensor);
        let undeclared: Vec<String> = sampling
            .iter()
            .filter(|(_, enabled)| enabled.as_bool() == Some(true))
            .filter(|(channel, _)| !declared.is_some_and(|s| s.has_channel(channel)))
            .map(|(channel, _)| channel.clone())
            .collect();

        if !undeclared.is_empty() {
            offenders.push((sensor.clone(), undeclared));
        }
    }

    if offenders.is_empty() {
        Ok(())
    } else {
        tracing::warn!("Undeclared sampling channels: {:?}", offenders);
        Err(ValidationError::UndeclaredSamplingChannels(offenders))
    }
}

/// Copy the profile's channel names onto decoded channels declared in both
pub fn apply_channel_names(result: &mut Value, profile: &DeviceProfile) {
    let Some(object) = result.as_object_mut() else {
        return;
    };

    for (sensor, content) in object.iter_mut() {
        if sensor == COMMUNICATION_MODULE_KEY {
            continue;
        }
        let (Some(sensor_profile), Some(channels)) =
            (profile.sensor(sensor), content.as_object_mut())
        else {
            continue;
        };

        for (channel, decoded) in channels.iter_mut() {
            if channel == IDENTIFICATION_KEY || channel == CONFIGURATION_KEY {
                continue;
            }
            if let (Some(declared), Some(fields)) =
                (sensor_profile.channel(channel), decoded.as_object_mut())
            {
                fields.insert(
                    "channelName".to_string(),
                    Value::String(declared.channel_name.clone()),
                );
            }
        }
    }
}

/// Validate a decoded identification result and add channel names, in place
pub fn validate_and_transform_identification(
    result: &mut Value,
    profile: &DeviceProfile,
) -> Result<()> {
    check_connected_sensors(result, profile)?;
    check_declared_sensors(result, profile)?;
    apply_channel_names(result, profile);
    Ok(())
}

/// Validate a decoded configuration result and add channel names, in place
pub fn validate_and_transform_configuration(
    result: &mut Value,
    profile: &DeviceProfile,
) -> Result<()> {
    check_declared_sensors(result, profile)?;
    check_sampling_channels(result, profile)?;
    apply_channel_names(result, profile);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::ChannelProfile;
    use serde_json::json;

    fn profile() -> DeviceProfile {
        DeviceProfile::new()
            .with_channel(1, 1, ChannelProfile::new("pressure"))
            .with_channel(1, 2, ChannelProfile::new("temperature"))
    }

    #[test]
    fn test_connected_sensor_mismatch() {
        let mut result = json!({
            "communicationModule": {
                "connectedSensors": {
                    "sensor1": true, "sensor2": true,
                    "sensor3": false, "sensor4": false
                }
            }
        });
        let err = validate_and_transform_identification(&mut result, &profile()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ConnectedSensorMismatch(vec![SensorConnection {
                sensor: "sensor2".to_string(),
                connected: true,
                declared: false
            }])
        );
        let text = err.to_string();
        assert!(text.contains("sensor2"));
        assert!(text.contains("connected"));
    }

    #[test]
    fn test_every_connected_mismatch_listed() {
        let result = json!({
            "communicationModule": {
                "connectedSensors": {
                    "sensor1": true, "sensor2": true,
                    "sensor3": true, "sensor4": false
                }
            }
        });
        let err = check_connected_sensors(&result, &profile()).unwrap_err();
        let ValidationError::ConnectedSensorMismatch(mismatches) = &err else {
            panic!("unexpected error {:?}", err);
        };
        let sensors: Vec<&str> = mismatches.iter().map(|m| m.sensor.as_str()).collect();
        assert_eq!(sensors, vec!["sensor2", "sensor3"]);

        let text = err.to_string();
        assert!(text.contains("sensor2 (device: connected, profile: not declared)"));
        assert!(text.contains("sensor3 (device: connected, profile: not declared)"));
    }

    #[test]
    fn test_declared_sensor_not_connected() {
        let result = json!({
            "communicationModule": {"connectedSensors": {"sensor1": false}}
        });
        let err = check_connected_sensors(&result, &profile()).unwrap_err();
        assert!(err.to_string().contains("not connected"));
    }

    #[test]
    fn test_undeclared_sensors_listed() {
        let mut result = json!({
            "communicationModule": {"productId": 1},
            "sensor1": {"identification": {"sensorType": 1}},
            "sensor2": {"identification": {"sensorType": 1}},
            "sensor4": {"channel1": {"unit": "bar"}}
        });
        let err = validate_and_transform_identification(&mut result, &profile()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UndeclaredSensors(vec!["sensor2".to_string(), "sensor4".to_string()])
        );
        assert!(err.to_string().contains("sensor2, sensor4"));
    }

    #[test]
    fn test_undeclared_sampling_channel() {
        let mut result = json!({
            "sensor1": {
                "configuration": {
                    "samplingChannels": {"channel1": true, "channel3": false, "channel9": true}
                }
            }
        });
        let err = validate_and_transform_configuration(&mut result, &profile()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UndeclaredSamplingChannels(vec![(
                "sensor1".to_string(),
                vec!["channel9".to_string()]
            )])
        );
        assert!(err.to_string().contains("channel9"));
    }

    #[test]
    fn test_disabled_channels_need_no_declaration() {
        let mut result = json!({
            "sensor1": {
                "configuration": {
                    "samplingChannels": {"channel1": true, "channel2": false, "channel5": false}
                }
            }
        });
        assert!(validate_and_transform_configuration(&mut result, &profile()).is_ok());
    }

    #[test]
    fn test_channel_names_applied() {
        let mut result = json!({
            "communicationModule": {"transmissionRateAlarmOff": 2},
            "sensor1": {
                "configuration": {"bootTime": 10},
                "channel1": {"protocolDataType": "float - IEEE754"},
                "channel7": {"protocolDataType": "float - IEEE754"}
            }
        });
        validate_and_transform_configuration(&mut result, &profile()).unwrap();
        assert_eq!(
            result,
            json!({
                "communicationModule": {"transmissionRateAlarmOff": 2},
                "sensor1": {
                    "configuration": {"bootTime": 10},
                    "channel1": {"protocolDataType": "float - IEEE754", "channelName": "pressure"},
                    "channel7": {"protocolDataType": "float - IEEE754"}
                }
            })
        );
    }

    #[test]
    fn test_identification_success() {
        let mut result = json!({
            "communicationModule": {
                "connectedSensors": {
                    "sensor1": true, "sensor2": false,
                    "sensor3": false, "sensor4": false
                }
            },
            "sensor1": {"channel2": {"unit": "°C"}}
        });
        validate_and_transform_identification(&mut result, &profile()).unwrap();
        assert_eq!(result["sensor1"]["channel2"]["channelName"], json!("temperature"));
    }
}
