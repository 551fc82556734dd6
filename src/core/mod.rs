// Core module: protocol constants, device profiles and result validation
pub mod constants;
pub mod path;
pub mod profile;
pub mod validation;

// Re-export commonly used types
pub use constants::*;
pub use path::{get_at_path, set_at_path};
pub use profile::{ChannelProfile, DeviceProfile, MeasurementRange, ProfileError, SensorProfile};
pub use validation::{SensorConnection, ValidationError};
