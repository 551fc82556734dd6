// Primitive decoders for TULIP3 register payloads

pub mod elements;
pub mod float;
pub mod parser;

pub use elements::{
    read_f32_be, read_i16_be, read_i32_be, read_i8, read_u16_be, read_u32_be, read_u8,
    ElementError,
};
pub use float::{decode_float32, decode_float32_thresholded, snap_to_two_decimals};
pub use parser::{
    pack_addressing_field, parse_addressing_field, parse_char_array, parse_date, parse_semver,
    DeviceDate, MAX_REGISTER_ADDRESS, MAX_REGISTER_LENGTH,
};
