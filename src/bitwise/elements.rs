// Fixed-width integer and float readers for register payloads
// All TULIP3 multi-byte registers are big-endian

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    #[error("Length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, ElementError>;

fn exact<const N: usize>(data: &[u8]) -> Result<[u8; N]> {
    data.try_into().map_err(|_| ElementError::LengthMismatch {
        expected: N,
        actual: data.len(),
    })
}

/// Read a single unsigned byte
///
/// Any 8-bit pattern is accepted, so this never fails on content.
pub fn read_u8(data: &[u8]) -> Result<u8> {
    let [b] = exact::<1>(data)?;
    Ok(b)
}

/// Read a single signed byte (two's complement)
pub fn read_i8(data: &[u8]) -> Result<i8> {
    let [b] = exact::<1>(data)?;
    Ok(b as i8)
}

/// Read a u16 in big-endian format
pub fn read_u16_be(data: &[u8]) -> Result<u16> {
    Ok(u16::from_be_bytes(exact(data)?))
}

/// Read a i16 in big-endian format
pub fn read_i16_be(data: &[u8]) -> Result<i16> {
    Ok(i16::from_be_bytes(exact(data)?))
}

/// Read a u32 in big-endian format
pub fn read_u32_be(data: &[u8]) -> Result<u32> {
    Ok(u32::from_be_bytes(exact(data)?))
}

/// Read a i32 in big-endian format
pub fn read_i32_be(data: &[u8]) -> Result<i32> {
    Ok(i32::from_be_bytes(exact(data)?))
}

/// Read an IEEE-754 single precision float in big-endian format
pub fn read_f32_be(data: &[u8]) -> Result<f32> {
    Ok(f32::from_bits(read_u32_be(data)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_i8() {
        assert_eq!(read_u8(&[0xFF]).unwrap(), 255);
        assert_eq!(read_i8(&[0xFF]).unwrap(), -1);
        assert_eq!(read_i8(&[0x7F]).unwrap(), 127);
        assert_eq!(read_i8(&[0x80]).unwrap(), -128);
    }

    #[test]
    fn test_u16() {
        assert_eq!(read_u16_be(&[0x12, 0x34]).unwrap(), 0x1234);
    }

    #[test]
    fn test_u32_i32() {
        assert_eq!(read_u32_be(&[0x12, 0x34, 0x56, 0x78]).unwrap(), 0x12345678);
        assert_eq!(read_i32_be(&[0xFF, 0xFF, 0xFF, 0xFE]).unwrap(), -2);
        assert_eq!(read_i16_be(&[0xFF, 0xFE]).unwrap(), -2);
    }

    #[test]
    fn test_f32() {
        // 1.5 = 0x3FC00000
        assert_eq!(read_f32_be(&[0x3F, 0xC0, 0x00, 0x00]).unwrap(), 1.5);
        assert_eq!(read_f32_be(&[0xC0, 0x00, 0x00, 0x00]).unwrap(), -2.0);
    }

    #[test]
    fn test_wrong_length() {
        let data = [0x12];
        assert!(read_u16_be(&data).is_err());
        assert!(read_u32_be(&data).is_err());
        assert!(read_f32_be(&[0x00, 0x00, 0x00]).is_err());
        assert_eq!(
            read_u8(&[0x01, 0x02]),
            Err(ElementError::LengthMismatch {
                expected: 1,
                actual: 2
            })
        );
    }
}
