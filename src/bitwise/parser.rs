// Parser combinators using nom for the TULIP3 wire primitives

use nom::{
    bytes::complete::take,
    error::{Error, ErrorKind},
    number::complete::{be_u16, be_u8},
    IResult,
};

/// Highest register address expressible in the 11-bit address field
pub const MAX_REGISTER_ADDRESS: u16 = 0x7FF;

/// Highest register length expressible in the 5-bit length field
pub const MAX_REGISTER_LENGTH: u8 = 0x1F;

/// Parse a 2-byte addressing field into (start address, length)
///
/// Layout (big-endian): `aaaaaaaa aaalllll` - 11 bits of address, 5 bits of length.
pub fn parse_addressing_field(input: &[u8]) -> IResult<&[u8], (u16, u8)> {
    let (input, raw) = be_u16::<&[u8], Error<&[u8]>>(input)?;
    Ok((input, (raw >> 5, (raw & 0x1F) as u8)))
}

/// Pack (start address, length) into a 2-byte addressing field
///
/// Returns None when either value does not fit its bit width.
pub fn pack_addressing_field(address: u16, length: u8) -> Option<[u8; 2]> {
    if address > MAX_REGISTER_ADDRESS || length > MAX_REGISTER_LENGTH {
        return None;
    }
    Some(((address << 5) | u16::from(length)).to_be_bytes())
}

/// Parse a fixed-length ASCII array, mapping every byte straight to its char code
///
/// No trimming and no terminator handling: padding bytes are kept as-is.
pub fn parse_char_array(len: usize) -> impl Fn(&[u8]) -> IResult<&[u8], String> {
    move |input: &[u8]| {
        let (input, bytes) = take::<usize, &[u8], Error<&[u8]>>(len)(input)?;
        let s = bytes.iter().map(|&b| char::from(b)).collect();
        Ok((input, s))
    }
}

/// Parse a 3-byte semantic version triple into "major.minor.patch"
pub fn parse_semver(input: &[u8]) -> IResult<&[u8], String> {
    let (input, major) = be_u8::<&[u8], Error<&[u8]>>(input)?;
    let (input, minor) = be_u8::<&[u8], Error<&[u8]>>(input)?;
    let (input, patch) = be_u8::<&[u8], Error<&[u8]>>(input)?;
    Ok((input, format!("{}.{}.{}", major, minor, patch)))
}

/// A calendar date as stored by the devices: years since 2000, month, day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl DeviceDate {
    fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Check that the month and day name a real calendar day
    pub fn is_valid(&self) -> bool {
        self.day >= 1 && self.day <= Self::days_in_month(self.year, self.month)
    }
}

impl std::fmt::Display for DeviceDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Parse a 3-byte device date, rejecting impossible calendar days
pub fn parse_date(input: &[u8]) -> IResult<&[u8], DeviceDate> {
    let (rest, years) = be_u8::<&[u8], Error<&[u8]>>(input)?;
    let (rest, month) = be_u8::<&[u8], Error<&[u8]>>(rest)?;
    let (rest, day) = be_u8::<&[u8], Error<&[u8]>>(rest)?;

    let date = DeviceDate {
        year: 2000 + u16::from(years),
        month,
        day,
    };
    if !date.is_valid() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    Ok((rest, date))
}
