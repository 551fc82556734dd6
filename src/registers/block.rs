// Register blocks: (start address, payload) runs as carried on the wire

use crate::bitwise::{
    pack_addressing_field, parse_addressing_field, MAX_REGISTER_ADDRESS, MAX_REGISTER_LENGTH,
};
use nom::{bytes::complete::take, error::Error as NomError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("Truncated addressing field at byte {position}: need 2 bytes, {remaining} left")]
    TruncatedAddressingField { position: usize, remaining: usize },

    #[error(
        "Truncated register block 0x{address:03X} at byte {position}: \
         need {length} bytes, {remaining} left"
    )]
    TruncatedPayload {
        address: u16,
        position: usize,
        length: u8,
        remaining: usize,
    },

    #[error("Register block 0x{address:03X} has length {length}, exceeding the maximum of {max}")]
    RegisterTooLarge { address: u16, length: u8, max: u8 },

    #[error("Start position {position} is beyond the end of the {len}-byte message")]
    StartBeyondEnd { position: usize, len: usize },

    #[error(
        "Cannot encode register block 0x{address:03X} with {length} bytes \
         (address <= 0x{max_address:03X}, length <= {max_length})",
        max_address = MAX_REGISTER_ADDRESS,
        max_length = MAX_REGISTER_LENGTH
    )]
    NotEncodable { address: u16, length: usize },
}

pub type Result<T> = std::result::Result<T, BlockError>;

/// Knobs of the register block parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecodeOptions {
    /// Offset of the first addressing field (after type and sub-type)
    pub start_position: usize,
    /// Largest payload length accepted for a single block
    pub max_register_size: u8,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            start_position: 2,
            max_register_size: MAX_REGISTER_LENGTH,
        }
    }
}

/// A contiguous run of register bytes starting at `start_address`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBlock {
    pub start_address: u16,
    pub value: Vec<u8>,
}

impl RegisterBlock {
    pub fn new(start_address: u16, value: impl Into<Vec<u8>>) -> Self {
        Self {
            start_address,
            value: value.into(),
        }
    }
}

/// Split @data into register blocks, starting at `options.start_position`
///
/// Addresses are not checked against any lookup here.
pub fn parse_register_blocks(data: &[u8], options: &DecodeOptions) -> Result<Vec<RegisterBlock>> {
    let mut input = data
        .get(options.start_position..)
        .ok_or(BlockError::StartBeyondEnd {
            position: options.start_position,
            len: data.len(),
        })?;
    let mut blocks = Vec::new();

    while !input.is_empty() {
        let position = data.len() - input.len();

        let (rest, (address, length)) =
            parse_addressing_field(input).map_err(|_| BlockError::TruncatedAddressingField {
                position,
                remaining: input.len(),
            })?;

        if length > options.max_register_size {
            return Err(BlockError::RegisterTooLarge {
                address,
                length,
                max: options.max_register_size,
            });
        }

        let (rest, payload) = take::<usize, &[u8], NomError<&[u8]>>(usize::from(length))(rest)
            .map_err(|_| BlockError::TruncatedPayload {
                address,
                position: position + 2,
                length,
                remaining: rest.len(),
            })?;

        tracing::debug!(
            "Register block 0x{:03X}: {} bytes {:02X?}",
            address,
            length,
            payload
        );
        blocks.push(RegisterBlock::new(address, payload));
        input = rest;
    }

    Ok(blocks)
}

/// Pack (address, length) into the 2-byte addressing field
pub fn encode_addressing_field(address: u16, length: usize) -> Result<[u8; 2]> {
    u8::try_from(length)
        .ok()
        .and_then(|length| pack_addressing_field(address, length))
        .ok_or(BlockError::NotEncodable { address, length })
}

/// Serialize blocks back into wire form (addressing field + payload each)
pub fn encode_register_blocks(blocks: &[RegisterBlock]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(blocks.iter().map(|b| b.value.len() + 2).sum());
    for block in blocks {
        out.extend_from_slice(&encode_addressing_field(
            block.start_address,
            block.value.len(),
        )?);
        out.extend_from_slice(&block.value);
    }
    Ok(out)
}
