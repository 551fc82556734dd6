// Register block evaluation: walk blocks against a lookup and build the nested result

use super::block::{parse_register_blocks, DecodeOptions, RegisterBlock};
use super::decoder::DecodeError;
use super::lookup::{LookupSlot, RegisterLookup};
use crate::core::path::set_at_path;
use crate::error::Result;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Unknown register address 0x{address:03X}; known addresses: {known}")]
    UnknownRegister { address: u16, known: String },

    #[error("{message}")]
    GuardedRegister { address: u16, message: &'static str },

    #[error(
        "Register 0x{address:03X} ({path}) needs {needed} bytes \
         but only {remaining} remain in the block"
    )]
    InsufficientBytes {
        address: u16,
        path: String,
        needed: usize,
        remaining: usize,
    },

    #[error("Failed to decode register 0x{address:03X} ({path}) from bytes {raw:02X?}: {source}")]
    Decode {
        address: u16,
        path: String,
        raw: Vec<u8>,
        source: DecodeError,
    },
}

/// Evaluate @blocks in order against @lookup, accumulating into one object
///
/// Each block is consumed register by register from its start address and must be used up
/// exactly. Paths written by several blocks keep the last value.
pub fn evaluate_register_blocks(
    lookup: &RegisterLookup,
    blocks: &[RegisterBlock],
) -> std::result::Result<Value, EvaluationError> {
    let mut result = Map::new();

    for block in blocks {
        let mut address = block.start_address;
        let mut remaining: &[u8] = &block.value;

        while !remaining.is_empty() {
            let entry = match lookup.get(address) {
                Some(LookupSlot::Register(entry)) => entry,
                Some(LookupSlot::Guard(guard)) => {
                    return Err(EvaluationError::GuardedRegister {
                        address,
                        message: guard.message,
                    })
                }
                None => {
                    return Err(EvaluationError::UnknownRegister {
                        address,
                        known: lookup.known_addresses(),
                    })
                }
            };

            if remaining.len() < entry.size {
                return Err(EvaluationError::InsufficientBytes {
                    address,
                    path: entry.path.clone(),
                    needed: entry.size,
                    remaining: remaining.len(),
                });
            }

            let (raw, rest) = remaining.split_at(entry.size);
            let value = entry
                .decoder
                .decode(raw)
                .map_err(|source| EvaluationError::Decode {
                    address,
                    path: entry.path.clone(),
                    raw: raw.to_vec(),
                    source,
                })?;

            tracing::debug!("Register 0x{:03X} {} = {}", address, entry.path, value);
            set_at_path(&mut result, &entry.path, value);

            remaining = rest;
            address += entry.size as u16;
        }
    }

    Ok(Value::Object(result))
}

/// Parse the register blocks of a read message and decode them against @lookup
pub fn decode_register_read(
    data: &[u8],
    lookup: &RegisterLookup,
    options: &DecodeOptions,
) -> Result<Value> {
    let blocks = parse_register_blocks(data, options)?;
    Ok(evaluate_register_blocks(lookup, &blocks)?)
}
