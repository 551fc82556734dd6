// TULIP3 register engine: lookups, block framing and evaluation
pub mod block;
pub mod cache;
pub mod configuration;
pub mod decoder;
pub mod evaluator;
pub mod identification;
pub mod lookup;

pub use block::{
    encode_addressing_field, encode_register_blocks, parse_register_blocks, BlockError,
    DecodeOptions, RegisterBlock,
};
pub use cache::{configuration_lookup, identification_lookup, lookup_for};
pub use configuration::build_configuration_lookup;
pub use decoder::{DecodeError, EnumTable, RegisterDecoder};
pub use evaluator::{decode_register_read, evaluate_register_blocks, EvaluationError};
pub use identification::build_identification_lookup;
pub use lookup::{LookupSlot, RegisterEntry, RegisterGuard, RegisterLookup};
