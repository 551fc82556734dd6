// Address-keyed register lookup: gives meaning to raw register bytes

use super::decoder::RegisterDecoder;
use std::collections::BTreeMap;

/// A decodable register
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterEntry {
    /// Dotted path the decoded value is written to
    pub path: String,
    pub size: usize,
    pub decoder: RegisterDecoder,
}

/// A register that exists but must never appear in a read response
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterGuard {
    pub size: usize,
    pub message: &'static str,
}

/// What lives at a lookup address
#[derive(Debug, Clone, PartialEq)]
pub enum LookupSlot {
    Register(RegisterEntry),
    Guard(RegisterGuard),
}

impl LookupSlot {
    pub fn size(&self) -> usize {
        match self {
            LookupSlot::Register(entry) => entry.size,
            LookupSlot::Guard(guard) => guard.size,
        }
    }
}

/// One field of a register region layout, relative to the region base
#[derive(Debug, Clone, Copy)]
pub struct RegisterField {
    pub offset: u16,
    pub name: &'static str,
    pub decoder: RegisterDecoder,
}

impl RegisterField {
    pub const fn new(offset: u16, name: &'static str, decoder: RegisterDecoder) -> Self {
        Self {
            offset,
            name,
            decoder,
        }
    }
}

/// One write-only register of a region layout, relative to the region base
#[derive(Debug, Clone, Copy)]
pub struct GuardField {
    pub offset: u16,
    pub size: usize,
    pub message: &'static str,
}

/// Immutable address -> slot table over the 11-bit register space
///
/// Built once and shared; nothing mutates it after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterLookup {
    slots: BTreeMap<u16, LookupSlot>,
}

impl RegisterLookup {
    pub fn get(&self, address: u16) -> Option<&LookupSlot> {
        self.slots.get(&address)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate slots in address order
    pub fn iter(&self) -> impl Iterator<Item = (u16, &LookupSlot)> {
        self.slots.iter().map(|(address, slot)| (*address, slot))
    }

    /// Find the register written to @path
    pub fn find_path(&self, path: &str) -> Option<(u16, &RegisterEntry)> {
        self.iter().find_map(|(address, slot)| match slot {
            LookupSlot::Register(entry) if entry.path == path => Some((address, entry)),
            _ => None,
        })
    }

    /// Contiguous address ranges covered by slots, as `[start, end)` pairs
    pub fn address_ranges(&self) -> Vec<(u16, u16)> {
        let mut ranges: Vec<(u16, u16)> = Vec::new();
        for (address, slot) in self.iter() {
            let end = address + slot.size() as u16;
            match ranges.last_mut() {
                Some(last) if last.1 == address => last.1 = end,
                _ => ranges.push((address, end)),
            }
        }
        ranges
    }

    /// Human readable list of the known register addresses
    pub fn known_addresses(&self) -> String {
        self.address_ranges()
            .iter()
            .map(|(start, end)| {
                if end - start == 1 {
                    format!("0x{:03X}", start)
                } else {
                    format!("0x{:03X}-0x{:03X}", start, end - 1)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Accumulates region layouts into a [`RegisterLookup`]
#[derive(Debug, Default)]
pub struct LookupBuilder {
    slots: BTreeMap<u16, LookupSlot>,
}

impl LookupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every field of @fields at @base, under the dotted @prefix
    pub fn region(mut self, base: u16, prefix: &str, fields: &[RegisterField]) -> Self {
        for field in fields {
            self.slots.insert(
                base + field.offset,
                LookupSlot::Register(RegisterEntry {
                    path: format!("{}.{}", prefix, field.name),
                    size: field.decoder.size(),
                    decoder: field.decoder,
                }),
            );
        }
        self
    }

    /// Add guards for write-only registers at @base
    pub fn guards(mut self, base: u16, guards: &[GuardField]) -> Self {
        for guard in guards {
            self.slots.insert(
                base + guard.offset,
                LookupSlot::Guard(RegisterGuard {
                    size: guard.size,
                    message: guard.message,
                }),
            );
        }
        self
    }

    pub fn build(self) -> RegisterLookup {
        RegisterLookup { slots: self.slots }
    }
}
