// Process-wide lookups, built on first use and shared read-only afterwards

use super::configuration::build_configuration_lookup;
use super::identification::build_identification_lookup;
use super::lookup::RegisterLookup;
use crate::core::constants::ResourceFamily;
use std::sync::Arc;

// The address maps do not depend on the device profile, so one instance per family serves
// every profile.
lazy_static::lazy_static! {
    static ref IDENTIFICATION_LOOKUP: Arc<RegisterLookup> =
        Arc::new(build_identification_lookup(None));
    static ref CONFIGURATION_LOOKUP: Arc<RegisterLookup> =
        Arc::new(build_configuration_lookup(None));
}

/// Shared identification lookup
pub fn identification_lookup() -> Arc<RegisterLookup> {
    Arc::clone(&IDENTIFICATION_LOOKUP)
}

/// Shared configuration lookup
pub fn configuration_lookup() -> Arc<RegisterLookup> {
    Arc::clone(&CONFIGURATION_LOOKUP)
}

/// Shared lookup of @family
pub fn lookup_for(family: ResourceFamily) -> Arc<RegisterLookup> {
    match family {
        ResourceFamily::Identification => identification_lookup(),
        ResourceFamily::Configuration => configuration_lookup(),
    }
}
