//! Static locale rule tables: word classes for name casing, street
//! directionals, the country table, per-country postal-code rules, and the
//! phone region metadata backing the built-in phone capability.
//!
//! Everything in this crate is reference data plus lookup helpers; the
//! behavior that consumes it lives in `crmnorm-rules`.

#![deny(unsafe_code)]

pub mod countries;
pub mod names;
pub mod phone_regions;
pub mod postal;
pub mod street;

pub use crate::countries::{country_name, iso_code};
pub use crate::phone_regions::{RegionMetadata, region_metadata, region_for_calling_code};
pub use crate::postal::{PostalRule, postal_rule, validate_postal};
pub use crate::street::uppercase_directionals;
