#![deny(unsafe_code)]

pub mod doctor;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod paths;
pub mod registry;

pub use crate::doctor::DoctorReport;
pub use crate::error::GazetteerError;
pub use crate::paths::{GAZETTEER_ENV_VAR, gazetteer_root};
pub use crate::registry::{GazetteerRegistry, ResolvedAddress};
