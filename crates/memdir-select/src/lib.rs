//! Dependent hierarchical selectors.
//!
//! Two instances of the same pattern back the directory's custom form
//! controls: the three-level Thai address selector and the Buddhist-Era
//! date selector. Each owns its selection state exclusively, consumes
//! read-only reference tables, and talks to its host form through the
//! [`FormControl`] contract. Selectors never return errors across that
//! boundary; malformed input degrades to cleared slots.

pub mod address;
pub mod control;
pub mod date;
pub mod tables;

pub use address::AddressSelector;
pub use control::{ChangeFn, EmitTiming, FormControl, HostBinding, TouchedFn};
pub use date::DateSelector;
pub use tables::TableSlot;
