//! In-memory member directory: import, validation, rendering, and the
//! searchable, paginated listing.

pub mod import;
pub mod render;
pub mod validate;
pub mod view;

pub use import::{RosterError, load_roster_csv, load_roster_json};
pub use render::full_address;
pub use validate::validate_member;
pub use view::{DEFAULT_PER_PAGE, RosterView, SortDirection};
