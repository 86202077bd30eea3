//! Command implementations.

pub mod extract;
pub mod lines;
pub mod lookup;
pub mod profile;

pub use self::extract::execute_extract;
pub use self::lines::execute_lines;
pub use self::lookup::execute_lookup;
pub use self::profile::execute_profile;
