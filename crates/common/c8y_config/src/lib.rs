mod dto;
mod error;
mod location;
mod sources;

pub use dto::*;
pub use error::*;
pub use location::*;
pub use sources::config_key;
pub use sources::UnusedValueWarnings;
