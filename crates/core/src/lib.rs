#![forbid(unsafe_code)]

pub mod error;
pub mod memory_aid;
pub mod model;
pub mod time;

pub use error::Error;
pub use memory_aid::memory_aid;
pub use time::Clock;
