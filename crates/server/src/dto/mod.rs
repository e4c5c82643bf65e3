mod schedule;
mod stop;

pub use schedule::*;
pub use stop::*;
