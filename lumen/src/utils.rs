mod bounds;
mod metrics;

pub use self::bounds::*;
pub use self::metrics::*;
