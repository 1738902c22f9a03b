pub mod cause;
pub mod record;

pub use cause::*;
pub use record::*;
