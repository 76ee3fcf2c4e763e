pub mod unit;
pub mod dense;

pub use unit::{Connection, Unit};
pub use dense::Layer;
