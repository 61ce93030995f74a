mod click;
mod pointer;
mod resize;

pub use click::wire_triggers;
pub use pointer::wire_pointer;
pub use resize::{fit_engine, wire_resize};
