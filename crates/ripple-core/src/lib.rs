pub mod broadcast;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod delay;
pub mod geometry;
pub mod grid;
pub mod motion;
pub mod ripple;
pub mod session;
pub mod visuals;

pub use broadcast::*;
pub use config::*;
pub use cursor::*;
pub use delay::*;
pub use geometry::*;
pub use grid::*;
pub use motion::*;
pub use ripple::*;
pub use session::*;
pub use visuals::*;
