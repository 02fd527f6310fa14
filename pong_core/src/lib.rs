pub mod category;
pub mod components;
pub mod display;
pub mod error;
pub mod field;
pub mod game;
pub mod input;
pub mod layout;
pub mod params;
pub mod physics;
pub mod resources;
pub mod serve;
pub mod systems;

pub use category::*;
pub use display::*;
pub use error::*;
pub use field::*;
pub use game::*;
pub use input::*;
pub use layout::*;
pub use params::*;
pub use physics::*;
pub use resources::*;
pub use serve::*;
