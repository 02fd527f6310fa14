pub mod movement;
pub mod reset;
pub mod scoring;

pub use movement::*;
pub use reset::*;
pub use scoring::*;
