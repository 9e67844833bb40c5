pub mod collision;
pub mod movement;
pub mod settle;
pub mod spawn;

pub use collision::*;
pub use movement::*;
pub use settle::*;
pub use spawn::*;
