//! Falling box simulation
//!
//! Boxes spawn at the top of a perspective camera's view, fall, bounce on a
//! floor mirrored below the view, and are removed once they come to rest.
//! Drawing is delegated to a [`Renderer`].

pub mod components;
pub mod config;
pub mod frustum;
pub mod params;
pub mod render;
pub mod resources;
pub mod simulator;
pub mod systems;

pub use components::*;
pub use config::*;
pub use frustum::*;
pub use params::*;
pub use render::*;
pub use resources::*;
pub use simulator::*;
