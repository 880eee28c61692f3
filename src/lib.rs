//! A real-time 3D orrery: a luminous sun and its planets on circular orbits,
//! with per-planet speed sliders, pause/resume and a damped orbit camera.
//!
//! The simulation ([`sim`]) is independent of the window and can be driven
//! headless through a [`time::FrameSource`] and a [`sim::RenderSink`].

mod assets;
pub mod cfg;
pub mod control;
mod gfx;
mod gui;
mod keybinds;
mod program;
pub mod sim;
pub mod time;

pub use program::{StartupError, run};
