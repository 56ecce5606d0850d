//! Types module for the sandbox
//!
//! Components, resources, constants, and the pure state machines behind the
//! per-frame systems, organized by concern:
//!
//! - `catalog`: spawnable-object catalogs and the display mode they hang off
//! - `drops`: drop-object bookkeeping (spawner state machine, spawn sampling)
//! - `floating`: floating text and social-icon decor
//! - `floor`: floor geometry and the trap-door state machine
//! - `camera`: orbit-camera state, including the camera-enable flag
//! - `pointer`: pointer interaction state (drag, hover, shockwave math)
//! - `ui`: UI markers, hints, pause state, and cross-system messages

mod camera;
mod catalog;
mod drops;
mod floating;
mod floor;
mod pointer;
mod ui;

pub use camera::*;
pub use catalog::*;
pub use drops::*;
pub use floating::*;
pub use floor::*;
pub use pointer::*;
pub use ui::*;
