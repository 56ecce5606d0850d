//! Dropfolio - an interactive 3D portfolio sandbox.
//!
//! Decorative objects rain onto a tilted floor where they can be grabbed,
//! dragged, and blasted around with click shockwaves. Pulling the mode lever
//! swings the floor open on its hinges, drops everything into the void, and
//! swaps the scene between the "work" and "personal" catalogs.

pub mod sandbox;
