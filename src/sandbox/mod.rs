//! Sandbox module
//!
//! Everything that makes up the 3D sandbox scene, organized by concern:
//!
//! - `types`: components, resources, and the pure bookkeeping state machines
//! - `meshes`: procedural meshes and colliders for catalog entries
//! - `textures`: procedural floor/sphere texture sets
//! - `preload`: the loading state that generates textures before the scene mounts
//! - `storage`: the on-disk key/value store backing one-time hints
//! - `systems`: the per-frame Bevy systems

pub mod meshes;
pub mod preload;
pub mod storage;
pub mod systems;
pub mod textures;
pub mod types;

pub use preload::*;
pub use storage::*;
pub use systems::*;
pub use textures::*;
pub use types::*;
