//! Virtual camera system for priority-based camera control.
//!
//! The follow camera, the tool camera and any tripod camera are all
//! `VirtualCamera` entities. The highest-priority enabled one controls the
//! real render camera, so switching views is a matter of changing
//! priorities.
//!
//! # Priority Conventions
//!
//! | Priority | Use Case |
//! |----------|----------|
//! | -10 | Tool camera while idle |
//! | 0 | Follow camera while a tripod has taken over |
//! | 10 | Follow camera (default) |
//! | 15 | Deployed tripod |
//! | 20 | Tool camera while active |

mod components;
mod resources;
mod systems;

pub use components::VirtualCamera;
pub use resources::ActiveVirtualCamera;
pub use systems::{follow_virtual_camera, select_active_virtual_camera};
