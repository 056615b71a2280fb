// Library interface for mentor-cli
// This allows integration tests to access internal modules

// NOTE: The modules are also declared in main.rs, so they are referenced by
// path here to avoid "file loaded multiple times" errors.

#[path = "commands.rs"]
pub mod commands;

#[path = "render.rs"]
pub mod render;

#[path = "app.rs"]
pub mod app;

// Re-export commonly used items for easier testing
pub use app::{execute, Flow};
pub use commands::{handle_command, CommandResult};
