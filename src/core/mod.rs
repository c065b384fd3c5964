// Public modules
pub mod check;
pub mod config;
pub mod error;
pub mod executor;
pub mod fallback;
pub mod image;
pub mod registry;
pub mod rollout;

// Re-export common types for convenience
pub use config::Toolchain;
pub use error::{Error, ErrorCode, Result};
pub use executor::{
    CommandExecutor, CommandRunner, ExecutionMode, ProcessOutput, StepRecord, StepStatus,
    SystemExecutor,
};
pub use image::ImageRef;
