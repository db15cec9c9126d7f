//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Load templates (fatal on error) → Bind → Serve
//!
//! Shutdown:
//!     signals.rs (SIGTERM/SIGINT) or shutdown.rs (programmatic trigger)
//!     → stop accepting → finish in-flight requests → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
