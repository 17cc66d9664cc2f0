//! User interface module - status and warning output on stderr.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_boundary_warnings, display_error, display_release_summary,
    display_status, display_success, format_release_summary,
};
