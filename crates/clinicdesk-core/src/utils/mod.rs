//! Utility functions for normalizing user input.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{
    capitalize_name, digits_only, format_cpf, format_cro, format_email, format_phone,
    format_specialty,
};
