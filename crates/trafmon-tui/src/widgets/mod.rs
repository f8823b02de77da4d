//! Reusable formatting helpers for screens.

pub mod bytes_fmt;
