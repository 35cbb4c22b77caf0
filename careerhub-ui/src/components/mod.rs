//! UI Components

pub mod header;

pub use header::Header;
