//! Foundation types for picosh.
//!
//! This crate contains the types shared by every picosh crate: the error
//! enum, the shell configuration, and the key codes a console can deliver.

pub mod config;
pub mod error;
pub mod input;
