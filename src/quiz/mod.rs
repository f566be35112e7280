//! Quiz variants and question generation
//!
//! This module contains the configuration that describes a quiz variant
//! and the rules used to turn catalog entries into questions.

pub mod config;
pub mod question;
