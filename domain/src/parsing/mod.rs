//! Parsing of free-form model output.
//!
//! Pure domain logic: no I/O, only text scanning and JSON decoding.

pub mod json;
