//! Embedded language tests
//!
//! Each schema language through the public parser interface.

pub mod tests_languages;
