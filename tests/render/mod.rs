//! Integration tests for the output formats

mod sphinx_tests;
mod table_tests;
