//! Integration tests for the hyperparameter system
//!
//! These tests load the fixtures in `test-resources/hyperparam` and exercise
//! validation, path access and bulk updates.

// Tests for the Hyperparam descriptor
mod param_tests;

// Tests for models and sets
mod model_tests;

// Tests for dotted path access
mod path_tests;
