// src/resilience/tests/mod.rs
//! Tests for store retry behaviour
