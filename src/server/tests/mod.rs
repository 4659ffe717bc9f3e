// src/server/tests/mod.rs
//! Tests for the HTTP surface
