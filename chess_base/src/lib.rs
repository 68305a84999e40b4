//! # Base types for chessreplay
//!
//! This is an auxiliary crate for `chessreplay`, which contains the plain value types: squares,
//! colors, piece kinds, movement tables and square sets.
//!
//! Normally you don't want to use this crate directly. Use `chessreplay` instead.

pub mod geometry;
pub mod squareset;
pub mod types;
