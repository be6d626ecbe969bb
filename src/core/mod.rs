// src/core/mod.rs

//! Tokenizing an argument vector and turning it into typed commands.

pub mod constructor;
pub mod dispatcher;
pub mod tokenizer;
