//! Driven adapters: implementations of domain ports against external
//! infrastructure.

pub mod persistence;
