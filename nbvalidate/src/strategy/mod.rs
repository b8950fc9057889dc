//! Input strategies.
//!
//! Only streaming input (`reader` module) exists today: the CLI hands it
//! standard input, tests hand it byte slices. The engine itself works on
//! text already in memory, so further sources plug in here without touching it.

pub mod reader;
