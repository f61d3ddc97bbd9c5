//! An in-memory hierarchical filesystem over a fixed pool of node slots,
//! the core of an interactive teaching shell. Slots are handed out by index
//! and never reclaimed; paths resolve with POSIX-like segment rules; an
//! explicit session value tracks the working directory.

pub mod arena;
pub mod fs;
