#![forbid(unsafe_code)]

pub mod render;
pub mod vm;
