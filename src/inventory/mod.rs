//! Discovery, sizing, retention and removal of toolchain artifacts.
pub mod manifest;
pub mod removal;
pub mod retention;
pub mod scanner;
pub mod size;
pub mod version;

#[cfg(test)]
mod tests;
