//! Command line interface: argument definitions and terminal output.

pub mod args;
pub mod output;
