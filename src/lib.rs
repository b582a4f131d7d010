//! Makeshow core library.
//!
//! Shows the definitions of Makefile targets and, on request, the definitions
//! of everything they transitively depend on, prerequisites first. The build
//! file is only read, never executed.
//!
//! The pipeline is [`parser::load_and_flatten`] →
//! [`parser::TargetTable::from_lines`] → [`chain::resolve_chain`], with
//! [`runner::run`] wiring it to the command line.

pub mod chain;
pub mod cli;
pub mod color_mode;
pub mod highlight;
pub mod parser;
pub mod render;
pub mod runner;
