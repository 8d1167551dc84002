#![forbid(unsafe_code)]

pub mod cli;
pub mod command;
pub mod shell;
pub mod vm;

pub use cli::{Cli, DEFAULT_LOG_FILTER};
pub use command::{Command, CommandError};
pub use shell::{Flow, Shell, ShellError};
