//! Command execution

use crate::backend::Invocation;
use std::io;
use std::process::Command;

/// Runs backend commands
pub trait CommandRunner {
    /// Run `invocation` to completion; `Ok(false)` when it exits unsuccessfully
    fn run(&mut self, invocation: &Invocation) -> io::Result<bool>;

    /// Whether commands actually execute (false for dry runs)
    fn executes(&self) -> bool {
        true
    }
}

/// Spawns real processes, inheriting stdio so tool output stays visible
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<bool> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }
        let status = command.status()?;
        Ok(status.success())
    }
}

/// Prints commands instead of running them
#[derive(Debug, Default)]
pub struct DryRunner;

impl CommandRunner for DryRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<bool> {
        println!("{invocation}");
        Ok(true)
    }

    fn executes(&self) -> bool {
        false
    }
}
