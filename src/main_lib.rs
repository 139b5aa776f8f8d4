// Library module containing testable functions from main.rs

use std::fs;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::command::Command;
use crate::drawer::Drawer;
use crate::error::Result;
use crate::executor::{ExecutionResult, Executor};
use crate::library::Library;
use crate::notification::schedule_expiry;

/// Write `content` to `output_path`, or to stdout when no path is given
fn emit(content: &str, output_path: Option<&str>, what: &str) -> Result<()> {
    match output_path {
        Some(path) => {
            fs::write(path, content)?;
            println!("{} saved to: {}", what, path);
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Apply each command in order and return the final snapshot as JSON
pub fn apply_commands(drawer: &mut Drawer, commands: &[String]) -> Result<String> {
    for command_str in commands {
        let command: Command = command_str.parse()?;
        let result = Executor::execute(drawer, command);
        if let Some(status) = result.status_message {
            eprintln!("Status: {}", status);
        }
        if let Some(session) = result.session {
            eprintln!(
                "Teaching: {} ({} materials)",
                session.lesson_title,
                session.materials.len()
            );
        }
    }
    Ok(serde_json::to_string_pretty(&drawer.snapshot())?)
}

pub fn execute_commands(
    drawer: &mut Drawer,
    commands: &[String],
    output_path: Option<&str>,
) -> Result<()> {
    let state_json = apply_commands(drawer, commands)?;
    emit(&state_json, output_path, "Result")
}

pub fn dump_library(library: &Library, output_path: Option<&str>) -> Result<()> {
    emit(&library.to_json()?, output_path, "Library")
}

/// Interactive driver: one command per line, state printed after each.
///
/// Toast timers run as one-shot tasks and report back through a channel;
/// the drawer drops reports for toasts that were already replaced.
pub async fn run_interactive<R, W>(
    drawer: &mut Drawer,
    input: R,
    out: &mut W,
    toast_lifetime: Duration,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (expiry_sender, mut expiry_receiver) = mpsc::unbounded_channel::<u64>();
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    log::info!("Input closed, leaving");
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "quit" || line == "q" {
                    break;
                }

                let before = drawer.toast().map(|toast| toast.generation);
                let result = match line.parse::<Command>() {
                    Ok(command) => Executor::execute(drawer, command),
                    Err(e) => ExecutionResult {
                        status_message: Some(e.to_string()),
                        ..ExecutionResult::default()
                    },
                };

                if let Some(toast) = drawer.toast() {
                    if Some(toast.generation) != before {
                        schedule_expiry(expiry_sender.clone(), toast.generation, toast_lifetime);
                    }
                }

                if let Some(status) = &result.status_message {
                    writeln!(out, "# {}", status)?;
                }
                if let Some(session) = &result.session {
                    writeln!(out, "# teaching: {}", serde_json::to_string(session)?)?;
                }
                writeln!(out, "{}", serde_json::to_string_pretty(&drawer.snapshot())?)?;
            }
            Some(generation) = expiry_receiver.recv() => {
                if drawer.expire_toast(generation) {
                    writeln!(out, "# toast cleared")?;
                }
            }
        }
    }

    Ok(())
}
