//! Terminal event loop for the upload form.
//!
//! # Responsibility
//! - Deliver one input line at a time to the workflow.
//! - Wake up for due notice timers without blocking on input.
//! - Render the form after anything visible changed.
//!
//! # Invariants
//! - All workflow calls happen on the loop thread; the reader thread only
//!   forwards raw lines.

use crate::command::{parse_command, Command, HELP_TEXT};
use crate::render::{render, render_notice};
use mdnote_core::{Dispatch, NoteGateway, UploadWorkflow};
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// Runs the form until `quit` or end of input.
pub fn run<G: NoteGateway, W: Write>(
    workflow: &mut UploadWorkflow<G>,
    out: &mut W,
) -> std::io::Result<()> {
    let lines = spawn_stdin_reader();
    run_with_lines(workflow, lines, out)
}

/// Event loop over an arbitrary line source.
pub fn run_with_lines<G: NoteGateway, W: Write>(
    workflow: &mut UploadWorkflow<G>,
    lines: Receiver<String>,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "Upload markdown file (type `help` for commands)")?;
    writeln!(out, "{}", render(&workflow.view()))?;

    loop {
        let wait = workflow
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_WAIT);

        match lines.recv_timeout(wait) {
            Ok(line) => {
                if !handle_line(workflow, &line, out)? {
                    return Ok(());
                }
            }
            Err(RecvTimeoutError::Timeout) => advance_and_render(workflow, out)?,
            Err(RecvTimeoutError::Disconnected) => {
                // Input closed: let a pending upload and its outcome finish.
                while let Some(deadline) = workflow.next_deadline() {
                    thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    advance_and_render(workflow, out)?;
                }
                return Ok(());
            }
        }
        out.flush()?;
    }
}

fn advance_and_render<G: NoteGateway, W: Write>(
    workflow: &mut UploadWorkflow<G>,
    out: &mut W,
) -> std::io::Result<()> {
    if !workflow.advance(Instant::now()).is_empty() {
        writeln!(out, "{}", render(&workflow.view()))?;
    }
    Ok(())
}

/// Handles one line. Returns `false` when the shell should exit.
fn handle_line<G: NoteGateway, W: Write>(
    workflow: &mut UploadWorkflow<G>,
    line: &str,
    out: &mut W,
) -> std::io::Result<bool> {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(true);
        }
    };

    match command {
        Command::Quit => return Ok(false),
        Command::Help => writeln!(out, "{HELP_TEXT}")?,
        Command::Show => writeln!(out, "{}", render(&workflow.view()))?,
        Command::Workflow(event) => {
            let now = Instant::now();
            workflow.advance(now);
            let mut raised = workflow.drain_raised();
            let dispatch = workflow.dispatch(event, now);
            raised.extend(workflow.drain_raised());
            for notice in raised {
                writeln!(out, "{}", render_notice(&notice))?;
            }
            match dispatch {
                Dispatch::Rejected { step, event } => writeln!(
                    out,
                    "`{}` is not available while {}",
                    event.as_str(),
                    step.as_str()
                )?,
                Dispatch::Moved { .. } | Dispatch::Held(_) => {
                    writeln!(out, "{}", render(&workflow.view()))?
                }
            }
        }
    }
    Ok(true)
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}
