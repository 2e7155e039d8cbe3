//! Command gate: dangerous-pattern detection, confirmation and execution.
//!
//! A command goes through at most three steps:
//! `PENDING -> (dangerous? -> CONFIRM -> {PROCEED | ABORT}) -> RUN -> {SUCCESS | FAILURE}`.
//! [`ExecutionOutcome`] records which terminal state was reached and maps it
//! to the exit status the CLI reports.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, warn};

/// Substrings that mark a command as potentially destructive.
pub const DANGEROUS_PATTERNS: &[&str] = &[
    "rm -rf",
    "rm -r",
    "rm -f",
    "rmrf",
    "format",
    "mkfs",
    "dd if=",
    "> /dev/sd",
    "shutdown",
    "reboot",
    "halt",
    "poweroff",
];

/// Exit status reported when the user interrupts a running command.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Case-insensitive check against [`DANGEROUS_PATTERNS`].
pub fn is_dangerous(command: &str) -> bool {
    let command = command.to_lowercase();
    DANGEROUS_PATTERNS.iter().any(|pattern| command.contains(pattern))
}

/// Asks the user a yes/no question.
pub trait Confirm {
    /// Returns `true` only on an explicit yes.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Interactive prompt on stderr/stdin; anything but `y`/`yes` declines.
pub struct TerminalPrompt;

impl Confirm for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> bool {
        eprint!("{} [y/N]: ", question);
        if io::stderr().flush().is_err() {
            return false;
        }

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) => false,
            Ok(_) => matches!(input.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

/// Terminal state of one [`execute`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The user declined to run a dangerous command.
    Aborted,
    /// The command ran to completion with this status.
    Exited(i32),
    /// The user interrupted the running command.
    Interrupted,
    /// The shell could not be started or waited on.
    Failed(String),
}

impl ExecutionOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecutionOutcome::Aborted => 1,
            ExecutionOutcome::Exited(code) => *code,
            ExecutionOutcome::Interrupted => INTERRUPTED_EXIT_CODE,
            ExecutionOutcome::Failed(_) => 1,
        }
    }
}

/// Run `command` in a subordinate shell, asking first if `confirm` is set and
/// the command looks dangerous.
pub async fn execute(command: &str, confirm: bool, prompt: &mut dyn Confirm) -> ExecutionOutcome {
    if confirm && is_dangerous(command) {
        eprintln!("{}", "⚠️  Warning: This command may be dangerous!".yellow());
        eprintln!("{}", format!("Command: {}", command).yellow());

        if !prompt.confirm("Do you want to proceed?") {
            eprintln!("Aborted.");
            return ExecutionOutcome::Aborted;
        }
    }

    let outcome = run(command).await;
    match &outcome {
        ExecutionOutcome::Interrupted => eprintln!("\nInterrupted."),
        ExecutionOutcome::Failed(reason) => {
            eprintln!("{}", format!("Error executing command: {}", reason).red())
        }
        _ => {}
    }
    outcome
}

async fn run(command: &str) -> ExecutionOutcome {
    debug!("Executing: {}", command);

    let mut child = match shell(command).spawn() {
        Ok(child) => child,
        Err(e) => return ExecutionOutcome::Failed(e.to_string()),
    };

    let interrupted = tokio::select! {
        status = child.wait() => return finished(status),
        signal = tokio::signal::ctrl_c() => signal.is_ok(),
    };

    if !interrupted {
        // No Ctrl+C listener could be installed; just wait for the child.
        return finished(child.wait().await);
    }

    if let Err(e) = child.start_kill() {
        debug!("Child already gone after interrupt: {}", e);
    }
    let _ = child.wait().await;
    ExecutionOutcome::Interrupted
}

fn finished(status: io::Result<ExitStatus>) -> ExecutionOutcome {
    match status {
        Ok(status) => ExecutionOutcome::Exited(status_code(status)),
        Err(e) => ExecutionOutcome::Failed(e.to_string()),
    }
}

/// Exit code of the child; a signal-terminated child maps to `128 + signal`.
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd.stdin(Stdio::inherit()).stdout(Stdio::inherit()).stderr(Stdio::inherit());
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd.stdin(Stdio::inherit()).stdout(Stdio::inherit()).stderr(Stdio::inherit());
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Answer {
        reply: bool,
        asked: usize,
    }

    impl Confirm for Answer {
        fn confirm(&mut self, _question: &str) -> bool {
            self.asked += 1;
            self.reply
        }
    }

    #[test]
    fn test_dangerous_patterns() {
        assert!(is_dangerous("sudo rm -rf /"));
        assert!(is_dangerous("SHUTDOWN -h now"));
        assert!(is_dangerous("dd if=/dev/zero of=/dev/sda"));
        assert!(is_dangerous("echo x > /dev/sda"));
        assert!(!is_dangerous("ls -la"));
        assert!(!is_dangerous("git status"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExecutionOutcome::Aborted.exit_code(), 1);
        assert_eq!(ExecutionOutcome::Exited(7).exit_code(), 7);
        assert_eq!(ExecutionOutcome::Interrupted.exit_code(), 130);
        assert_eq!(ExecutionOutcome::Failed("boom".into()).exit_code(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_safe_command_runs_without_prompt() {
        let mut prompt = Answer { reply: false, asked: 0 };
        let outcome = execute("exit 3", true, &mut prompt).await;

        assert_eq!(outcome, ExecutionOutcome::Exited(3));
        assert_eq!(prompt.asked, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_declined_command_does_not_run() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("marker");
        let command = format!("echo shutdown > {}", marker.display());

        let mut prompt = Answer { reply: false, asked: 0 };
        let outcome = execute(&command, true, &mut prompt).await;

        assert_eq!(outcome, ExecutionOutcome::Aborted);
        assert_eq!(prompt.asked, 1);
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_confirmed_command_runs() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("marker");
        let command = format!("echo shutdown > {}", marker.display());

        let mut prompt = Answer { reply: true, asked: 0 };
        let outcome = execute(&command, true, &mut prompt).await;

        assert_eq!(outcome, ExecutionOutcome::Exited(0));
        assert!(marker.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_no_confirm_skips_prompt() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("marker");
        let command = format!("echo reboot > {}", marker.display());

        let mut prompt = Answer { reply: false, asked: 0 };
        let outcome = execute(&command, false, &mut prompt).await;

        assert_eq!(outcome, ExecutionOutcome::Exited(0));
        assert_eq!(prompt.asked, 0);
        assert!(marker.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_exit_maps_to_128_plus_signal() {
        let mut prompt = Answer { reply: false, asked: 0 };
        let outcome = execute("kill -TERM $$", false, &mut prompt).await;

        assert_eq!(outcome, ExecutionOutcome::Exited(128 + 15));
    }
}
