// Persistent interpreter session
// One interpreter stays alive across queries; commands are fed through its
// stdin and replies are delimited by a sentinel line carrying the
// interpreter's own status flag. `$?` interpolates to `True`/`False` in
// PowerShell and to a numeric code in POSIX sh, so one protocol drives
// both.

use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use hostfacts_core::application::constants::GRACEFUL_SHUTDOWN_TIMEOUT_MS;
use hostfacts_core::port::script_runner::ScriptError;
use hostfacts_core::port::ScriptSession;

use crate::config::ShellConfig;

/// Sentinel prefix delimiting one command's output from the next.
/// Queries must not print lines starting with this token.
const SENTINEL: &str = "__hostfacts_rc__";

/// A live interpreter process owned by exactly one caller
///
/// Teardown is guaranteed on every exit path: `close` walks an
/// exit-request / SIGTERM / SIGKILL ladder, and `kill_on_drop` covers
/// panics and early returns that skip `close`.
pub struct ShellSession {
    id: Uuid,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    stderr_buf: Arc<Mutex<String>>,
    stderr_task: JoinHandle<()>,
}

impl ShellSession {
    /// Spawn the interpreter and keep it alive until `close` or drop.
    pub fn open(config: &ShellConfig) -> Result<Self, ScriptError> {
        let mut child = Command::new(&config.program)
            .args(&config.session_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ScriptError::LaunchFailure {
                command: format!("{} (session)", config.program),
                source,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ScriptError::SessionClosed("stdin pipe missing".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ScriptError::SessionClosed("stdout pipe missing".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ScriptError::SessionClosed("stderr pipe missing".to_string()))?;

        // stderr drains continuously: a chatty interpreter must never
        // wedge on a full pipe between queries.
        let stderr_buf = Arc::new(Mutex::new(String::new()));
        let stderr_task = {
            let buf = Arc::clone(&stderr_buf);
            tokio::spawn(async move {
                let mut reader = BufReader::new(stderr);
                let mut line = String::new();
                loop {
                    line.clear();
                    match reader.read_line(&mut line).await {
                        Ok(0) | Err(_) => break,
                        Ok(_) => buf.lock().unwrap().push_str(&line),
                    }
                }
            })
        };

        let id = Uuid::new_v4();
        info!(session = %id, program = %config.program, "Interpreter session opened");

        Ok(Self {
            id,
            child,
            stdin,
            stdout: BufReader::new(stdout),
            stderr_buf,
            stderr_task,
        })
    }

    /// Ask the interpreter to exit; escalate to a kill if it lingers.
    pub async fn close(mut self) {
        let _ = self.stdin.write_all(b"exit\n").await;
        let _ = self.stdin.flush().await;
        let _ = self.stdin.shutdown().await;

        let grace = Duration::from_millis(GRACEFUL_SHUTDOWN_TIMEOUT_MS as u64);
        match tokio::time::timeout(grace, self.child.wait()).await {
            Ok(_) => info!(session = %self.id, "Interpreter session closed"),
            Err(_) => {
                warn!(session = %self.id, "Interpreter ignored exit request; escalating");
                self.terminate().await;
            }
        }
    }

    fn take_stderr(&self) -> String {
        std::mem::take(&mut *self.stderr_buf.lock().unwrap())
    }

    /// Snapshot stderr for a failed command. The error stream arrives on
    /// its own pipe and can trail the stdout sentinel, so wait a bounded
    /// moment for the drain task to catch up.
    async fn settle_stderr(&self) -> String {
        let mut stderr = self.take_stderr();
        let mut attempts = 0;
        while stderr.is_empty() && attempts < 20 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            stderr.push_str(&self.take_stderr());
            attempts += 1;
        }
        stderr
    }

    #[cfg(unix)]
    async fn terminate(&mut self) {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let grace = Duration::from_millis(GRACEFUL_SHUTDOWN_TIMEOUT_MS as u64);
        if let Some(pid) = self.child.id() {
            let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
            if tokio::time::timeout(grace, self.child.wait()).await.is_ok() {
                return;
            }
            warn!(session = %self.id, "SIGTERM ignored, sending SIGKILL");
        }
        let _ = self.child.start_kill();
        let _ = self.child.wait().await;
    }

    #[cfg(not(unix))]
    async fn terminate(&mut self) {
        let _ = self.child.start_kill();
        let _ = self.child.wait().await;
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        // Child cleanup is kill_on_drop; only the drain task needs help.
        self.stderr_task.abort();
    }
}

#[async_trait]
impl ScriptSession for ShellSession {
    async fn run(&mut self, command: &str) -> Result<String, ScriptError> {
        // Forget diagnostics left over from earlier commands.
        let _ = self.take_stderr();

        let feed = format!("{command}\necho \"{SENTINEL} $?\"\n");
        self.stdin
            .write_all(feed.as_bytes())
            .await
            .map_err(|e| ScriptError::SessionClosed(e.to_string()))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| ScriptError::SessionClosed(e.to_string()))?;

        let mut captured = String::new();
        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .stdout
                .read_line(&mut line)
                .await
                .map_err(|e| ScriptError::SessionClosed(e.to_string()))?;
            if n == 0 {
                return Err(ScriptError::SessionClosed(
                    "interpreter exited mid-command".to_string(),
                ));
            }

            if let Some(flag) = line.trim_end().strip_prefix(SENTINEL) {
                let flag = flag.trim();
                let ok = flag == "0" || flag == "True";
                debug!(session = %self.id, ok, bytes = captured.len(), "Session command finished");
                if ok {
                    return Ok(captured);
                }
                return Err(ScriptError::NonZeroExit {
                    code: flag.parse::<i32>().unwrap_or(-1),
                    stdout: captured,
                    stderr: self.settle_stderr().await,
                });
            }

            captured.push_str(&line);
        }
    }
}
