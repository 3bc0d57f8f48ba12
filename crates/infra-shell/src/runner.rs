// One-shot interpreter execution
// Streams are drained by dedicated tasks concurrently with the wait: a
// child filling an OS pipe buffer must never be able to stall itself or
// the watchdog.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use hostfacts_core::port::script_runner::{ScriptError, ScriptRunner};
use hostfacts_core::port::TimeProvider;

use crate::config::ShellConfig;

/// Interpreter process runner with a watchdog deadline
///
/// One attempt per call: no retries, no internal recovery. Retry policy
/// belongs to the caller.
pub struct ShellRunner {
    config: ShellConfig,
    time_provider: Arc<dyn TimeProvider>,
}

impl ShellRunner {
    pub fn new(config: ShellConfig, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            config,
            time_provider,
        }
    }

    fn spawn(&self, command: &str) -> Result<Child, ScriptError> {
        Command::new(&self.config.program)
            .args(&self.config.one_shot_args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ScriptError::LaunchFailure {
                command: command.to_string(),
                source,
            })
    }
}

#[async_trait]
impl ScriptRunner for ShellRunner {
    async fn run(&self, command: &str, timeout_secs: i64) -> Result<String, ScriptError> {
        if timeout_secs <= 0 {
            return Err(ScriptError::InvalidTimeout(timeout_secs));
        }

        let started = self.time_provider.now_millis();
        debug!(program = %self.config.program, command, "Starting interpreter");

        let mut child = self.spawn(command)?;
        let stdout_task = drain(child.stdout.take());
        let stderr_task = drain(child.stderr.take());

        let status = match timeout(Duration::from_secs(timeout_secs as u64), child.wait()).await {
            Ok(waited) => waited.map_err(|e| ScriptError::Io(e.to_string()))?,
            Err(_elapsed) => {
                // The deadline can land exactly as the child exits. Only a
                // child confirmed still running is a timeout; one that
                // already terminated is classified by its exit status.
                match child.try_wait().map_err(|e| ScriptError::Io(e.to_string()))? {
                    Some(status) => status,
                    None => {
                        warn!(timeout_secs, "Watchdog killing interpreter");
                        child
                            .start_kill()
                            .map_err(|e| ScriptError::Io(e.to_string()))?;
                        let _ = child.wait().await;
                        let _ = stdout_task.await;
                        let _ = stderr_task.await;
                        return Err(ScriptError::TimedOut {
                            command: command.to_string(),
                            timeout_secs,
                        });
                    }
                }
            }
        };

        let stdout = join_drain(stdout_task).await?;
        let stderr = join_drain(stderr_task).await?;
        let duration_ms = self.time_provider.now_millis() - started;

        info!(
            program = %self.config.program,
            exit_code = ?status.code(),
            duration_ms,
            "Interpreter finished"
        );

        if status.success() {
            Ok(stdout)
        } else {
            Err(ScriptError::NonZeroExit {
                code: status.code().unwrap_or(-1),
                stdout,
                stderr,
            })
        }
    }
}

/// Drain a child stream to completion on its own task.
fn drain<R>(stream: Option<R>) -> JoinHandle<std::io::Result<Vec<u8>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut stream) = stream {
            stream.read_to_end(&mut buf).await?;
        }
        Ok(buf)
    })
}

async fn join_drain(task: JoinHandle<std::io::Result<Vec<u8>>>) -> Result<String, ScriptError> {
    let bytes = task
        .await
        .map_err(|e| ScriptError::Io(e.to_string()))?
        .map_err(|e| ScriptError::Io(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
