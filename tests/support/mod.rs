// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted CommandRunner that records every invocation.

use async_trait::async_trait;
use hostready::exec::{CommandOutput, CommandRunner, CommandSpec, ExecError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Once};
use std::time::Duration;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("hostready=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[derive(Debug, Clone)]
enum Reply {
    Output(CommandOutput),
    Timeout,
}

/// Answers commands from a script; anything unscripted is "not found".
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    script: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<CommandSpec>>,
}

// Each test binary only uses some of these helpers.
#[allow(dead_code)]
impl ScriptedRunner {
    pub fn new() -> Arc<Self> {
        init_tracing();
        Arc::new(Self::default())
    }

    /// Script `command` to exit 0 with `stdout`.
    pub fn ok(&self, command: &str, stdout: &str) -> &Self {
        self.reply(command, Some(0), stdout, "")
    }

    /// Script `command` to exit with `code` and `stderr`.
    pub fn fail(&self, command: &str, code: i32, stderr: &str) -> &Self {
        self.reply(command, Some(code), "", stderr)
    }

    pub fn reply(&self, command: &str, code: Option<i32>, stdout: &str, stderr: &str) -> &Self {
        self.script.lock().insert(
            command.to_string(),
            Reply::Output(CommandOutput {
                exit_code: code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
        );
        self
    }

    /// Script `command` to hit the command timeout.
    pub fn timeout(&self, command: &str) -> &Self {
        self.script.lock().insert(command.to_string(), Reply::Timeout);
        self
    }

    /// Forget all scripted replies; recorded calls are kept.
    pub fn clear(&self) {
        self.script.lock().clear();
    }

    /// Every command run so far, rendered as `program arg...`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().iter().map(ToString::to_string).collect()
    }

    /// Every command run so far, with its argument vector intact.
    pub fn specs(&self) -> Vec<CommandSpec> {
        self.calls.lock().clone()
    }

    pub fn count(&self, command: &str) -> usize {
        self.calls().iter().filter(|c| *c == command).count()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError> {
        let rendered = spec.to_string();
        self.calls.lock().push(spec.clone());
        let reply = self.script.lock().get(&rendered).cloned();
        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::Timeout) => Err(ExecError::Timeout(Duration::from_secs(30))),
            None => Err(ExecError::NotFound(spec.program.clone())),
        }
    }
}
