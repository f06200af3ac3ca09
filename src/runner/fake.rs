//! Scripted command runner for tests
//!
//! Public (not `cfg(test)`) so integration tests can drive the collector
//! end-to-end without invoking real system utilities.

use super::{CommandOutput, CommandRunner};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// A [`CommandRunner`] that replays canned outputs keyed by program name.
///
/// Programs with no registered output fail the way a missing binary
/// would, which makes "tool absent" scenarios trivial to script.
#[derive(Debug, Default)]
pub struct FakeRunner {
    outputs: HashMap<String, CommandOutput>,
    invocations: Mutex<Vec<Vec<String>>>,
}

impl FakeRunner {
    /// Create an empty fake runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the output to replay for `program`
    pub fn with_output<S: Into<String>>(mut self, program: S, output: CommandOutput) -> Self {
        self.outputs.insert(program.into(), output);
        self
    }

    /// Full argv of every invocation seen so far, in dispatch order
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations.lock().expect("invocation log poisoned").clone()
    }

    /// True when `program` was invoked at least once
    pub fn invoked(&self, program: &str) -> bool {
        self.invocations()
            .iter()
            .any(|argv| argv.first().map(String::as_str) == Some(program))
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[&str], _limit: Duration) -> CommandOutput {
        let mut argv = vec![program.to_string()];
        argv.extend(args.iter().map(|a| a.to_string()));
        self.invocations
            .lock()
            .expect("invocation log poisoned")
            .push(argv);

        match self.outputs.get(program) {
            Some(output) => output.clone(),
            None => CommandOutput::failed(
                "",
                "",
                format!("failed to run {}: No such file or directory", program),
            ),
        }
    }
}
