//! External command provider
//!
//! Runs a configured program, writes the request and prompt as JSON to its
//! stdin and takes whatever it prints on stdout as the model's answer.

use crate::config::StitchConfig;
use crate::prompt::pattern_prompt;
use crate::provider::{GenerateRequest, PatternProvider, ProviderStatus};
use serde::Serialize;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use stitch_core::{Result, StitchError};
use stitch_schema::Mode;

const DEFAULT_TIMEOUT_SECS: u64 = 120;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct CommandProvider {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandProvider {
    pub fn new(program: &str, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &StitchConfig) -> Result<Self> {
        let settings = config.provider("command").ok_or_else(|| {
            StitchError::ConfigError(
                "No [providers.command] section. Set STITCH_COMMAND or add one to .stitch/config.toml"
                    .to_string(),
            )
        })?;
        let program = settings.program.as_deref().ok_or_else(|| {
            StitchError::ConfigError("providers.command.program is not set".to_string())
        })?;
        let timeout = Duration::from_secs(settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        Ok(Self::new(program, settings.args.clone(), timeout))
    }
}

impl PatternProvider for CommandProvider {
    fn name(&self) -> &str {
        "command"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        if self.program.trim().is_empty() {
            return Ok(ProviderStatus::Unavailable("no program configured".to_string()));
        }
        Ok(ProviderStatus::Available)
    }

    fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let payload = serde_json::to_vec(&CommandInput {
            image_base64: &request.image_base64,
            mode: request.mode,
            prompt: pattern_prompt(request.mode),
        })?;
        tracing::info!(program = %self.program, mode = %request.mode, "running generation command");

        let started = Instant::now();
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                StitchError::GenerationError(format!("Failed to start '{}': {}", self.program, e))
            })?;

        // Every pipe gets its own thread so a child that never reads stdin
        // or never drains its output cannot hold up the deadline
        let mut stdin = child.stdin.take().ok_or_else(|| {
            StitchError::GenerationError("child stdin was not captured".to_string())
        })?;
        let mut stdout = child.stdout.take().ok_or_else(|| {
            StitchError::GenerationError("child stdout was not captured".to_string())
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| {
            StitchError::GenerationError("child stderr was not captured".to_string())
        })?;
        let in_writer = thread::spawn(move || stdin.write_all(&payload));
        let out_reader = thread::spawn(move || {
            let mut buf = String::new();
            stdout.read_to_string(&mut buf).map(|_| buf)
        });
        let err_reader = thread::spawn(move || {
            let mut buf = String::new();
            stderr.read_to_string(&mut buf).map(|_| buf)
        });

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if started.elapsed() >= self.timeout {
                child.kill().ok();
                child.wait().ok();
                return Err(StitchError::GenerationError(format!(
                    "'{}' timed out after {:.1}s",
                    self.program,
                    self.timeout.as_secs_f64()
                )));
            }
            thread::sleep(POLL_INTERVAL);
        };

        let written = in_writer
            .join()
            .map_err(|_| StitchError::GenerationError("stdin writer panicked".to_string()))?;
        let output = join_reader(out_reader)?;
        let errors = join_reader(err_reader)?;

        if !status.success() {
            return Err(StitchError::GenerationError(format!(
                "'{}' exited with {}: {}",
                self.program,
                status,
                errors.trim()
            )));
        }

        if let Err(e) = written {
            // A child may answer without reading the whole request
            if output.trim().is_empty() {
                return Err(StitchError::GenerationError(format!(
                    "'{}' did not read the request ({}) and produced no output",
                    self.program, e
                )));
            }
            tracing::warn!(error = %e, "generation command closed stdin early");
        }

        Ok(output)
    }
}

/// What the external program receives on stdin
#[derive(Serialize)]
struct CommandInput<'a> {
    image_base64: &'a str,
    mode: Mode,
    prompt: String,
}

fn join_reader(handle: thread::JoinHandle<std::io::Result<String>>) -> Result<String> {
    handle
        .join()
        .map_err(|_| StitchError::GenerationError("pipe reader panicked".to_string()))?
        .map_err(StitchError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerateRequest {
        GenerateRequest::from_payload("QUJD", Mode::Instant).unwrap()
    }

    #[test]
    fn test_from_config_requires_program() {
        let config = StitchConfig::default();
        assert!(matches!(
            CommandProvider::from_config(&config),
            Err(StitchError::ConfigError(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_echoes_stdout() {
        let provider = CommandProvider::new(
            "sh",
            vec!["-c".to_string(), "cat > /dev/null; echo '{\"ok\": true}'".to_string()],
            Duration::from_secs(10),
        );
        let output = provider.generate(&request()).unwrap();
        assert_eq!(output.trim(), "{\"ok\": true}");
    }

    #[cfg(unix)]
    #[test]
    fn test_receives_request_on_stdin() {
        let provider = CommandProvider::new("cat", vec![], Duration::from_secs(10));
        let output = provider.generate(&request()).unwrap();
        let echoed: GenerateRequest = serde_json::from_str(&output).unwrap();
        assert_eq!(echoed, request());
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_exit_reported() {
        let provider = CommandProvider::new(
            "sh",
            vec!["-c".to_string(), "echo refused >&2; exit 3".to_string()],
            Duration::from_secs(10),
        );
        let err = provider.generate(&request()).unwrap_err();
        assert!(err.to_string().contains("refused"));
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout() {
        let provider = CommandProvider::new(
            "sh",
            vec!["-c".to_string(), "sleep 5".to_string()],
            Duration::from_millis(200),
        );
        let err = provider.generate(&request()).unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    fn large_request() -> GenerateRequest {
        GenerateRequest::from_payload(&"QUJD".repeat(1 << 20), Mode::Exact).unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_holds_when_child_ignores_stdin() {
        let provider = CommandProvider::new(
            "sh",
            vec!["-c".to_string(), "sleep 4".to_string()],
            Duration::from_millis(200),
        );
        let started = Instant::now();
        let err = provider.generate(&large_request()).unwrap_err();
        assert!(err.to_string().contains("timed out"), "{err}");
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_unread_request_without_output_is_error() {
        let provider = CommandProvider::new(
            "sh",
            vec!["-c".to_string(), "exit 0".to_string()],
            Duration::from_secs(10),
        );
        let err = provider.generate(&large_request()).unwrap_err();
        assert!(err.to_string().contains("did not read the request"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn test_prompt_sent_with_request() {
        let provider = CommandProvider::new("cat", vec![], Duration::from_secs(10));
        let output = provider.generate(&request()).unwrap();
        let echoed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(echoed["mode"], "instant");
        assert_eq!(echoed["prompt"], pattern_prompt(Mode::Instant));
    }

    #[test]
    fn test_missing_program() {
        let provider =
            CommandProvider::new("stitch-no-such-program", vec![], Duration::from_secs(1));
        assert!(matches!(
            provider.generate(&request()),
            Err(StitchError::GenerationError(_))
        ));
    }
}
