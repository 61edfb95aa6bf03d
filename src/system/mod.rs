//! Host resource usage for the dashboard header.
//!
//! The shell probe reads CPU, memory and disk usage from `top`, `free` and
//! `df`. When any of them fails the whole sample is replaced by plausible
//! random values flagged `simulated`, so the UI always has something to draw.

use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// CPU, memory and disk usage in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResourceStats {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    /// True when the values are random placeholders
    pub simulated: bool,
}

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to run {command}: {message}")]
    Command { command: String, message: String },

    #[error("unexpected output from {command}")]
    Parse { command: String },
}

/// Source of resource samples.
#[async_trait]
pub trait ResourceProbe: Send + Sync {
    async fn sample(&self) -> Result<ResourceStats, StatsError>;
}

/// Deadline for each shell command.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Reads usage by shelling out to standard OS utilities.
#[derive(Debug, Clone, Copy)]
pub struct ShellProbe {
    timeout: Duration,
}

impl Default for ShellProbe {
    fn default() -> Self {
        Self::new(COMMAND_TIMEOUT)
    }
}

impl ShellProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run one command to completion. A command still running at the
    /// deadline is killed.
    async fn run(&self, program: &str, args: &[&str]) -> Result<String, StatsError> {
        let command = format!("{} {}", program, args.join(" "));
        let mut child = Command::new(program);
        child.args(args).kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, child.output())
            .await
            .map_err(|_| StatsError::Command {
                command: command.clone(),
                message: format!("timed out after {:?}", self.timeout),
            })?
            .map_err(|e| StatsError::Command {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(StatsError::Command {
                command,
                message: format!("exited with {}", output.status),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl ResourceProbe for ShellProbe {
    async fn sample(&self) -> Result<ResourceStats, StatsError> {
        let parse_err = |command: &str| StatsError::Parse {
            command: command.to_string(),
        };

        let top = self.run("top", &["-bn1"]).await?;
        let cpu = parse_top_cpu(&top).ok_or_else(|| parse_err("top"))?;

        let free = self.run("free", &[]).await?;
        let memory = parse_free_memory(&free).ok_or_else(|| parse_err("free"))?;

        let df = self.run("df", &["-P", "/"]).await?;
        let disk = parse_df_disk(&df).ok_or_else(|| parse_err("df"))?;

        Ok(ResourceStats {
            cpu: round1(cpu),
            memory: round1(memory),
            disk: round1(disk),
            simulated: false,
        })
    }
}

/// Sample the probe, substituting simulated values on any failure.
pub async fn sample_or_fallback(probe: &dyn ResourceProbe) -> ResourceStats {
    match probe.sample().await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::debug!(error = %e, "Resource probe failed, using simulated stats");
            simulated_stats()
        }
    }
}

/// Random values within ranges typical of a lightly loaded node.
pub fn simulated_stats() -> ResourceStats {
    let mut rng = rand::thread_rng();
    ResourceStats {
        cpu: round1(rng.gen_range(5.0..45.0)),
        memory: round1(rng.gen_range(20.0..80.0)),
        disk: round1(rng.gen_range(10.0..70.0)),
        simulated: true,
    }
}

fn round1(value: f64) -> f64 {
    (value.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

/// `100 - idle` from the `Cpu(s)` line of `top -bn1`.
pub fn parse_top_cpu(output: &str) -> Option<f64> {
    let line = output.lines().find(|l| l.contains("Cpu(s)"))?;
    let (_, fields) = line.split_once(':')?;
    let idle = fields.split(',').find_map(|field| {
        let mut parts = field.split_whitespace();
        let value = parts.next()?;
        (parts.next() == Some("id")).then_some(value)
    })?;
    idle.parse::<f64>().ok().map(|idle| 100.0 - idle)
}

/// `used / total` from the `Mem:` row of `free`.
pub fn parse_free_memory(output: &str) -> Option<f64> {
    let line = output.lines().find(|l| l.starts_with("Mem:"))?;
    let mut fields = line.split_whitespace().skip(1);
    let total: f64 = fields.next()?.parse().ok()?;
    let used: f64 = fields.next()?.parse().ok()?;
    (total > 0.0).then(|| used / total * 100.0)
}

/// The capacity column of the data row of `df -P /`.
pub fn parse_df_disk(output: &str) -> Option<f64> {
    let row = output.lines().nth(1)?;
    row.split_whitespace()
        .find_map(|field| field.strip_suffix('%'))
        .and_then(|pct| pct.parse().ok())
}
