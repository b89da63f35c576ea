//! CLI configuration: flags, config file, and ring construction.
//!
//! Ring settings come from an optional JSON file and are then overridden or
//! extended by command-line flags:
//!
//! ```json
//! {
//!   "hasher": "md5",
//!   "replicas": 64,
//!   "targets": [{ "name": "cache-1" }, { "name": "cache-2", "weight": 2 }]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use corelib::{
    Crc32Hasher, HashRing, Hasher, Md5Hasher, SipHasher, Xxh3Hasher, DEFAULT_REPLICAS,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commands::{Command, CommandResult};

/// Which stock hasher places targets and resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    /// zlib-compatible CRC-32.
    #[default]
    Crc32,
    /// MD5 hex digest.
    Md5,
    /// xxh3-64.
    Xxh3,
    /// SipHash-1-3.
    Sip,
}

/// A target and its weight, written `name` or `name=weight` on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: usize,
}

fn default_weight() -> usize {
    1
}

impl FromStr for TargetSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, weight) = match s.rsplit_once('=') {
            Some((name, weight)) => {
                let weight = weight
                    .parse()
                    .map_err(|e| format!("invalid weight in '{s}': {e}"))?;
                (name, weight)
            }
            None => (s, default_weight()),
        };
        if name.is_empty() {
            return Err(format!("empty target name in '{s}'"));
        }
        Ok(Self {
            name: name.to_string(),
            weight,
        })
    }
}

/// Ring settings, as stored in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub hasher: HasherKind,
    pub replicas: usize,
    pub targets: Vec<TargetSpec>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            hasher: HasherKind::default(),
            replicas: DEFAULT_REPLICAS,
            targets: Vec::new(),
        }
    }
}

impl RingConfig {
    /// Parse a JSON config document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Build a ring with `hasher`, inserting targets in config order.
    pub fn build<H: Hasher>(&self, hasher: H) -> corelib::Result<HashRing<String, H>> {
        let mut ring = HashRing::with_hasher_and_replicas(hasher, self.replicas);
        for target in &self.targets {
            ring.add_target_weighted(target.name.clone(), target.weight)?;
        }
        debug!(
            hasher = ring.hasher_name(),
            replicas = ring.replicas(),
            targets = ring.target_count(),
            "built ring from config"
        );
        Ok(ring)
    }
}

/// Inspect a consistent hash ring from the command line.
#[derive(Debug, Parser)]
#[command(name = "flexiring", version, about)]
pub struct CliConfig {
    /// JSON file describing the ring.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Hasher to use (overrides the config file).
    #[arg(long, value_enum, global = true)]
    pub hasher: Option<HasherKind>,

    /// Virtual nodes per unit of weight (overrides the config file).
    #[arg(long, global = true)]
    pub replicas: Option<usize>,

    /// Target to add, as `name` or `name=weight`. Repeatable.
    #[arg(short = 't', long = "target", global = true)]
    pub targets: Vec<TargetSpec>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Merge the config file (if any) with command-line overrides.
    pub fn ring_config(&self) -> anyhow::Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => RingConfig::load(path)?,
            None => RingConfig::default(),
        };
        if let Some(hasher) = self.hasher {
            config.hasher = hasher;
        }
        if let Some(replicas) = self.replicas {
            config.replicas = replicas;
        }
        config.targets.extend(self.targets.iter().cloned());
        Ok(config)
    }

    /// Build the ring and execute the subcommand.
    pub fn execute(&self) -> anyhow::Result<CommandResult> {
        let config = self.ring_config()?;
        match config.hasher {
            HasherKind::Crc32 => self.command.execute(&mut config.build(Crc32Hasher)?),
            HasherKind::Md5 => self.command.execute(&mut config.build(Md5Hasher)?),
            HasherKind::Xxh3 => self.command.execute(&mut config.build(Xxh3Hasher)?),
            HasherKind::Sip => self.command.execute(&mut config.build(SipHasher)?),
        }
    }

    /// Execute and print the result to stdout.
    pub fn run(&self) -> anyhow::Result<()> {
        let result = self.execute()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print!("{result}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::RingError;

    #[test]
    fn test_target_spec_parsing() {
        assert_eq!(
            "cache-1".parse::<TargetSpec>().unwrap(),
            TargetSpec {
                name: "cache-1".to_string(),
                weight: 1
            }
        );
        assert_eq!(
            "cache-2=3".parse::<TargetSpec>().unwrap(),
            TargetSpec {
                name: "cache-2".to_string(),
                weight: 3
            }
        );
        assert!("cache=x".parse::<TargetSpec>().is_err());
        assert!("=2".parse::<TargetSpec>().is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config = RingConfig::from_json(
            r#"{"hasher":"md5","targets":[{"name":"a"},{"name":"b","weight":2}]}"#,
        )
        .unwrap();
        assert_eq!(config.hasher, HasherKind::Md5);
        assert_eq!(config.replicas, 64);
        assert_eq!(config.targets[1].weight, 2);

        let ring = config.build(Md5Hasher).unwrap();
        assert_eq!(ring.all_targets(), vec!["a", "b"]);
        assert_eq!(ring.positions_of("b").map(<[String]>::len), Some(128));
    }

    #[test]
    fn test_config_defaults() {
        assert_eq!(RingConfig::from_json("{}").unwrap(), RingConfig::default());
        assert!(RingConfig::from_json(r#"{"hasher":"sha1"}"#).is_err());
    }

    #[test]
    fn test_flags_extend_config() {
        let cli = CliConfig::try_parse_from([
            "flexiring",
            "--hasher",
            "xxh3",
            "--replicas",
            "8",
            "-t",
            "a",
            "-t",
            "b=2",
            "targets",
        ])
        .unwrap();

        let config = cli.ring_config().unwrap();
        assert_eq!(config.hasher, HasherKind::Xxh3);
        assert_eq!(config.replicas, 8);
        assert_eq!(config.targets.len(), 2);
    }

    #[test]
    fn test_duplicate_target_is_reported() {
        let cli =
            CliConfig::try_parse_from(["flexiring", "-t", "a", "-t", "a", "targets"]).unwrap();
        let err = cli.execute().unwrap_err();
        assert_eq!(
            err.downcast_ref::<RingError>(),
            Some(&RingError::DuplicateTarget("a".to_string()))
        );
    }

    #[test]
    fn test_oversized_weight_is_reported() {
        let heavy = format!("a={}", usize::MAX);
        let cli = CliConfig::try_parse_from(["flexiring", "-t", &heavy, "-t", "b", "targets"])
            .unwrap();
        let err = cli.execute().unwrap_err();
        assert_eq!(
            err.downcast_ref::<RingError>(),
            Some(&RingError::InvalidWeight(usize::MAX))
        );
    }
}
