//! Subcommands and their results.

use std::fmt;

use clap::Subcommand;
use corelib::{Distribution, HashRing, Hasher};
use replication::{ReplicationStrategy, SimpleStrategy};
use serde::Serialize;

/// What to do with the ring.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List ring members in sorted order.
    Targets,

    /// Resolve resources to their primary target.
    Lookup {
        #[arg(required = true)]
        resources: Vec<String>,
    },

    /// Ordered primary and fallback targets for a resource.
    LookupList {
        resource: String,

        /// Number of distinct targets to return.
        #[arg(short = 'n', long, default_value_t = 2)]
        count: usize,
    },

    /// Replica placement for a resource.
    Replicas {
        resource: String,

        /// Replication factor, primary included.
        #[arg(short = 'r', long, default_value_t = 3)]
        factor: usize,
    },

    /// How synthetic resources `resource-0..N` spread over the targets.
    Distribution {
        #[arg(long, default_value_t = 1000)]
        resources: usize,
    },
}

/// One resource and its primary target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub resource: String,
    pub target: String,
}

/// One target's slice of a distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub target: String,
    pub count: usize,
    pub share: f64,
}

/// Output of a subcommand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandResult {
    Targets {
        hasher: String,
        replicas: usize,
        targets: Vec<String>,
    },
    Lookup {
        assignments: Vec<Assignment>,
    },
    LookupList {
        resource: String,
        targets: Vec<String>,
    },
    Replicas {
        resource: String,
        primary: String,
        fallbacks: Vec<String>,
        shortfall: usize,
    },
    Distribution {
        total: usize,
        shares: Vec<Share>,
    },
}

impl Command {
    /// Run against a built ring.
    pub fn execute<H: Hasher>(&self, ring: &mut HashRing<String, H>) -> anyhow::Result<CommandResult> {
        let result = match self {
            Command::Targets => CommandResult::Targets {
                hasher: ring.hasher_name().to_string(),
                replicas: ring.replicas(),
                targets: ring.all_targets(),
            },
            Command::Lookup { resources } => {
                let assignments = resources
                    .iter()
                    .map(|resource| -> corelib::Result<Assignment> {
                        Ok(Assignment {
                            resource: resource.clone(),
                            target: ring.lookup(resource)?,
                        })
                    })
                    .collect::<corelib::Result<Vec<_>>>()?;
                CommandResult::Lookup { assignments }
            }
            Command::LookupList { resource, count } => CommandResult::LookupList {
                resource: resource.clone(),
                targets: ring.lookup_list(resource, *count)?,
            },
            Command::Replicas { resource, factor } => {
                let strategy = SimpleStrategy::new(*factor)?;
                let placement = strategy.replicas_for_key(ring, resource.as_bytes())?;
                CommandResult::Replicas {
                    resource: resource.clone(),
                    shortfall: placement.shortfall(*factor),
                    primary: placement.primary,
                    fallbacks: placement.fallbacks,
                }
            }
            Command::Distribution { resources } => {
                let sample = (0..*resources).map(|i| format!("resource-{i}"));
                let dist = Distribution::measure(ring, sample)?;
                let shares = dist
                    .counts()
                    .iter()
                    .map(|(target, &count)| Share {
                        target: target.clone(),
                        count,
                        share: dist.share(target.as_str()),
                    })
                    .collect();
                CommandResult::Distribution {
                    total: dist.total(),
                    shares,
                }
            }
        };
        Ok(result)
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Targets { targets, .. } => {
                for target in targets {
                    writeln!(f, "{target}")?;
                }
            }
            CommandResult::Lookup { assignments } => {
                for a in assignments {
                    writeln!(f, "{} -> {}", a.resource, a.target)?;
                }
            }
            CommandResult::LookupList { resource, targets } => {
                writeln!(f, "{resource}: {}", targets.join(", "))?;
            }
            CommandResult::Replicas {
                resource,
                primary,
                fallbacks,
                shortfall,
            } => {
                writeln!(f, "{resource}: primary={primary} fallbacks=[{}]", fallbacks.join(", "))?;
                if *shortfall > 0 {
                    writeln!(f, "warning: {shortfall} replica(s) short of the requested factor")?;
                }
            }
            CommandResult::Distribution { total, shares } => {
                for s in shares {
                    writeln!(f, "{:<24} {:>8} {:>7.2}%", s.target, s.count, s.share * 100.0)?;
                }
                writeln!(f, "total {total}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::{Crc32Hasher, RingError};
    use replication::ReplicationError;

    fn ring() -> HashRing<String, Crc32Hasher> {
        let mut ring = HashRing::new();
        ring.add_targets(["a", "b", "c"].map(String::from)).unwrap();
        ring
    }

    #[test]
    fn test_targets() {
        let result = Command::Targets.execute(&mut ring()).unwrap();
        assert_eq!(
            result,
            CommandResult::Targets {
                hasher: "Crc32Hasher".to_string(),
                replicas: 64,
                targets: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            }
        );
        assert_eq!(result.to_string(), "a\nb\nc\n");
    }

    #[test]
    fn test_lookup_matches_reference() {
        let command = Command::Lookup {
            resources: vec!["1".to_string(), "2".to_string(), "3".to_string()],
        };
        let result = command.execute(&mut ring()).unwrap();
        assert_eq!(result.to_string(), "1 -> a\n2 -> b\n3 -> a\n");
    }

    #[test]
    fn test_lookup_list_and_replicas_agree() {
        let mut ring = ring();
        let list = Command::LookupList {
            resource: "obj".to_string(),
            count: 3,
        }
        .execute(&mut ring)
        .unwrap();
        let replicas = Command::Replicas {
            resource: "obj".to_string(),
            factor: 3,
        }
        .execute(&mut ring)
        .unwrap();

        let CommandResult::LookupList { targets, .. } = list else {
            panic!("expected a lookup list");
        };
        let CommandResult::Replicas {
            primary,
            fallbacks,
            shortfall,
            ..
        } = replicas
        else {
            panic!("expected a replica placement");
        };
        assert_eq!(targets[0], primary);
        assert_eq!(&targets[1..], fallbacks.as_slice());
        assert_eq!(shortfall, 0);
    }

    #[test]
    fn test_distribution_covers_all_resources() {
        let result = Command::Distribution { resources: 500 }
            .execute(&mut ring())
            .unwrap();
        let CommandResult::Distribution { total, shares } = result else {
            panic!("unexpected result");
        };
        assert_eq!(total, 500);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares.iter().map(|s| s.count).sum::<usize>(), 500);
    }

    #[test]
    fn test_errors_surface() {
        let mut empty: HashRing<String> = HashRing::new();
        let err = Command::Lookup {
            resources: vec!["x".to_string()],
        }
        .execute(&mut empty)
        .unwrap_err();
        assert_eq!(err.downcast_ref::<RingError>(), Some(&RingError::EmptyRing));

        let err = Command::Replicas {
            resource: "x".to_string(),
            factor: 0,
        }
        .execute(&mut ring())
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ReplicationError>(),
            Some(&ReplicationError::InvalidFactor(0))
        );
    }

    #[test]
    fn test_json_shape() {
        let result = CommandResult::LookupList {
            resource: "r".to_string(),
            targets: vec!["a".to_string()],
        };
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"kind":"lookup_list","resource":"r","targets":["a"]}"#
        );
    }
}
