use std::fmt;

/// Failures raised by the queue, the consumer or simulator construction.
///
/// `EmptyQueue`, `ConsumerBusy` and `TickOutOfOrder` are orchestration bugs
/// when they come out of a simulation run and are never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    EmptyQueue,
    ConsumerBusy,
    InvalidServiceRate(f64),
    InvalidArrivalChance(usize),
    AlreadyRun,
    TickOutOfOrder { expected: usize, got: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::EmptyQueue => write!(f, "cannot dequeue from an empty queue"),
            SimError::ConsumerBusy => {
                write!(f, "cannot add task when consumer is still busy")
            }
            SimError::InvalidServiceRate(rate) => {
                write!(f, "service rate must be a positive number of items per minute, got {}", rate)
            }
            SimError::InvalidArrivalChance(n) => {
                write!(f, "arrival chance must be 1-in-N with N >= 1, got {}", n)
            }
            SimError::AlreadyRun => write!(f, "simulation has already been run"),
            SimError::TickOutOfOrder { expected, got } => {
                write!(f, "expected tick {}, got tick {}", expected, got)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Degenerate inputs to the wait-time statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    Empty,
    NoNonZeroWait,
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Empty => write!(f, "no wait times recorded"),
            StatsError::NoNonZeroWait => write!(f, "no wait time greater than zero"),
        }
    }
}

impl std::error::Error for StatsError {}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
            ConfigError::Parse(e) => write!(f, "could not parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}
