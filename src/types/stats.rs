use std::fmt::{self, Display, Formatter};

use crate::config::SimulationConfig;
use crate::types::shared_buffer::BufferTotals;

/// Everything the coordinator knows once every worker has been joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationStats {
    pub config: SimulationConfig,
    /// Items stored, indexed by producer thread.
    pub produced: Vec<u64>,
    /// Items taken out, indexed by consumer thread.
    pub consumed: Vec<u64>,
    pub totals: BufferTotals,
}

impl SimulationStats {
    pub fn total_produced(&self) -> u64 {
        self.produced.iter().sum()
    }

    pub fn total_consumed(&self) -> u64 {
        self.consumed.iter().sum()
    }

    /// Items produced but never consumed, i.e. still sitting in the ring.
    pub fn unaccounted(&self) -> u64 {
        self.total_produced().saturating_sub(self.total_consumed())
    }
}

impl Display for SimulationStats {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "PRODUCER / CONSUMER SIMULATION COMPLETE")?;
        writeln!(f, "=======================================")?;
        writeln!(f, "Simulation Time:                       {:?}", self.config.duration)?;
        writeln!(f, "Maximum Thread Sleep Time:             {:?}", self.config.max_wait)?;
        writeln!(f, "Number of Producer Threads:            {}", self.config.producers)?;
        writeln!(f, "Number of Consumer Threads:            {}", self.config.consumers)?;
        writeln!(f, "Size of Buffer:                        {}", self.config.capacity)?;
        writeln!(f, "Total Number of Items Produced:        {}", self.total_produced())?;
        for (i, count) in self.produced.iter().enumerate() {
            writeln!(f, "  Thread {}:                            {}", i, count)?;
        }
        writeln!(f, "Total Number of Items Consumed:        {}", self.total_consumed())?;
        for (i, count) in self.consumed.iter().enumerate() {
            writeln!(f, "  Thread {}:                            {}", i, count)?;
        }
        writeln!(f, "Number Of Items Remaining in Buffer:   {}", self.unaccounted())?;
        writeln!(f, "Number of Times Buffer Was Full:       {}", self.totals.times_full)?;
        write!(f, "Number Of Times Buffer Was Empty:      {}", self.totals.times_empty)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::SimulationStats;
    use crate::config::SimulationConfig;
    use crate::types::shared_buffer::BufferTotals;

    fn stats() -> SimulationStats {
        SimulationStats {
            config: SimulationConfig {
                duration: Duration::from_secs(2),
                max_wait: Duration::from_millis(100),
                producers: 2,
                consumers: 1,
                capacity: 5,
                verbose: false,
            },
            produced: vec![7, 5],
            consumed: vec![9],
            totals: BufferTotals {
                occupancy: 3,
                times_full: 4,
                times_empty: 1,
            },
        }
    }

    #[test]
    fn test_totals() {
        let stats = stats();
        assert_eq!(12, stats.total_produced());
        assert_eq!(9, stats.total_consumed());
        assert_eq!(3, stats.unaccounted());
    }

    #[test]
    fn test_report_lines() {
        let report = stats().to_string();
        assert!(report.starts_with("PRODUCER / CONSUMER SIMULATION COMPLETE"));
        assert!(report.contains("Simulation Time:                       2s"));
        assert!(report.contains("Total Number of Items Produced:        12"));
        assert!(report.contains("Total Number of Items Consumed:        9"));
        assert_eq!(3, report.matches("  Thread ").count());
        assert!(report.contains("Number Of Items Remaining in Buffer:   3"));
        assert!(report.contains("Number of Times Buffer Was Full:       4"));
        assert!(report.ends_with("Number Of Times Buffer Was Empty:      1"));
    }
}
