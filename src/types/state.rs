use std::fmt::{self, Display, Formatter};

///States a producer or consumer thread goes through.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WorkerState {
    Running,
    /// The stop flag was seen; the courtesy signals are still owed.
    Draining,
    Stopped,
}

impl WorkerState {
    /// Transition taken after each loop iteration re-reads the stop flag.
    pub fn observe(self, running: bool) -> WorkerState {
        match self {
            WorkerState::Running if !running => WorkerState::Draining,
            state => state,
        }
    }

    /// Transition taken once the courtesy signals have been posted.
    pub fn drained(self) -> WorkerState {
        match self {
            WorkerState::Draining => WorkerState::Stopped,
            state => state,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Producer,
    Consumer,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Role::Producer => write!(f, "producer"),
            Role::Consumer => write!(f, "consumer"),
        }
    }
}

/// What a worker hands back through its `JoinHandle`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorkerReport {
    pub role: Role,
    pub index: usize,
    /// Items inserted (producer) or removed (consumer) by this thread.
    pub count: u64,
}
