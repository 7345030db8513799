//! Primitives used by the simulation, swapped for loom's when built with `--cfg loom`.

use std::io;
use std::time::Duration;

#[cfg(not(loom))]
pub(crate) use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(not(loom))]
pub(crate) use std::sync::{Arc, Mutex, MutexGuard};

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicBool, Ordering};
#[cfg(loom)]
pub(crate) use loom::sync::{Arc, Mutex, MutexGuard};

#[cfg(not(loom))]
pub(crate) use std::thread;

#[cfg(loom)]
pub(crate) use loom::thread;

pub(crate) use thread::JoinHandle;

#[cfg(not(loom))]
pub(crate) use std_semaphore::Semaphore;

#[cfg(loom)]
pub(crate) use self::loom_semaphore::Semaphore;

#[cfg(not(loom))]
pub(crate) fn sleep(d: Duration) {
    thread::sleep(d);
}

#[cfg(loom)]
pub(crate) fn sleep(_d: Duration) {
    loom::thread::yield_now();
}

#[cfg(not(loom))]
pub(crate) fn spawn_named<F, T>(name: String, f: F) -> io::Result<JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    thread::Builder::new().name(name).spawn(f)
}

#[cfg(loom)]
pub(crate) fn spawn_named<F, T>(_name: String, f: F) -> io::Result<JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(loom::thread::spawn(f))
}

/// Counting semaphore with the same surface as `std_semaphore::Semaphore`,
/// built from loom primitives so the model checker can see every wait.
#[cfg(loom)]
mod loom_semaphore {
    use loom::sync::{Condvar, Mutex};

    pub struct Semaphore {
        count: Mutex<isize>,
        cvar: Condvar,
    }

    impl Semaphore {
        pub fn new(count: isize) -> Semaphore {
            Semaphore {
                count: Mutex::new(count),
                cvar: Condvar::new(),
            }
        }

        pub fn acquire(&self) {
            let mut count = self.count.lock().expect("semaphore lock poisoned");
            while *count <= 0 {
                count = self.cvar.wait(count).expect("semaphore lock poisoned");
            }
            *count -= 1;
        }

        pub fn release(&self) {
            *self.count.lock().expect("semaphore lock poisoned") += 1;
            self.cvar.notify_one();
        }
    }
}
