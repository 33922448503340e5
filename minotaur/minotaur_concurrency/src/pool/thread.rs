//! A group of named actor threads.
//!
//! Every actor closure returns a `Result`. Joining the group waits for all of
//! them, even after one fails, and reports the first failure.

use log::{debug, error};
use std::thread::{self, JoinHandle};

use minotaur_core::error::{ConcurrencyError, Result};

/// Configuration for a thread group
#[derive(Debug, Clone)]
pub struct ThreadGroupConfig {
    /// Name prefix for actor threads; the actor id is appended
    pub thread_name_prefix: String,

    /// Stack size for each thread, or the platform default
    pub stack_size: Option<usize>,
}

impl Default for ThreadGroupConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: "guest".to_string(),
            stack_size: None,
        }
    }
}

/// A running actor thread and its name
struct Worker {
    name: String,
    handle: JoinHandle<Result<()>>,
}

/// Actor threads started together and joined together
pub struct ThreadGroup {
    /// Started threads, in spawn order
    workers: Vec<Worker>,

    /// Configuration
    config: ThreadGroupConfig,
}

impl ThreadGroup {
    /// Create an empty group; threads are named `{prefix}-{id}`
    pub fn new(config: ThreadGroupConfig) -> Self {
        Self {
            workers: Vec::new(),
            config,
        }
    }

    /// Start an actor thread.
    ///
    /// # Errors
    ///
    /// Returns `ConcurrencyError::SpawnFailed` if the OS refuses to start the
    /// thread. Threads started earlier keep running; the caller decides how to
    /// stop them before joining.
    pub fn spawn<F>(&mut self, id: usize, f: F) -> std::result::Result<(), ConcurrencyError>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let name = format!("{}-{}", self.config.thread_name_prefix, id);

        let mut builder = thread::Builder::new().name(name.clone());
        if let Some(stack_size) = self.config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        let handle = builder
            .spawn(f)
            .map_err(|source| ConcurrencyError::SpawnFailed {
                name: name.clone(),
                source,
            })?;

        debug!("Started thread {}", name);
        self.workers.push(Worker { name, handle });
        Ok(())
    }

    /// Get the number of started threads
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Check whether no thread has been started
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Wait for every thread to finish.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by an actor, or
    /// `ConcurrencyError::ThreadPanicked` for the first actor that panicked.
    pub fn join_all(self) -> Result<()> {
        let mut first_error = None;
        let count = self.workers.len();

        for worker in self.workers {
            let outcome = match worker.handle.join() {
                Ok(result) => result,
                Err(panic) => {
                    error!(
                        "Thread {} panicked: {:?}",
                        worker.name,
                        panic.downcast_ref::<&str>().unwrap_or(&"<unknown panic>")
                    );
                    Err(ConcurrencyError::ThreadPanicked(worker.name).into())
                }
            };

            if let Err(e) = outcome {
                first_error.get_or_insert(e);
            }
        }

        debug!("Joined {} threads", count);

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minotaur_core::error::{Error, ProtocolError};
    use minotaur_core::GuestId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn named(prefix: &str) -> ThreadGroup {
        ThreadGroup::new(ThreadGroupConfig {
            thread_name_prefix: prefix.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_spawn_and_join() {
        let mut group = named("test");
        let counter = Arc::new(AtomicUsize::new(0));

        for id in 0..4 {
            let counter = Arc::clone(&counter);
            group
                .spawn(id, move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .unwrap();
        }

        assert_eq!(group.len(), 4);
        group.join_all().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_threads_are_named() {
        let mut group = named("guest");
        let names = Arc::new(Mutex::new(Vec::new()));

        for id in 0..2 {
            let names = Arc::clone(&names);
            group
                .spawn(id, move || {
                    let name = thread::current().name().map(str::to_string);
                    names.lock().unwrap().push(name.unwrap_or_default());
                    Ok(())
                })
                .unwrap();
        }
        group.join_all().unwrap();

        let mut names = names.lock().unwrap().clone();
        names.sort();
        assert_eq!(names, vec!["guest-0".to_string(), "guest-1".to_string()]);
    }

    #[test]
    fn test_first_error_reported_after_all_joined() {
        let mut group = named("test");
        let finished = Arc::new(AtomicUsize::new(0));

        for id in 0..3 {
            let finished = Arc::clone(&finished);
            group
                .spawn(id, move || {
                    finished.fetch_add(1, Ordering::SeqCst);
                    if id == 1 {
                        return Err(ProtocolError::DuplicateVisit(GuestId::new(id)).into());
                    }
                    Ok(())
                })
                .unwrap();
        }

        let result = group.join_all();
        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::DuplicateVisit(_)))
        ));
        assert_eq!(finished.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_panic_is_reported() {
        let mut group = named("test");
        group
            .spawn(7, || panic!("This actor should panic"))
            .unwrap();

        match group.join_all() {
            Err(Error::Concurrency(ConcurrencyError::ThreadPanicked(name))) => {
                assert_eq!(name, "test-7");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_group() {
        let group = ThreadGroup::new(ThreadGroupConfig::default());
        assert!(group.is_empty());
        assert!(group.join_all().is_ok());
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let mut group = ThreadGroup::new(ThreadGroupConfig {
            thread_name_prefix: "huge".to_string(),
            stack_size: Some(usize::MAX / 2),
        });

        let result = group.spawn(0, || Ok(()));
        match result {
            Err(ConcurrencyError::SpawnFailed { name, .. }) => assert_eq!(name, "huge-0"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(group.is_empty());
    }
}
