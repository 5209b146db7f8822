// trace.rs — The append-only execution trace.
//
// The trace is an explicit, injected log object passed to `invoke`,
// never ambient global state: evaluators under test (or independent
// plan branches) each get their own isolated trace. Entries are only
// ever appended; nothing removes or rewrites a recorded call.

use std::sync::{Arc, Mutex};

use crate::call::FunctionCall;
use crate::error::RegistryError;

/// An append-only, thread-safe log of [`FunctionCall`] records.
///
/// Cloning is cheap and shares the underlying log, so parallel plan
/// branches can append to one trace, or hold separate traces merged by
/// the interpreter afterward. Lock poisoning is surfaced as
/// [`RegistryError::TracePoisoned`] rather than ignored.
#[derive(Debug, Clone, Default)]
pub struct CallTrace {
    entries: Arc<Mutex<Vec<FunctionCall>>>,
}

impl CallTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the trace.
    pub fn append(&self, call: FunctionCall) -> Result<(), RegistryError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| RegistryError::TracePoisoned)?;
        entries.push(call);
        Ok(())
    }

    /// Number of recorded calls.
    pub fn len(&self) -> Result<usize, RegistryError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| RegistryError::TracePoisoned)?;
        Ok(entries.len())
    }

    /// Whether no calls have been recorded yet.
    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.len()? == 0)
    }

    /// A read-only copy of all entries, oldest first.
    ///
    /// Returns a snapshot rather than a guard so the policy engine can
    /// inspect the trace without holding the lock across its own logic.
    pub fn snapshot(&self) -> Result<Vec<FunctionCall>, RegistryError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| RegistryError::TracePoisoned)?;
        Ok(entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{Args, Value};

    fn record(name: &str) -> FunctionCall {
        FunctionCall::new(name, None, Args::new(), Ok(Value::Null), true)
    }

    #[test]
    fn append_preserves_order() {
        let trace = CallTrace::new();
        trace.append(record("first")).unwrap();
        trace.append(record("second")).unwrap();

        let entries = trace.snapshot().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].function, "first");
        assert_eq!(entries[1].function, "second");
    }

    #[test]
    fn clones_share_the_log() {
        let trace = CallTrace::new();
        let branch = trace.clone();
        branch.append(record("from-branch")).unwrap();
        assert_eq!(trace.len().unwrap(), 1);
    }

    #[test]
    fn independent_traces_are_isolated() {
        let a = CallTrace::new();
        let b = CallTrace::new();
        a.append(record("only-in-a")).unwrap();
        assert!(b.is_empty().unwrap());
    }

    #[test]
    fn concurrent_appends_are_all_recorded() {
        let trace = CallTrace::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let branch = trace.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        branch.append(record(&format!("worker-{i}"))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(trace.len().unwrap(), 400);
    }
}
