//! Call log and result queues shared by the mocks

use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::error::{Result, TfeError};

/// One call received by a mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// Trait method name, e.g. `read_by_id`
    pub method: &'static str,
    /// Arguments rendered as strings; identifiers verbatim, options in `Debug` form
    pub args: Vec<String>,
}

type Queue = VecDeque<Box<dyn Any + Send>>;

#[derive(Default)]
pub(crate) struct MockState {
    queues: Mutex<HashMap<&'static str, Queue>>,
    calls: Mutex<Vec<MockCall>>,
}

// A test that panicked while holding a lock must not hide the mock from
// the remaining assertions
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockState {
    pub(crate) fn push<T: Send + 'static>(&self, method: &'static str, result: Result<T>) {
        lock(&self.queues)
            .entry(method)
            .or_default()
            .push_back(Box::new(result));
    }

    pub(crate) fn answer<T: Send + 'static>(
        &self,
        mock: &str,
        method: &'static str,
        args: Vec<String>,
    ) -> Result<T> {
        lock(&self.calls).push(MockCall { method, args });

        let queued = lock(&self.queues)
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| TfeError::Mock(format!("{}::{}: no result queued", mock, method)))?;

        match queued.downcast::<Result<T>>() {
            Ok(result) => *result,
            Err(_) => Err(TfeError::Mock(format!(
                "{}::{}: queued result has the wrong type",
                mock, method
            ))),
        }
    }

    pub(crate) fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    pub(crate) fn pending(&self) -> usize {
        lock(&self.queues).values().map(VecDeque::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_in_order() {
        let state = MockState::default();
        state.push("read", Ok::<_, TfeError>(1u32));
        state.push("read", Ok::<_, TfeError>(2u32));
        assert_eq!(state.pending(), 2);

        assert_eq!(state.answer::<u32>("M", "read", vec!["a".into()]).unwrap(), 1);
        assert_eq!(state.answer::<u32>("M", "read", vec!["b".into()]).unwrap(), 2);
        assert_eq!(state.pending(), 0);

        let calls = state.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].args, vec!["b".to_string()]);
    }

    #[test]
    fn test_empty_queue_is_mock_error() {
        let state = MockState::default();
        let err = state.answer::<u32>("MockRuns", "read", Vec::new()).unwrap_err();
        assert!(matches!(err, TfeError::Mock(_)));
        assert_eq!(err.to_string(), "mock: MockRuns::read: no result queued");
        assert_eq!(state.calls().len(), 1);
    }

    #[test]
    fn test_wrong_type_is_mock_error() {
        let state = MockState::default();
        state.push("read", Ok::<_, TfeError>("text".to_string()));
        let err = state.answer::<u32>("M", "read", Vec::new()).unwrap_err();
        assert!(matches!(err, TfeError::Mock(_)));
    }

    #[test]
    fn test_queued_errors_are_returned() {
        let state = MockState::default();
        state.push::<u32>("read", Err(TfeError::NotFound("run 'run-1'".into())));
        assert!(state
            .answer::<u32>("M", "read", Vec::new())
            .unwrap_err()
            .is_not_found());
    }
}
