// Batch executor turns a per-user feed operation into one call over many user ids.
//
// Responsibilities
// - Resolve each user id to a feed key within the executor's namespace.
// - Run the per-user closure once per distinct user id, in input order.
// - Record exactly one outcome per user id. A failed resolution or a closure
//   error becomes that user's fault and the batch carries on.

use std::fmt;

use tracing::{debug, debug_span, warn};

use crate::core::feed::key::{FeedKey, UserId};
use crate::core::feed::outcome::{BatchResponse, Outcome};
use crate::core::ports::FeedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Store,
    Remove,
    Wipe,
    All,
    Paginate,
    ResetLastRead,
    TotalCount,
    UnreadCount,
    LastRead,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Store => "store",
            Operation::Remove => "remove",
            Operation::Wipe => "wipe",
            Operation::All => "all",
            Operation::Paginate => "paginate",
            Operation::ResetLastRead => "reset_last_read",
            Operation::TotalCount => "total_count",
            Operation::UnreadCount => "unread_count",
            Operation::LastRead => "last_read",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct BatchExecutor {
    namespace: String,
}

impl BatchExecutor {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn execute<T, F>(
        &self,
        operation: Operation,
        user_ids: &[UserId],
        mut per_user: F,
    ) -> BatchResponse<T>
    where
        F: FnMut(&FeedKey) -> Result<Outcome<T>, FeedError>,
    {
        let span = debug_span!(
            "feed_batch",
            %operation,
            namespace = %self.namespace,
            users = user_ids.len()
        );
        let _entered = span.enter();

        let mut response = BatchResponse::new();
        for user_id in user_ids {
            if response.contains(user_id) {
                continue;
            }
            let outcome = FeedKey::resolve(&self.namespace, user_id)
                .map_err(FeedError::from)
                .and_then(|key| per_user(&key))
                .unwrap_or_else(|error| {
                    warn!(%user_id, %error, "feed operation failed for user");
                    Outcome::Fault(error)
                });
            response.record(user_id.clone(), outcome);
        }
        debug!(faults = response.faults(), "batch finished");
        response
    }
}

#[cfg(test)]
mod batch_executor_tests {
    use super::*;
    use crate::core::feed::event::EventError;
    use crate::core::feed::key::KeyError;
    use rstest::{fixture, rstest};

    #[fixture]
    fn executor() -> BatchExecutor {
        BatchExecutor::new("news")
    }

    fn ids(raw: &[&str]) -> Vec<UserId> {
        raw.iter().copied().map(UserId::from).collect()
    }

    #[rstest]
    fn it_should_answer_for_every_user(executor: BatchExecutor) {
        let user_ids = ids(&["a", "b", "c"]);
        let response = executor.execute(Operation::TotalCount, &user_ids, |_| Ok(Outcome::Success(0u64)));
        assert_eq!(response.len(), 3);
        for user_id in &user_ids {
            assert_eq!(response.get(user_id), Some(&Outcome::Success(0)));
        }
    }

    #[rstest]
    fn it_should_pass_the_resolved_key_to_the_closure(executor: BatchExecutor) {
        let response = executor.execute(Operation::All, &ids(&["42"]), |key| {
            Ok(Outcome::Success(key.to_string()))
        });
        assert_eq!(
            response.get(&UserId::from("42")),
            Some(&Outcome::Success("news|u.42".to_string()))
        );
    }

    #[rstest]
    fn it_should_isolate_a_user_that_cannot_be_resolved(executor: BatchExecutor) {
        let user_ids = ids(&["a", "not valid", "c"]);
        let mut visited = Vec::new();
        let response = executor.execute(Operation::Store, &user_ids, |key| {
            visited.push(key.user_id().clone());
            Ok(Outcome::Success(true))
        });

        assert_eq!(visited, ids(&["a", "c"]));
        assert_eq!(response.len(), 3);
        assert_eq!(response.faults(), 1);
        assert!(matches!(
            response.get(&UserId::from("not valid")),
            Some(Outcome::Fault(FeedError::InvalidKey(KeyError::InvalidUserId { .. })))
        ));
        assert_eq!(response.get(&UserId::from("a")), Some(&Outcome::Success(true)));
        assert_eq!(response.get(&UserId::from("c")), Some(&Outcome::Success(true)));
    }

    #[rstest]
    fn it_should_isolate_a_failing_closure(executor: BatchExecutor) {
        let response = executor.execute(Operation::Remove, &ids(&["a", "b"]), |key| {
            if key.user_id().as_str() == "a" {
                Err(FeedError::InvalidEvent(EventError::EmptyValue))
            } else {
                Ok(Outcome::Empty)
            }
        });
        assert_eq!(
            response.get(&UserId::from("a")),
            Some(&Outcome::<()>::Fault(FeedError::InvalidEvent(EventError::EmptyValue)))
        );
        assert_eq!(response.get(&UserId::from("b")), Some(&Outcome::Empty));
    }

    #[rstest]
    fn it_should_process_a_repeated_user_once(executor: BatchExecutor) {
        let mut calls = 0;
        let response = executor.execute(Operation::Store, &ids(&["a", "a", "a"]), |_| {
            calls += 1;
            Ok(Outcome::Success(calls))
        });
        assert_eq!(calls, 1);
        assert_eq!(response.len(), 1);
        assert_eq!(response.get(&UserId::from("a")), Some(&Outcome::Success(1)));
    }

    #[rstest]
    fn it_should_answer_an_empty_batch_with_an_empty_response(executor: BatchExecutor) {
        let response = executor.execute(Operation::Wipe, &[], |_| Ok(Outcome::Success(())));
        assert!(response.is_empty());
    }

    #[rstest]
    #[case(Operation::Store, "store")]
    #[case(Operation::ResetLastRead, "reset_last_read")]
    #[case(Operation::UnreadCount, "unread_count")]
    fn it_should_name_operations_for_logging(#[case] operation: Operation, #[case] expected: &str) {
        assert_eq!(operation.to_string(), expected);
    }
}
