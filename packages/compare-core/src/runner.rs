//! Procedure trait and the generic sequence runner.
//!
//! A procedure is a resumable state machine. Each time it is started or
//! resumed it either suspends on a pending operation or finishes with an
//! output. The runner owns the loop: await the operation, hand the settled
//! result back to the procedure, repeat.
//!
//! # Key Properties
//!
//! - **Single resumption path**: success and failure of an operation both
//!   arrive through [`Procedure::resume`]. The procedure decides whether a
//!   failure is recovered (return another step) or propagated (return `Err`).
//! - **Any number of stages**: the runner does not know how many suspension
//!   points a procedure has.
//! - **No side effects of its own**: the runner only polls the operations it
//!   is handed.
//!
//! # Example
//!
//! ```ignore
//! enum Double { Start, Waiting, Finished }
//!
//! impl Procedure for Double {
//!     type Value = u32;
//!     type Output = u32;
//!     type Error = String;
//!
//!     fn start(&mut self) -> Result<ProcedureStep<Self>, String> {
//!         *self = Double::Waiting;
//!         Ok(Step::pending(async { Ok(21) }))
//!     }
//!
//!     fn resume(&mut self, settled: Result<u32, String>) -> Result<ProcedureStep<Self>, String> {
//!         *self = Double::Finished;
//!         Ok(Step::Done(settled? * 2))
//!     }
//! }
//!
//! assert_eq!(run(Double::Start).await, Ok(42));
//! ```

use std::future::Future;

use futures::future::BoxFuture;
use tracing::trace;

/// An operation a procedure is suspended on.
pub type Operation<V, E> = BoxFuture<'static, Result<V, E>>;

/// What a procedure does after being started or resumed.
pub enum Step<V, O, E> {
    /// Suspend until the operation settles.
    Pending(Operation<V, E>),
    /// Finish with the final output.
    Done(O),
}

impl<V, O, E> Step<V, O, E> {
    /// Suspend on any sendable future.
    pub fn pending<F>(operation: F) -> Self
    where
        F: Future<Output = Result<V, E>> + Send + 'static,
    {
        Step::Pending(Box::pin(operation))
    }
}

impl<V, O, E> std::fmt::Debug for Step<V, O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Pending(_) => f.write_str("Step::Pending"),
            Step::Done(_) => f.write_str("Step::Done"),
        }
    }
}

/// Step type of a given procedure.
pub type ProcedureStep<P> =
    Step<<P as Procedure>::Value, <P as Procedure>::Output, <P as Procedure>::Error>;

/// A resumable procedure driven by [`run`].
///
/// # Guarantees
///
/// - `start` is called exactly once, before any `resume`
/// - `resume` is called once per settled operation, serially
/// - Neither is called again after `Done` or `Err`
pub trait Procedure: Send + Sized {
    /// Value produced by the operations this procedure suspends on.
    ///
    /// Procedures with heterogeneous stages use an enum here.
    type Value: Send + 'static;

    /// Final output of the procedure.
    type Output: Send;

    /// Error type shared by operations and the procedure itself.
    type Error: Send + 'static;

    /// Begin the procedure. An `Err` here is returned by the runner as-is.
    fn start(&mut self) -> Result<ProcedureStep<Self>, Self::Error>;

    /// Resume at the current suspension point with the settled operation.
    fn resume(
        &mut self,
        settled: Result<Self::Value, Self::Error>,
    ) -> Result<ProcedureStep<Self>, Self::Error>;
}

/// Drive a procedure to completion.
///
/// Resolves to the procedure's output, or to the first error the procedure
/// lets escape from `start` or `resume`.
pub async fn run<P: Procedure>(mut procedure: P) -> Result<P::Output, P::Error> {
    let name = std::any::type_name::<P>();
    let mut step = procedure.start()?;
    let mut resumptions = 0usize;

    loop {
        match step {
            Step::Done(output) => {
                trace!(procedure = name, resumptions, "procedure finished");
                return Ok(output);
            }
            Step::Pending(operation) => {
                let settled = operation.await;
                resumptions += 1;
                trace!(
                    procedure = name,
                    resumptions,
                    ok = settled.is_ok(),
                    "resuming procedure"
                );
                step = procedure.resume(settled)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Stage 1 yields "A", stage 2 receives it and yields "B".
    enum TwoStage {
        Start { fail_first: bool },
        AwaitingA,
        AwaitingB { seen: String },
    }

    impl Procedure for TwoStage {
        type Value = String;
        type Output = (String, String);
        type Error = String;

        fn start(&mut self) -> Result<ProcedureStep<Self>, String> {
            let fail_first = matches!(self, TwoStage::Start { fail_first: true });
            *self = TwoStage::AwaitingA;
            Ok(Step::pending(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                if fail_first {
                    Err("E".to_string())
                } else {
                    Ok("A".to_string())
                }
            }))
        }

        fn resume(
            &mut self,
            settled: Result<String, String>,
        ) -> Result<ProcedureStep<Self>, String> {
            match std::mem::replace(self, TwoStage::AwaitingA) {
                TwoStage::AwaitingA => {
                    let a = settled?;
                    *self = TwoStage::AwaitingB { seen: a.clone() };
                    Ok(Step::pending(async move { Ok(format!("B({})", a)) }))
                }
                TwoStage::AwaitingB { seen } => Ok(Step::Done((seen, settled?))),
                TwoStage::Start { .. } => Err("resumed before start".to_string()),
            }
        }
    }

    #[tokio::test]
    async fn test_two_stage_result_is_last_value() {
        let (a, b) = run(TwoStage::Start { fail_first: false }).await.unwrap();
        assert_eq!(a, "A");
        assert_eq!(b, "B(A)");
    }

    #[tokio::test]
    async fn test_unhandled_failure_propagates() {
        let err = run(TwoStage::Start { fail_first: true }).await.unwrap_err();
        assert_eq!(err, "E");
    }

    /// Catches a failed operation and finishes with a fallback.
    struct Recovering {
        attempts: Arc<AtomicUsize>,
    }

    impl Procedure for Recovering {
        type Value = u32;
        type Output = u32;
        type Error = String;

        fn start(&mut self) -> Result<ProcedureStep<Self>, String> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Ok(Step::pending(async { Err::<u32, _>("boom".to_string()) }))
        }

        fn resume(&mut self, settled: Result<u32, String>) -> Result<ProcedureStep<Self>, String> {
            match settled {
                Ok(value) => Ok(Step::Done(value)),
                Err(_) => Ok(Step::Done(7)),
            }
        }
    }

    #[tokio::test]
    async fn test_procedure_can_recover_from_failure() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let out = run(Recovering {
            attempts: attempts.clone(),
        })
        .await
        .unwrap();

        assert_eq!(out, 7);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    /// Sums `1..=stages`, one suspension per term.
    struct Summing {
        stages: u32,
        next: u32,
        total: u32,
    }

    impl Procedure for Summing {
        type Value = u32;
        type Output = u32;
        type Error = String;

        fn start(&mut self) -> Result<ProcedureStep<Self>, String> {
            self.resume(Ok(0))
        }

        fn resume(&mut self, settled: Result<u32, String>) -> Result<ProcedureStep<Self>, String> {
            self.total += settled?;
            if self.next == self.stages {
                return Ok(Step::Done(self.total));
            }
            self.next += 1;
            let term = self.next;
            Ok(Step::pending(async move { Ok(term) }))
        }
    }

    #[tokio::test]
    async fn test_runs_any_number_of_stages() {
        let out = run(Summing {
            stages: 10,
            next: 0,
            total: 0,
        })
        .await
        .unwrap();
        assert_eq!(out, 55);

        let out = run(Summing {
            stages: 0,
            next: 0,
            total: 0,
        })
        .await
        .unwrap();
        assert_eq!(out, 0);
    }

    struct FailsToStart;

    impl Procedure for FailsToStart {
        type Value = ();
        type Output = ();
        type Error = String;

        fn start(&mut self) -> Result<ProcedureStep<Self>, String> {
            Err("cannot start".to_string())
        }

        fn resume(&mut self, _: Result<(), String>) -> Result<ProcedureStep<Self>, String> {
            unreachable!("never started")
        }
    }

    #[tokio::test]
    async fn test_start_failure_is_returned() {
        assert_eq!(run(FailsToStart).await, Err("cannot start".to_string()));
    }
}
