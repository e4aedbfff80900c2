//! Execution of expanded macro plans against the device sink.
//!
//! One plan is in flight at a time. `Delay` effects are cooperative
//! waits raced against cancellation, so a long macro never blocks the
//! runtime from observing new hardware events. What happens to an
//! action that arrives mid-macro is governed by [`MacroPolicy`].

use std::{
    collections::VecDeque,
    sync::Arc,
    time::Duration,
};

use macrodeck_protocol::DeviceEffect;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use crate::{deps::KeySink, notification::NotificationDispatcher};

/// Policy for a plan submitted while another is in flight.
///
/// Both options are deterministic; plans are never interleaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacroPolicy {
    /// Run plans strictly FIFO, one in flight; new plans wait.
    #[default]
    Queue,
    /// Cancel the in-flight plan at its next await point and drop any
    /// queued plans before running the new one.
    Preempt,
}

/// Bookkeeping for the in-flight plan and the backlog.
struct RunState {
    /// Generation and cancellation token of the running plan, if any.
    current: Option<(u64, CancellationToken)>,
    /// Plans waiting their turn (Queue policy only).
    backlog: VecDeque<Vec<DeviceEffect>>,
    /// Monotonic plan generation counter.
    next_gen: u64,
}

/// Runs expanded plans against the sink, one at a time.
#[derive(Clone)]
pub struct MacroRunner {
    sink: Arc<dyn KeySink>,
    notifier: NotificationDispatcher,
    policy: MacroPolicy,
    state: Arc<Mutex<RunState>>,
}

impl MacroRunner {
    /// Create a runner bound to the given sink and notifier.
    pub fn new(sink: Arc<dyn KeySink>, notifier: NotificationDispatcher, policy: MacroPolicy) -> Self {
        Self {
            sink,
            notifier,
            policy,
            state: Arc::new(Mutex::new(RunState {
                current: None,
                backlog: VecDeque::new(),
                next_gen: 0,
            })),
        }
    }

    /// Submit an expanded plan for execution under the runner's policy.
    pub fn submit(&self, plan: Vec<DeviceEffect>) {
        if plan.is_empty() {
            trace!("empty plan, nothing to run");
            return;
        }
        let mut st = self.state.lock();
        match self.policy {
            MacroPolicy::Queue => {
                if st.current.is_some() {
                    trace!(queued = st.backlog.len() + 1, "plan queued behind in-flight macro");
                    st.backlog.push_back(plan);
                    return;
                }
            }
            MacroPolicy::Preempt => {
                if let Some((generation, token)) = st.current.take() {
                    trace!(generation, "preempting in-flight macro");
                    token.cancel();
                }
                st.backlog.clear();
            }
        }
        self.spawn_locked(&mut st, plan);
    }

    /// True when no plan is running and the backlog is empty.
    pub fn is_idle(&self) -> bool {
        let st = self.state.lock();
        st.current.is_none() && st.backlog.is_empty()
    }

    /// Wait until the runner has drained (used by tests and shutdown).
    pub async fn wait_idle(&self) {
        while !self.is_idle() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    /// Cancel the in-flight plan and drop the backlog.
    pub fn clear(&self) {
        let mut st = self.state.lock();
        if let Some((generation, token)) = st.current.take() {
            trace!(generation, "cancelling in-flight macro");
            token.cancel();
        }
        st.backlog.clear();
    }

    /// Start `plan` under a fresh generation. Caller holds the lock.
    fn spawn_locked(&self, st: &mut RunState, plan: Vec<DeviceEffect>) {
        let generation = st.next_gen;
        st.next_gen += 1;
        let token = CancellationToken::new();
        st.current = Some((generation, token.clone()));

        let runner = self.clone();
        tokio::spawn(async move {
            run_plan(&*runner.sink, &runner.notifier, &plan, &token).await;
            runner.on_plan_done(generation);
        });
    }

    /// Completion hook: clear `current` (unless preemption already
    /// replaced it) and start the next queued plan.
    fn on_plan_done(&self, generation: u64) {
        let mut st = self.state.lock();
        match st.current {
            Some((current_gen, _)) if current_gen == generation => {
                st.current = None;
                if let Some(next) = st.backlog.pop_front() {
                    self.spawn_locked(&mut st, next);
                }
            }
            _ => {}
        }
    }
}

/// Execute one plan. A sink failure abandons the remaining effects (no
/// retry, no synthesized key-ups); authored macros guard held keys with
/// explicit `KeyRelease` operations.
async fn run_plan(
    sink: &dyn KeySink,
    notifier: &NotificationDispatcher,
    plan: &[DeviceEffect],
    cancel: &CancellationToken,
) {
    for effect in plan {
        if cancel.is_cancelled() {
            trace!("macro cancelled");
            return;
        }
        let result = match effect {
            DeviceEffect::KeyPress { key } => sink.key_down(key),
            DeviceEffect::KeyTap { key } => sink.key_tap(key),
            DeviceEffect::KeyRelease { key } => sink.key_up(key),
            DeviceEffect::Delay { ms } => {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        trace!("macro cancelled during delay");
                        return;
                    }
                    _ = tokio::time::sleep(Duration::from_millis(*ms)) => {}
                }
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!(error = %e, "sink rejected effect, abandoning macro");
            let _ignored = notifier.send_error("Macro", format!("{}", e));
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use macrodeck_protocol::ipc;

    use super::*;
    use crate::test_support::RecordingSink;

    fn tap(key: &str) -> DeviceEffect {
        DeviceEffect::KeyTap {
            key: key.to_string(),
        }
    }

    fn runner_with(policy: MacroPolicy, sink: Arc<RecordingSink>) -> (MacroRunner, ipc::UiRx) {
        let (tx, rx) = ipc::ui_channel();
        let runner = MacroRunner::new(sink, NotificationDispatcher::new(tx), policy);
        (runner, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn effects_run_in_order() {
        let sink = Arc::new(RecordingSink::default());
        let (runner, _rx) = runner_with(MacroPolicy::Queue, sink.clone());

        runner.submit(vec![
            DeviceEffect::KeyPress { key: "ctrl".into() },
            tap("z"),
            DeviceEffect::Delay { ms: 100 },
            DeviceEffect::KeyRelease { key: "ctrl".into() },
        ]);
        runner.wait_idle().await;

        assert_eq!(
            sink.calls(),
            vec!["down:ctrl", "tap:z", "up:ctrl"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn queue_policy_runs_fifo_without_interleaving() {
        let sink = Arc::new(RecordingSink::default());
        let (runner, _rx) = runner_with(MacroPolicy::Queue, sink.clone());

        runner.submit(vec![tap("a"), DeviceEffect::Delay { ms: 50 }, tap("b")]);
        runner.submit(vec![tap("c")]);
        runner.wait_idle().await;

        assert_eq!(sink.calls(), vec!["tap:a", "tap:b", "tap:c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn preempt_policy_cancels_in_flight_plan() {
        let sink = Arc::new(RecordingSink::default());
        let (runner, _rx) = runner_with(MacroPolicy::Preempt, sink.clone());

        runner.submit(vec![tap("a"), DeviceEffect::Delay { ms: 10_000 }, tap("b")]);
        // Let the first plan reach its delay before preempting.
        tokio::time::sleep(Duration::from_millis(1)).await;
        runner.submit(vec![tap("c")]);
        runner.wait_idle().await;

        assert_eq!(sink.calls(), vec!["tap:a", "tap:c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn sink_failure_abandons_remaining_effects() {
        let sink = Arc::new(RecordingSink::failing_after(1));
        let (runner, mut rx) = runner_with(MacroPolicy::Queue, sink.clone());

        runner.submit(vec![tap("a"), tap("b"), tap("c")]);
        runner.wait_idle().await;

        assert_eq!(sink.calls(), vec!["tap:a"]);
        // The failure surfaces as an error notification.
        let msg = rx.try_recv().unwrap();
        assert!(matches!(
            msg,
            macrodeck_protocol::MsgToUI::Notify {
                kind: macrodeck_protocol::NotifyKind::Error,
                ..
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_drops_backlog() {
        let sink = Arc::new(RecordingSink::default());
        let (runner, _rx) = runner_with(MacroPolicy::Queue, sink.clone());

        runner.submit(vec![tap("a"), DeviceEffect::Delay { ms: 1_000 }, tap("b")]);
        runner.submit(vec![tap("c")]);
        tokio::time::sleep(Duration::from_millis(1)).await;
        runner.clear();
        runner.wait_idle().await;

        assert_eq!(sink.calls(), vec!["tap:a"]);
    }
}
