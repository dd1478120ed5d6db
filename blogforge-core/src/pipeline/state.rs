use serde::Serialize;
use std::fmt;
use tokio::sync::watch;

/// One template-build + provider-call step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Outline,
    Draft,
    Enhancement,
    Summary,
    Direct,
}

impl Stage {
    /// In-progress state while this stage's call is outstanding
    pub fn running_state(&self) -> PipelineState {
        match self {
            Stage::Outline => PipelineState::Outlining,
            Stage::Draft => PipelineState::Drafting,
            Stage::Enhancement => PipelineState::Enhancing,
            Stage::Summary => PipelineState::Summarizing,
            Stage::Direct => PipelineState::Generating,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Outline => "outline",
            Stage::Draft => "draft",
            Stage::Enhancement => "enhancement",
            Stage::Summary => "summary",
            Stage::Direct => "direct",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a single pipeline run
///
/// Blog: `Idle -> Outlining -> Drafting -> Enhancing -> Done`.
/// Summary: `Idle -> Summarizing -> Done`. Direct: `Idle -> Generating -> Done`.
/// Any non-terminal state may move to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    Idle,
    Outlining,
    Drafting,
    Enhancing,
    Summarizing,
    Generating,
    Done,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    pub fn can_transition_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;

        if self.is_terminal() {
            return false;
        }
        if next == Failed {
            return true;
        }
        matches!(
            (self, next),
            (Idle, Outlining)
                | (Idle, Summarizing)
                | (Idle, Generating)
                | (Outlining, Drafting)
                | (Drafting, Enhancing)
                | (Enhancing, Done)
                | (Summarizing, Done)
                | (Generating, Done)
        )
    }
}

type TransitionObserver<'a> = Box<dyn FnMut(PipelineState) + Send + 'a>;

/// Caller-side hooks for a single run
#[derive(Default)]
pub struct RunHooks<'a> {
    on_transition: Option<TransitionObserver<'a>>,
    cancel: Option<watch::Receiver<bool>>,
}

impl<'a> RunHooks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with every state the run enters, including the terminal one
    pub fn on_transition(mut self, observer: impl FnMut(PipelineState) + Send + 'a) -> Self {
        self.on_transition = Some(Box::new(observer));
        self
    }

    /// Abort the run once the receiver observes `true`
    pub fn cancel_on(mut self, receiver: watch::Receiver<bool>) -> Self {
        self.cancel = Some(receiver);
        self
    }
}

/// Tracks and reports state for one run
pub(crate) struct RunTracker<'a> {
    state: PipelineState,
    hooks: RunHooks<'a>,
}

impl<'a> RunTracker<'a> {
    pub(crate) fn new(hooks: RunHooks<'a>) -> Self {
        Self {
            state: PipelineState::Idle,
            hooks,
        }
    }

    pub(crate) fn state(&self) -> PipelineState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: PipelineState) {
        if !self.state.can_transition_to(next) {
            tracing::warn!(from = ?self.state, to = ?next, "ignoring illegal pipeline transition");
            return;
        }
        tracing::debug!(from = ?self.state, to = ?next, "pipeline transition");
        self.state = next;
        if let Some(observer) = self.hooks.on_transition.as_mut() {
            observer(next);
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.hooks
            .cancel
            .as_ref()
            .is_some_and(|receiver| *receiver.borrow())
    }

    /// Resolves once cancellation is requested; never resolves without a signal
    pub(crate) async fn cancelled(&mut self) {
        let Some(receiver) = self.hooks.cancel.as_mut() else {
            return std::future::pending().await;
        };
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            if receiver.changed().await.is_err() {
                // Sender gone without cancelling: nothing can cancel us now.
                return std::future::pending().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_blog_path_is_legal() {
        use PipelineState::*;
        let path = [Idle, Outlining, Drafting, Enhancing, Done];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{pair:?}");
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        use PipelineState::*;
        for next in [Idle, Outlining, Done, Failed] {
            assert!(!Done.can_transition_to(next));
            assert!(!Failed.can_transition_to(next));
        }
    }

    #[test]
    fn test_no_skipping_stages() {
        use PipelineState::*;
        assert!(!Idle.can_transition_to(Drafting));
        assert!(!Outlining.can_transition_to(Enhancing));
        assert!(!Drafting.can_transition_to(Done));
        assert!(!Summarizing.can_transition_to(Drafting));
        assert!(Drafting.can_transition_to(Failed));
    }

    #[test]
    fn test_tracker_reports_and_rejects_illegal_moves() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut tracker =
            RunTracker::new(RunHooks::new().on_transition(move |s| sink.lock().unwrap().push(s)));

        tracker.advance(PipelineState::Summarizing);
        tracker.advance(PipelineState::Enhancing);
        tracker.advance(PipelineState::Done);
        tracker.advance(PipelineState::Failed);

        assert_eq!(tracker.state(), PipelineState::Done);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![PipelineState::Summarizing, PipelineState::Done]
        );
    }

    #[tokio::test]
    async fn test_cancel_signal() {
        let (tx, rx) = watch::channel(false);
        let mut tracker = RunTracker::new(RunHooks::new().cancel_on(rx));
        assert!(!tracker.is_cancelled());

        tx.send(true).unwrap();
        assert!(tracker.is_cancelled());
        tracker.cancelled().await;
    }
}
