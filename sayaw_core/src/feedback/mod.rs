use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crossbeam_channel::{unbounded, Receiver, Sender};

/// Shared flag that lets the session void a scheduled display action.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    ClearFeedbackText,
    HideStepFeedback,
}

/// A display action the embedder runs `delay_secs` after receiving it.
#[derive(Debug, Clone)]
pub struct DeferredTask {
    pub delay_secs: f64,
    pub action: DeferredAction,
    pub token: CancelToken,
}

#[derive(Debug, Clone)]
pub enum DisplayCommand {
    ScoreText(String),
    FeedbackText(String),
    StepFeedback { correct: bool },
    Schedule(DeferredTask),
}

/// Push-only side of the display channel held by the session.
#[derive(Debug, Clone)]
pub struct DisplayHandle {
    command_tx: Sender<DisplayCommand>,
}

impl DisplayHandle {
    /// A handle nobody listens to; every push is dropped.
    pub fn disconnected() -> Self {
        let (tx, _) = unbounded();
        Self { command_tx: tx }
    }

    pub fn score_text(&self, text: impl Into<String>) {
        let _ = self.command_tx.send(DisplayCommand::ScoreText(text.into()));
    }

    pub fn feedback_text(&self, text: impl Into<String>) {
        let _ = self.command_tx.send(DisplayCommand::FeedbackText(text.into()));
    }

    pub fn step_feedback(&self, correct: bool) {
        let _ = self.command_tx.send(DisplayCommand::StepFeedback { correct });
    }

    pub fn schedule(&self, delay_secs: f64, action: DeferredAction) -> CancelToken {
        let token = CancelToken::new();
        let _ = self.command_tx.send(DisplayCommand::Schedule(DeferredTask {
            delay_secs,
            action,
            token: token.clone(),
        }));
        token
    }
}

struct Scheduled {
    due: f64,
    task: DeferredTask,
}

/// Receiving side: the text a HUD would show, plus a timer queue for deferred
/// actions. Elements can be detached (scene torn down); commands and timers
/// aimed at a detached element do nothing.
pub struct DisplayBoard {
    command_rx: Receiver<DisplayCommand>,
    scheduled: Vec<Scheduled>,
    score_text: String,
    feedback_text: Option<String>,
    step_feedback: Option<bool>,
    step_attached: bool,
}

impl DisplayBoard {
    pub fn new() -> (Self, DisplayHandle) {
        let (tx, rx) = unbounded();
        (
            Self {
                command_rx: rx,
                scheduled: Vec::new(),
                score_text: String::new(),
                feedback_text: Some(String::new()),
                step_feedback: None,
                step_attached: true,
            },
            DisplayHandle { command_tx: tx },
        )
    }

    /// Applies queued commands, then runs every deferred action due by `now`.
    pub fn process(&mut self, now: f64) {
        while let Ok(cmd) = self.command_rx.try_recv() {
            match cmd {
                DisplayCommand::ScoreText(text) => self.score_text = text,
                DisplayCommand::FeedbackText(text) => {
                    if let Some(current) = self.feedback_text.as_mut() {
                        *current = text;
                    }
                }
                DisplayCommand::StepFeedback { correct } => {
                    if self.step_attached {
                        self.step_feedback = Some(correct);
                    }
                }
                DisplayCommand::Schedule(task) => self.scheduled.push(Scheduled {
                    due: now + task.delay_secs,
                    task,
                }),
            }
        }

        let mut due = Vec::new();
        self.scheduled.retain(|s| {
            if s.due <= now {
                due.push(s.task.clone());
                false
            } else {
                true
            }
        });

        for task in due {
            if task.token.is_cancelled() {
                continue;
            }
            match task.action {
                DeferredAction::ClearFeedbackText => {
                    if let Some(current) = self.feedback_text.as_mut() {
                        current.clear();
                    }
                }
                DeferredAction::HideStepFeedback => self.step_feedback = None,
            }
        }
    }

    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    /// `None` once the feedback element is detached.
    pub fn feedback_text(&self) -> Option<&str> {
        self.feedback_text.as_deref()
    }

    /// `Some(correct)` while the step pulse is visible.
    pub fn step_feedback(&self) -> Option<bool> {
        self.step_feedback
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduled.len()
    }

    pub fn detach_feedback_text(&mut self) {
        self.feedback_text = None;
    }

    pub fn detach_step_feedback(&mut self) {
        self.step_attached = false;
        self.step_feedback = None;
    }
}
