// src/session/controller.rs — Practice session state machine
//
// Owns the `ChatState` snapshot, dispatches workflow calls as spawned tasks,
// and keeps at most one of them alive. Each dispatch cancels the previous
// task's token; the task races its network future against that token, so a
// superseded request is dropped rather than left to finish.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::events::UiEvent;
use super::messages::to_ui_message;
use super::state::{reduce, Action, ChatPhase, ChatState};
use crate::infra::errors::CoachError;
use crate::interview::InterviewWorkflow;

struct Inner {
    workflow: Arc<InterviewWorkflow>,
    state: watch::Sender<ChatState>,
    events: mpsc::UnboundedSender<UiEvent>,
    in_flight: Mutex<Option<CancellationToken>>,
    api_key_env: String,
}

impl Inner {
    fn slot(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn apply(&self, action: Action) {
        self.state.send_modify(|s| *s = reduce(s, action));
        tracing::debug!(phase = self.state.borrow().phase.as_str(), "state updated");
    }

    /// Apply `action` unless `token` was superseded. Checked under the slot
    /// lock so a concurrent dispatch cannot slip in between check and apply.
    /// `toast` is queued before the state changes, so anyone who observes the
    /// new phase also finds the message waiting.
    fn commit(&self, token: &CancellationToken, action: Action, toast: Option<String>) -> bool {
        let _slot = self.slot();
        if token.is_cancelled() {
            return false;
        }
        if let Some(message) = toast {
            self.emit(UiEvent::ShowToast(message));
        }
        self.apply(action);
        true
    }

    fn emit(&self, event: UiEvent) {
        // The receiver going away just means nobody is rendering anymore.
        let _ = self.events.send(event);
    }

    fn ui_message(&self, err: &CoachError) -> String {
        to_ui_message(err, &self.api_key_env)
    }

    async fn fetch_question(
        self: Arc<Self>,
        token: CancellationToken,
        topic: String,
        restore: ChatPhase,
    ) {
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!("question request cancelled");
                return;
            }
            r = self.workflow.get_question(&topic) => r,
        };

        match result {
            Ok(question) => {
                if self.commit(&token, Action::QuestionReceived(question), None) {
                    self.emit(UiEvent::ScrollToBottom);
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    retriable = e.is_retriable(),
                    "question request failed"
                );
                let toast = self.ui_message(&e);
                self.commit(&token, Action::QuestionFailed { restore }, Some(toast));
            }
        }
    }
}

pub struct SessionController {
    inner: Arc<Inner>,
    observer: JoinHandle<()>,
}

impl SessionController {
    /// Build a controller and the receiving end of its event queue.
    /// Must be called inside a Tokio runtime.
    pub fn new(
        workflow: Arc<InterviewWorkflow>,
        api_key_env: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(ChatState::default());

        let inner = Arc::new(Inner {
            workflow,
            state: state_tx,
            events: events_tx,
            in_flight: Mutex::new(None),
            api_key_env: api_key_env.into(),
        });

        let observer = {
            let inner = inner.clone();
            let mut feed = inner.workflow.watch_sessions();
            tokio::spawn(async move {
                loop {
                    inner.apply(Action::HistoryUpdated(feed.latest()));
                    if !feed.changed().await {
                        break;
                    }
                }
            })
        };

        (Self { inner, observer }, events_rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> ChatState {
        self.inner.state.borrow().clone()
    }

    /// Wait until no question or score request is pending.
    pub async fn settled(&self) -> ChatState {
        let mut rx = self.subscribe();
        let settled = rx.wait_for(|s| !s.phase.is_loading()).await.map(|s| s.clone());
        settled.unwrap_or_else(|_| self.snapshot())
    }

    /// Cancel whatever is running, apply `initial`, then spawn the next task.
    fn dispatch<F, Fut>(&self, initial: Action, task: F)
    where
        F: FnOnce(Arc<Inner>, CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        {
            let mut slot = self.inner.slot();
            if let Some(previous) = slot.replace(token.clone()) {
                previous.cancel();
            }
            self.inner.apply(initial);
        }
        tokio::spawn(task(self.inner.clone(), token));
    }

    pub fn start_practice(&self) {
        let topic = self.inner.state.borrow().topic_input.clone();
        self.inner.emit(UiEvent::DismissKeyboard);
        self.dispatch(Action::QuestionRequested, move |inner, token| {
            inner.fetch_question(token, topic, ChatPhase::Idle)
        });
    }

    /// Returns false when the guard rejects the submit; nothing changes then.
    pub fn submit_answer(&self) -> bool {
        let (question, answer) = {
            let state = self.inner.state.borrow();
            let answer = state.answer_input.trim().to_string();
            match &state.current_question {
                Some(q) if state.phase == ChatPhase::AwaitingAnswer && !answer.is_empty() => {
                    (q.clone(), answer)
                }
                _ => return false,
            }
        };

        self.inner.emit(UiEvent::DismissKeyboard);
        self.inner.emit(UiEvent::ScrollToBottom);
        self.dispatch(Action::AnswerSubmitted(answer.clone()), move |inner, token| async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("scoring request cancelled");
                    return;
                }
                r = inner.workflow.score_answer(&question, &answer) => r,
            };

            let score = match result {
                Ok(score) => score,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        retriable = e.is_retriable(),
                        "scoring request failed"
                    );
                    let toast = inner.ui_message(&e);
                    inner.commit(&token, Action::ScoreFailed, Some(toast));
                    return;
                }
            };

            // Outside the race: a successful score always produces its row.
            let saved = inner
                .workflow
                .save_session(&question.topic, &question.text, &answer, &score)
                .await;
            let toast = saved.err().map(|e| {
                tracing::warn!(error = %e, "could not save scored session");
                format!("Score received but could not be saved: {}", inner.ui_message(&e))
            });

            if inner.commit(&token, Action::ScoreReceived(score), toast) {
                inner.emit(UiEvent::ScrollToBottom);
            }
        });
        true
    }

    /// Only valid once the current question has been scored.
    pub fn practice_another(&self) -> bool {
        let topic = {
            let state = self.inner.state.borrow();
            if state.phase != ChatPhase::Scored {
                return false;
            }
            state.topic_input.clone()
        };
        self.dispatch(Action::QuestionRequested, move |inner, token| {
            inner.fetch_question(token, topic, ChatPhase::Scored)
        });
        true
    }

    pub fn reset(&self) {
        let mut slot = self.inner.slot();
        if let Some(previous) = slot.take() {
            previous.cancel();
        }
        self.inner.apply(Action::Reset);
    }

    pub fn on_topic_changed(&self, topic: impl Into<String>) {
        self.inner.apply(Action::TopicChanged(topic.into()));
    }

    pub fn on_answer_changed(&self, answer: impl Into<String>) {
        self.inner.apply(Action::AnswerChanged(answer.into()));
    }

    pub fn on_voice_result(&self, text: impl Into<String>) {
        self.inner.apply(Action::VoiceResult(text.into()));
    }

    pub fn on_toggle_history(&self) {
        self.inner.apply(Action::ToggleHistory);
    }

    /// Independent of the in-flight slot. The history observer picks up
    /// the re-published list; failures surface as a toast.
    pub fn delete_session(&self, id: i64) -> JoinHandle<bool> {
        let inner = self.inner.clone();
        tokio::spawn(async move {
            match inner.workflow.delete_session(id).await {
                Ok(true) => true,
                Ok(false) => {
                    inner.emit(UiEvent::ShowToast(format!("No session with id {id}")));
                    false
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "delete failed");
                    inner.emit(UiEvent::ShowToast(inner.ui_message(&e)));
                    false
                }
            }
        })
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(token) = self.inner.slot().take() {
            token.cancel();
        }
        self.observer.abort();
    }
}
