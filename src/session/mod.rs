mod store;

pub use store::MessageStore;

use crate::dispatcher::{Dispatcher, PendingReply};
use crate::error::{AbotError, Result};
use crate::models::ChatTurn;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use uuid::Uuid;

pub const GREETING: &str = "Hi! I am Abot! Ask me anything!";

/// How often the waiting callback fires while a reply is outstanding.
pub const WAIT_TICK: Duration = Duration::from_millis(120);

/// Everything one chat window keeps alive: the worker pool, the session id
/// sent to the chat API, the chat log and the single in-flight reply.
pub struct SessionState {
    worker_pool: Runtime,
    session_id: String,
    turns: MessageStore,
    pending_reply: Option<PendingReply>,
}

impl SessionState {
    pub fn new(worker_threads: usize) -> Result<Self> {
        let worker_pool = Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("abot-worker")
            .enable_all()
            .build()?;

        let session_id = Uuid::new_v4().simple().to_string();
        log::info!("Started chat session {}", session_id);

        let mut state = Self {
            worker_pool,
            session_id,
            turns: MessageStore::new(),
            pending_reply: None,
        };
        state.ensure_seeded();
        Ok(state)
    }

    /// Create the session on first use; later calls return it untouched.
    pub fn bootstrap(
        slot: &mut Option<SessionState>,
        worker_threads: usize,
    ) -> Result<&mut SessionState> {
        if slot.is_none() {
            *slot = Some(SessionState::new(worker_threads)?);
        }
        let state = slot
            .as_mut()
            .ok_or_else(|| AbotError::Other("Session slot is empty".to_string()))?;
        state.ensure_seeded();
        Ok(state)
    }

    fn ensure_seeded(&mut self) {
        if self.turns.is_empty() {
            self.turns.append(ChatTurn::ai(GREETING));
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn turns(&self) -> &MessageStore {
        &self.turns
    }

    pub fn worker_pool(&self) -> &Runtime {
        &self.worker_pool
    }

    pub fn has_pending_reply(&self) -> bool {
        self.pending_reply.is_some()
    }

    /// Append the human turn and hand the reply call to the worker pool.
    ///
    /// Refuses with [`AbotError::ReplyPending`] while another reply is in
    /// flight; nothing is appended in that case.
    pub fn send_message(&mut self, dispatcher: &Dispatcher, text: &str) -> Result<()> {
        if self.pending_reply.is_some() {
            return Err(AbotError::ReplyPending);
        }

        self.turns.append(ChatTurn::human(text));
        let pending = dispatcher.submit(self.worker_pool.handle(), text, &self.session_id);
        self.pending_reply = Some(pending);
        Ok(())
    }

    /// Block the calling thread until the pending reply resolves, calling
    /// `on_wait` with an increasing frame number every [`WAIT_TICK`]. The
    /// reply is appended under a fresh id. Returns `None` if nothing was
    /// pending.
    pub fn resolve_pending<W>(&mut self, mut on_wait: W) -> Option<&ChatTurn>
    where
        W: FnMut(usize),
    {
        let pending = self.pending_reply.take()?;

        let turn = self.worker_pool.block_on(async {
            let wait = pending.wait();
            tokio::pin!(wait);
            let mut ticker = tokio::time::interval(WAIT_TICK);
            let mut frame = 0usize;
            loop {
                tokio::select! {
                    turn = &mut wait => break turn,
                    _ = ticker.tick() => {
                        on_wait(frame);
                        frame += 1;
                    }
                }
            }
        });

        Some(self.turns.append(turn.with_fresh_id()))
    }
}
