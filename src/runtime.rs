//! # Headless Session Driver
//!
//! Runs a [`Session`] as a single event queue on tokio. Three sources feed it:
//!
//! ```text
//!   keys (host) ─────────┐
//!   fetch completions ───┼──▶ select! ──▶ update(session, action) ──▶ Effect
//!   resync interval ─────┘
//! ```
//!
//! Only one action is applied at a time and each source posts whole actions,
//! so a resync tick can never split a keystroke's handling. Fetches run as
//! spawned tasks and come back through the completion channel like any other
//! event; the session's sequence check decides whether they still matter.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::{Action, Effect, FetchRequest, Key, Session, update};
use crate::inference::SuggestionClient;
use crate::surface::{EditableSurface, OverlayRenderer, SubjectField};

/// Spawn a suggestion fetch and post its result back as `Action::SuggestionReady`.
pub fn spawn_fetch(
    client: SuggestionClient,
    fetch: FetchRequest,
    tx: mpsc::UnboundedSender<Action>,
) -> JoinHandle<()> {
    debug!("Spawning fetch #{}", fetch.seq);
    tokio::spawn(async move {
        let FetchRequest { seq, request } = fetch;
        let suggestion = client.fetch(&request.context, &request.prefix).await;
        if tx
            .send(Action::SuggestionReady { seq, suggestion })
            .is_err()
        {
            warn!("Fetch #{} finished after the session closed", seq);
        }
    })
}

/// A key press from the host, optionally asking whether it was consumed.
#[derive(Debug)]
pub struct KeyPress {
    pub key: Key,
    reply: Option<oneshot::Sender<bool>>,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self { key, reply: None }
    }

    /// The receiver resolves to `true` when the host should suppress the key's default action.
    pub fn with_reply(key: Key) -> (Self, oneshot::Receiver<bool>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                key,
                reply: Some(tx),
            },
            rx,
        )
    }
}

pub struct SessionDriver<B, F, O> {
    session: Session<B, F, O>,
    client: SuggestionClient,
    resync_interval: Duration,
}

impl<B, F, O> SessionDriver<B, F, O>
where
    B: EditableSurface,
    F: SubjectField,
    O: OverlayRenderer,
{
    pub fn new(session: Session<B, F, O>, client: SuggestionClient, resync_interval: Duration) -> Self {
        Self {
            session,
            client,
            resync_interval,
        }
    }

    /// Process events until `keys` closes, then hand the session back.
    pub async fn run(mut self, mut keys: mpsc::UnboundedReceiver<KeyPress>) -> Session<B, F, O> {
        let (tx, mut completions) = mpsc::unbounded_channel::<Action>();
        let mut ticker = tokio::time::interval(self.resync_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; nothing has drifted yet.
        ticker.tick().await;

        info!(
            "Session driver started (resync every {}ms, provider {})",
            self.resync_interval.as_millis(),
            self.client.provider_name()
        );

        loop {
            tokio::select! {
                biased;
                press = keys.recv() => {
                    let Some(KeyPress { key, reply }) = press else {
                        break;
                    };
                    let effect = self.dispatch(Action::Key(key), &tx);
                    if let Some(reply) = reply {
                        let _ = reply.send(effect == Effect::Consumed);
                    }
                }
                Some(action) = completions.recv() => {
                    self.dispatch(action, &tx);
                }
                _ = ticker.tick() => {
                    self.dispatch(Action::Resync, &tx);
                }
            }
        }

        info!("Key channel closed; session driver stopping");
        self.session
    }

    fn dispatch(&mut self, action: Action, tx: &mpsc::UnboundedSender<Action>) -> Effect {
        let effect = update(&mut self.session, action);
        if let Effect::Fetch(fetch) = &effect {
            spawn_fetch(self.client.clone(), fetch.clone(), tx.clone());
        }
        effect
    }
}
