use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use super::action::Action;
use super::effects::{DataEffects, Effect};
use super::reducer::reduce;
use super::state::AppState;

/// Owns the state, runs the reducer and executes the effects it returns
///
/// Effects run on a background tokio task. Whatever action they produce comes
/// back through the action channel and is applied on the next
/// `process_actions` call from the event loop.
pub struct Runtime {
    state: AppState,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Resolved effects waiting for the executor task
    effect_tx: mpsc::UnboundedSender<Effect>,
    data_effects: Arc<DataEffects>,
}

impl Runtime {
    pub fn new(initial_state: AppState, data_effects: Arc<DataEffects>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (effect_tx, effect_rx) = mpsc::unbounded_channel();

        tokio::spawn(run_executor(effect_rx, action_tx.clone()));

        Self {
            state: initial_state,
            action_tx,
            action_rx,
            effect_tx,
            data_effects,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply `action` to the state and execute the resulting effect
    pub fn dispatch(&mut self, action: Action) {
        trace!("ACTION: Dispatching {:?}", action);

        // mem::take keeps the reducer call free of a full state clone
        let state = std::mem::take(&mut self.state);
        let (new_state, effect) = reduce(state, action);
        self.state = new_state;

        self.execute_effect(effect);
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Batch(effects) => {
                for e in effects {
                    self.execute_effect(e);
                }
            }
            Effect::Action(_) | Effect::Async(_) => self.queue(effect),
            fetch => {
                debug!("EFFECT: Executing {:?}", fetch);
                self.queue(self.data_effects.resolve(fetch));
            }
        }
    }

    fn queue(&self, effect: Effect) {
        if self.effect_tx.send(effect).is_err() {
            warn!("EFFECT: Executor stopped, dropping effect");
        }
    }

    /// Drain the action channel, returning how many actions were applied
    pub fn process_actions(&mut self) -> usize {
        let mut count = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            count += 1;
        }
        count
    }

    /// Sender for feeding actions in from outside the runtime
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }
}

async fn run_executor(
    mut effect_rx: mpsc::UnboundedReceiver<Effect>,
    action_tx: mpsc::UnboundedSender<Action>,
) {
    while let Some(effect) = effect_rx.recv().await {
        spawn_effect(effect, &action_tx);
    }
}

fn spawn_effect(effect: Effect, action_tx: &mpsc::UnboundedSender<Action>) {
    match effect {
        Effect::None => {}
        Effect::Action(action) => {
            let _ = action_tx.send(action);
        }
        Effect::Batch(effects) => {
            for e in effects {
                spawn_effect(e, action_tx);
            }
        }
        Effect::Async(future) => {
            let action_tx = action_tx.clone();
            tokio::spawn(async move {
                let _ = action_tx.send(future.await);
            });
        }
        // resolved in execute_effect before queueing
        other => warn!("EFFECT: Unresolved fetch reached the executor: {:?}", other),
    }
}
