//! Checklist session: owns the completion state for one run of the app.
//!
//! ## Lifecycle
//!
//! ```text
//! open() -> Loading -> initialize(now) -> Ready -> toggle / manual_reset ...
//! ```
//!
//! `open` reads both persisted keys once and reconciles them against the
//! catalog. `initialize` evaluates the scheduled reset exactly once; only
//! then are mutations accepted. Every mutation is written through to the
//! store immediately.
//!
//! The instant passed to `initialize` is the session clock: every event the
//! session emits carries it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut checklist = Checklist::open(catalog, policy, Database::open()?, keys);
//! let fired = checklist.initialize(Utc::now())?;
//! checklist.toggle("Berserker", "Chaos Dungeon")?;
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{ChecklistError, Result};
use crate::events::Event;
use crate::reset::{ResetKind, ResetPolicy};
use crate::state::{reconcile, CompletionState};
use crate::storage::{KeyValueStore, StorageKeys};

/// Prompt shown before a manual full reset.
pub const MANUAL_RESET_PROMPT: &str = "Are you sure you want to reset all tasks?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Whether the session is still loading or accepts user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Loading,
    Ready,
}

/// One checklist session over an injected key-value store.
pub struct Checklist<S: KeyValueStore> {
    catalog: Catalog,
    policy: ResetPolicy,
    store: S,
    keys: StorageKeys,
    state: CompletionState,
    last_checked: Option<DateTime<Utc>>,
    /// Set by a successful `initialize`; `Some` means `Ready`.
    session_at: Option<DateTime<Utc>>,
    events: Vec<Event>,
}

impl<S: KeyValueStore> Checklist<S> {
    /// Load and reconcile persisted state.
    ///
    /// Never fails: unreadable or corrupted values are logged and treated as
    /// absent.
    pub fn open(catalog: Catalog, policy: ResetPolicy, store: S, keys: StorageKeys) -> Self {
        let saved_state = read_key(&store, &keys.completion_state);
        let state = reconcile(&catalog, saved_state.as_deref());

        let last_checked = read_key(&store, &keys.last_checked).and_then(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    tracing::warn!(value = %raw, error = %e, "ignoring unparseable last-checked date");
                })
                .ok()
        });

        tracing::debug!(
            characters = catalog.len(),
            last_checked = ?last_checked,
            "checklist state loaded"
        );

        Self {
            catalog,
            policy,
            store,
            keys,
            state,
            last_checked,
            session_at: None,
            events: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn policy(&self) -> &ResetPolicy {
        &self.policy
    }

    pub fn state(&self) -> &CompletionState {
        &self.state
    }

    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.last_checked
    }

    pub fn phase(&self) -> Phase {
        if self.session_at.is_some() {
            Phase::Ready
        } else {
            Phase::Loading
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == Phase::Loading
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Evaluate and apply the scheduled reset, then accept user actions.
    ///
    /// Runs the decision only on the first successful call; later calls
    /// return [`ResetKind::None`] without touching state. `now` becomes the
    /// session clock.
    ///
    /// # Errors
    /// Returns an error if a fired reset cannot be persisted. In-memory
    /// state is left as loaded and the session stays in `Loading`, so a
    /// retry evaluates the same reset again.
    pub fn initialize(&mut self, now: DateTime<Utc>) -> Result<ResetKind> {
        if self.session_at.is_some() {
            tracing::debug!("reset check already evaluated for this session");
            return Ok(ResetKind::None);
        }

        let kind = self.policy.decide(now, self.last_checked);
        let (next_state, event) = match kind {
            ResetKind::None => {
                let next_daily_reset = self.policy.next_daily_reset(now);
                tracing::info!(
                    last_daily_reset = %self.policy.today_reset_instant(now),
                    %next_daily_reset,
                    "reset check passed"
                );
                (None, Event::ResetSkipped { next_daily_reset, at: now })
            }
            ResetKind::Daily => {
                let tasks = self.policy.daily_tasks().to_vec();
                let mut next = self.state.clone();
                let cleared = next.reset_tasks(&self.catalog, &tasks);
                tracing::info!(tasks = ?tasks, cleared, "daily reset");
                (Some(next), Event::DailyReset { tasks, at: now })
            }
            ResetKind::Weekly => {
                tracing::info!(characters = self.catalog.len(), "weekly reset");
                (
                    Some(CompletionState::cleared(&self.catalog)),
                    Event::WeeklyReset { at: now },
                )
            }
        };

        if let Some(next) = next_state {
            // Flags first, timestamp last; memory changes only after both land.
            self.write_state(&next)?;
            self.write_last_checked(now)?;
            self.state = next;
            self.last_checked = Some(now);
        }

        self.events.push(Event::StateLoaded {
            characters: self.state.len(),
            at: now,
        });
        self.events.push(event);
        self.session_at = Some(now);
        Ok(kind)
    }

    /// Flip a task and persist. Returns the new done flag.
    ///
    /// # Errors
    /// Returns [`ChecklistError::NotReady`] before [`Checklist::initialize`],
    /// or a storage error if the write fails.
    pub fn toggle(&mut self, character: &str, task: &str) -> Result<bool> {
        let at = self.ensure_ready()?;

        if self.catalog.task_names(character).map_or(true, |tasks| !tasks.iter().any(|t| t == task)) {
            tracing::debug!(character, task, "toggling task not listed in catalog");
        }

        let done = self.state.toggle(character, task);
        self.write_state(&self.state)?;
        self.events.push(Event::TaskToggled {
            character: character.to_string(),
            task: task.to_string(),
            done,
            at,
        });
        Ok(done)
    }

    /// Clear every task after the user confirms.
    ///
    /// The last-checked timestamp is not touched. Returns whether the reset
    /// happened.
    ///
    /// # Errors
    /// Returns [`ChecklistError::NotReady`] before [`Checklist::initialize`],
    /// or a storage error if the write fails.
    pub fn manual_reset(&mut self, confirm: &dyn Confirm) -> Result<bool> {
        let at = self.ensure_ready()?;

        if !confirm.confirm(MANUAL_RESET_PROMPT) {
            tracing::debug!("manual reset declined");
            self.events.push(Event::ManualResetDeclined { at });
            return Ok(false);
        }

        self.state.clear(&self.catalog);
        self.write_state(&self.state)?;
        tracing::info!("manual reset");
        self.events.push(Event::ManualReset { at });
        Ok(true)
    }

    /// Session clock, or `NotReady` before `initialize`.
    fn ensure_ready(&self) -> Result<DateTime<Utc>, ChecklistError> {
        self.session_at.ok_or(ChecklistError::NotReady)
    }

    fn write_state(&self, state: &CompletionState) -> Result<()> {
        let json = state.to_json()?;
        self.store.set(&self.keys.completion_state, &json)?;
        Ok(())
    }

    fn write_last_checked(&self, at: DateTime<Utc>) -> Result<()> {
        let value = at.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.store.set(&self.keys.last_checked, &value)?;
        Ok(())
    }
}

fn read_key<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    store.get(key).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "failed to read persisted value; treating as absent");
        None
    })
}
