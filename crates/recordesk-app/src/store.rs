// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! The state container handed to every consumer. One `Store` is built per
//! application root and passed down; there is no global instance.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    AppCommand, AppEvent, AppState, ModalChannel, ModalKind, ModalOutcome, ModalTicket, RecordId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub page_limit: u32,
    pub selected_menu: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_limit: crate::DEFAULT_PAGE_LIMIT,
            selected_menu: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("page limit must be positive, got {0}")]
    InvalidPageLimit(u32),
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_limit == 0 {
            return Err(ConfigError::InvalidPageLimit(self.page_limit));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppState, &[AppEvent])>;

pub struct Store {
    state: AppState,
    modal: ModalChannel,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("modal", &self.modal)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl Store {
    /// Wraps a seed state. A fresh store holds no modal resolver, so a
    /// seeded open modal is closed here rather than left undismissable.
    pub fn new(mut state: AppState) -> Self {
        if state.modal.is_open {
            debug!(kind = ?state.modal.kind, "seed modal has no resolver; closing");
            state.modal.close();
        }
        Self {
            state,
            modal: ModalChannel::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_config(config: &StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = AppState::default();
        state.view.page_limit = config.page_limit;
        state.view.selected_menu = config.selected_menu.clone();
        Ok(Self::new(state))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&AppState, &[AppEvent]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        debug!(?command, "dispatch");
        let events = self.state.dispatch(command);
        self.publish(&events);
        events
    }

    /// Applies `update` to the current refresh tick. Two callers bumping the
    /// tick back to back both land, unlike writing a value read earlier.
    pub fn update_refresh_tick(&mut self, update: impl FnOnce(u64) -> u64) -> Vec<AppEvent> {
        let events = self.state.view.update_refresh_tick(update);
        self.publish(&events);
        events
    }

    /// Opens `kind` for `record_id` (empty when `None`). A modal that is
    /// still pending settles with `ModalError::Superseded`.
    pub fn open_modal(&mut self, kind: ModalKind, record_id: Option<RecordId>) -> ModalTicket {
        let record_id = record_id.unwrap_or_default();
        let (ticket, superseded) = self.modal.open(kind);

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = superseded {
            events.push(AppEvent::ModalSuperseded(previous));
        }
        self.state.modal.open(kind, record_id.clone());
        events.push(AppEvent::ModalOpened { kind, record_id });
        self.publish(&events);
        ticket
    }

    pub fn resolve_modal(&mut self, value: Value) -> bool {
        self.settle_modal(ModalOutcome::Confirmed(value))
    }

    pub fn cancel_modal(&mut self) -> bool {
        self.settle_modal(ModalOutcome::Cancelled)
    }

    /// Close button path. Always cancels so the awaiting caller is released.
    pub fn dismiss_modal(&mut self) -> bool {
        self.cancel_modal()
    }

    pub fn has_pending_modal(&self) -> bool {
        self.modal.is_pending()
    }

    fn settle_modal(&mut self, outcome: ModalOutcome) -> bool {
        let cancelled = outcome.is_cancelled();
        let Some(kind) = self.modal.settle(outcome) else {
            return false;
        };
        self.state.modal.close();
        let event = if cancelled {
            AppEvent::ModalCancelled(kind)
        } else {
            AppEvent::ModalResolved(kind)
        };
        self.publish(&[event]);
        true
    }

    fn publish(&mut self, events: &[AppEvent]) {
        if events.is_empty() {
            return;
        }
        trace!(
            listeners = self.listeners.len(),
            events = events.len(),
            "notify"
        );
        for (_, listener) in &mut self.listeners {
            listener(&self.state, events);
        }
    }
}
