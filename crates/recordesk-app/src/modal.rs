// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Single-slot modal requests. A caller opens a modal and awaits the
//! returned [`ModalTicket`]; whichever modal view is mounted for the open
//! [`ModalKind`] settles it through the store.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::{ModalKind, RecordId};

/// How the user left a modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum ModalOutcome {
    Confirmed(Value),
    Cancelled,
}

impl ModalOutcome {
    /// The confirmed payload, `None` for a cancelled modal.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Confirmed(value) => Some(value),
            Self::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("{kind} modal was replaced by another modal before it settled")]
    Superseded { kind: ModalKind },
    #[error("modal store was dropped before the modal settled")]
    Abandoned,
}

pub type ModalResult = Result<ModalOutcome, ModalError>;

/// Observable part of the modal slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalState {
    pub kind: Option<ModalKind>,
    pub record_id: RecordId,
    pub is_open: bool,
}

impl ModalState {
    pub(crate) fn open(&mut self, kind: ModalKind, record_id: RecordId) {
        self.kind = Some(kind);
        self.record_id = record_id;
        self.is_open = true;
    }

    pub(crate) fn close(&mut self) {
        self.is_open = false;
    }

    /// The kind to mount, if a modal is open.
    pub fn active(&self) -> Option<ModalKind> {
        if self.is_open { self.kind } else { None }
    }
}

/// Awaitable half of a modal request.
#[derive(Debug)]
pub struct ModalTicket {
    kind: ModalKind,
    rx: oneshot::Receiver<ModalResult>,
}

impl ModalTicket {
    pub fn kind(&self) -> ModalKind {
        self.kind
    }

    /// Non-blocking check. Returns `None` while the modal is still open.
    pub fn try_outcome(&mut self) -> Option<ModalResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(ModalError::Abandoned)),
        }
    }
}

impl Future for ModalTicket {
    type Output = ModalResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(ModalError::Abandoned)))
    }
}

/// Holds the resolver of the pending request, at most one at a time.
#[derive(Debug, Default)]
pub struct ModalChannel {
    pending: Option<(ModalKind, oneshot::Sender<ModalResult>)>,
}

impl ModalChannel {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Registers a new resolver. A resolver that is still held settles its
    /// ticket with [`ModalError::Superseded`]; its kind is returned.
    pub fn open(&mut self, kind: ModalKind) -> (ModalTicket, Option<ModalKind>) {
        let superseded = self.pending.take().map(|(previous, resolver)| {
            warn!(
                previous = previous.as_str(),
                next = kind.as_str(),
                "pending modal superseded before it settled"
            );
            let _ = resolver.send(Err(ModalError::Superseded { kind: previous }));
            previous
        });

        let (tx, rx) = oneshot::channel();
        self.pending = Some((kind, tx));
        (ModalTicket { kind, rx }, superseded)
    }

    /// Fires the held resolver once and returns its kind, or `None` when
    /// nothing was pending.
    pub fn settle(&mut self, outcome: ModalOutcome) -> Option<ModalKind> {
        let Some((kind, resolver)) = self.pending.take() else {
            debug!("modal settle ignored; nothing pending");
            return None;
        };
        if resolver.send(Ok(outcome)).is_err() {
            debug!(kind = kind.as_str(), "modal ticket dropped before it settled");
        }
        Some(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no modal handler registered for: {}", join_kinds(.0))]
    Missing(Vec<ModalKind>),
}

fn join_kinds(kinds: &[ModalKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One handler per [`ModalKind`]. Building fails unless every kind is
/// covered, so lookups after `build` are total.
#[derive(Debug, Clone)]
pub struct ModalRegistry<H> {
    handlers: Vec<H>,
}

impl<H> ModalRegistry<H> {
    pub fn builder() -> ModalRegistryBuilder<H> {
        ModalRegistryBuilder {
            handlers: HashMap::new(),
        }
    }

    pub fn handler(&self, kind: ModalKind) -> &H {
        &self.handlers[kind.index()]
    }

    pub fn render(&self, state: &ModalState) -> Option<&H> {
        state.active().map(|kind| self.handler(kind))
    }
}

#[derive(Debug)]
pub struct ModalRegistryBuilder<H> {
    handlers: HashMap<ModalKind, H>,
}

impl<H> ModalRegistryBuilder<H> {
    #[must_use]
    pub fn register(mut self, kind: ModalKind, handler: H) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    pub fn build(mut self) -> Result<ModalRegistry<H>, RegistryError> {
        let mut handlers = Vec::with_capacity(ModalKind::ALL.len());
        let mut missing = Vec::new();
        for kind in ModalKind::ALL {
            match self.handlers.remove(&kind) {
                Some(handler) => handlers.push(handler),
                None => missing.push(kind),
            }
        }

        if missing.is_empty() {
            Ok(ModalRegistry { handlers })
        } else {
            Err(RegistryError::Missing(missing))
        }
    }
}
