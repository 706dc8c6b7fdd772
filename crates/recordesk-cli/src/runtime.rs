// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use recordesk_app::{
    AppCommand, AppEvent, AppState, CardContext, CardKey, ColumnOrder, FilterEntry, ModalError,
    ModalKind, ModalOutcome, ModalTicket, OpenRecord, PrefillData, RecordId, SortDirection,
    Store,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read session script {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parse session script {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

fn standard_context() -> CardContext {
    CardContext::Standard
}

fn linked_context() -> CardContext {
    CardContext::Linked
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    OpenRecord {
        #[serde(default = "standard_context")]
        context: CardContext,
        #[serde(flatten)]
        target: CardTarget,
    },
    AddCard {
        #[serde(default = "linked_context")]
        context: CardContext,
        #[serde(flatten)]
        target: CardTarget,
    },
    CloseCard {
        table: String,
        #[serde(default)]
        record: String,
    },
    ToggleMinimize {
        table: String,
        #[serde(default)]
        record: String,
    },
    ResetVisibleCards,
    SetSearchTerm {
        term: String,
    },
    SetTableView {
        view: String,
    },
    SetFiltersList {
        #[serde(default)]
        filters: Vec<FilterEntry>,
    },
    SetSelectedMenu {
        menu: String,
    },
    TableChangeCompleted,
    SetCurrentPage {
        page: u32,
    },
    SetPageLimit {
        limit: u32,
    },
    SetColumnOrder {
        column: String,
        direction: SortDirection,
    },
    CycleSort {
        column: String,
    },
    RefreshTable,
    OpenModal {
        kind: ModalKind,
        record: Option<String>,
    },
    ResolveModal {
        value: Value,
    },
    CancelModal,
    DismissModal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardTarget {
    pub table: String,
    #[serde(default)]
    pub record: String,
    pub master_table: Option<String>,
    pub master_record: Option<String>,
    pub prefill: Option<PrefillData>,
}

impl CardTarget {
    fn into_request(self, context: CardContext) -> OpenRecord {
        let mut request = OpenRecord::new(context, self.table, self.record);
        request.master_table_id = self.master_table.map(Into::into);
        request.master_record_id = self.master_record.map(Into::into);
        request.prefill = self.prefill;
        request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalStatus {
    Confirmed,
    Cancelled,
    Superseded,
    Abandoned,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalReport {
    pub step: usize,
    pub kind: ModalKind,
    pub status: ModalStatus,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub state: AppState,
    pub modals: Vec<ModalReport>,
    pub events: Vec<AppEvent>,
}

/// Replays script steps against one store and keeps every modal ticket so
/// the report can say how each modal settled.
pub struct ScriptRuntime {
    store: Store,
    tickets: Vec<(usize, ModalTicket)>,
    events: Rc<RefCell<Vec<AppEvent>>>,
}

impl ScriptRuntime {
    pub fn new(mut store: Store) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(move |_, batch| sink.borrow_mut().extend_from_slice(batch));
        Self {
            store,
            tickets: Vec::new(),
            events,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn run(&mut self, script: Script) {
        let total = script.steps.len();
        for (index, step) in script.steps.into_iter().enumerate() {
            debug!(step = index + 1, total, ?step, "apply");
            self.apply(index + 1, step);
        }
        info!(
            steps = total,
            cards = self.store.state().cards.len(),
            modals = self.tickets.len(),
            "session replayed"
        );
    }

    pub fn apply(&mut self, index: usize, step: ScriptStep) {
        let command = match step {
            ScriptStep::OpenRecord { context, target } => {
                AppCommand::OpenRecord(target.into_request(context))
            }
            ScriptStep::AddCard { context, target } => {
                AppCommand::AddCard(target.into_request(context))
            }
            ScriptStep::CloseCard { table, record } => {
                AppCommand::CloseCard(CardKey::new(table, record))
            }
            ScriptStep::ToggleMinimize { table, record } => {
                AppCommand::ToggleMinimize(CardKey::new(table, record))
            }
            ScriptStep::ResetVisibleCards => AppCommand::ResetVisibleCards,
            ScriptStep::SetSearchTerm { term } => AppCommand::SetSearchTerm(term),
            ScriptStep::SetTableView { view } => AppCommand::SetTableView(view),
            ScriptStep::SetFiltersList { filters } => AppCommand::SetFiltersList(filters),
            ScriptStep::SetSelectedMenu { menu } => AppCommand::SetSelectedMenu(menu),
            ScriptStep::TableChangeCompleted => AppCommand::TableChangeCompleted,
            ScriptStep::SetCurrentPage { page } => AppCommand::SetCurrentPage(page),
            ScriptStep::SetPageLimit { limit } => AppCommand::SetPageLimit(limit),
            ScriptStep::SetColumnOrder { column, direction } => {
                AppCommand::SetColumnOrder(ColumnOrder::new(column, direction))
            }
            ScriptStep::CycleSort { column } => AppCommand::CycleSort(column),
            ScriptStep::RefreshTable => AppCommand::RefreshTable,
            ScriptStep::OpenModal { kind, record } => {
                let ticket = self.store.open_modal(kind, record.map(RecordId::from));
                self.tickets.push((index, ticket));
                return;
            }
            ScriptStep::ResolveModal { value } => {
                self.store.resolve_modal(value);
                return;
            }
            ScriptStep::CancelModal => {
                self.store.cancel_modal();
                return;
            }
            ScriptStep::DismissModal => {
                self.store.dismiss_modal();
                return;
            }
        };
        self.store.dispatch(command);
    }

    pub fn report(mut self) -> SessionReport {
        let modals = self
            .tickets
            .iter_mut()
            .map(|(step, ticket)| {
                let (status, value) = match ticket.try_outcome() {
                    None => (ModalStatus::Pending, None),
                    Some(Ok(ModalOutcome::Confirmed(value))) => {
                        (ModalStatus::Confirmed, Some(value))
                    }
                    Some(Ok(ModalOutcome::Cancelled)) => (ModalStatus::Cancelled, None),
                    Some(Err(ModalError::Superseded { .. })) => (ModalStatus::Superseded, None),
                    Some(Err(ModalError::Abandoned)) => (ModalStatus::Abandoned, None),
                };
                ModalReport {
                    step: *step,
                    kind: ticket.kind(),
                    status,
                    value,
                }
            })
            .collect();

        let events = self.events.borrow().clone();
        SessionReport {
            state: self.store.state().clone(),
            modals,
            events,
        }
    }
}
