// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{CardContext, CardKey, PrefillData, RecordId, TableId};

/// An open record editing or viewing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub table_id: TableId,
    pub record_id: RecordId,
    pub context: CardContext,
    pub master_table_id: Option<TableId>,
    pub master_record_id: Option<RecordId>,
    pub prefill: Option<PrefillData>,
    pub minimized: bool,
}

impl Card {
    pub fn key(&self) -> CardKey {
        CardKey {
            table_id: self.table_id.clone(),
            record_id: self.record_id.clone(),
        }
    }

    pub fn matches(&self, key: &CardKey) -> bool {
        self.table_id == key.table_id && self.record_id == key.record_id
    }

    fn from_request(request: OpenRecord) -> Self {
        Self {
            table_id: request.table_id,
            record_id: request.record_id,
            context: request.context,
            master_table_id: request.master_table_id,
            master_record_id: request.master_record_id,
            prefill: request.prefill,
            minimized: false,
        }
    }
}

/// Arguments of a "the user wants to view/edit a record" request.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRecord {
    pub context: CardContext,
    pub table_id: TableId,
    pub record_id: RecordId,
    pub master_table_id: Option<TableId>,
    pub master_record_id: Option<RecordId>,
    pub prefill: Option<PrefillData>,
}

impl OpenRecord {
    pub fn new(
        context: CardContext,
        table_id: impl Into<TableId>,
        record_id: impl Into<RecordId>,
    ) -> Self {
        Self {
            context,
            table_id: table_id.into(),
            record_id: record_id.into(),
            master_table_id: None,
            master_record_id: None,
            prefill: None,
        }
    }

    pub fn standard(table_id: impl Into<TableId>, record_id: impl Into<RecordId>) -> Self {
        Self::new(CardContext::Standard, table_id, record_id)
    }

    pub fn linked(table_id: impl Into<TableId>, record_id: impl Into<RecordId>) -> Self {
        Self::new(CardContext::Linked, table_id, record_id)
    }

    #[must_use]
    pub fn with_master(
        mut self,
        table_id: impl Into<TableId>,
        record_id: impl Into<RecordId>,
    ) -> Self {
        self.master_table_id = Some(table_id.into());
        self.master_record_id = Some(record_id.into());
        self
    }

    #[must_use]
    pub fn with_prefill(mut self, prefill: PrefillData) -> Self {
        self.prefill = Some(prefill);
        self
    }

    pub fn key(&self) -> CardKey {
        CardKey {
            table_id: self.table_id.clone(),
            record_id: self.record_id.clone(),
        }
    }
}

/// What an `open_record` call did to the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOutcome {
    pub key: CardKey,
    pub inserted: bool,
    pub restored: bool,
    pub dropped: usize,
}

/// Ordered list of open cards. Never holds two cards with the same key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardStack {
    cards: Vec<Card>,
}

impl CardStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_record(&mut self, request: OpenRecord) -> OpenOutcome {
        if request.context.replaces_visible() {
            self.replace_visible(request)
        } else {
            let key = request.key();
            let inserted = self.add_card(request);
            OpenOutcome {
                key,
                inserted,
                restored: false,
                dropped: 0,
            }
        }
    }

    /// Appends a card unless one with the same key already exists. An
    /// existing card keeps all of its attributes, including `minimized`.
    pub fn add_card(&mut self, request: OpenRecord) -> bool {
        let key = request.key();
        if self.contains(&key) {
            return false;
        }
        self.cards.push(Card::from_request(request));
        true
    }

    pub fn close_card(&mut self, key: &CardKey) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.matches(key))?;
        Some(self.cards.remove(index))
    }

    pub fn toggle_minimize(&mut self, key: &CardKey) -> Option<bool> {
        let card = self.cards.iter_mut().find(|card| card.matches(key))?;
        card.minimized = !card.minimized;
        Some(card.minimized)
    }

    /// Drops every visible card and keeps the minimized ones.
    pub fn reset_visible_cards(&mut self) -> usize {
        let before = self.cards.len();
        self.cards.retain(|card| card.minimized);
        before - self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, key: &CardKey) -> Option<&Card> {
        self.cards.iter().find(|card| card.matches(key))
    }

    pub fn contains(&self, key: &CardKey) -> bool {
        self.get(key).is_some()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| !card.minimized)
    }

    pub fn minimized(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| card.minimized)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    // New list is every minimized card followed by the target. A reused
    // target keeps its old master and prefill; only `minimized` is reset.
    // It counts as restored only if it was minimized or had minimized cards
    // after it.
    fn replace_visible(&mut self, request: OpenRecord) -> OpenOutcome {
        let key = request.key();
        let before = self.cards.len();
        let mut target = None;
        let mut minimized_after = 0;
        let mut kept = Vec::with_capacity(before + 1);

        for card in self.cards.drain(..) {
            if card.matches(&key) {
                if target.is_none() {
                    target = Some(card);
                }
            } else if card.minimized {
                if target.is_some() {
                    minimized_after += 1;
                }
                kept.push(card);
            }
        }

        let reused = target.is_some();
        let restored = target
            .as_ref()
            .is_some_and(|card| card.minimized || minimized_after > 0);
        let dropped = before - kept.len() - usize::from(reused);
        let card = match target {
            Some(mut existing) => {
                existing.minimized = false;
                existing
            }
            None => Card::from_request(request),
        };
        kept.push(card);
        self.cards = kept;

        OpenOutcome {
            key,
            inserted: !reused,
            restored,
            dropped,
        }
    }
}

impl<'a> IntoIterator for &'a CardStack {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
