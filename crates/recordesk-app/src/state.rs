// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{
    CardKey, CardStack, ColumnOrder, FilterEntry, ModalKind, ModalState, OpenRecord, RecordId,
    ViewState,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub cards: CardStack,
    pub view: ViewState,
    pub modal: ModalState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    OpenRecord(OpenRecord),
    AddCard(OpenRecord),
    CloseCard(CardKey),
    ToggleMinimize(CardKey),
    ResetVisibleCards,
    SetSearchTerm(String),
    SetTableView(String),
    SetFiltersList(Vec<FilterEntry>),
    SetSelectedMenu(String),
    TableChangeCompleted,
    SetCurrentPage(u32),
    SetPageLimit(u32),
    SetColumnOrder(ColumnOrder),
    CycleSort(String),
    RefreshTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum AppEvent {
    CardOpened(CardKey),
    CardRestored(CardKey),
    CardsDropped(usize),
    CardClosed(CardKey),
    CardMinimizeToggled { key: CardKey, minimized: bool },
    ViewChanged { view: String, causes_refresh: bool },
    FiltersReplaced { count: usize },
    SearchChanged(String),
    PageChanged(u32),
    PageLimitChanged(u32),
    SortChanged(ColumnOrder),
    MenuSelected(String),
    TableChanging,
    TableChangeCompleted,
    RefreshRequested(u64),
    ModalOpened { kind: ModalKind, record_id: RecordId },
    ModalSuperseded(ModalKind),
    ModalResolved(ModalKind),
    ModalCancelled(ModalKind),
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::OpenRecord(request) => self.open_record(request),
            AppCommand::AddCard(request) => {
                let key = request.key();
                if self.cards.add_card(request) {
                    vec![AppEvent::CardOpened(key)]
                } else {
                    Vec::new()
                }
            }
            AppCommand::CloseCard(key) => match self.cards.close_card(&key) {
                Some(_) => vec![AppEvent::CardClosed(key)],
                None => Vec::new(),
            },
            AppCommand::ToggleMinimize(key) => match self.cards.toggle_minimize(&key) {
                Some(minimized) => vec![AppEvent::CardMinimizeToggled { key, minimized }],
                None => Vec::new(),
            },
            AppCommand::ResetVisibleCards => match self.cards.reset_visible_cards() {
                0 => Vec::new(),
                dropped => vec![AppEvent::CardsDropped(dropped)],
            },
            AppCommand::SetSearchTerm(term) => self.view.set_search_term(term),
            AppCommand::SetTableView(view) => self.view.set_table_view(view),
            AppCommand::SetFiltersList(filters) => self.view.set_filters_list(filters),
            AppCommand::SetSelectedMenu(name) => self.view.set_selected_menu(name),
            AppCommand::TableChangeCompleted => self.view.table_change_completed(),
            AppCommand::SetCurrentPage(page) => self.view.set_current_page(page),
            AppCommand::SetPageLimit(limit) => self.view.set_page_limit(limit),
            AppCommand::SetColumnOrder(order) => self.view.set_column_order(order),
            AppCommand::CycleSort(column_key) => self.view.cycle_sort(column_key),
            AppCommand::RefreshTable => self.view.refresh_table(),
        }
    }

    fn open_record(&mut self, request: OpenRecord) -> Vec<AppEvent> {
        let outcome = self.cards.open_record(request);
        let mut events = Vec::new();
        if outcome.dropped > 0 {
            events.push(AppEvent::CardsDropped(outcome.dropped));
        }
        if outcome.inserted {
            events.push(AppEvent::CardOpened(outcome.key));
        } else if outcome.restored {
            events.push(AppEvent::CardRestored(outcome.key));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::{CardKey, OpenRecord};

    #[test]
    fn standard_open_reports_dropped_and_opened() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenRecord(OpenRecord::standard("orders", "1")));

        let events = state.dispatch(AppCommand::OpenRecord(OpenRecord::standard("orders", "2")));
        assert_eq!(
            events,
            vec![
                AppEvent::CardsDropped(1),
                AppEvent::CardOpened(CardKey::new("orders", "2")),
            ]
        );
    }

    #[test]
    fn reopening_standard_card_reports_restore() {
        let mut state = AppState::default();
        let key = CardKey::new("orders", "1");
        state.dispatch(AppCommand::OpenRecord(OpenRecord::standard("orders", "1")));
        state.dispatch(AppCommand::ToggleMinimize(key.clone()));

        let events = state.dispatch(AppCommand::OpenRecord(OpenRecord::standard("orders", "1")));
        assert_eq!(events, vec![AppEvent::CardRestored(key)]);
    }

    #[test]
    fn repeated_standard_open_emits_nothing() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenRecord(OpenRecord::standard("t", "r")));

        let events = state.dispatch(AppCommand::OpenRecord(OpenRecord::standard("t", "r")));
        assert!(events.is_empty());
        assert_eq!(state.cards.len(), 1);
    }

    #[test]
    fn duplicate_linked_open_emits_nothing() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenRecord(OpenRecord::linked("items", "1")));

        let events = state.dispatch(AppCommand::OpenRecord(OpenRecord::linked("items", "1")));
        assert!(events.is_empty());
        assert_eq!(state.cards.len(), 1);
    }

    #[test]
    fn missing_cards_are_silent_no_ops() {
        let mut state = AppState::default();
        let key = CardKey::new("orders", "404");

        assert!(state.dispatch(AppCommand::CloseCard(key.clone())).is_empty());
        assert!(state.dispatch(AppCommand::ToggleMinimize(key)).is_empty());
        assert!(state.dispatch(AppCommand::ResetVisibleCards).is_empty());
    }

    #[test]
    fn menu_change_and_acknowledgement() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetTableView("mine".to_owned()));

        let events = state.dispatch(AppCommand::SetSelectedMenu("orders".to_owned()));
        assert_eq!(
            events,
            vec![
                AppEvent::MenuSelected("orders".to_owned()),
                AppEvent::TableChanging,
            ]
        );
        assert_eq!(state.view.table_view, "");
        assert!(state.view.is_table_changing);

        state.dispatch(AppCommand::TableChangeCompleted);
        assert!(!state.view.is_table_changing);
    }
}
