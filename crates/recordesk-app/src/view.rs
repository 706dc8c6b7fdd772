// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{AppEvent, ColumnOrder, FilterEntry, SortDirection};

pub const DEFAULT_PAGE_LIMIT: u32 = 25;
pub const FIRST_PAGE: u32 = 1;

/// Search, view, pagination, sort, and filter state shared by the table
/// surfaces. Every mutation returns the events it caused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub search_term: String,
    pub table_view: String,
    pub current_page: u32,
    pub page_limit: u32,
    pub column_order: ColumnOrder,
    pub filters_list: Vec<FilterEntry>,
    pub selected_menu: String,
    pub refresh_tick: u64,
    pub is_table_changing: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            table_view: String::new(),
            current_page: FIRST_PAGE,
            page_limit: DEFAULT_PAGE_LIMIT,
            column_order: ColumnOrder::default(),
            filters_list: Vec::new(),
            selected_menu: String::new(),
            refresh_tick: 0,
            is_table_changing: false,
        }
    }
}

impl ViewState {
    pub fn set_selected_menu(&mut self, name: String) -> Vec<AppEvent> {
        self.selected_menu = name.clone();
        self.table_view.clear();
        self.is_table_changing = true;

        let mut events = vec![AppEvent::MenuSelected(name), AppEvent::TableChanging];
        self.reset_page(&mut events);
        events
    }

    pub fn table_change_completed(&mut self) -> Vec<AppEvent> {
        if !self.is_table_changing {
            return Vec::new();
        }
        self.is_table_changing = false;
        vec![AppEvent::TableChangeCompleted]
    }

    pub fn set_table_view(&mut self, view: String) -> Vec<AppEvent> {
        self.table_view = view.clone();
        vec![
            AppEvent::ViewChanged {
                view,
                causes_refresh: true,
            },
            self.bump_refresh(),
        ]
    }

    pub fn set_filters_list(&mut self, filters: Vec<FilterEntry>) -> Vec<AppEvent> {
        let count = filters.len();
        self.filters_list = filters;

        let mut events = vec![AppEvent::FiltersReplaced { count }];
        self.reset_page(&mut events);
        events.push(self.bump_refresh());
        events
    }

    pub fn set_search_term(&mut self, term: String) -> Vec<AppEvent> {
        if self.search_term == term {
            return Vec::new();
        }
        self.search_term = term.clone();

        let mut events = vec![AppEvent::SearchChanged(term)];
        self.reset_page(&mut events);
        events.push(self.bump_refresh());
        events
    }

    pub fn set_current_page(&mut self, page: u32) -> Vec<AppEvent> {
        let page = page.max(FIRST_PAGE);
        if self.current_page == page {
            return Vec::new();
        }
        self.current_page = page;
        vec![AppEvent::PageChanged(page)]
    }

    pub fn set_page_limit(&mut self, limit: u32) -> Vec<AppEvent> {
        let limit = limit.max(1);
        if self.page_limit == limit {
            return Vec::new();
        }
        self.page_limit = limit;

        let mut events = vec![AppEvent::PageLimitChanged(limit)];
        self.reset_page(&mut events);
        events
    }

    pub fn set_column_order(&mut self, order: ColumnOrder) -> Vec<AppEvent> {
        self.column_order = order.clone();
        vec![AppEvent::SortChanged(order), self.bump_refresh()]
    }

    /// Moves `column_key` one step through asc, desc, none. A column that
    /// is not the current sort column starts at asc.
    pub fn cycle_sort(&mut self, column_key: String) -> Vec<AppEvent> {
        let direction = if self.column_order.column_key == column_key {
            self.column_order.direction.next()
        } else {
            SortDirection::Asc
        };
        self.set_column_order(ColumnOrder::new(column_key, direction))
    }

    pub fn update_refresh_tick(&mut self, update: impl FnOnce(u64) -> u64) -> Vec<AppEvent> {
        let next = update(self.refresh_tick);
        if next == self.refresh_tick {
            return Vec::new();
        }
        self.refresh_tick = next;
        vec![AppEvent::RefreshRequested(next)]
    }

    pub fn refresh_table(&mut self) -> Vec<AppEvent> {
        vec![self.bump_refresh()]
    }

    fn bump_refresh(&mut self) -> AppEvent {
        self.refresh_tick = self.refresh_tick.wrapping_add(1);
        AppEvent::RefreshRequested(self.refresh_tick)
    }

    fn reset_page(&mut self, events: &mut Vec<AppEvent>) {
        if self.current_page != FIRST_PAGE {
            self.current_page = FIRST_PAGE;
            events.push(AppEvent::PageChanged(FIRST_PAGE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FIRST_PAGE, ViewState};
    use crate::{AppEvent, ColumnOrder, FilterEntry, SortDirection};
    use serde_json::json;

    #[test]
    fn set_table_view_bumps_refresh_once() {
        let mut view = ViewState::default();
        let before = view.refresh_tick;

        let events = view.set_table_view("view2".to_owned());

        assert_eq!(view.table_view, "view2");
        assert_eq!(view.refresh_tick, before + 1);
        assert_eq!(
            events,
            vec![
                AppEvent::ViewChanged {
                    view: "view2".to_owned(),
                    causes_refresh: true,
                },
                AppEvent::RefreshRequested(before + 1),
            ]
        );
    }

    #[test]
    fn selected_menu_clears_view_until_change_is_acknowledged() {
        let mut view = ViewState::default();
        view.set_table_view("open orders".to_owned());

        view.set_selected_menu("orders".to_owned());
        assert_eq!(view.table_view, "");
        assert!(view.is_table_changing);

        assert_eq!(
            view.table_change_completed(),
            vec![AppEvent::TableChangeCompleted]
        );
        assert!(!view.is_table_changing);
        assert!(view.table_change_completed().is_empty());
    }

    #[test]
    fn filters_replace_resets_page_and_refreshes() {
        let mut view = ViewState::default();
        view.set_current_page(4);

        let events = view.set_filters_list(vec![FilterEntry::new(
            "status",
            "select",
            "Status",
            json!("open"),
        )]);

        assert_eq!(view.current_page, FIRST_PAGE);
        assert_eq!(view.refresh_tick, 1);
        assert_eq!(
            events,
            vec![
                AppEvent::FiltersReplaced { count: 1 },
                AppEvent::PageChanged(FIRST_PAGE),
                AppEvent::RefreshRequested(1),
            ]
        );
    }

    #[test]
    fn unchanged_search_term_is_a_no_op() {
        let mut view = ViewState::default();
        assert_eq!(view.set_search_term("acme".to_owned()).len(), 2);
        assert!(view.set_search_term("acme".to_owned()).is_empty());
        assert_eq!(view.refresh_tick, 1);
    }

    #[test]
    fn page_and_limit_are_clamped() {
        let mut view = ViewState::default();
        assert!(view.set_current_page(0).is_empty());
        assert_eq!(view.current_page, FIRST_PAGE);

        view.set_current_page(3);
        view.set_page_limit(0);
        assert_eq!(view.page_limit, 1);
        assert_eq!(view.current_page, FIRST_PAGE);
    }

    #[test]
    fn cycle_sort_walks_directions_and_restarts_on_new_column() {
        let mut view = ViewState::default();

        view.cycle_sort("name".to_owned());
        assert_eq!(view.column_order, ColumnOrder::new("name", SortDirection::Asc));
        view.cycle_sort("name".to_owned());
        assert_eq!(view.column_order.direction, SortDirection::Desc);
        view.cycle_sort("name".to_owned());
        assert!(view.column_order.is_unsorted());

        view.cycle_sort("name".to_owned());
        view.cycle_sort("total".to_owned());
        assert_eq!(view.column_order, ColumnOrder::new("total", SortDirection::Asc));
        assert_eq!(view.refresh_tick, 5);
    }

    #[test]
    fn functional_refresh_updates_compose() {
        let mut view = ViewState::default();
        view.update_refresh_tick(|tick| tick + 1);
        view.update_refresh_tick(|tick| tick + 1);
        assert_eq!(view.refresh_tick, 2);
        assert!(view.update_refresh_tick(|tick| tick).is_empty());
    }
}
