// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use recordesk_app::{
    AppCommand, CardContext, CardKey, ColumnOrder, FilterEntry, OpenRecord, PrefillData,
    RecordId, SortDirection, TableId,
};
use serde_json::{Value, json};
use std::path::PathBuf;

const TABLES: [&str; 8] = [
    "orders",
    "customers",
    "invoices",
    "products",
    "suppliers",
    "shipments",
    "contacts",
    "tasks",
];

const VIEWS: [&str; 6] = [
    "",
    "all",
    "mine",
    "open",
    "overdue",
    "archived",
];

const FIELDS: [(&str, &str, &str); 8] = [
    ("status", "select", "Status"),
    ("owner", "user", "Owner"),
    ("total", "number", "Total"),
    ("due_date", "date", "Due date"),
    ("city", "text", "City"),
    ("priority", "select", "Priority"),
    ("created_at", "date", "Created"),
    ("tags", "multi_select", "Tags"),
];

const WORDS: [&str; 16] = [
    "acme", "north", "blue", "prime", "delta", "harbor", "summit", "cedar", "atlas", "vector",
    "orbit", "ember", "lumen", "quartz", "willow", "zenith",
];

/// Keeps generated keys colliding often enough to exercise dedup paths.
const RECORD_POOL: usize = 6;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of ids, requests, and command sequences.
#[derive(Debug, Clone)]
pub struct DeskFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl DeskFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn table_id(&mut self) -> TableId {
        TableId::from(self.pick(&TABLES))
    }

    /// A record id from a small pool; roughly one in eight is a new record.
    pub fn record_id(&mut self) -> RecordId {
        if self.rng.int_n(8) == 0 {
            return RecordId::new_record();
        }
        RecordId::from(format!("{}", 100 + self.rng.int_n(RECORD_POOL)))
    }

    pub fn card_key(&mut self) -> CardKey {
        CardKey {
            table_id: self.table_id(),
            record_id: self.record_id(),
        }
    }

    pub fn context(&mut self) -> CardContext {
        CardContext::ALL[self.rng.int_n(CardContext::ALL.len())]
    }

    pub fn prefill(&mut self) -> PrefillData {
        let mut data = PrefillData::new();
        let count = 1 + self.rng.int_n(3);
        for _ in 0..count {
            let (field, _, _) = FIELDS[self.rng.int_n(FIELDS.len())];
            let value = self.value_for(field);
            data.insert(field.to_owned(), value);
        }
        data
    }

    pub fn open_request(&mut self, context: CardContext) -> OpenRecord {
        let key = self.card_key();
        let mut request = OpenRecord::new(context, key.table_id, key.record_id);
        if context != CardContext::Standard && self.rng.bool() {
            let master = self.card_key();
            request = request.with_master(master.table_id, master.record_id);
        }
        if request.record_id.is_new() {
            request = request.with_prefill(self.prefill());
        }
        request
    }

    pub fn filter_entry(&mut self) -> FilterEntry {
        let (field, kind, label) = FIELDS[self.rng.int_n(FIELDS.len())];
        FilterEntry::new(field, kind, label, self.value_for(field))
    }

    pub fn filters(&mut self) -> Vec<FilterEntry> {
        let count = self.rng.int_n(4);
        (0..count).map(|_| self.filter_entry()).collect()
    }

    pub fn view_name(&mut self) -> String {
        self.pick(&VIEWS).to_owned()
    }

    pub fn search_term(&mut self) -> String {
        if self.rng.int_n(4) == 0 {
            return String::new();
        }
        self.pick(&WORDS).to_owned()
    }

    pub fn card_command(&mut self) -> AppCommand {
        match self.rng.int_n(10) {
            0..=3 => AppCommand::OpenRecord(self.open_request(CardContext::Standard)),
            4 | 5 => {
                let context = self.context();
                AppCommand::OpenRecord(self.open_request(context))
            }
            6 => AppCommand::AddCard(self.open_request(CardContext::Linked)),
            7 => AppCommand::ToggleMinimize(self.card_key()),
            8 => AppCommand::CloseCard(self.card_key()),
            _ => AppCommand::ResetVisibleCards,
        }
    }

    pub fn view_command(&mut self) -> AppCommand {
        match self.rng.int_n(9) {
            0 => AppCommand::SetSearchTerm(self.search_term()),
            1 => AppCommand::SetTableView(self.view_name()),
            2 => AppCommand::SetFiltersList(self.filters()),
            3 => AppCommand::SetSelectedMenu(self.pick(&TABLES).to_owned()),
            4 => AppCommand::TableChangeCompleted,
            5 => AppCommand::SetCurrentPage(self.rng.int_n(6) as u32),
            6 => AppCommand::SetPageLimit([10, 25, 50, 100][self.rng.int_n(4)]),
            7 => {
                let (field, _, _) = FIELDS[self.rng.int_n(FIELDS.len())];
                if self.rng.bool() {
                    AppCommand::CycleSort(field.to_owned())
                } else {
                    AppCommand::SetColumnOrder(ColumnOrder::new(field, SortDirection::Desc))
                }
            }
            _ => AppCommand::RefreshTable,
        }
    }

    pub fn command(&mut self) -> AppCommand {
        if self.rng.int_n(3) == 0 {
            self.view_command()
        } else {
            self.card_command()
        }
    }

    pub fn commands(&mut self, count: usize) -> Vec<AppCommand> {
        (0..count).map(|_| self.command()).collect()
    }

    fn value_for(&mut self, field: &str) -> Value {
        match field {
            "total" => json!(self.rng.int_n(10_000)),
            "due_date" | "created_at" => json!(format!(
                "2026-{:02}-{:02}",
                1 + self.rng.int_n(12),
                1 + self.rng.int_n(28)
            )),
            "tags" => json!([self.pick(&WORDS), self.pick(&WORDS)]),
            _ => json!(self.pick(&WORDS)),
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

/// Writes `content` to `name` inside a fresh temp dir.
pub fn temp_file(name: &str, content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join(name);
    std::fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

pub fn table_names() -> &'static [&'static str] {
    &TABLES
}

#[cfg(test)]
mod tests {
    use super::{DeskFaker, table_names, temp_file};
    use recordesk_app::{AppCommand, CardContext};
    use std::collections::BTreeSet;

    #[test]
    fn new_deterministic_seed() {
        let mut left = DeskFaker::new(42);
        let mut right = DeskFaker::new(42);
        assert_eq!(left.commands(32), right.commands(32));
    }

    #[test]
    fn zero_seed_is_normalized() {
        assert_eq!(DeskFaker::new(0).seed(), 1);
    }

    #[test]
    fn record_ids_collide_and_include_new_records() {
        let mut faker = DeskFaker::new(7);
        let ids: Vec<_> = (0..200).map(|_| faker.record_id()).collect();
        let distinct: BTreeSet<_> = ids.iter().map(|id| id.as_str().to_owned()).collect();

        assert!(distinct.len() <= 7);
        assert!(ids.iter().any(|id| id.is_new()));
    }

    #[test]
    fn new_record_requests_carry_prefill() {
        let mut faker = DeskFaker::new(11);
        for _ in 0..100 {
            let request = faker.open_request(CardContext::Linked);
            if request.record_id.is_new() {
                assert!(request.prefill.as_ref().is_some_and(|data| !data.is_empty()));
            } else {
                assert!(request.prefill.is_none());
            }
            assert!(table_names().contains(&request.table_id.as_str()));
        }
    }

    #[test]
    fn standard_requests_have_no_master() {
        let mut faker = DeskFaker::new(5);
        for _ in 0..50 {
            let request = faker.open_request(CardContext::Standard);
            assert!(request.master_table_id.is_none());
        }
    }

    #[test]
    fn command_mix_covers_cards_and_view() {
        let mut faker = DeskFaker::new(3);
        let commands = faker.commands(300);
        assert!(
            commands
                .iter()
                .any(|command| matches!(command, AppCommand::OpenRecord(_)))
        );
        assert!(
            commands
                .iter()
                .any(|command| matches!(command, AppCommand::SetFiltersList(_)))
        );
        assert!(
            commands
                .iter()
                .any(|command| matches!(command, AppCommand::ResetVisibleCards))
        );
    }

    #[test]
    fn temp_file_writes_content() -> anyhow::Result<()> {
        let (_dir, path) = temp_file("script.toml", "[[step]]\n")?;
        assert_eq!(std::fs::read_to_string(path)?, "[[step]]\n");
        Ok(())
    }
}
