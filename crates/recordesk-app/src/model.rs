// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field values used to pre-populate a new record.
pub type PrefillData = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardContext {
    Standard,
    Linked,
    Popup,
}

impl CardContext {
    pub const ALL: [Self; 3] = [Self::Standard, Self::Linked, Self::Popup];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Linked => "linked",
            Self::Popup => "popup",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "standard" => Some(Self::Standard),
            "linked" => Some(Self::Linked),
            "popup" => Some(Self::Popup),
            _ => None,
        }
    }

    /// The standard context is the single primary focus area.
    pub const fn replaces_visible(self) -> bool {
        matches!(self, Self::Standard)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    None,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::None => "none",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::None,
            Self::None => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOrder {
    pub column_key: String,
    pub direction: SortDirection,
}

impl ColumnOrder {
    pub fn new(column_key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_key: column_key.into(),
            direction,
        }
    }

    pub fn is_unsorted(&self) -> bool {
        self.column_key.is_empty() || self.direction == SortDirection::None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub field_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub value: Value,
}

impl FilterEntry {
    pub fn new(
        field_id: impl Into<String>,
        kind: impl Into<String>,
        label: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            kind: kind.into(),
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    ConfirmDelete,
    DuplicateRecord,
    LinkRecord,
    EditFilters,
    ColumnSettings,
    ExportTable,
    ImportRecords,
    Comment,
}

impl ModalKind {
    pub const ALL: [Self; 8] = [
        Self::ConfirmDelete,
        Self::DuplicateRecord,
        Self::LinkRecord,
        Self::EditFilters,
        Self::ColumnSettings,
        Self::ExportTable,
        Self::ImportRecords,
        Self::Comment,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfirmDelete => "confirm_delete",
            Self::DuplicateRecord => "duplicate_record",
            Self::LinkRecord => "link_record",
            Self::EditFilters => "edit_filters",
            Self::ColumnSettings => "column_settings",
            Self::ExportTable => "export_table",
            Self::ImportRecords => "import_records",
            Self::Comment => "comment",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "confirm_delete" => Some(Self::ConfirmDelete),
            "duplicate_record" => Some(Self::DuplicateRecord),
            "link_record" => Some(Self::LinkRecord),
            "edit_filters" => Some(Self::EditFilters),
            "column_settings" => Some(Self::ColumnSettings),
            "export_table" => Some(Self::ExportTable),
            "import_records" => Some(Self::ImportRecords),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }

    /// Position of this kind in `ALL`.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ConfirmDelete => "delete record",
            Self::DuplicateRecord => "duplicate record",
            Self::LinkRecord => "link record",
            Self::EditFilters => "filters",
            Self::ColumnSettings => "columns",
            Self::ExportTable => "export",
            Self::ImportRecords => "import",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for ModalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
