// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(TableId);
string_id!(RecordId);

impl RecordId {
    /// The id of a record that has not been saved yet.
    pub fn new_record() -> Self {
        Self(String::new())
    }

    pub fn is_new(&self) -> bool {
        self.0.is_empty()
    }
}

/// Logical identity of a card. Master ids are deliberately not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardKey {
    pub table_id: TableId,
    pub record_id: RecordId,
}

impl CardKey {
    pub fn new(table_id: impl Into<TableId>, record_id: impl Into<RecordId>) -> Self {
        Self {
            table_id: table_id.into(),
            record_id: record_id.into(),
        }
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.record_id.is_new() {
            write!(f, "{}/<new>", self.table_id)
        } else {
            write!(f, "{}/{}", self.table_id, self.record_id)
        }
    }
}
