//! Author and genre entries curated alongside books.

use common::{display_name, normalize_name};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A curated author name, stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

impl Author {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalized("author", name)?,
        })
    }

    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// A curated genre name, stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
}

impl Genre {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalized("genre", name)?,
        })
    }

    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

fn normalized(field: &'static str, raw: &str) -> Result<String, DomainError> {
    let name = normalize_name(raw);
    if name.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(name)
}
