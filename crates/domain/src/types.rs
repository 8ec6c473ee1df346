// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Represents the lifecycle status of an employee record.
///
/// The status is derived, never stored: it is a pure function of the
/// record's `inactive_reason` and `contract_end` plus a caller-supplied
/// "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleStatus {
    /// No inactivation reason and the contract has not expired.
    Active,
    /// No inactivation reason but the contract end date is already in the
    /// past. This is the transient restored-but-not-updated window: the
    /// record needs a contract-field update before it counts as fully
    /// active, and the next expiry sweep re-inactivates it otherwise.
    PendingContractUpdate,
    /// An inactivation reason is set.
    Inactive,
}

impl LifecycleStatus {
    /// Derives the status from the record's lifecycle fields.
    #[must_use]
    pub fn derive(
        inactive_reason: Option<&str>,
        contract_end: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        match inactive_reason {
            Some(_) => Self::Inactive,
            None if contract_end < today => Self::PendingContractUpdate,
            None => Self::Active,
        }
    }

    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PendingContractUpdate => "pending_contract_update",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for LifecycleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "pending_contract_update" => Ok(Self::PendingContractUpdate),
            "inactive" => Ok(Self::Inactive),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a client project (company) namespace.
///
/// Every employee record belongs to exactly one project; all core logic is
/// parameterized by project rather than hard-coded per client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the project has not been persisted yet.
    project_id: Option<i64>,
    /// The project code (e.g., "ACME") - normalized to uppercase.
    code: String,
    /// Optional display name for the client company.
    name: Option<String>,
}

// Two Projects are equal if they have the same code, regardless of their IDs.
impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Project {}

impl std::hash::Hash for Project {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl Project {
    /// Creates a new `Project` without a persisted ID.
    ///
    /// Project codes are normalized to uppercase to ensure case-insensitive
    /// uniqueness.
    ///
    /// # Arguments
    ///
    /// * `code` - The project code (will be normalized to uppercase)
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self {
            project_id: None,
            code: code.trim().to_uppercase(),
            name: None,
        }
    }

    /// Creates a `Project` with an existing persisted ID.
    ///
    /// # Arguments
    ///
    /// * `project_id` - The canonical numeric identifier
    /// * `code` - The project code
    /// * `name` - Optional display name
    #[must_use]
    pub fn with_id(project_id: i64, code: &str, name: Option<String>) -> Self {
        Self {
            project_id: Some(project_id),
            code: code.trim().to_uppercase(),
            name,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn project_id(&self) -> Option<i64> {
        self.project_id
    }

    /// Returns the project code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A reference to a stored document.
///
/// The core only copies or nulls these references; the bytes live with the
/// external file-storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// The original file name.
    pub filename: String,
    /// The storage path or key.
    pub path: String,
    /// The MIME type reported at upload time.
    pub mime_type: String,
    /// The file size in bytes.
    pub size: i64,
}

/// Named document slots attached to an employee record.
///
/// Slot names are free-form (e.g., `cv`, `id_card`, `bank_account`). A
/// slot explicitly holding `None` records a deleted document: all four
/// reference sub-fields are nulled at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentSlots {
    slots: BTreeMap<String, Option<DocumentRef>>,
}

impl DocumentSlots {
    /// Creates an empty slot set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// Stores a document reference in the named slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot name is empty.
    pub fn set(&mut self, slot: &str, reference: DocumentRef) -> Result<(), DomainError> {
        let key: String = normalize_slot_name(slot)?;
        self.slots.insert(key, Some(reference));
        Ok(())
    }

    /// Clears the named slot, writing `None` in place of the reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot name is empty.
    pub fn clear(&mut self, slot: &str) -> Result<(), DomainError> {
        let key: String = normalize_slot_name(slot)?;
        self.slots.insert(key, None);
        Ok(())
    }

    /// Returns the reference stored in the named slot, if any.
    #[must_use]
    pub fn get(&self, slot: &str) -> Option<&DocumentRef> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Iterates over all slots, including explicitly cleared ones.
    #[must_use]
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&DocumentRef>)> {
        self.slots
            .iter()
            .map(|(name, reference)| (name.as_str(), reference.as_ref()))
    }

    /// Returns whether no slots have ever been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn normalize_slot_name(slot: &str) -> Result<String, DomainError> {
    let trimmed: &str = slot.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidDocumentSlot(String::from(
            "slot name cannot be empty",
        )));
    }
    Ok(trimmed.to_lowercase())
}

/// Represents an employee record within a project.
///
/// `employee_id` is the canonical identifier. The lifecycle core interprets
/// only the contract fields and `inactive_reason`; everything else is
/// carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Canonical internal identifier (opaque, stable, immutable).
    /// Optional to support creation before persistence.
    pub employee_id: Option<i64>,
    /// The project this record belongs to.
    pub project: Project,
    /// The employee's name (required, informational).
    pub name: String,
    /// The employee's position or job title.
    pub position: Option<String>,
    /// The current contract number.
    pub contract_number: String,
    /// The current contract start date.
    pub contract_start: NaiveDate,
    /// The current contract end date.
    pub contract_end: NaiveDate,
    /// `None` means Active; a non-empty string means Inactive and records
    /// why (e.g. [`Employee::EOC_REASON`] for end-of-contract).
    pub inactive_reason: Option<String>,
    /// Additional personal/administrative/financial attributes, opaque to
    /// the lifecycle core.
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// Attached document slot references.
    pub documents: DocumentSlots,
}

impl Employee {
    /// The reason written by the automatic expiry sweep.
    pub const EOC_REASON: &'static str = "EOC";

    /// Creates a new `Employee` without a persisted `employee_id`.
    ///
    /// The `employee_id` will be assigned by the persistence layer upon
    /// first save.
    ///
    /// # Arguments
    ///
    /// * `project` - The owning project
    /// * `name` - The employee's name
    /// * `contract_number` - The current contract number
    /// * `contract_start` - The contract start date
    /// * `contract_end` - The contract end date
    #[must_use]
    pub fn new(
        project: Project,
        name: String,
        contract_number: String,
        contract_start: NaiveDate,
        contract_end: NaiveDate,
    ) -> Self {
        Self {
            employee_id: None,
            project,
            name,
            position: None,
            contract_number,
            contract_start,
            contract_end,
            inactive_reason: None,
            attributes: serde_json::Map::new(),
            documents: DocumentSlots::new(),
        }
    }

    /// Derives the lifecycle status of this record.
    #[must_use]
    pub fn status(&self, today: NaiveDate) -> LifecycleStatus {
        LifecycleStatus::derive(self.inactive_reason.as_deref(), self.contract_end, today)
    }

    /// Returns whether this record counts as active: no inactivation
    /// reason and a contract end date no earlier than today.
    #[must_use]
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.inactive_reason.is_none() && self.contract_end >= today
    }

    /// Builds the lowercase search haystack for substring filtering.
    ///
    /// Covers the stringified value of every field the record carries,
    /// including the opaque attribute bag.
    #[must_use]
    pub fn search_haystack(&self) -> String {
        let mut parts: Vec<String> = vec![
            self.name.clone(),
            self.contract_number.clone(),
            self.contract_start.to_string(),
            self.contract_end.to_string(),
        ];
        if let Some(position) = &self.position {
            parts.push(position.clone());
        }
        if let Some(reason) = &self.inactive_reason {
            parts.push(reason.clone());
        }
        for value in self.attributes.values() {
            match value {
                serde_json::Value::String(s) => parts.push(s.clone()),
                other => parts.push(other.to_string()),
            }
        }
        for (slot, reference) in self.documents.entries() {
            parts.push(slot.to_string());
            if let Some(r) = reference {
                parts.push(r.filename.clone());
            }
        }
        parts.join(" ").to_lowercase()
    }
}
