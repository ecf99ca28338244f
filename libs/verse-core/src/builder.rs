//! Set builder: a growable list of reference rows whose verse text is
//! filled in by lookups.
//!
//! Every edit of a reference hands out a new [`LookupRequest`] carrying a
//! per-row ticket. Only a result for the row's latest ticket is applied,
//! so a slow lookup can never overwrite the text of a newer one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BuilderError;
use crate::reference::{normalize_whitespace, suggestion_for};
use crate::types::VerseLookup;

/// Identifier of a row in the builder form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One reference + verse row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseRow {
    pub id: RowId,
    pub reference: String,
    /// Read-only text filled in from the lookup.
    pub verse: String,
    /// Canonical spelling offered when it differs from the typed reference.
    pub suggestion: Option<String>,
    #[serde(skip)]
    ticket: u64,
}

impl VerseRow {
    fn new(id: RowId) -> Self {
        Self {
            id,
            reference: String::new(),
            verse: String::new(),
            suggestion: None,
            ticket: 0,
        }
    }
}

/// A lookup the caller should perform for a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub row: RowId,
    pub ticket: u64,
    pub reference: String,
}

/// What became of a lookup result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Applied {
        row: RowId,
        suggestion: Option<String>,
    },
    /// A newer edit superseded this lookup.
    Stale,
    /// The row was deleted while the lookup was in flight.
    RowRemoved,
}

/// References collected from the form, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDraft {
    pub refs: Vec<String>,
}

/// State of the set-builder form.
#[derive(Debug, Clone)]
pub struct SetBuilder {
    rows: Vec<VerseRow>,
    next_id: u64,
}

impl SetBuilder {
    /// A form with the initial row `0`.
    pub fn new() -> Self {
        Self {
            rows: vec![VerseRow::new(RowId(0))],
            next_id: 1,
        }
    }

    /// Append an empty row. Ids are never reused.
    pub fn add_row(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(VerseRow::new(id));
        id
    }

    pub fn remove_row(&mut self, id: RowId) -> Result<VerseRow, BuilderError> {
        let index = self.index_of(id)?;
        Ok(self.rows.remove(index))
    }

    /// Record newly typed reference text.
    ///
    /// Returns the lookup to perform, or `None` for blank text, in which case
    /// the verse is cleared right away. Any suggestion belonged to the old
    /// text and is dropped either way.
    pub fn set_reference(
        &mut self,
        id: RowId,
        text: &str,
    ) -> Result<Option<LookupRequest>, BuilderError> {
        let row = self.row_mut(id)?;
        row.reference = text.to_string();
        row.ticket += 1;
        row.suggestion = None;

        let reference = normalize_whitespace(text);
        if reference.is_empty() {
            row.verse.clear();
            return Ok(None);
        }

        Ok(Some(LookupRequest {
            row: id,
            ticket: row.ticket,
            reference,
        }))
    }

    /// Apply a finished lookup if it is still the row's latest.
    pub fn apply_lookup(&mut self, request: &LookupRequest, lookup: VerseLookup) -> LookupOutcome {
        let Ok(row) = self.row_mut(request.row) else {
            return LookupOutcome::RowRemoved;
        };
        if row.ticket != request.ticket {
            return LookupOutcome::Stale;
        }

        row.verse = lookup.verse;
        row.suggestion = suggestion_for(&row.reference, &lookup.reference);
        LookupOutcome::Applied {
            row: row.id,
            suggestion: row.suggestion.clone(),
        }
    }

    /// Record that the lookup for `request` failed.
    ///
    /// Clears the verse and suggestion when the request is still current and
    /// returns whether it was.
    pub fn fail_lookup(&mut self, request: &LookupRequest) -> bool {
        if !self.is_current(request) {
            return false;
        }
        if let Ok(row) = self.row_mut(request.row) {
            row.verse.clear();
            row.suggestion = None;
        }
        true
    }

    /// Whether `request` is still the latest lookup of an existing row.
    pub fn is_current(&self, request: &LookupRequest) -> bool {
        self.row(request.row)
            .map(|r| r.ticket == request.ticket)
            .unwrap_or(false)
    }

    /// Replace the typed reference with the offered canonical spelling.
    pub fn accept_suggestion(&mut self, id: RowId) -> Result<String, BuilderError> {
        let row = self.row_mut(id)?;
        let suggestion = row.suggestion.take().ok_or(BuilderError::NoSuggestion(id))?;
        row.reference = suggestion.clone();
        // The verse already belongs to the canonical reference.
        row.ticket += 1;
        Ok(suggestion)
    }

    pub fn row(&self, id: RowId) -> Option<&VerseRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn rows(&self) -> &[VerseRow] {
        &self.rows
    }

    /// Non-blank references in row order.
    pub fn draft(&self) -> SetDraft {
        SetDraft {
            refs: self
                .rows
                .iter()
                .map(|r| normalize_whitespace(&r.reference))
                .filter(|r| !r.is_empty())
                .collect(),
        }
    }

    fn index_of(&self, id: RowId) -> Result<usize, BuilderError> {
        self.rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(BuilderError::UnknownRow(id))
    }

    fn row_mut(&mut self, id: RowId) -> Result<&mut VerseRow, BuilderError> {
        let index = self.index_of(id)?;
        Ok(&mut self.rows[index])
    }
}

impl Default for SetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
