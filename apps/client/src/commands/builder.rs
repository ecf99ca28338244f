//! Set builder controller.
//!
//! Each row has its own debounce window: a reference is looked up once
//! the user has stopped editing that row for the configured quiet period.
//! Lookups run concurrently and finish in any order; the builder decides
//! which results are still wanted.

use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{self, Instant};
use verse_core::builder::{LookupOutcome, LookupRequest, RowId, SetBuilder, SetDraft};
use verse_core::types::VerseLookup;

use super::{emit, CommandError};
use crate::api::{ApiClient, ApiError};
use crate::config::BuilderSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderInput {
    AddRow,
    RemoveRow(RowId),
    Reference(RowId, String),
    AcceptSuggestion(RowId),
    Submit,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuilderEvent {
    RowAdded {
        row: RowId,
    },
    RowRemoved {
        row: RowId,
    },
    /// Verse text filled in for a row.
    Verse {
        row: RowId,
        verse: String,
        suggestion: Option<String>,
    },
    /// Reference was blanked; verse text cleared.
    Cleared {
        row: RowId,
    },
    SuggestionAccepted {
        row: RowId,
        reference: String,
    },
    LookupFailed {
        row: RowId,
        reason: String,
    },
    Rejected {
        reason: String,
    },
    Submitted {
        draft: SetDraft,
    },
}

type LookupResult = (LookupRequest, Result<VerseLookup, ApiError>);

/// Run the builder until the user submits (`Some(draft)`) or quits (`None`).
pub async fn build(
    api: &ApiClient,
    settings: &BuilderSettings,
    mut input: mpsc::Receiver<BuilderInput>,
    events: mpsc::Sender<BuilderEvent>,
) -> Result<Option<SetDraft>, CommandError> {
    let mut builder = SetBuilder::new();
    let mut debouncing: HashMap<RowId, (Instant, LookupRequest)> = HashMap::new();
    let mut lookups: JoinSet<LookupResult> = JoinSet::new();

    let initial: Vec<RowId> = builder.rows().iter().map(|r| r.id).collect();
    for row in initial {
        if !emit(&events, BuilderEvent::RowAdded { row }).await {
            return Ok(None);
        }
    }

    loop {
        let next_due = debouncing.values().map(|(due, _)| *due).min();

        let event = tokio::select! {
            _ = time::sleep_until(next_due.unwrap_or_else(Instant::now)), if next_due.is_some() => {
                let now = Instant::now();
                let due: Vec<RowId> = debouncing
                    .iter()
                    .filter(|(_, (at, _))| *at <= now)
                    .map(|(row, _)| *row)
                    .collect();
                for row in due {
                    if let Some((_, request)) = debouncing.remove(&row) {
                        tracing::debug!(row = %request.row, reference = %request.reference, "looking up verse");
                        let api = api.clone();
                        let get_verse_num = settings.get_verse_num;
                        lookups.spawn(async move {
                            let result = api.lookup_verse(&request.reference, get_verse_num).await;
                            (request, result)
                        });
                    }
                }
                None
            }
            Some(joined) = lookups.join_next(), if !lookups.is_empty() => match joined {
                Ok((request, result)) => on_lookup(&mut builder, request, result),
                Err(e) => {
                    tracing::warn!(error = %e, "lookup task failed");
                    None
                }
            },
            msg = input.recv() => match msg {
                None | Some(BuilderInput::Quit) => return Ok(None),
                Some(BuilderInput::Submit) => {
                    let draft = builder.draft();
                    tracing::info!(refs = draft.refs.len(), "set draft submitted");
                    if !emit(&events, BuilderEvent::Submitted { draft: draft.clone() }).await {
                        tracing::debug!("front end gone before the draft was shown");
                    }
                    return Ok(Some(draft));
                }
                Some(BuilderInput::AddRow) => Some(BuilderEvent::RowAdded {
                    row: builder.add_row(),
                }),
                Some(BuilderInput::RemoveRow(row)) => match builder.remove_row(row) {
                    Ok(_) => {
                        debouncing.remove(&row);
                        Some(BuilderEvent::RowRemoved { row })
                    }
                    Err(e) => Some(rejected(e)),
                },
                Some(BuilderInput::Reference(row, text)) => match builder.set_reference(row, &text) {
                    Ok(Some(request)) => {
                        debouncing.insert(row, (Instant::now() + settings.debounce, request));
                        None
                    }
                    Ok(None) => {
                        debouncing.remove(&row);
                        Some(BuilderEvent::Cleared { row })
                    }
                    Err(e) => Some(rejected(e)),
                },
                Some(BuilderInput::AcceptSuggestion(row)) => match builder.accept_suggestion(row) {
                    Ok(reference) => {
                        debouncing.remove(&row);
                        Some(BuilderEvent::SuggestionAccepted { row, reference })
                    }
                    Err(e) => Some(rejected(e)),
                },
            },
        };

        if let Some(event) = event {
            if !emit(&events, event).await {
                return Ok(None);
            }
        }
    }
}

fn on_lookup(
    builder: &mut SetBuilder,
    request: LookupRequest,
    result: Result<VerseLookup, ApiError>,
) -> Option<BuilderEvent> {
    let lookup = match result {
        Ok(lookup) => lookup,
        Err(e) => {
            if !builder.fail_lookup(&request) {
                return None;
            }
            tracing::warn!(row = %request.row, reference = %request.reference, error = %e, "verse lookup failed");
            return Some(BuilderEvent::LookupFailed {
                row: request.row,
                reason: e.to_string(),
            });
        }
    };

    match builder.apply_lookup(&request, lookup) {
        LookupOutcome::Applied { row, suggestion } => {
            let verse = builder.row(row).map(|r| r.verse.clone()).unwrap_or_default();
            Some(BuilderEvent::Verse {
                row,
                verse,
                suggestion,
            })
        }
        LookupOutcome::Stale => {
            tracing::debug!(row = %request.row, reference = %request.reference, "discarding stale lookup");
            None
        }
        LookupOutcome::RowRemoved => None,
    }
}

fn rejected(error: verse_core::error::BuilderError) -> BuilderEvent {
    tracing::debug!(error = %error, "builder input rejected");
    BuilderEvent::Rejected {
        reason: error.to_string(),
    }
}
