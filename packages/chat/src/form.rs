//! Multi-document request form state
//!
//! Holds one draft per selected document and derives the submit affordance
//! from today's quota. Selection keeps exhausted documents visible so the
//! user can see why they will not be filed; submission skips them.

use thiserror::Error;

use baac_client::DocumentSubmission;

use crate::catalog::{self, Catalog};
use crate::limits::LimitLedger;

/// Per-document slice of an open request form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDraft {
    pub name: String,
    pub purpose: String,
    pub copies: u32,
}

/// Outcome of toggling a document in or out of the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// Refused; the document's daily quota is spent
    LimitReached,
    /// Name not in the catalog; selection unchanged
    UnknownType,
}

/// State of a draft's copies input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopiesInput {
    /// Quota spent today; the input takes no value
    Disabled,
    /// Accepts values in `1..=max`
    Bounded { max: u32 },
}

impl CopiesInput {
    /// Input state for a document given today's quota
    pub fn for_document(ledger: &LimitLedger, name: &str) -> CopiesInput {
        if ledger.is_exhausted(name) {
            CopiesInput::Disabled
        } else {
            CopiesInput::Bounded {
                max: ledger.max_copies(name),
            }
        }
    }
}

/// Result of adjusting a copies input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopiesOutcome {
    Set,
    /// Value outside the input's bounds; state unchanged
    OutOfBounds { max: u32 },
    /// The document's quota is spent; the input is disabled
    InputDisabled,
    /// The document is not selected
    NotSelected,
}

/// Submit affordance derived from the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitControl {
    /// Nothing selected; button disabled with an empty label
    Disabled,
    /// Everything selected is exhausted; button withdrawn entirely in
    /// favor of an explanatory notice
    Hidden,
    /// Ready; the label counts the requests that will be filed
    Enabled { label: String },
}

/// Client-side validation failures, raised before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please select at least one document type")]
    NothingSelected,
    #[error("Please select a date")]
    MissingDate,
    #[error("Please fill in the purpose for {document}")]
    MissingPurpose { document: String },
}

/// State of one open document request form
///
/// Scoped to a single form-open session; the controller drops it on close
/// and builds a fresh one next time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestForm {
    drafts: Vec<DocumentDraft>,
    date: String,
}

impl RequestForm {
    /// Open a form with `preselected` documents already checked
    ///
    /// Names missing from the catalog are dropped, and documents whose
    /// quota is already spent stay unchecked.
    pub fn open(
        catalog: &Catalog,
        ledger: &LimitLedger,
        preselected: &[String],
        date: impl Into<String>,
    ) -> Self {
        let mut form = RequestForm {
            drafts: Vec::new(),
            date: date.into(),
        };
        for name in preselected {
            if let Some(doc) = catalog.get(name) {
                if !ledger.is_exhausted(doc.name) && !form.is_selected(doc.name) {
                    form.push_draft(doc.name);
                }
            }
        }
        form
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn drafts(&self) -> &[DocumentDraft] {
        &self.drafts
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.drafts
            .iter()
            .any(|draft| draft.name.eq_ignore_ascii_case(name))
    }

    /// Toggle a document in or out of the selection
    ///
    /// Deselecting always works; selecting an exhausted document is refused
    /// the way a disabled checkbox ignores clicks.
    pub fn toggle(&mut self, catalog: &Catalog, ledger: &LimitLedger, name: &str) -> ToggleOutcome {
        let Some(doc) = catalog.get(name) else {
            return ToggleOutcome::UnknownType;
        };
        if let Some(index) = self.drafts.iter().position(|draft| draft.name == doc.name) {
            self.drafts.remove(index);
            return ToggleOutcome::Deselected;
        }
        if ledger.is_exhausted(doc.name) {
            return ToggleOutcome::LimitReached;
        }
        self.push_draft(doc.name);
        ToggleOutcome::Selected
    }

    /// Set the purpose text for a selected document
    pub fn set_purpose(&mut self, name: &str, purpose: impl Into<String>) -> bool {
        match self.draft_mut(name) {
            Some(draft) => {
                draft.purpose = purpose.into();
                true
            }
            None => false,
        }
    }

    /// Set the copies count for a selected document
    ///
    /// Values outside the input's bounds are rejected, not clamped; a
    /// remaining quota of 1 accepts exactly 1.
    pub fn set_copies(&mut self, ledger: &LimitLedger, name: &str, copies: u32) -> CopiesOutcome {
        let Some(index) = self
            .drafts
            .iter()
            .position(|draft| draft.name.eq_ignore_ascii_case(name))
        else {
            return CopiesOutcome::NotSelected;
        };
        match CopiesInput::for_document(ledger, &self.drafts[index].name) {
            CopiesInput::Disabled => CopiesOutcome::InputDisabled,
            CopiesInput::Bounded { max } => {
                if copies == 0 || copies > max {
                    CopiesOutcome::OutOfBounds { max }
                } else {
                    self.drafts[index].copies = copies;
                    CopiesOutcome::Set
                }
            }
        }
    }

    /// Re-bound drafts after a limits refresh
    ///
    /// Copies counts above the new maximum clamp down to it. Newly
    /// exhausted drafts stay selected; their input reads as disabled and
    /// submission skips them.
    pub fn apply_ledger(&mut self, ledger: &LimitLedger) {
        for draft in &mut self.drafts {
            if let CopiesInput::Bounded { max } = CopiesInput::for_document(ledger, &draft.name) {
                if draft.copies > max {
                    draft.copies = max;
                }
            }
        }
    }

    /// Current submit affordance
    pub fn submit_control(&self, ledger: &LimitLedger) -> SubmitControl {
        if self.drafts.is_empty() {
            return SubmitControl::Disabled;
        }
        let submittable = self
            .drafts
            .iter()
            .filter(|draft| !ledger.is_exhausted(&draft.name))
            .count();
        if submittable == 0 {
            return SubmitControl::Hidden;
        }
        let label = if submittable == 1 {
            "Submit Request".to_string()
        } else {
            format!("Submit {} Requests", submittable)
        };
        SubmitControl::Enabled { label }
    }

    /// Validate before submission, in the order the alerts fire
    ///
    /// Purpose is only required for documents that will actually be filed;
    /// exhausted drafts are excluded from submission anyway.
    pub fn validate(&self, catalog: &Catalog, ledger: &LimitLedger) -> Result<(), FormError> {
        if self.drafts.is_empty() {
            return Err(FormError::NothingSelected);
        }
        if self.date.trim().is_empty() {
            return Err(FormError::MissingDate);
        }
        for draft in &self.drafts {
            if ledger.is_exhausted(&draft.name) {
                continue;
            }
            if draft.purpose.trim().is_empty() {
                let document = catalog
                    .get(&draft.name)
                    .map(|doc| doc.display_name.to_string())
                    .unwrap_or_else(|| draft.name.clone());
                return Err(FormError::MissingPurpose { document });
            }
        }
        Ok(())
    }

    /// Build the backend submission from this form
    ///
    /// Exhausted drafts are left out entirely. Purposes join with "; " into
    /// one string, and copies aggregate into per-certificate counters.
    pub fn to_submission(&self, ledger: &LimitLedger, chat_id: Option<i64>) -> DocumentSubmission {
        let mut document_types = Vec::new();
        let mut purposes = Vec::new();
        let mut clearance_copies = 0;
        let mut indigency_copies = 0;
        let mut residency_copies = 0;

        for draft in &self.drafts {
            if ledger.is_exhausted(&draft.name) {
                continue;
            }
            document_types.push(draft.name.clone());
            let purpose = draft.purpose.trim();
            if !purpose.is_empty() {
                purposes.push(purpose.to_string());
            }
            match draft.name.as_str() {
                catalog::CLEARANCE => clearance_copies = draft.copies,
                catalog::INDIGENCY => indigency_copies = draft.copies,
                catalog::RESIDENCY => residency_copies = draft.copies,
                _ => {}
            }
        }

        DocumentSubmission {
            document_types,
            date: self.date.clone(),
            purpose: purposes.join("; "),
            clearance_copies,
            indigency_copies,
            residency_copies,
            chat_id,
        }
    }

    fn push_draft(&mut self, name: &str) {
        self.drafts.push(DocumentDraft {
            name: name.to_string(),
            purpose: String::new(),
            copies: 1,
        });
    }

    fn draft_mut(&mut self, name: &str) -> Option<&mut DocumentDraft> {
        self.drafts
            .iter_mut()
            .find(|draft| draft.name.eq_ignore_ascii_case(name))
    }
}
