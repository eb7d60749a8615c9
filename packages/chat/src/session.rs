//! Session and request controller
//!
//! One [`ChatController`] owns everything a chat session mutates: the active
//! chat id, the cached chat list, the copy-limit ledger, and the open form.
//! Backend calls go through [`BaacClient`]; everything visible goes through
//! the [`ChatSurface`] the host supplies.

use chrono::{Local, Utc};
use tracing::{debug, warn};

use baac_client::{BaacClient, ChatReply, ChatSummary, ClientError, LimitNotice};

use crate::catalog::Catalog;
use crate::form::{CopiesOutcome, RequestForm, SubmitControl, ToggleOutcome};
use crate::intent::classify;
use crate::limits::{DayRollover, LimitLedger, ResetCountdown};
use crate::surface::{Card, ChatSurface, Notice, TranscriptEntry};

/// Opening line shown whenever a chat starts or loads empty
pub const GREETING_PRIMARY: &str =
    "Hello! I'm BAAC (Barangay Amungan Assistant Chatbot). How can I help you today?";
/// Second greeting line
pub const GREETING_SECONDARY: &str =
    "Feel free to ask any questions about Barangay Amungan or request assistance with barangay services.";
/// Placeholder title the backend gives brand-new chats
pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

/// Rendered when a reply carries neither response nor error text
const FALLBACK_REPLY: &str = "No response content found.";
/// Chat line rendered when the chat endpoint cannot be reached
const FETCH_ERROR_LINE: &str = "Error: Unable to fetch response.";
/// Chat line rendered when a chat's history cannot be fetched
const HISTORY_ERROR_LINE: &str = "Error loading chat messages. Please try again.";
/// Reply sentinel that redirects to the admin dashboard
const ADMIN_SENTINEL: &str = "ADMIN_AUTHENTICATED";
/// Longest prompt prefix used when auto-naming a chat
const TITLE_PREFIX_CHARS: usize = 30;

/// What a prompt submission produced, for the caller's control flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Reply handled; transcript and cards are already rendered
    Answered,
    /// A previous submission is still settling; input ignored
    Busy,
    /// Empty input; nothing sent
    Ignored,
    /// The admin sentinel arrived; the surface was told to navigate away
    AdminRedirect,
    /// Transport failed; an error line was rendered
    Failed,
}

/// What a form submission produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted; confirmation rendered and the form closed
    Submitted,
    /// Client-side validation failed; the form stays open
    Invalid,
    /// Daily quota spent; alert and countdown shown, the form closed
    LimitReached,
    /// Backend refused or transport failed; the form stays open
    Failed,
    /// No form is open
    NoForm,
}

/// Session state and dispatch for one chat page lifetime
pub struct ChatController<S: ChatSurface> {
    client: BaacClient,
    surface: S,
    catalog: Catalog,
    ledger: LimitLedger,
    chats: Vec<ChatSummary>,
    current_chat: Option<i64>,
    form: Option<RequestForm>,
    sending: bool,
}

impl<S: ChatSurface> ChatController<S> {
    pub fn new(client: BaacClient, surface: S) -> Self {
        ChatController {
            client,
            surface,
            catalog: Catalog::standard(),
            ledger: LimitLedger::new(),
            chats: Vec::new(),
            current_chat: None,
            form: None,
            sending: false,
        }
    }

    /// Run the page-load sequence: seed limits and today's date, greet,
    /// and make sure a signed-in viewer has an active chat.
    pub async fn start(&mut self) {
        self.refresh_limits().await;

        match self.client.today().await {
            Ok(date) => {
                self.ledger.note_today(date);
            }
            Err(err) => warn!("Could not seed today's date: {}", err),
        }

        self.greet();

        if self.surface.is_signed_in() {
            self.reload_chats().await;
            if self.current_chat.is_none() {
                self.create_chat().await;
            }
        }
    }

    /// Submit a chat prompt
    ///
    /// The user line renders optimistically before the backend call, and
    /// the in-flight guard is released no matter how the call settles.
    pub async fn submit_prompt(&mut self, text: &str) -> PromptOutcome {
        let prompt = text.trim().to_string();
        if prompt.is_empty() {
            return PromptOutcome::Ignored;
        }
        if self.sending {
            return PromptOutcome::Busy;
        }

        self.sending = true;
        let outcome = self.dispatch_prompt(&prompt).await;
        self.sending = false;
        outcome
    }

    async fn dispatch_prompt(&mut self, prompt: &str) -> PromptOutcome {
        self.append_user(prompt);

        let descriptor = classify(prompt, &self.catalog);
        debug!(
            direct = descriptor.is_direct_request,
            document = ?descriptor.matched_document_type,
            "prompt classified"
        );

        let query = descriptor.to_query(self.current_chat);
        let reply = match self.client.send_prompt(&query).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("Chat request failed: {}", err);
                self.append_assistant(FETCH_ERROR_LINE);
                return PromptOutcome::Failed;
            }
        };

        if reply.response.as_deref() == Some(ADMIN_SENTINEL) {
            let url = self.client.admin_url();
            self.surface.admin_redirect(&url);
            return PromptOutcome::AdminRedirect;
        }

        // Empty strings fall through exactly like missing fields.
        let body = reply
            .response
            .as_deref()
            .filter(|text| !text.is_empty())
            .or_else(|| reply.error.as_deref().filter(|text| !text.is_empty()))
            .unwrap_or(FALLBACK_REPLY)
            .to_string();
        self.append_assistant(&body);

        self.autorename_from(prompt).await;
        self.show_reply_cards(&reply);

        if self.current_chat.is_some() {
            self.reload_chats().await;
        }

        PromptOutcome::Answered
    }

    /// First exchange in a placeholder-titled chat renames it after the prompt
    async fn autorename_from(&mut self, prompt: &str) {
        let Some(chat_id) = self.current_chat else {
            return;
        };
        let is_placeholder = self
            .chats
            .iter()
            .any(|chat| chat.id == chat_id && chat.title == DEFAULT_CHAT_TITLE);
        if !is_placeholder {
            return;
        }

        let title = derive_title(prompt);
        match self.client.rename_chat(chat_id, &title).await {
            Ok(()) => {
                if let Some(chat) = self.chats.iter_mut().find(|chat| chat.id == chat_id) {
                    chat.title = title;
                }
            }
            Err(err) => warn!("Could not auto-rename chat {}: {}", chat_id, err),
        }
    }

    fn show_reply_cards(&mut self, reply: &ChatReply) {
        if reply.suggest_form {
            if let Some(form_type) = &reply.form_type {
                if self.surface.is_signed_in() {
                    let limit_reached = self.ledger.is_exhausted(form_type);
                    self.surface.card_shown(&Card::FormSuggestion {
                        document_type: form_type.clone(),
                        limit_reached,
                    });
                } else {
                    self.surface.card_shown(&Card::AuthRequired {
                        document_type: form_type.clone(),
                    });
                }
            }
        }
        if reply.suggest_all_documents {
            self.surface.card_shown(&Card::AllDocuments);
        }
        if reply.requires_auth {
            if let Some(document_type) = &reply.document_type {
                self.surface.card_shown(&Card::AuthRequired {
                    document_type: document_type.clone(),
                });
            }
        }
    }

    /// Open the document request form, optionally preselecting documents
    ///
    /// Signed-out viewers get an auth card instead. Limits refresh first so
    /// the form opens against today's quota; preselected documents whose
    /// quota is spent stay unchecked.
    pub async fn open_form(&mut self, preselected: &[String]) {
        if !self.surface.is_signed_in() {
            let document_type = preselected
                .first()
                .cloned()
                .unwrap_or_else(|| "documents".to_string());
            self.surface.card_shown(&Card::AuthRequired { document_type });
            return;
        }

        self.refresh_limits().await;

        let date = Local::now().format("%Y-%m-%d").to_string();
        let form = RequestForm::open(&self.catalog, &self.ledger, preselected, date);
        self.surface.form_updated(&form, &self.ledger);
        self.form = Some(form);
    }

    /// Toggle a document in the open form; `None` when no form is open
    pub fn toggle_document(&mut self, name: &str) -> Option<ToggleOutcome> {
        let form = self.form.as_mut()?;
        let outcome = form.toggle(&self.catalog, &self.ledger, name);
        if matches!(outcome, ToggleOutcome::Selected | ToggleOutcome::Deselected) {
            self.surface.form_updated(form, &self.ledger);
        }
        Some(outcome)
    }

    /// Set the purpose for a selected document in the open form
    pub fn set_purpose(&mut self, name: &str, purpose: &str) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };
        let updated = form.set_purpose(name, purpose);
        if updated {
            self.surface.form_updated(form, &self.ledger);
        }
        updated
    }

    /// Set the copies count for a selected document in the open form
    pub fn set_copies(&mut self, name: &str, copies: u32) -> Option<CopiesOutcome> {
        let form = self.form.as_mut()?;
        let outcome = form.set_copies(&self.ledger, name, copies);
        if outcome == CopiesOutcome::Set {
            self.surface.form_updated(form, &self.ledger);
        }
        Some(outcome)
    }

    /// Set the requested date in the open form
    pub fn set_date(&mut self, date: &str) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };
        form.set_date(date);
        self.surface.form_updated(form, &self.ledger);
        true
    }

    /// Close the form without submitting
    pub fn close_form(&mut self) {
        if self.form.take().is_some() {
            self.surface.form_closed();
        }
    }

    /// Validate and submit the open form
    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let Some(form) = self.form.as_ref() else {
            return SubmitOutcome::NoForm;
        };

        match form.submit_control(&self.ledger) {
            SubmitControl::Disabled => {
                self.surface.alert("Please select at least one document type");
                return SubmitOutcome::Invalid;
            }
            SubmitControl::Hidden => {
                // Everything selected is exhausted; the explanatory notice
                // is already on screen and there is nothing to file.
                return SubmitOutcome::Invalid;
            }
            SubmitControl::Enabled { .. } => {}
        }

        if let Err(err) = form.validate(&self.catalog, &self.ledger) {
            self.surface.alert(&err.to_string());
            return SubmitOutcome::Invalid;
        }

        let submission = form.to_submission(&self.ledger, self.current_chat);

        match self.client.submit_document(&submission).await {
            Ok(confirmation) => {
                self.form = None;
                self.surface.form_closed();
                if !confirmation.is_empty() {
                    self.append_assistant(&confirmation);
                }
                self.refresh_limits().await;
                SubmitOutcome::Submitted
            }
            Err(ClientError::LimitExceeded(notice)) => {
                self.handle_limit_exceeded(&notice);
                SubmitOutcome::LimitReached
            }
            Err(ClientError::Rejected(message)) => {
                self.surface.alert(&format!("Error: {}", message));
                SubmitOutcome::Failed
            }
            Err(err) => {
                warn!("Document submission failed: {}", err);
                self.surface
                    .alert(&format!("Error: Unable to submit document request. {}", err));
                SubmitOutcome::Failed
            }
        }
    }

    fn handle_limit_exceeded(&mut self, notice: &LimitNotice) {
        let text = format!(
            "Daily Copy Limit Reached!\n\nDocument: {}\nUsed: {}/{}\n\nYou can request again tomorrow.",
            notice.document_type, notice.used, notice.limit
        );
        self.surface.alert(&text);
        if let Some(reset_at) = notice.reset_time {
            self.surface.countdown_started(ResetCountdown::new(reset_at));
        }
        self.form = None;
        self.surface.form_closed();
    }

    /// Fetch allowances and update the ledger and any open displays
    ///
    /// Returns whether the fetch succeeded; cached values stay on failure.
    pub async fn refresh_limits(&mut self) -> bool {
        match self.client.copy_limits().await {
            Ok(allowances) => {
                self.ledger.absorb(allowances);
                self.surface.limits_refreshed(&self.ledger);
                if let Some(form) = self.form.as_mut() {
                    form.apply_ledger(&self.ledger);
                    self.surface.form_updated(form, &self.ledger);
                }
                true
            }
            Err(err) => {
                warn!("Copy limit refresh failed: {}", err);
                false
            }
        }
    }

    /// One tick of the day-rollover watch; the host schedules the interval
    ///
    /// The first observation seeds the cache. A change refreshes the limits
    /// exactly once; an unreachable backend leaves everything as it was.
    pub async fn check_day_rollover(&mut self) -> DayRollover {
        let date = match self.client.today().await {
            Ok(date) => date,
            Err(err) => {
                debug!("Today-date poll failed: {}", err);
                return DayRollover::Unchanged;
            }
        };

        let rollover = self.ledger.note_today(date);
        if let DayRollover::Changed { from, to } = &rollover {
            debug!("Server day rolled over from {} to {}", from, to);
            self.refresh_limits().await;
        }
        rollover
    }

    /// Start a fresh chat thread and make it active
    pub async fn create_chat(&mut self) {
        match self.client.create_chat(DEFAULT_CHAT_TITLE).await {
            Ok(chat) => {
                self.current_chat = Some(chat.id);
                self.chats.insert(
                    0,
                    ChatSummary {
                        id: chat.id,
                        title: chat.title,
                        updated_at: Some(Utc::now()),
                    },
                );
                self.surface.chat_opened(chat.id);
                self.surface.transcript_cleared();
                self.greet();
                self.reload_chats().await;
            }
            Err(ClientError::Rejected(message)) => {
                self.surface.alert(&format!("Error: {}", message));
            }
            Err(err) => {
                warn!("New chat creation failed: {}", err);
                self.surface.alert("Error creating new chat. Please try again.");
            }
        }
    }

    /// Refetch the chat list and update the cache
    pub async fn reload_chats(&mut self) {
        match self.client.list_chats().await {
            Ok(chats) => {
                self.chats = chats;
                self.surface.chat_list_updated(&self.chats);
            }
            Err(err) => {
                warn!("Chat list fetch failed: {}", err);
                self.surface
                    .notify(Notice::Error, "Error loading chats. Please try again.");
            }
        }
    }

    /// Make `chat_id` the active chat and replay its stored messages
    ///
    /// The active id flips before the fetch; a history reply for a chat the
    /// user has already left again is discarded.
    pub async fn load_chat(&mut self, chat_id: i64) {
        self.current_chat = Some(chat_id);
        self.surface.chat_opened(chat_id);
        self.surface.transcript_cleared();

        match self.client.chat_messages(chat_id).await {
            Ok(messages) => {
                if self.current_chat != Some(chat_id) {
                    debug!("Discarding stale history for chat {}", chat_id);
                    return;
                }
                if messages.is_empty() {
                    self.greet();
                    return;
                }
                for record in messages {
                    let entry = if record.is_user {
                        TranscriptEntry::user(record.message)
                    } else {
                        TranscriptEntry::assistant(record.message)
                    };
                    self.surface.message_appended(&entry);
                }
            }
            Err(err) => {
                warn!("Chat history fetch failed: {}", err);
                self.append_assistant(HISTORY_ERROR_LINE);
            }
        }
    }

    /// Rename a chat, updating the cache on success
    pub async fn rename_chat(&mut self, chat_id: i64, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            self.surface.notify(Notice::Error, "Please enter a valid title");
            return;
        }

        match self.client.rename_chat(chat_id, title).await {
            Ok(()) => {
                if let Some(chat) = self.chats.iter_mut().find(|chat| chat.id == chat_id) {
                    chat.title = title.to_string();
                }
                self.surface.chat_list_updated(&self.chats);
                self.surface.notify(Notice::Success, "Chat renamed successfully");
            }
            Err(ClientError::Rejected(message)) => {
                self.surface.notify(Notice::Error, &message);
            }
            Err(err) => {
                warn!("Chat rename failed: {}", err);
                self.surface
                    .notify(Notice::Error, "An error occurred while renaming the chat");
            }
        }
    }

    /// Delete a chat; deleting the active one starts a replacement
    pub async fn delete_chat(&mut self, chat_id: i64) {
        match self.client.delete_chat(chat_id).await {
            Ok(()) => {
                self.chats.retain(|chat| chat.id != chat_id);
                self.surface.chat_list_updated(&self.chats);
                self.surface.notify(Notice::Success, "Chat deleted successfully");
                if self.current_chat == Some(chat_id) {
                    self.current_chat = None;
                    self.surface.transcript_cleared();
                    self.create_chat().await;
                }
            }
            Err(ClientError::Rejected(message)) => {
                self.surface.notify(Notice::Error, &message);
            }
            Err(err) => {
                warn!("Chat delete failed: {}", err);
                self.surface
                    .notify(Notice::Error, "An error occurred while deleting the chat");
            }
        }
    }

    /// The surface this controller renders through
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &LimitLedger {
        &self.ledger
    }

    pub fn chats(&self) -> &[ChatSummary] {
        &self.chats
    }

    pub fn current_chat(&self) -> Option<i64> {
        self.current_chat
    }

    /// Read-only view of the open form, if any
    pub fn form(&self) -> Option<&RequestForm> {
        self.form.as_ref()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    fn greet(&mut self) {
        self.append_assistant(GREETING_PRIMARY);
        self.append_assistant(GREETING_SECONDARY);
    }

    fn append_user(&mut self, body: &str) {
        let entry = TranscriptEntry::user(body);
        self.surface.message_appended(&entry);
    }

    fn append_assistant(&mut self, body: &str) {
        let entry = TranscriptEntry::assistant(body);
        self.surface.message_appended(&entry);
    }
}

/// Title derived from a chat's first prompt: a 30-character prefix with an
/// ellipsis when truncated
fn derive_title(prompt: &str) -> String {
    let chars: Vec<char> = prompt.chars().collect();
    if chars.len() > TITLE_PREFIX_CHARS {
        let prefix: String = chars[..TITLE_PREFIX_CHARS].iter().collect();
        format!("{}...", prefix)
    } else {
        prompt.to_string()
    }
}
