//! The client controller: current view state, the add form, and one
//! fetch-then-render pass per user action.
//!
//! The board never keeps items between actions. Every action re-fetches the
//! full list from the server, projects it through the [`ViewState`] and
//! renders it with the strategy for the current view.

use crate::client::{ApiClient, ClientError};
use crate::model::ItemDraft;
use crate::render::{render_fetch_error, renderer_for, RenderContext};
use crate::view::{check_title, SortOrder, StatusFilter, TitleCheck, ViewState};

/// Alert when the add form is submitted with bad values.
pub const ALERT_CHECK_VALUES: &str = "값 확인";
/// Alert when an inline edit is submitted with a blank field.
pub const ALERT_CHECK_INPUT: &str = "입력 확인";
/// Alert when toggling the sold flag fails.
pub const ALERT_TOGGLE_FAILED: &str = "상태 전환 실패";
/// Alert when a delete fails.
pub const ALERT_DELETE_FAILED: &str = "삭제 실패";
/// Alert when a create fails without a server message.
pub const ALERT_CREATE_FAILED: &str = "등록 실패";
/// Alert when an edit fails without a server message.
pub const ALERT_UPDATE_FAILED: &str = "수정 실패";

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Markup that replaces the list container's contents.
    pub html: String,
    /// Message to show in a blocking alert, if the action failed.
    pub alert: Option<String>,
}

/// Values currently typed into the add form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    title: String,
    deadline: String,
}

impl AddForm {
    /// Title text as typed.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Deadline text as typed.
    #[must_use]
    pub fn deadline(&self) -> &str {
        &self.deadline
    }

    /// Live title check: warning text and whether submit is enabled.
    #[must_use]
    pub fn title_check(&self) -> TitleCheck {
        check_title(&self.title)
    }
}

/// Client-side view model.
#[derive(Debug)]
pub struct Board {
    client: ApiClient,
    state: ViewState,
    form: AddForm,
}

impl Board {
    /// Board in the default view state, with an empty add form.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ViewState::new(),
            form: AddForm::default(),
        }
    }

    /// Current view state.
    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Current add-form contents.
    #[must_use]
    pub fn form(&self) -> &AddForm {
        &self.form
    }

    // ---- navigation ----

    /// Fetch and render with the current state.
    pub async fn refresh(&self) -> Frame {
        self.render(None).await
    }

    /// Switch between table and card layouts.
    pub async fn toggle_view(&mut self) -> Frame {
        self.state = self.state.toggled_view();
        self.refresh().await
    }

    /// Show all, sold or unsold items.
    pub async fn set_filter(&mut self, filter: StatusFilter) -> Frame {
        self.state = self.state.with_filter(filter);
        self.refresh().await
    }

    /// Order by deadline, ascending or descending.
    pub async fn set_sort(&mut self, sort: SortOrder) -> Frame {
        self.state = self.state.with_sort(sort);
        self.refresh().await
    }

    /// Narrow the list to titles containing `query`, ignoring case.
    pub async fn set_search(&mut self, query: impl Into<String>) -> Frame {
        self.state = self.state.with_search(query);
        self.refresh().await
    }

    // ---- add form ----

    /// Record a keystroke in the title input and re-check it.
    pub fn type_title(&mut self, input: impl Into<String>) -> TitleCheck {
        self.form.title = input.into();
        self.form.title_check()
    }

    /// Record the chosen deadline.
    pub fn set_deadline(&mut self, deadline: impl Into<String>) {
        self.form.deadline = deadline.into();
    }

    /// Submit the add form. Bad values alert without a request; on success
    /// the form is cleared.
    pub async fn submit(&mut self) -> Frame {
        let title = self.form.title.trim().to_string();
        let deadline = self.form.deadline.trim().to_string();
        if deadline.is_empty() || !check_title(&title).submit_enabled {
            return self.render(Some(ALERT_CHECK_VALUES.to_string())).await;
        }
        match self.client.create(&ItemDraft::new(title, deadline)).await {
            Ok(item) => {
                tracing::debug!(id = item.id, "item created");
                self.form = AddForm::default();
                self.refresh().await
            }
            Err(err) => self.render(Some(alert_text(&err, ALERT_CREATE_FAILED))).await,
        }
    }

    // ---- item actions ----

    /// Flip an item's sold flag.
    pub async fn toggle_item(&mut self, id: u64) -> Frame {
        match self.client.toggle(id).await {
            Ok(_) => self.refresh().await,
            Err(err) => {
                tracing::warn!(id, error = %err, "toggle failed");
                self.render(Some(ALERT_TOGGLE_FAILED.to_string())).await
            }
        }
    }

    /// Delete an item after `confirm` accepts the prompt text. A declined
    /// prompt sends nothing and re-renders nothing.
    pub async fn delete_item<F>(&mut self, id: u64, confirm: F) -> Option<Frame>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(crate::render::DELETE_CONFIRM) {
            return None;
        }
        let frame = match self.client.delete(id).await {
            Ok(()) => {
                if self.state.editing() == Some(id) {
                    self.state = self.state.done_editing();
                }
                self.refresh().await
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "delete failed");
                self.render(Some(ALERT_DELETE_FAILED.to_string())).await
            }
        };
        Some(frame)
    }

    // ---- inline edit ----

    /// Swap item `id`'s row or card for a pre-filled form. Any other open
    /// inline form closes.
    pub async fn begin_edit(&mut self, id: u64) -> Frame {
        self.state = self.state.editing_item(id);
        self.refresh().await
    }

    /// Send the inline form. Blank fields alert and keep the form open.
    pub async fn submit_edit(&mut self, title: &str, deadline: &str) -> Frame {
        let Some(id) = self.state.editing() else {
            return self.refresh().await;
        };
        let (title, deadline) = (title.trim(), deadline.trim());
        if title.is_empty() || deadline.is_empty() {
            return self.render(Some(ALERT_CHECK_INPUT.to_string())).await;
        }
        match self.client.update(id, &ItemDraft::new(title, deadline)).await {
            Ok(_) => {
                self.state = self.state.done_editing();
                self.refresh().await
            }
            Err(err) => self.render(Some(alert_text(&err, ALERT_UPDATE_FAILED))).await,
        }
    }

    /// Close the inline form without sending anything.
    pub async fn cancel_edit(&mut self) -> Frame {
        self.state = self.state.done_editing();
        self.refresh().await
    }

    // ---- internal ----

    async fn render(&self, alert: Option<String>) -> Frame {
        let items = match self.client.list().await {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, "could not load items");
                return Frame {
                    html: render_fetch_error(),
                    alert,
                };
            }
        };
        let visible = self.state.project(items);
        let ctx = RenderContext::now(self.state.editing());
        Frame {
            html: renderer_for(self.state.view()).render(&visible, &ctx),
            alert,
        }
    }
}

/// The server's own message when it sent one, else `fallback`.
fn alert_text(err: &ClientError, fallback: &str) -> String {
    match err {
        ClientError::Status {
            message: Some(msg), ..
        } => msg.clone(),
        _ => fallback.to_string(),
    }
}
