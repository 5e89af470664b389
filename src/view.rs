//! Client-side presentation state and the list projection.
//!
//! [`ViewState`] is a plain value. Every user action builds a new one
//! (`with_filter`, `toggled_view`, ...) and the board renders once from it.

use crate::model::Item;

const TITLE_MIN: usize = 2;
const TITLE_MAX: usize = 20;

/// Warning shown under the title input when it is too short.
pub const TITLE_TOO_SHORT: &str = "물품명은 최소 2글자 이상이어야 합니다.";
/// Warning shown under the title input when it is too long.
pub const TITLE_TOO_LONG: &str = "물품명은 20자 이내여야 합니다.";

/// Layout used to render the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// One row per item.
    #[default]
    Table,
    /// One card per item.
    Card,
}

impl ViewMode {
    /// The other layout.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Table => ViewMode::Card,
            ViewMode::Card => ViewMode::Table,
        }
    }
}

/// Which items survive the status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Everything.
    #[default]
    All,
    /// Sold items only.
    Sold,
    /// Unsold items only.
    Unsold,
}

impl StatusFilter {
    /// `true` if `item` passes this filter.
    #[must_use]
    pub fn admits(self, item: &Item) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Sold => item.is_sold,
            StatusFilter::Unsold => !item.is_sold,
        }
    }
}

/// Deadline ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Earliest deadline first.
    #[default]
    Asc,
    /// Latest deadline first.
    Desc,
}

/// Everything the client remembers between renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    view: ViewMode,
    filter: StatusFilter,
    sort: SortOrder,
    editing: Option<u64>,
    search: String,
}

impl ViewState {
    /// Table view, all items, ascending, no search, nothing being edited.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current layout.
    #[must_use]
    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Current status filter.
    #[must_use]
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Current deadline order.
    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Id of the item shown as an inline form, if any.
    #[must_use]
    pub fn editing(&self) -> Option<u64> {
        self.editing
    }

    /// Raw search text as typed.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Same state, different layout.
    #[must_use]
    pub fn with_view(&self, view: ViewMode) -> Self {
        Self {
            view,
            ..self.clone()
        }
    }

    /// Switch between table and card.
    #[must_use]
    pub fn toggled_view(&self) -> Self {
        self.with_view(self.view.toggled())
    }

    /// Same state, different status filter.
    #[must_use]
    pub fn with_filter(&self, filter: StatusFilter) -> Self {
        Self {
            filter,
            ..self.clone()
        }
    }

    /// Same state, different deadline order.
    #[must_use]
    pub fn with_sort(&self, sort: SortOrder) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Same state, different search text.
    #[must_use]
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    /// Show item `id` as an inline form. Replaces any other edit target.
    #[must_use]
    pub fn editing_item(&self, id: u64) -> Self {
        Self {
            editing: Some(id),
            ..self.clone()
        }
    }

    /// Leave inline edit mode.
    #[must_use]
    pub fn done_editing(&self) -> Self {
        Self {
            editing: None,
            ..self.clone()
        }
    }

    /// Search, then filter, then sort by deadline. The sort is stable, so
    /// items sharing a deadline keep their server order.
    #[must_use]
    pub fn project(&self, items: Vec<Item>) -> Vec<Item> {
        let needle = self.search.trim().to_lowercase();
        let mut out: Vec<Item> = items
            .into_iter()
            .filter(|i| needle.is_empty() || i.title.to_lowercase().contains(&needle))
            .filter(|i| self.filter.admits(i))
            .collect();
        match self.sort {
            SortOrder::Asc => out.sort_by(|a, b| a.deadline.cmp(&b.deadline)),
            SortOrder::Desc => out.sort_by(|a, b| b.deadline.cmp(&a.deadline)),
        }
        out
    }
}

/// Outcome of checking the title input as the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleCheck {
    /// Inline warning, or `None` when the title is acceptable.
    pub warning: Option<&'static str>,
    /// Whether the submit button is enabled.
    pub submit_enabled: bool,
}

/// Live validation of the add-form title.
#[must_use]
pub fn check_title(input: &str) -> TitleCheck {
    let len = input.trim().chars().count();
    let warning = if len < TITLE_MIN {
        Some(TITLE_TOO_SHORT)
    } else if len > TITLE_MAX {
        Some(TITLE_TOO_LONG)
    } else {
        None
    };
    TitleCheck {
        warning,
        submit_enabled: warning.is_none(),
    }
}
