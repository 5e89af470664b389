//! Turns a projected item list into markup.
//!
//! Renderers hold no state. Each call produces the whole list subtree, which
//! replaces whatever was rendered before.

use crate::model::Item;
use crate::view::ViewMode;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Glyph and label for a sold item.
pub const SOLD_LABEL: &str = "✅ 거래완료";
/// Glyph and label for an item still on offer.
pub const UNSOLD_LABEL: &str = "🟡 거래중";
/// Question asked before a delete goes out.
pub const DELETE_CONFIRM: &str = "정말 삭제하시겠습니까?";
/// Inline message shown when the list cannot be fetched.
pub const FETCH_FAILED: &str = "서버에서 데이터를 불러올 수 없습니다.";

const TABLE_HEADERS: [&str; 6] = ["물품명", "마감일", "상태", "전환", "삭제", "수정"];

/// Per-render inputs that are not part of the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Instant deadlines are compared against.
    pub now: DateTime<Utc>,
    /// Item to show as an inline edit form instead of its row or card.
    pub editing: Option<u64>,
}

impl RenderContext {
    /// Context for the current instant.
    pub fn now(editing: Option<u64>) -> Self {
        Self {
            now: Utc::now(),
            editing,
        }
    }
}

/// One layout strategy.
pub trait Renderer: Send + Sync {
    /// Markup for `items`, already searched, filtered and sorted.
    fn render(&self, items: &[Item], ctx: &RenderContext) -> String;
}

/// The renderer for `view`.
#[must_use]
pub fn renderer_for(view: ViewMode) -> &'static dyn Renderer {
    match view {
        ViewMode::Table => &TableRenderer,
        ViewMode::Card => &CardRenderer,
    }
}

/// A deadline has passed once its midnight (UTC) lies strictly before `now`.
#[must_use]
pub fn is_expired(deadline: NaiveDate, now: DateTime<Utc>) -> bool {
    deadline.and_time(NaiveTime::MIN).and_utc() < now
}

/// Markup shown in place of the list when fetching fails.
#[must_use]
pub fn render_fetch_error() -> String {
    format!("<p style=\"color:red;\">{FETCH_FAILED}</p>")
}

/// Rows in a six-column table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer;

impl Renderer for TableRenderer {
    fn render(&self, items: &[Item], ctx: &RenderContext) -> String {
        let mut html = String::from("<table><thead><tr>");
        for header in TABLE_HEADERS {
            html.push_str(&format!("<th>{header}</th>"));
        }
        html.push_str("</tr></thead><tbody>");
        for item in items {
            if ctx.editing == Some(item.id) {
                html.push_str(&format!(
                    "<tr class=\"inline-edit-row\"><td colspan=\"{}\">\
                     <form class=\"inline-edit-form\" data-id=\"{}\">{}\
                     <button type=\"submit\">수정 완료</button>\
                     <button type=\"button\" class=\"cancel-btn\">취소</button>\
                     </form></td></tr>",
                    TABLE_HEADERS.len(),
                    item.id,
                    edit_inputs(item),
                ));
                continue;
            }
            html.push_str(&format!("<tr data-id=\"{}\">", item.id));
            html.push_str(&format!("<td>{}</td>", escape_html(&item.title)));
            html.push_str(&format!(
                "<td{}>{}</td>",
                expired_class(item, ctx),
                item.deadline
            ));
            html.push_str(&format!("<td>{}</td>", status_label(item)));
            for action in actions(item) {
                html.push_str(&format!("<td>{action}</td>"));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        html
    }
}

/// One card per item.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardRenderer;

impl Renderer for CardRenderer {
    fn render(&self, items: &[Item], ctx: &RenderContext) -> String {
        let mut html = String::from("<div class=\"card-container\">");
        for item in items {
            html.push_str(&format!("<div class=\"card\" data-id=\"{}\">", item.id));
            if ctx.editing == Some(item.id) {
                html.push_str(&format!(
                    "<div class=\"inline-edit-form\">{}\
                     <button class=\"save-btn\">수정 완료</button>\
                     <button class=\"cancel-btn\">취소</button></div>",
                    edit_inputs(item),
                ));
            } else {
                html.push_str(&format!("<h3>{}</h3>", escape_html(&item.title)));
                html.push_str(&format!(
                    "<p>📅 <span{}>{}</span></p>",
                    expired_class(item, ctx),
                    item.deadline
                ));
                html.push_str(&format!("<p>{}</p>", status_label(item)));
                for action in actions(item) {
                    html.push_str(&action);
                }
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
        html
    }
}

fn status_label(item: &Item) -> &'static str {
    if item.is_sold {
        SOLD_LABEL
    } else {
        UNSOLD_LABEL
    }
}

fn expired_class(item: &Item, ctx: &RenderContext) -> &'static str {
    if is_expired(item.deadline, ctx.now) {
        " class=\"expired\""
    } else {
        ""
    }
}

/// Toggle, delete, edit buttons, in that order.
fn actions(item: &Item) -> [String; 3] {
    let id = item.id;
    [
        format!("<button data-action=\"toggle\" data-id=\"{id}\">상태 전환</button>"),
        format!(
            "<button data-action=\"delete\" data-id=\"{id}\" data-confirm=\"{DELETE_CONFIRM}\">삭제</button>"
        ),
        format!("<button data-action=\"edit\" data-id=\"{id}\">수정</button>"),
    ]
}

fn edit_inputs(item: &Item) -> String {
    format!(
        "<input type=\"text\" value=\"{}\" /><input type=\"date\" value=\"{}\" />",
        escape_html(&item.title),
        item.deadline
    )
}

/// Escape text for use in element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
