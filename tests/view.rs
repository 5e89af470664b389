use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use market_board::render::{
    escape_html, is_expired, renderer_for, CardRenderer, RenderContext, Renderer, TableRenderer,
    DELETE_CONFIRM, SOLD_LABEL, UNSOLD_LABEL,
};
use market_board::view::{check_title, TITLE_TOO_LONG, TITLE_TOO_SHORT};
use market_board::{Item, SortOrder, StatusFilter, ViewMode, ViewState};

fn item(id: u64, title: &str, deadline: &str, is_sold: bool) -> Item {
    Item {
        id,
        title: title.to_string(),
        deadline: deadline.parse::<NaiveDate>().unwrap(),
        is_sold,
    }
}

fn sample() -> Vec<Item> {
    vec![
        item(1, "Old Book", "2025-03-01", false),
        item(2, "Pen", "2025-01-15", true),
        item(3, "Bookshelf", "2025-02-10", true),
        item(4, "Lamp", "2025-01-15", false),
    ]
}

fn ids(items: &[Item]) -> Vec<u64> {
    items.iter().map(|i| i.id).collect()
}

fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

// ---- view state -------------------------------------------------------------

#[test]
fn defaults() {
    let state = ViewState::new();
    assert_eq!(state.view(), ViewMode::Table);
    assert_eq!(state.filter(), StatusFilter::All);
    assert_eq!(state.sort(), SortOrder::Asc);
    assert_eq!(state.editing(), None);
    assert_eq!(state.search(), "");
}

#[test]
fn transitions_return_new_values() {
    let base = ViewState::new();
    let carded = base.toggled_view();
    assert_eq!(base.view(), ViewMode::Table);
    assert_eq!(carded.view(), ViewMode::Card);
    assert_eq!(carded.toggled_view().view(), ViewMode::Table);

    let editing = carded.with_filter(StatusFilter::Sold).editing_item(3);
    assert_eq!(editing.view(), ViewMode::Card);
    assert_eq!(editing.filter(), StatusFilter::Sold);
    assert_eq!(editing.editing(), Some(3));
    assert_eq!(editing.editing_item(4).editing(), Some(4));
    assert_eq!(editing.done_editing().editing(), None);
}

#[test]
fn ascending_sort_is_stable_on_equal_deadlines() {
    let out = ViewState::new().project(sample());
    assert_eq!(ids(&out), vec![2, 4, 3, 1]);
}

#[test]
fn descending_sort() {
    let out = ViewState::new().with_sort(SortOrder::Desc).project(sample());
    assert_eq!(ids(&out), vec![1, 3, 2, 4]);
}

#[test]
fn filter_sold_and_unsold() {
    let sold = ViewState::new().with_filter(StatusFilter::Sold).project(sample());
    assert_eq!(ids(&sold), vec![2, 3]);
    let unsold = ViewState::new()
        .with_filter(StatusFilter::Unsold)
        .project(sample());
    assert_eq!(ids(&unsold), vec![4, 1]);
}

#[test]
fn search_is_case_insensitive_and_trimmed() {
    let state = ViewState::new().with_search("  BOOK ");
    assert_eq!(ids(&state.project(sample())), vec![3, 1]);

    let none = ViewState::new().with_search("sofa");
    assert!(none.project(sample()).is_empty());
}

#[test]
fn search_then_filter_then_sort() {
    let state = ViewState::new()
        .with_search("book")
        .with_filter(StatusFilter::Unsold)
        .with_sort(SortOrder::Desc);
    assert_eq!(ids(&state.project(sample())), vec![1]);
}

// ---- title check ------------------------------------------------------------

#[test]
fn title_check_bounds() {
    let short = check_title(" a ");
    assert_eq!(short.warning, Some(TITLE_TOO_SHORT));
    assert!(!short.submit_enabled);

    let ok = check_title("ab");
    assert_eq!(ok.warning, None);
    assert!(ok.submit_enabled);

    assert!(check_title(&"x".repeat(20)).submit_enabled);

    let long = check_title(&"x".repeat(21));
    assert_eq!(long.warning, Some(TITLE_TOO_LONG));
    assert!(!long.submit_enabled);

    assert!(check_title(&"책".repeat(20)).submit_enabled);
}

// ---- renderers --------------------------------------------------------------

#[test]
fn expiry_compares_against_deadline_midnight() {
    let deadline: NaiveDate = "2025-01-15".parse().unwrap();
    assert!(is_expired(deadline, noon(2025, 1, 16)));
    assert!(is_expired(deadline, noon(2025, 1, 15)));
    assert!(!is_expired(deadline, noon(2025, 1, 14)));
    assert!(!is_expired(
        deadline,
        Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
    ));
}

#[test]
fn table_renders_one_row_per_item_with_actions() {
    let items = vec![item(1, "Book", "2025-01-01", true), item(2, "Pen", "2025-03-01", false)];
    let ctx = RenderContext {
        now: noon(2025, 2, 1),
        editing: None,
    };
    let html = TableRenderer.render(&items, &ctx);

    assert!(html.starts_with("<table>"));
    assert!(html.contains("<th>물품명</th>"));
    assert_eq!(html.matches("<tr data-id=").count(), 2);
    assert!(html.contains("<td class=\"expired\">2025-01-01</td>"));
    assert!(html.contains("<td>2025-03-01</td>"));
    assert!(html.contains(SOLD_LABEL));
    assert!(html.contains(UNSOLD_LABEL));
    assert_eq!(html.matches("data-action=\"toggle\"").count(), 2);
    assert_eq!(html.matches("data-action=\"edit\"").count(), 2);
    assert_eq!(
        html.matches(&format!("data-confirm=\"{DELETE_CONFIRM}\"")).count(),
        2
    );
}

#[test]
fn table_swaps_editing_row_for_form() {
    let items = vec![item(1, "Book", "2025-01-01", false), item(2, "Pen", "2025-03-01", false)];
    let ctx = RenderContext {
        now: noon(2025, 2, 1),
        editing: Some(2),
    };
    let html = TableRenderer.render(&items, &ctx);

    assert!(html.contains("<tr data-id=\"1\">"));
    assert!(!html.contains("<tr data-id=\"2\">"));
    assert!(html.contains("class=\"inline-edit-row\""));
    assert!(html.contains("colspan=\"6\""));
    assert!(html.contains("value=\"Pen\""));
    assert!(html.contains("type=\"date\" value=\"2025-03-01\""));
    assert_eq!(html.matches("inline-edit-form").count(), 1);
}

#[test]
fn cards_render_and_swap_for_form() {
    let items = vec![item(1, "Book", "2025-01-01", false), item(2, "Pen", "2025-03-01", true)];
    let plain = CardRenderer.render(
        &items,
        &RenderContext {
            now: noon(2025, 2, 1),
            editing: None,
        },
    );
    assert!(plain.starts_with("<div class=\"card-container\">"));
    assert_eq!(plain.matches("<div class=\"card\"").count(), 2);
    assert!(plain.contains("<h3>Book</h3>"));
    assert!(plain.contains("<span class=\"expired\">2025-01-01</span>"));
    assert!(plain.contains("<span>2025-03-01</span>"));

    let editing = CardRenderer.render(
        &items,
        &RenderContext {
            now: noon(2025, 2, 1),
            editing: Some(1),
        },
    );
    assert!(!editing.contains("<h3>Book</h3>"));
    assert!(editing.contains("<h3>Pen</h3>"));
    assert!(editing.contains("class=\"save-btn\""));
    assert!(editing.contains("value=\"Book\""));
}

#[test]
fn renderer_for_picks_strategy() {
    let items = vec![item(1, "Book", "2025-01-01", false)];
    let ctx = RenderContext {
        now: noon(2025, 2, 1),
        editing: None,
    };
    assert!(renderer_for(ViewMode::Table)
        .render(&items, &ctx)
        .starts_with("<table>"));
    assert!(renderer_for(ViewMode::Card)
        .render(&items, &ctx)
        .starts_with("<div class=\"card-container\">"));
}

#[test]
fn empty_list_still_renders_container() {
    let ctx = RenderContext::now(None);
    assert_eq!(
        CardRenderer.render(&[], &ctx),
        "<div class=\"card-container\"></div>"
    );
    assert!(TableRenderer.render(&[], &ctx).ends_with("<tbody></tbody></table>"));
}

#[test]
fn titles_are_escaped() {
    assert_eq!(
        escape_html("<b>\"Tom & Jerry's\"</b>"),
        "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
    );
    let items = vec![item(1, "<script>", "2025-01-01", false)];
    let html = TableRenderer.render(
        &items,
        &RenderContext {
            now: noon(2025, 2, 1),
            editing: None,
        },
    );
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}
