//! Page numbers and the items of the page selector.

/// Current page (1-based), page count and total item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            total_items: 0,
        }
    }
}

impl PaginationState {
    pub fn new(current_page: u32, per_page: u32, total_items: u64) -> Self {
        Self {
            current_page: current_page.max(1),
            total_pages: total_pages(total_items, per_page),
            total_items,
        }
    }

    /// The page to show when `current_page` is past the end: the last page,
    /// or the first one while there are no pages at all.
    pub fn clamped_page(&self) -> u32 {
        self.current_page.clamp(1, self.total_pages.max(1))
    }

    pub fn is_out_of_range(&self) -> bool {
        self.clamped_page() != self.current_page
    }
}

/// `ceil(total / per_page)`; zero when there is nothing to show.
pub fn total_pages(total_items: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    u32::try_from(total_items.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItemKind {
    First,
    Previous,
    Page,
    Ellipsis,
    Next,
    Last,
}

/// One control of the page selector. `page` is the page it selects; it is
/// meaningless for ellipses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageItem {
    pub kind: PageItemKind,
    pub page: u32,
    pub selected: bool,
    pub enabled: bool,
}

impl PageItem {
    fn nav(kind: PageItemKind, page: u32, enabled: bool) -> Self {
        Self {
            kind,
            page,
            selected: false,
            enabled,
        }
    }

    fn number(page: u32, current: u32) -> Self {
        Self {
            kind: PageItemKind::Page,
            page,
            selected: page == current,
            enabled: true,
        }
    }

    fn ellipsis() -> Self {
        Self {
            kind: PageItemKind::Ellipsis,
            page: 0,
            selected: false,
            enabled: false,
        }
    }
}

const BOUNDARY: i64 = 1;
const SIBLINGS: i64 = 1;

fn range(start: i64, end: i64) -> impl Iterator<Item = i64> {
    start..=end
}

/// Items of the page selector: first, previous, the boundary pages, the
/// current page with one sibling on each side, ellipses in the gaps, next
/// and last.
pub fn page_items(state: &PaginationState) -> Vec<PageItem> {
    let count = i64::from(state.total_pages);
    let page = i64::from(state.current_page);
    let current = state.current_page;

    let start_pages: Vec<i64> = range(1, BOUNDARY.min(count)).collect();
    let end_pages: Vec<i64> = range((count - BOUNDARY + 1).max(BOUNDARY + 1), count).collect();

    let siblings_start =
        (page - SIBLINGS).min(count - BOUNDARY - SIBLINGS * 2 - 1).max(BOUNDARY + 2);
    let siblings_end = (page + SIBLINGS)
        .max(BOUNDARY + SIBLINGS * 2 + 2)
        .min(end_pages.first().map_or(count - 1, |first| first - 2));

    let mut numbers: Vec<Option<i64>> = Vec::new();
    numbers.extend(start_pages.iter().copied().map(Some));
    if siblings_start > BOUNDARY + 2 {
        numbers.push(None);
    } else if BOUNDARY + 1 < count - BOUNDARY {
        numbers.push(Some(BOUNDARY + 1));
    }
    numbers.extend(range(siblings_start, siblings_end).map(Some));
    if siblings_end < count - BOUNDARY - 1 {
        numbers.push(None);
    } else if count - BOUNDARY > BOUNDARY {
        numbers.push(Some(count - BOUNDARY));
    }
    numbers.extend(end_pages.iter().copied().map(Some));

    let has_previous = page > 1;
    let has_next = page < count;

    let mut items = Vec::with_capacity(numbers.len() + 4);
    items.push(PageItem::nav(PageItemKind::First, 1, has_previous));
    items.push(PageItem::nav(
        PageItemKind::Previous,
        current.saturating_sub(1).max(1),
        has_previous,
    ));
    items.extend(numbers.into_iter().map(|number| match number {
        Some(n) => PageItem::number(u32::try_from(n).unwrap_or(u32::MAX), current),
        None => PageItem::ellipsis(),
    }));
    items.push(PageItem::nav(
        PageItemKind::Next,
        current.saturating_add(1).min(state.total_pages.max(1)),
        has_next,
    ));
    items.push(PageItem::nav(
        PageItemKind::Last,
        state.total_pages.max(1),
        has_next,
    ));
    items
}
