use crate::view::filter::{self, FilterSpec};
use crate::view::page::{self, PageSpec};
use crate::view::path::{FieldPath, Record};
use crate::view::sort::{self, SortSpec};

/// The view's query/filter/sort/page state, owned by the caller and
/// mutated only through these methods.
///
/// Anything that changes *what* is shown — query, filters, sort or
/// page size — snaps back to page 1 so the user is never left on a
/// page that no longer exists. Plain navigation does not, and a
/// refresh of the underlying records never touches this state, so the
/// user's position survives a refresh-after-action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub query: String,
    pub filters: FilterSpec,
    pub sort: SortSpec,
    pub page: PageSpec,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        ViewState {
            page: PageSpec::new(page_size),
            ..Default::default()
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page.current = 1;
    }

    pub fn set_filters(&mut self, filters: FilterSpec) {
        self.filters = filters;
        self.page.current = 1;
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(FilterSpec::new());
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.page.current = 1;
    }

    /// Column-header behavior: a repeated path flips the direction,
    /// a new path starts ascending.
    pub fn toggle_sort(&mut self, path: impl Into<FieldPath>) {
        let path = path.into();
        let sort = if self.sort.path.as_ref() == Some(&path) {
            SortSpec {
                path: Some(path),
                direction: self.sort.direction.flip(),
            }
        } else {
            SortSpec::ascending(path)
        };
        self.set_sort(sort);
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page.size = size.max(1);
        self.page.current = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page.current = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page.current += 1;
    }

    pub fn previous_page(&mut self) {
        self.page.current = self.page.current.saturating_sub(1).max(1);
    }

    pub fn first_page(&mut self) {
        self.page.current = 1;
    }
}

/// Derived, read-only projection of one page of a record list.
///
/// `filtered` is the full post-sort result set in display order; the
/// export path consumes it. `start_index`/`end_index` are the 1-based
/// inclusive display range ("Showing 11 to 12 of 12"), both 0 when
/// nothing matched.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<'r, R> {
    pub visible: Vec<&'r R>,
    pub filtered: Vec<&'r R>,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub page_buttons: Vec<usize>,
}

/// Reusable filter → sort → paginate projection, configured once per
/// listing with that view's searchable paths.
#[derive(Debug, Clone)]
pub struct CollectionView {
    searchable: Vec<FieldPath>,
    max_page_buttons: usize,
}

const DEFAULT_PAGE_BUTTONS: usize = 5;

impl CollectionView {
    pub fn new<I, P>(searchable: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        CollectionView {
            searchable: searchable.into_iter().map(Into::into).collect(),
            max_page_buttons: DEFAULT_PAGE_BUTTONS,
        }
    }

    pub fn with_page_buttons(mut self, max_visible: usize) -> Self {
        self.max_page_buttons = max_visible.max(1);
        self
    }

    /// Project `records` through `state`. Pure and total: identical
    /// inputs always produce a structurally equal model, and malformed
    /// state (out-of-range page, inactive filters) is absorbed rather
    /// than surfaced as an error.
    pub fn compute<'r, R: Record>(&self, records: &'r [R], state: &ViewState) -> ViewModel<'r, R> {
        let accepts = filter::predicate(&state.query, &self.searchable, &state.filters);
        let mut filtered: Vec<&R> = records.iter().filter(|r| accepts(*r)).collect();
        sort::sort_records(&mut filtered, &state.sort);

        let total_filtered = filtered.len();
        let total_pages = page::total_pages(total_filtered, state.page.size);
        let current_page = page::clamp_page(state.page.current, total_pages);

        let offset = (current_page - 1) * state.page.size;
        let page_end = (offset + state.page.size).min(total_filtered);
        let visible = filtered[offset.min(total_filtered)..page_end].to_vec();

        let start_index = if total_filtered == 0 { 0 } else { offset + 1 };
        let page_buttons = page::page_window(current_page, total_pages, self.max_page_buttons);

        ViewModel {
            visible,
            filtered,
            total_filtered,
            total_pages,
            current_page,
            start_index,
            end_index: page_end,
            page_buttons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn numbered(count: usize) -> Vec<Value> {
        (1..=count as i64).map(|id| json!({ "id": id })).collect()
    }

    fn ids(records: &[&Value]) -> Vec<i64> {
        records.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    fn plain_view() -> CollectionView {
        CollectionView::new(Vec::<&str>::new())
    }

    #[test]
    fn test_twelve_items_across_three_pages() {
        let records = numbered(12);
        let view = plain_view();
        let mut state = ViewState::new(5);

        let vm = view.compute(&records, &state);
        assert_eq!(vm.total_pages, 3);
        assert_eq!(ids(&vm.visible), vec![1, 2, 3, 4, 5]);
        assert_eq!((vm.start_index, vm.end_index), (1, 5));

        state.go_to_page(3);
        let vm = view.compute(&records, &state);
        assert_eq!(ids(&vm.visible), vec![11, 12]);
        assert_eq!((vm.start_index, vm.end_index), (11, 12));
        assert_eq!(vm.total_filtered, 12);
    }

    #[test]
    fn test_pagination_covers_sorted_set_exactly() {
        let records = numbered(23);
        let view = plain_view();
        let mut state = ViewState::new(5);

        let expected = view.compute(&records, &state);
        let mut collected = Vec::new();
        for page in 1..=expected.total_pages {
            state.go_to_page(page);
            collected.extend(ids(&view.compute(&records, &state).visible));
        }
        assert_eq!(collected, ids(&expected.filtered));
    }

    #[test]
    fn test_page_count_invariant() {
        let records = numbered(17);
        let view = plain_view();
        for page_size in 1..=20usize {
            let state = ViewState::new(page_size);
            let vm = view.compute(&records, &state);
            assert_eq!(vm.total_pages, 17usize.div_ceil(page_size).max(1));
        }
    }

    #[test]
    fn test_empty_result_set_reports_zero_range() {
        let records = numbered(3);
        let view = CollectionView::new(["name"]);
        let mut state = ViewState::new(10);
        state.set_query("no such record");

        let vm = view.compute(&records, &state);
        assert_eq!(vm.total_filtered, 0);
        assert_eq!(vm.total_pages, 1);
        assert!(vm.visible.is_empty());
        assert_eq!((vm.start_index, vm.end_index), (0, 0));
        assert_eq!(vm.page_buttons, vec![1]);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let records = numbered(12);
        let view = plain_view();
        let mut state = ViewState::new(5);
        state.go_to_page(99);

        let vm = view.compute(&records, &state);
        assert_eq!(vm.current_page, 3);
        assert_eq!(ids(&vm.visible), vec![11, 12]);
    }

    #[test]
    fn test_query_change_resets_page() {
        let records = numbered(30);
        let view = plain_view();
        let mut state = ViewState::new(5);
        state.go_to_page(3);
        assert_eq!(view.compute(&records, &state).current_page, 3);

        state.set_query("1");
        assert_eq!(state.page.current, 1);
        assert_eq!(view.compute(&records, &state).current_page, 1);
    }

    #[test]
    fn test_filter_sort_and_page_size_changes_reset_page() {
        let mut state = ViewState::new(5);

        state.go_to_page(4);
        state.set_filters(FilterSpec::new().equals("id", 1i64));
        assert_eq!(state.page.current, 1);

        state.go_to_page(4);
        state.toggle_sort("id");
        assert_eq!(state.page.current, 1);

        state.go_to_page(4);
        state.set_page_size(25);
        assert_eq!(state.page.current, 1);

        state.go_to_page(4);
        assert_eq!(state.page.current, 4);
    }

    #[test]
    fn test_records_refresh_keeps_page_position() {
        let view = plain_view();
        let mut state = ViewState::new(5);
        state.go_to_page(2);

        let before = numbered(12);
        assert_eq!(view.compute(&before, &state).current_page, 2);

        // wholesale replacement, e.g. refetch after an approval
        let after = numbered(11);
        let vm = view.compute(&after, &state);
        assert_eq!(vm.current_page, 2);
        assert_eq!(ids(&vm.visible), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_toggle_sort_flips_direction_on_same_column() {
        let records = vec![
            json!({ "id": 1, "price": 100 }),
            json!({ "id": 2, "price": 300 }),
            json!({ "id": 3, "price": 200 }),
        ];
        let view = plain_view();
        let mut state = ViewState::new(10);

        state.toggle_sort("price");
        assert_eq!(ids(&view.compute(&records, &state).visible), vec![1, 3, 2]);

        state.toggle_sort("price");
        assert_eq!(ids(&view.compute(&records, &state).visible), vec![2, 3, 1]);

        state.toggle_sort("id");
        assert_eq!(state.sort, SortSpec::ascending("id"));
    }

    #[test]
    fn test_filtered_set_is_exposed_in_display_order() {
        let records = vec![
            json!({ "id": 1, "price": 100 }),
            json!({ "id": 2, "price": 300 }),
            json!({ "id": 3, "price": 200 }),
        ];
        let view = plain_view();
        let mut state = ViewState::new(1);
        state.set_filters(FilterSpec::new().between("price", Some(150.0), None));
        state.set_sort(SortSpec::descending("price"));

        let vm = view.compute(&records, &state);
        // one record per page, but the export set holds every match
        assert_eq!(ids(&vm.visible), vec![2]);
        assert_eq!(ids(&vm.filtered), vec![2, 3]);
    }

    #[test]
    fn test_filter_narrowing() {
        let records = numbered(20);
        let view = plain_view();
        let mut state = ViewState::new(50);
        state.set_filters(FilterSpec::new().between("id", Some(5.0), Some(11.0)));

        let vm = view.compute(&records, &state);
        assert_eq!(ids(&vm.filtered), vec![5, 6, 7, 8, 9, 10, 11]);
        for record in &vm.filtered {
            assert!(records.iter().any(|r| &r == record));
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let records = numbered(12);
        let view = CollectionView::new(["id"]);
        let mut state = ViewState::new(5);
        state.set_query("1");
        state.set_sort(SortSpec::descending("id"));
        state.go_to_page(2);

        let first = view.compute(&records, &state);
        let second = view.compute(&records, &state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_page_buttons_follow_current_page() {
        let records = numbered(50);
        let view = plain_view();
        let mut state = ViewState::new(5);

        let vm = view.compute(&records, &state);
        assert_eq!(vm.page_buttons, vec![1, 2, 3, 4, 5]);

        state.go_to_page(5);
        assert_eq!(
            view.compute(&records, &state).page_buttons,
            vec![3, 4, 5, 6, 7]
        );

        state.go_to_page(10);
        assert_eq!(
            view.compute(&records, &state).page_buttons,
            vec![6, 7, 8, 9, 10]
        );
    }

    #[test]
    fn test_previous_page_saturates_at_one() {
        let mut state = ViewState::new(5);
        state.previous_page();
        assert_eq!(state.page.current, 1);
        state.next_page();
        state.next_page();
        state.previous_page();
        assert_eq!(state.page.current, 2);
    }
}
