use crate::view::ViewModel;

/// "Showing X to Y of Z" summary for a computed page.
pub fn format_range_line<R>(vm: &ViewModel<'_, R>) -> String {
    if vm.total_filtered == 0 {
        return "Showing 0 to 0 of 0 entries".to_string();
    }
    format!(
        "Showing {} to {} of {} entries (page {} of {})",
        vm.start_index, vm.end_index, vm.total_filtered, vm.current_page, vm.total_pages
    )
}

/// Windowed page buttons with the current page bracketed, e.g.
/// `Pages: 3 4 [5] 6 7`.
pub fn format_page_bar<R>(vm: &ViewModel<'_, R>) -> String {
    let buttons: Vec<String> = vm
        .page_buttons
        .iter()
        .map(|&page| {
            if page == vm.current_page {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect();
    format!("Pages: {}", buttons.join(" "))
}
