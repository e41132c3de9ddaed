use crate::display::pagination::{format_page_bar, format_range_line};
use crate::error::AppError;
use crate::view::{CollectionView, Record, ViewModel, ViewState};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq)]
enum InputMode {
    Normal,
    PageJump,
    Search,
}

/// Interactive terminal pager over a collection view.
///
/// Every key press mutates the owned [`ViewState`] and recomputes the
/// projection, so the engine's reactive rules (search resets the page,
/// navigation does not) drive the whole loop.
pub struct InteractivePager<'a, R, F>
where
    R: Record,
    F: Fn(&[&R]) -> Result<String, AppError>,
{
    view: &'a CollectionView,
    records: &'a [R],
    state: ViewState,
    renderer: F,
    title: String,
    mode: InputMode,
    buffer: String,
    terminal_height: u16,
}

impl<'a, R, F> InteractivePager<'a, R, F>
where
    R: Record,
    F: Fn(&[&R]) -> Result<String, AppError>,
{
    pub fn new(
        view: &'a CollectionView,
        records: &'a [R],
        state: ViewState,
        title: impl Into<String>,
        renderer: F,
    ) -> Result<Self, AppError> {
        let (_, height) = terminal::size().unwrap_or((80, 24));

        Ok(Self {
            view,
            records,
            state,
            renderer,
            title: title.into(),
            mode: InputMode::Normal,
            buffer: String::new(),
            terminal_height: height.clamp(10, 100),
        })
    }

    /// Run the pager until the user quits. Pipes get a single plain
    /// render of the current page instead of a raw-mode session.
    pub fn run(mut self) -> Result<(), AppError> {
        if !atty::is(atty::Stream::Stdout) {
            let vm = self.view.compute(self.records, &self.state);
            println!("{}", (self.renderer)(&vm.visible)?);
            println!("{}", format_range_line(&vm));
            return Ok(());
        }

        execute!(io::stdout(), EnterAlternateScreen).map_err(Self::terminal_error)?;
        terminal::enable_raw_mode().map_err(Self::terminal_error)?;

        let result = self.interactive_loop();

        terminal::disable_raw_mode().map_err(Self::terminal_error)?;
        execute!(io::stdout(), LeaveAlternateScreen).map_err(Self::terminal_error)?;

        result
    }

    fn interactive_loop(&mut self) -> Result<(), AppError> {
        loop {
            let vm = self.view.compute(self.records, &self.state);
            self.display_page(&vm)?;

            let key = Self::read_key()?;
            if self.handle_key(key, &vm) {
                return Ok(());
            }
        }
    }

    /// Returns true when the pager should exit.
    fn handle_key<'r>(&mut self, key: KeyEvent, vm: &ViewModel<'r, R>) -> bool {
        match self.mode {
            InputMode::Normal => match (key.code, key.modifiers) {
                (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => return true,
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,
                (KeyCode::Char('n' | ']' | 'l'), _) | (KeyCode::Right, _) => {
                    if self.state.page.current < vm.total_pages {
                        self.state.next_page();
                    }
                }
                (KeyCode::Char('p' | '[' | 'h'), _) | (KeyCode::Left, _) => {
                    self.state.previous_page();
                }
                (KeyCode::Char('g'), _) | (KeyCode::Home, _) => self.state.first_page(),
                (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                    self.state.go_to_page(vm.total_pages);
                }
                (KeyCode::Char('/'), _) => {
                    self.mode = InputMode::Search;
                    self.buffer = self.state.query.clone();
                }
                (KeyCode::Char(c), _) if c.is_ascii_digit() => {
                    self.mode = InputMode::PageJump;
                    self.buffer = c.to_string();
                }
                _ => {}
            },
            InputMode::PageJump => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => self.buffer.push(c),
                KeyCode::Enter => {
                    if let Ok(page) = self.buffer.parse::<usize>() {
                        if page >= 1 && page <= vm.total_pages {
                            self.state.go_to_page(page);
                        }
                    }
                    self.reset_input();
                }
                KeyCode::Esc => self.reset_input(),
                _ => {}
            },
            InputMode::Search => match key.code {
                KeyCode::Enter => {
                    // committing a new query snaps back to page 1
                    self.state.set_query(self.buffer.clone());
                    self.reset_input();
                }
                KeyCode::Esc => self.reset_input(),
                KeyCode::Backspace => {
                    self.buffer.pop();
                }
                KeyCode::Char(c) => self.buffer.push(c),
                _ => {}
            },
        }
        false
    }

    fn reset_input(&mut self) {
        self.mode = InputMode::Normal;
        self.buffer.clear();
    }

    fn display_page<'r>(&self, vm: &ViewModel<'r, R>) -> Result<(), AppError> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
            .map_err(Self::terminal_error)?;

        let table = (self.renderer)(&vm.visible)?;
        let available_lines = (self.terminal_height as usize).saturating_sub(4);

        print!("{}\r\n", self.title);
        for line in table.lines().take(available_lines) {
            print!("{}\r\n", line);
        }

        let status = match self.mode {
            InputMode::PageJump => format!(
                "Go to page: {} (Enter to confirm, Esc to cancel)",
                self.buffer
            ),
            InputMode::Search => format!("Search: {}_ (Enter to apply, Esc to cancel)", self.buffer),
            InputMode::Normal => format!(
                "{} | {} | n/p page, g/G first/last, 1-9 jump, / search, q quit",
                format_range_line(vm),
                format_page_bar(vm)
            ),
        };
        print!("{}\r\n", status);

        io::stdout().flush().map_err(Self::terminal_error)?;
        Ok(())
    }

    fn read_key() -> Result<KeyEvent, AppError> {
        loop {
            match event::read().map_err(Self::terminal_error)? {
                Event::Key(key) => return Ok(key),
                _ => continue,
            }
        }
    }

    fn terminal_error(e: io::Error) -> AppError {
        AppError::Display(crate::error::DisplayError::TerminalOutput(format!(
            "Terminal interaction failed: {}",
            e
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn pager_with_records(records: &[Value]) -> InteractivePager<'_, Value, impl Fn(&[&Value]) -> Result<String, AppError>> {
        // leak view for a 'static-ish borrow inside the test
        let view = Box::leak(Box::new(CollectionView::new(["name"])));
        InteractivePager::new(view, records, ViewState::new(5), "Test", |rows| {
            Ok(format!("{} rows", rows.len()))
        })
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_keys_move_pages() {
        let records: Vec<Value> = (1..=20).map(|i| json!({ "id": i, "name": "x" })).collect();
        let mut pager = pager_with_records(&records);
        let vm = pager.view.compute(pager.records, &pager.state);

        assert!(!pager.handle_key(key(KeyCode::Char('n')), &vm));
        assert_eq!(pager.state.page.current, 2);

        assert!(!pager.handle_key(key(KeyCode::Char('G')), &vm));
        assert_eq!(pager.state.page.current, 4);

        // already on the last page, next is a no-op
        let vm = pager.view.compute(pager.records, &pager.state);
        assert!(!pager.handle_key(key(KeyCode::Char('n')), &vm));
        assert_eq!(pager.state.page.current, 4);

        assert!(!pager.handle_key(key(KeyCode::Char('g')), &vm));
        assert_eq!(pager.state.page.current, 1);
    }

    #[test]
    fn test_page_jump_input() {
        let records: Vec<Value> = (1..=60).map(|i| json!({ "id": i, "name": "x" })).collect();
        let mut pager = pager_with_records(&records);
        let vm = pager.view.compute(pager.records, &pager.state);

        pager.handle_key(key(KeyCode::Char('1')), &vm);
        pager.handle_key(key(KeyCode::Char('0')), &vm);
        assert_eq!(pager.mode, InputMode::PageJump);
        pager.handle_key(key(KeyCode::Enter), &vm);

        assert_eq!(pager.state.page.current, 10);
        assert_eq!(pager.mode, InputMode::Normal);
    }

    #[test]
    fn test_page_jump_out_of_range_is_ignored() {
        let records: Vec<Value> = (1..=20).map(|i| json!({ "id": i, "name": "x" })).collect();
        let mut pager = pager_with_records(&records);
        let vm = pager.view.compute(pager.records, &pager.state);

        pager.handle_key(key(KeyCode::Char('9')), &vm);
        pager.handle_key(key(KeyCode::Enter), &vm);
        assert_eq!(pager.state.page.current, 1);
    }

    #[test]
    fn test_search_commit_resets_page() {
        let records: Vec<Value> = (1..=30)
            .map(|i| json!({ "id": i, "name": format!("row {}", i) }))
            .collect();
        let mut pager = pager_with_records(&records);
        pager.state.go_to_page(3);
        let vm = pager.view.compute(pager.records, &pager.state);

        pager.handle_key(key(KeyCode::Char('/')), &vm);
        pager.handle_key(key(KeyCode::Char('1')), &vm);
        pager.handle_key(key(KeyCode::Enter), &vm);

        assert_eq!(pager.state.query, "1");
        assert_eq!(pager.state.page.current, 1);
    }

    #[test]
    fn test_search_cancel_keeps_previous_query() {
        let records: Vec<Value> = vec![json!({ "id": 1, "name": "x" })];
        let mut pager = pager_with_records(&records);
        pager.state.set_query("kept");
        let vm = pager.view.compute(pager.records, &pager.state);

        pager.handle_key(key(KeyCode::Char('/')), &vm);
        pager.handle_key(key(KeyCode::Char('z')), &vm);
        pager.handle_key(key(KeyCode::Esc), &vm);

        assert_eq!(pager.state.query, "kept");
        assert_eq!(pager.mode, InputMode::Normal);
    }

    #[test]
    fn test_quit_key() {
        let records: Vec<Value> = vec![json!({ "id": 1, "name": "x" })];
        let mut pager = pager_with_records(&records);
        let vm = pager.view.compute(pager.records, &pager.state);
        assert!(pager.handle_key(key(KeyCode::Char('q')), &vm));
    }
}
