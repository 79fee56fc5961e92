use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, error, info, trace};

use crate::domain::{HELP_TEXT, HRConfig, Message};
use crate::employee::{Employee, Field, employee_columns};
use crate::form::{EmployeeForm, FormAction, FormView};
use crate::inputter::{InputResult, Inputter};
use crate::store::RecordStore;
use crate::table::{TableOptions, TableView};
use crate::ui::COLUMN_WIDTH_MARGIN;

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    CreateEmployee,
    EmployeeList,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    NORMAL,
    POPUP,
    SEARCH,
}

/// One visible column of the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub name: String,
    pub width: usize,
    pub data: Vec<String>,
}

/// Snapshot of everything the UI draws. Rebuilt after every update.
pub struct UIData {
    pub screen: Screen,
    pub name: String,
    pub table: Vec<ColumnView>,
    pub nrows: usize,
    pub selected_row: usize,
    pub selected_column: usize,
    pub empty_message: String,
    pub summary: String,
    pub page_window: Vec<usize>,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub search: InputResult,
    pub search_placeholder: String,
    pub active_search: bool,
    pub form: FormView,
    pub show_popup: bool,
    pub popup_title: String,
    pub popup_message: String,
    pub status_message: String,
}

impl UIData {
    pub fn empty() -> Self {
        UIData {
            screen: Screen::CreateEmployee,
            name: String::new(),
            table: Vec::new(),
            nrows: 0,
            selected_row: 0,
            selected_column: 0,
            empty_message: String::new(),
            summary: String::new(),
            page_window: Vec::new(),
            current_page: 1,
            total_pages: 0,
            page_size: 0,
            search: InputResult::default(),
            search_placeholder: String::new(),
            active_search: false,
            form: FormView::default(),
            show_popup: false,
            popup_title: String::new(),
            popup_message: String::new(),
            status_message: String::new(),
        }
    }
}

pub struct Model {
    config: HRConfig,
    pub status: Status,
    screen: Screen,
    modus: Modus,
    store: RecordStore<Employee>,
    table: TableView,
    form: EmployeeForm,
    search_input: Inputter,
    curser_row: usize,
    curser_column: usize,
    page_cells: Vec<Vec<String>>,
    uidata: UIData,
    clipboard: Option<Clipboard>,
    status_message: String,
}

impl Model {
    pub fn init(config: &HRConfig) -> Self {
        let options = TableOptions::default()
            .columns(employee_columns())
            .items_per_page(config.page_size)
            .empty_message("No employees found")
            .search_placeholder("Search employees...");

        let screen = if config.list {
            Screen::EmployeeList
        } else {
            Screen::CreateEmployee
        };

        let mut model = Self {
            config: config.clone(),
            status: Status::READY,
            screen,
            modus: Modus::NORMAL,
            store: RecordStore::new(),
            table: TableView::new(options),
            form: EmployeeForm::new(),
            search_input: Inputter::default(),
            curser_row: 0,
            curser_column: 0,
            page_cells: Vec::new(),
            uidata: UIData::empty(),
            clipboard: None,
            status_message: "Press ? for help".to_string(),
        };
        model.refresh();
        model
    }

    /// Bulk add records read at startup.
    pub fn seed(&mut self, employees: Vec<Employee>) {
        let count = employees.len();
        self.store.extend(employees);
        self.set_status_message(format!("Loaded {count} employees"));
        self.refresh();
    }

    pub fn employees(&self) -> &[Employee] {
        self.store.all()
    }

    pub fn get_uidata(&self) -> &UIData {
        &self.uidata
    }

    /// Whether the controller should hand over raw key events instead of commands.
    pub fn raw_keyevents(&self) -> bool {
        match self.modus {
            Modus::SEARCH => true,
            Modus::POPUP => false,
            Modus::NORMAL => self.screen == Screen::CreateEmployee,
        }
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    pub fn update(&mut self, message: Message) {
        trace!("Update: Modus {:?}, Message {:?}", self.modus, message);
        match self.modus {
            Modus::POPUP => match message {
                Message::Quit => self.quit(),
                Message::Exit | Message::Enter => self.close_popup(),
                _ => (),
            },
            Modus::SEARCH => match message {
                Message::Quit => self.quit(),
                Message::RawKey(key) => self.search_key(key),
                _ => (),
            },
            Modus::NORMAL => match self.screen {
                Screen::CreateEmployee => match message {
                    Message::Quit => self.quit(),
                    Message::Help => self.show_help(),
                    Message::RawKey(key) => self.form_key(key),
                    _ => (),
                },
                Screen::EmployeeList => match message {
                    Message::Quit => self.quit(),
                    Message::Help => self.show_help(),
                    Message::Exit => self.table.set_search_term(""),
                    Message::MoveUp => self.curser_row = self.curser_row.saturating_sub(1),
                    Message::MoveDown => self.curser_row += 1,
                    Message::MoveLeft => {
                        self.curser_column = self.curser_column.saturating_sub(1)
                    }
                    Message::MoveRight => self.curser_column += 1,
                    Message::SortColumn | Message::Enter => {
                        self.table.request_sort_column(self.curser_column)
                    }
                    Message::NextPage => self.table.next_page(self.store.all()),
                    Message::PrevPage => self.table.prev_page(self.store.all()),
                    Message::FirstPage => self.table.first_page(self.store.all()),
                    Message::LastPage => self.table.last_page(self.store.all()),
                    Message::GoToPage(page) => self.table.go_to_page(page, self.store.all()),
                    Message::CyclePageSize => self.cycle_page_size(),
                    Message::Search => self.enter_search(),
                    Message::ClearSearch => self.table.set_search_term(""),
                    Message::CreateEmployee => self.switch_screen(Screen::CreateEmployee),
                    Message::CopyRow => self.copy_table_row(),
                    Message::RawKey(_) => (),
                },
            },
        }
        self.refresh();
    }

    // -------------------- Control handling functions ---------------------- //

    fn switch_screen(&mut self, screen: Screen) {
        debug!("Switching to {:?}", screen);
        self.screen = screen;
        self.modus = Modus::NORMAL;
    }

    fn show_help(&mut self) {
        self.open_popup("Help", HELP_TEXT);
    }

    fn open_popup(&mut self, title: &str, message: &str) {
        self.modus = Modus::POPUP;
        self.uidata.popup_title = title.to_string();
        self.uidata.popup_message = message.to_string();
    }

    fn close_popup(&mut self) {
        trace!("Close popup ...");
        self.modus = Modus::NORMAL;
    }

    fn form_key(&mut self, key: KeyEvent) {
        match self.form.read(key) {
            FormAction::None => {}
            FormAction::Leave => self.switch_screen(Screen::EmployeeList),
            FormAction::Submit => self.submit_form(),
        }
    }

    fn submit_form(&mut self) {
        match self.form.submit() {
            Ok(employee) => {
                info!(
                    "Created employee {} {} in {}",
                    employee.first_name, employee.last_name, employee.department
                );
                self.store.append(employee);
                self.set_status_message(format!("{} employees", self.store.len()));
                self.open_popup("", "Employee Created!");
            }
            Err(rejection) => {
                let labels = |fields: &[Field]| {
                    fields.iter().map(|f| f.label()).collect::<Vec<&str>>().join(", ")
                };
                let mut problems = Vec::new();
                if !rejection.missing.is_empty() {
                    problems.push(format!("Please fill out: {}", labels(&rejection.missing[..])));
                }
                if !rejection.invalid_dates.is_empty() {
                    problems.push(format!(
                        "Use YYYY-MM-DD for: {}",
                        labels(&rejection.invalid_dates[..])
                    ));
                }
                self.set_status_message(problems.join(". "));
            }
        }
    }

    fn enter_search(&mut self) {
        trace!("Entering search mode ...");
        self.modus = Modus::SEARCH;
        self.search_input.clear();
        self.search_input.set(self.table.search_term());
    }

    fn search_key(&mut self, key: KeyEvent) {
        let result = self.search_input.read(key);
        self.table.set_search_term(&result.input);
        if result.finished {
            self.modus = Modus::NORMAL;
        }
    }

    fn cycle_page_size(&mut self) {
        self.table.cycle_items_per_page();
        let size = self.table.pagination().items_per_page();
        self.set_status_message(format!("Show {size} entries"));
    }

    fn wrap_cell_content(c: &str) -> String {
        if c.contains('\t') || c.contains('\n') {
            format!("\"{}\"", c.replace('"', "\"\""))
        } else {
            c.to_string()
        }
    }

    fn copy_table_row(&mut self) {
        let Some(row) = self.page_cells.get(self.curser_row) else {
            return;
        };
        let text = row
            .iter()
            .map(|c| Self::wrap_cell_content(c))
            .collect::<Vec<String>>()
            .join("\t");
        trace!("Row content: {}", text);

        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => error!("Clipboard is not available: {:?}", e),
            }
        }
        let copied = match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(text) {
                Ok(_) => true,
                Err(e) => {
                    error!("Error copying to clipboard: {:?}", e);
                    false
                }
            },
            None => false,
        };
        if copied {
            self.set_status_message("Copied row to clipboard");
        } else {
            self.set_status_message("Could not copy to clipboard");
        }
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    // ------------------------- View building ------------------------------ //

    fn refresh(&mut self) {
        let data = self.table.refresh(self.store.all());
        let cells = self.table.cells(&data.page.rows);

        let ncolumns = data.headers.len();
        self.curser_column = self.curser_column.min(ncolumns.saturating_sub(1));
        self.curser_row = self.curser_row.min(cells.len().saturating_sub(1));

        let table = data
            .headers
            .iter()
            .enumerate()
            .map(|(cidx, header)| {
                let column: Vec<String> = cells.iter().map(|row| row[cidx].clone()).collect();
                let widest = column
                    .iter()
                    .map(|c| c.chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(header.chars().count());
                ColumnView {
                    name: header.clone(),
                    width: (widest + COLUMN_WIDTH_MARGIN).min(self.config.max_column_width),
                    data: column,
                }
            })
            .collect();

        let filtered = data.page.total_rows;
        let mut summary = format!("Showing {} entries", data.page.describe());
        if !self.table.search_term().is_empty() && filtered != data.total_records {
            summary.push_str(&format!(" (filtered from {} total entries)", data.total_records));
        }

        let uidata = &mut self.uidata;
        uidata.screen = self.screen;
        uidata.name = match self.screen {
            Screen::CreateEmployee => "Create Employee".to_string(),
            Screen::EmployeeList => "Current Employees".to_string(),
        };
        uidata.table = table;
        uidata.nrows = cells.len();
        uidata.selected_row = self.curser_row;
        uidata.selected_column = self.curser_column;
        uidata.empty_message = self.table.options().empty_message.clone();
        uidata.summary = summary;
        uidata.page_window = data.page_window;
        uidata.current_page = data.page.current_page;
        uidata.total_pages = data.page.total_pages;
        uidata.page_size = self.table.pagination().items_per_page().get();
        uidata.search = if self.modus == Modus::SEARCH {
            self.search_input.get()
        } else {
            InputResult {
                input: self.table.search_term().to_string(),
                ..InputResult::default()
            }
        };
        uidata.search_placeholder = self.table.options().search_placeholder.clone();
        uidata.active_search = self.modus == Modus::SEARCH;
        uidata.form = self.form.view();
        uidata.show_popup = self.modus == Modus::POPUP;
        uidata.status_message = self.status_message.clone();

        self.page_cells = cells;
    }
}
