use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};

use crate::model::{Model, Screen, UIData};

pub const CMDLINE_HEIGHT: u16 = 1;
pub const COLUMN_WIDTH_MARGIN: usize = 1;
const SEARCH_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;
const FORM_LABEL_WIDTH: usize = 16;

#[derive(Default)]
pub struct TableUI {
    table_state: TableState,
}

impl TableUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let uidata = model.get_uidata();
        let [main, statusline] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(CMDLINE_HEIGHT)])
                .areas(frame.area());

        let title = Line::from(format!(" HRnet - {} ", uidata.name)).bold();
        let block = Block::bordered()
            .title(title.centered())
            .title_bottom(Self::instructions(uidata.screen).centered())
            .border_set(border::THICK);
        let inner = block.inner(main);
        frame.render_widget(block, main);

        match uidata.screen {
            Screen::CreateEmployee => Self::draw_form(uidata, frame, inner),
            Screen::EmployeeList => self.draw_list(uidata, frame, inner),
        }

        Self::draw_statusline(uidata, frame, statusline);

        if uidata.show_popup {
            Self::draw_popup(uidata, frame);
        }
    }

    fn instructions(screen: Screen) -> Line<'static> {
        let keys: &[(&'static str, &'static str)] = match screen {
            Screen::CreateEmployee => &[
                (" Next ", "<Tab>"),
                (" Save ", "<Enter>"),
                (" Employees ", "<Esc>"),
                (" Help ", "<F1> "),
            ],
            Screen::EmployeeList => &[
                (" Sort ", "<S>"),
                (" Page ", "<N/P>"),
                (" Search ", "</>"),
                (" Create ", "<C>"),
                (" Help ", "<?>"),
                (" Quit ", "<Q> "),
            ],
        };
        Line::from(
            keys.iter()
                .flat_map(|(label, key)| [Span::from(*label), key.blue().bold()])
                .collect::<Vec<Span>>(),
        )
    }

    fn draw_form(uidata: &UIData, frame: &mut Frame, area: Rect) {
        let form = &uidata.form;
        let lines: Vec<Line> = form
            .fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let focused = idx == form.focus;
                let label = format!("{:<width$}", field.label, width = FORM_LABEL_WIDTH);
                let label = if focused {
                    label.yellow().bold()
                } else {
                    Span::from(label)
                };
                let value = match (field.is_select, focused) {
                    (true, true) => format!("◀ {} ▶", field.display).bold(),
                    (true, false) if field.placeholder => field.display.clone().dark_gray(),
                    (true, false) => Span::from(field.display.clone()),
                    (false, true) => form.input.input.clone().underlined(),
                    (false, false) => Span::from(field.display.clone()),
                };
                Line::from(vec![label, value])
            })
            .collect();

        let [fields_area] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Start)
            .areas(area.inner(Margin::new(2, 1)));
        frame.render_widget(Paragraph::new(Text::from(lines)), fields_area);

        let focused = form.fields.get(form.focus);
        if let Some(field) = focused
            && !field.is_select
        {
            let x = fields_area.x + (FORM_LABEL_WIDTH + form.input.curser_pos) as u16;
            let y = fields_area.y + form.focus as u16;
            frame.set_cursor_position((x.min(fields_area.right().saturating_sub(1)), y));
        }
    }

    fn draw_list(&mut self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let [search_area, table_area, footer_area] = Layout::vertical([
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(2),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(area);

        Self::draw_search(uidata, frame, search_area);
        self.draw_table(uidata, frame, table_area);
        Self::draw_footer(uidata, frame, footer_area);
    }

    fn draw_search(uidata: &UIData, frame: &mut Frame, area: Rect) {
        let search = &uidata.search;
        let text = if search.input.is_empty() && !uidata.active_search {
            uidata.search_placeholder.clone().dark_gray()
        } else {
            Span::from(search.input.clone())
        };
        let mut block = Block::bordered().title(" Search ");
        if uidata.active_search {
            block = block.border_style(Style::new().yellow());
        }
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

        if uidata.active_search {
            let x = area.x + 1 + search.curser_pos as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    fn draw_table(&mut self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let header = Row::new(uidata.table.iter().map(|c| Cell::from(c.name.clone())))
            .style(Style::new().bold().bg(Color::DarkGray));

        let rows = (0..uidata.nrows).map(|ridx| {
            let row = Row::new(
                uidata
                    .table
                    .iter()
                    .map(|c| Cell::from(c.data.get(ridx).cloned().unwrap_or_default())),
            );
            if ridx % 2 == 0 {
                row
            } else {
                row.style(Style::new().bg(Color::Indexed(236)))
            }
        });
        let widths = uidata
            .table
            .iter()
            .map(|c| Constraint::Length(c.width as u16));

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(Style::new().reversed())
            .column_highlight_style(Style::new().bold())
            .cell_highlight_style(Style::new().yellow().reversed());

        if uidata.nrows == 0 {
            self.table_state.select(None);
            frame.render_stateful_widget(table, area, &mut self.table_state);
            let message_area = Rect {
                y: area.y + 2,
                height: area.height.saturating_sub(2),
                ..area
            };
            frame.render_widget(
                Paragraph::new(uidata.empty_message.clone().dark_gray()).centered(),
                message_area,
            );
        } else {
            self.table_state.select(Some(uidata.selected_row));
            self.table_state.select_column(Some(uidata.selected_column));
            frame.render_stateful_widget(table, area, &mut self.table_state);
        }
    }

    fn draw_footer(uidata: &UIData, frame: &mut Frame, area: Rect) {
        let mut pages: Vec<Span> = vec![Span::from("« ")];
        for &page in uidata.page_window.iter() {
            if page == uidata.current_page {
                pages.push(format!("[{page}]").yellow().bold());
            } else {
                pages.push(Span::from(format!(" {page} ")));
            }
        }
        pages.push(Span::from(" »"));
        pages.push(Span::from(format!("   Show {} entries", uidata.page_size)));
        let pages = Line::from(pages);

        let [summary_area, pages_area] = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(pages.width() as u16),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(uidata.summary.clone()), summary_area);
        frame.render_widget(Paragraph::new(pages), pages_area);
    }

    fn draw_statusline(uidata: &UIData, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Paragraph::new(Line::from(uidata.status_message.clone().italic())),
            area,
        );
    }

    fn draw_popup(uidata: &UIData, frame: &mut Frame) {
        let text = Text::from(uidata.popup_message.clone());
        let width = (text.width() as u16 + 4).min(frame.area().width);
        let height = (text.height() as u16 + 2).min(frame.area().height);

        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(frame.area());
        let [area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);

        let mut block = Block::bordered()
            .border_set(border::ROUNDED)
            .title_bottom(Line::from(" <Esc> ").centered());
        if !uidata.popup_title.is_empty() {
            block = block.title(Line::from(format!(" {} ", uidata.popup_title)).bold());
        }

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text)
                .wrap(Wrap { trim: false })
                .block(block),
            area,
        );
    }
}
