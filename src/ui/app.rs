use std::mem;
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_media;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{error, info, warn};

use crate::api::{spawn_login, spawn_search, ApiClient, ApiError, ApiEvent};
use crate::models::{Session, VideoRecord};

use super::forms::{LoginField, LoginForm};
use super::helpers::{centered_rect, surface_error, thumbnail_lines};
use super::screens::BrowseScreen;
use super::strings;

/// Number of video cards shown in each row of the result grid. Three columns
/// keep titles legible at common terminal widths.
const GRID_COLUMNS: usize = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height allocation per video card, borders included.
const CARD_HEIGHT: u16 = 9;
/// ASCII textures used as thumbnail stand-ins. We rotate through the list so
/// a grid full of cards does not look like a wall of identical static.
const THUMBNAIL_ART: &[&[&str]] = &[
    &["/\\/\\/", "\\/\\/\\"],
    &["*+*+", "+*+*"],
    &["=--=", "--=="],
    &["<>><", "><<>"],
    &["..--", "--.."],
    &["oOo ", " OoO"],
    &["##  ", "  ##"],
    &["||--", "--||"],
    &["[]__", "__[]"],
    &["~~  ", "  ~~"],
    &["^v^v", "v^v^"],
    &["::''", "''::"],
];

/// Top-level navigation states. Which one is active is the single source of
/// truth for whether the user is authenticated.
enum Screen {
    Login(LoginForm),
    Browse {
        session: Session,
        browse: BrowseScreen,
    },
}

/// Fine-grained modes scoped to the browse screen.
enum Mode {
    Normal,
    /// The inline search bar is open and capturing keystrokes.
    Searching,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Owns the only receiving
/// end of the worker channel, so every state mutation happens on the event
/// loop thread.
pub struct App {
    client: ApiClient,
    events_tx: Sender<ApiEvent>,
    events_rx: Receiver<ApiEvent>,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    /// Token of the most recently dispatched search. Outcomes carrying an
    /// older token are stale and get discarded.
    search_seq: u64,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            client,
            events_tx,
            events_rx,
            screen: Screen::Login(LoginForm::default()),
            mode: Mode::Normal,
            status: None,
            search_seq: 0,
        }
    }

    /// Apply every worker outcome that has arrived since the last frame.
    pub(crate) fn pump_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::LoginFinished { username, outcome } => self.finish_login(username, outcome),
            ApiEvent::SearchFinished { seq, outcome } => self.finish_search(seq, outcome),
        }
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Searching => self.handle_search_key(code),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match &mut self.screen {
            Screen::Login(form) => {
                match code {
                    KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Enter => self.submit_login(),
                    KeyCode::Char(ch) => {
                        if form.push_char(ch) {
                            form.error = None;
                        }
                    }
                    _ => {}
                }
                Mode::Normal
            }
            Screen::Browse { browse, .. } => {
                if browse.detail.is_some() {
                    match code {
                        KeyCode::Esc | KeyCode::Backspace => {
                            browse.close_detail();
                            self.clear_status();
                        }
                        KeyCode::Enter | KeyCode::Char('o') | KeyCode::Char('O') => {
                            if let Some(record) = browse.detail_record().cloned() {
                                self.play(&record);
                            }
                        }
                        KeyCode::Char('q') => {
                            *exit = true;
                        }
                        _ => {}
                    }
                    return Mode::Normal;
                }

                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Left => self.move_horizontal(-1),
                    KeyCode::Right => self.move_horizontal(1),
                    KeyCode::Up => self.move_vertical(-1),
                    KeyCode::Down => self.move_vertical(1),
                    KeyCode::Enter => self.activate_selection(),
                    KeyCode::Char('f') | KeyCode::Char('/') => {
                        self.clear_status();
                        return Mode::Searching;
                    }
                    _ => {}
                }
                Mode::Normal
            }
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) -> Mode {
        let Screen::Browse { browse, .. } = &mut self.screen else {
            return Mode::Normal;
        };

        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Backspace => {
                browse.query.pop();
                Mode::Searching
            }
            KeyCode::Enter => {
                if self.submit_search() {
                    Mode::Normal
                } else {
                    // Blank query or a search already in flight: nothing was
                    // dispatched, keep editing.
                    Mode::Searching
                }
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    browse.query.push(ch);
                }
                Mode::Searching
            }
            _ => Mode::Searching,
        }
    }

    /// Logout, bound to Ctrl+L in the event loop. Drops the whole browse
    /// state so no search state survives into the next session.
    pub(crate) fn handle_ctrl_l(&mut self) -> Result<()> {
        if let Screen::Browse { session, .. } = &self.screen {
            info!(username = %session.username, "logout");
        } else {
            return Ok(());
        }
        // Orphan any in-flight search so its outcome cannot leak into a
        // future session.
        self.search_seq += 1;
        self.clear_status();
        self.mode = Mode::Normal;
        self.screen = Screen::Login(LoginForm::default());
        Ok(())
    }

    fn submit_login(&mut self) {
        let Screen::Login(form) = &mut self.screen else {
            return;
        };
        if form.submitting {
            return;
        }
        match form.parse_inputs() {
            Ok((username, password)) => {
                form.submitting = true;
                form.error = None;
                info!(username = %username, "login submitted");
                spawn_login(
                    self.client.clone(),
                    self.events_tx.clone(),
                    username,
                    password,
                );
            }
            Err(err) => {
                form.error = Some(surface_error(&err));
            }
        }
    }

    fn finish_login(&mut self, username: String, outcome: Result<(), ApiError>) {
        if !matches!(self.screen, Screen::Login(_)) {
            return;
        }
        match outcome {
            Ok(()) => {
                info!(username = %username, "login succeeded");
                self.clear_status();
                self.screen = Screen::Browse {
                    session: Session::new(username),
                    browse: BrowseScreen::new(),
                };
                self.mode = Mode::Normal;
            }
            Err(ApiError::Rejected) => {
                warn!(username = %username, "login rejected");
                if let Screen::Login(form) = &mut self.screen {
                    form.submitting = false;
                    form.error = Some(strings::LOGIN_INVALID.to_string());
                }
            }
            Err(ApiError::Transport(err)) => {
                error!(username = %username, error = %err, "login transport failure");
                if let Screen::Login(form) = &mut self.screen {
                    form.submitting = false;
                    form.error = Some(strings::LOGIN_FAILED.to_string());
                }
            }
        }
    }

    /// Dispatch the current query to the search collaborator. Returns false
    /// without side effects when the query is blank or a search is already in
    /// flight.
    fn submit_search(&mut self) -> bool {
        let Screen::Browse { browse, .. } = &mut self.screen else {
            return false;
        };
        if browse.is_loading || browse.query.trim().is_empty() {
            return false;
        }
        browse.is_loading = true;
        browse.has_searched = true;
        let query = browse.query.clone();
        self.search_seq += 1;
        info!(seq = self.search_seq, query = %query, "search dispatched");
        spawn_search(
            self.client.clone(),
            self.events_tx.clone(),
            self.search_seq,
            query,
        );
        true
    }

    fn finish_search(&mut self, seq: u64, outcome: Result<Vec<VideoRecord>, ApiError>) {
        if seq != self.search_seq {
            info!(seq, latest = self.search_seq, "stale search outcome discarded");
            return;
        }
        let Screen::Browse { browse, .. } = &mut self.screen else {
            return;
        };
        browse.is_loading = false;
        match outcome {
            Ok(results) => {
                info!(seq, count = results.len(), "search completed");
                browse.set_results(results);
            }
            Err(err) => {
                // Swallowed into an empty result set; the log entry is the
                // only trace. The UI shows the ordinary empty state.
                error!(seq, error = %err, "search failed");
                browse.clear_results();
            }
        }
    }

    /// Open the detail view for the card under the cursor and start playback.
    fn activate_selection(&mut self) {
        let Screen::Browse { browse, .. } = &mut self.screen else {
            return;
        };
        if !browse.open_detail() {
            return;
        }
        if let Some(record) = browse.detail_record().cloned() {
            self.play(&record);
        }
    }

    /// Hand the video off to the operating system's media handler.
    fn play(&mut self, record: &VideoRecord) {
        match open_media(&record.video_url) {
            Ok(()) => {
                info!(id = %record.id, "video handed to system player");
                self.set_status(
                    format!("{}: {}", strings::PLAYING, record.title),
                    StatusKind::Info,
                );
            }
            Err(err) => {
                error!(id = %record.id, error = %err, "failed to launch system player");
                self.set_status(strings::PLAYER_FAILED, StatusKind::Error);
            }
        }
    }

    fn move_horizontal(&mut self, offset: isize) {
        if let Screen::Browse { browse, .. } = &mut self.screen {
            browse.move_selection(offset);
        }
    }

    fn move_vertical(&mut self, offset: isize) {
        if let Screen::Browse { browse, .. } = &mut self.screen {
            browse.move_selection(offset * GRID_COLUMNS as isize);
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Login(form) => self.draw_login(frame, content_area, form),
            Screen::Browse { session, browse } => {
                self.draw_browse(frame, content_area, session, browse)
            }
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let (Mode::Searching, Screen::Browse { browse, .. }) = (&self.mode, &self.screen) {
            self.draw_search_bar(frame, area, browse);
        }
    }

    fn draw_login(&self, frame: &mut Frame, area: Rect, form: &LoginForm) {
        let popup_area = centered_rect(60, 40, area);

        let block = Block::default()
            .title(strings::LOGIN_TITLE)
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let username_line = form.build_line(strings::LOGIN_USERNAME, LoginField::Username);
        let password_line = form.build_line(strings::LOGIN_PASSWORD, LoginField::Password);

        let mut lines = vec![username_line, password_line, Line::from("")];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else if form.submitting {
            lines.push(Line::from(Span::styled(
                strings::LOGIN_SUBMITTING,
                Style::default().fg(Color::Yellow),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter - нэвтрэх • Tab - талбар солих • Esc - хаах",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (cursor_x, cursor_y) = match form.active {
            LoginField::Username => {
                let prefix = format!("{}: ", strings::LOGIN_USERNAME).chars().count() as u16;
                (
                    inner.x + prefix + form.value_len(LoginField::Username) as u16,
                    inner.y,
                )
            }
            LoginField::Password => {
                let prefix = format!("{}: ", strings::LOGIN_PASSWORD).chars().count() as u16;
                (
                    inner.x + prefix + form.value_len(LoginField::Password) as u16,
                    inner.y + 1,
                )
            }
        };
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_browse(&self, frame: &mut Frame, area: Rect, session: &Session, browse: &BrowseScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);

        self.draw_header(frame, chunks[0], session, browse);

        if browse.detail_record().is_some() {
            self.draw_detail(frame, chunks[1], browse);
        } else {
            self.draw_results(frame, chunks[1], browse);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, session: &Session, browse: &BrowseScreen) {
        let search_display = if browse.query.is_empty() {
            Span::styled(
                strings::SEARCH_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw(browse.query.clone())
        };

        let mut search_spans = vec![
            Span::styled(
                format!("{}: ", strings::SEARCH_ACTION),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            search_display,
        ];
        if browse.is_loading {
            search_spans.push(Span::raw("   "));
            search_spans.push(Span::styled(
                strings::SEARCHING,
                Style::default().fg(Color::Yellow),
            ));
        }

        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(
                    strings::HEADER_TITLE,
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  •  "),
                Span::styled(
                    session.username.clone(),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!("  •  Ctrl+L - {}", strings::LOGOUT)),
            ]),
            Line::from(search_spans),
        ])
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect, browse: &BrowseScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        let title = strings::results_title(&browse.query, browse.results.len());
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            ))),
            chunks[0],
        );
        let grid_area = chunks[1];

        // Loading and results are mutually exclusive: a search in flight
        // hides whatever was on screen before.
        if browse.is_loading {
            let message = Paragraph::new(strings::SEARCHING)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::NONE));
            frame.render_widget(message, grid_area);
            return;
        }

        if browse.results.is_empty() {
            // "Nothing matched" and "nothing searched yet" read differently.
            let lines = if browse.has_searched {
                vec![
                    Line::from(Span::styled(
                        strings::EMPTY_TITLE,
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(strings::EMPTY_HINT),
                ]
            } else {
                vec![Line::from(strings::EMPTY_PROMPT)]
            };
            let message = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::NONE));
            frame.render_widget(message, grid_area);
            return;
        }

        self.draw_grid(frame, grid_area, browse);
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect, browse: &BrowseScreen) {
        if area.height == 0 {
            return;
        }

        let total_rows = browse.results.len().div_ceil(GRID_COLUMNS);
        let visible_rows = ((area.height / CARD_HEIGHT).max(1) as usize).min(total_rows);
        let selected_row = browse.selected / GRID_COLUMNS;

        // Keep the cursor's row inside the window.
        let mut first_row = 0usize;
        if selected_row >= visible_rows {
            first_row = selected_row + 1 - visible_rows;
        }
        if first_row + visible_rows > total_rows {
            first_row = total_rows.saturating_sub(visible_rows);
        }

        let constraints: Vec<Constraint> = (0..visible_rows)
            .map(|_| Constraint::Length(CARD_HEIGHT))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (row_offset, row_chunk) in rows.iter().enumerate() {
            let columns = self.split_columns(*row_chunk);
            for (col_idx, column_chunk) in columns.into_iter().enumerate() {
                let index = (first_row + row_offset) * GRID_COLUMNS + col_idx;
                if let Some(record) = browse.results.get(index) {
                    self.draw_card(frame, column_chunk, record, index, index == browse.selected);
                }
            }
        }
    }

    fn draw_card(
        &self,
        frame: &mut Frame,
        area: Rect,
        record: &VideoRecord,
        index: usize,
        selected: bool,
    ) {
        let mut block = Block::default().borders(Borders::ALL);
        if selected {
            block = block.style(Style::default().fg(Color::Yellow));
        }
        let inner_width = area.width.saturating_sub(2);
        let inner_height = area.height.saturating_sub(2);

        let thumb_rows = inner_height.saturating_sub(3);
        let pattern = THUMBNAIL_ART[index % THUMBNAIL_ART.len()];
        let mut lines = thumbnail_lines(pattern, &record.duration, inner_width, thumb_rows, selected);

        let title = if selected {
            format!("▶ {}", record.title)
        } else {
            record.title.clone()
        };
        lines.push(Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            record.channel.clone(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "{} {} • {}",
                record.views,
                strings::VIEWS_SUFFIX,
                record.upload_date
            ),
            Style::default().fg(Color::Gray),
        )));

        let card = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .block(block);
        frame.render_widget(card, area);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, browse: &BrowseScreen) {
        let Some(record) = browse.detail_record() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{}  (Esc)", strings::BACK),
                Style::default().fg(Color::Cyan),
            ))),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                record.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ))),
            chunks[1],
        );

        let player_block = Block::default()
            .title(strings::PLAYER_TITLE)
            .borders(Borders::ALL);
        let player = Paragraph::new(vec![
            Line::from(Span::styled(
                record.video_url.clone(),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                format!("Enter - {}", strings::PLAYING),
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(player_block)
        .wrap(Wrap { trim: true });
        frame.render_widget(player, chunks[2]);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(
                    "{}: {}   {}: {}   {}   {}",
                    strings::VIEWS_PREFIX,
                    record.views,
                    strings::DURATION_PREFIX,
                    record.duration,
                    record.upload_date,
                    record.channel,
                ),
                Style::default().fg(Color::Gray),
            ))),
            chunks[3],
        );

        let mut body = vec![Line::from(record.description.clone()), Line::from("")];
        let mut tag_spans = Vec::new();
        for (idx, tag) in record.tags.iter().enumerate() {
            if idx > 0 {
                tag_spans.push(Span::raw(" "));
            }
            tag_spans.push(Span::styled(
                format!("[{tag}]"),
                Style::default().fg(Color::Cyan),
            ));
        }
        body.push(Line::from(tag_spans));

        frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }), chunks[4]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, browse: &BrowseScreen) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(strings::SEARCH_ACTION);
        let paragraph = Paragraph::new(Span::raw(format!(
            "{}: {}",
            strings::SEARCH_ACTION,
            browse.query
        )))
        .block(block.clone())
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let prefix = format!("{}: ", strings::SEARCH_ACTION).chars().count() as u16;
        let cursor_x = inner.x + prefix + browse.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (Screen::Login(_), _) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Талбар   "),
                Span::styled("[Enter]", key_style),
                Span::raw(format!(" {}   ", strings::LOGIN_TITLE)),
                Span::styled("[Esc]", key_style),
                Span::raw(" Хаах"),
            ]),
            (Screen::Browse { .. }, Mode::Searching) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(format!(" {}   ", strings::SEARCH_ACTION)),
                Span::styled("[Esc]", key_style),
                Span::raw(" Буцах"),
            ]),
            (Screen::Browse { browse, .. }, _) if browse.detail.is_some() => Line::from(vec![
                Span::styled("[Esc]", key_style),
                Span::raw(" Буцах   "),
                Span::styled("[Enter]", key_style),
                Span::raw(format!(" {}   ", strings::PLAYING)),
                Span::styled("[Ctrl+L]", key_style),
                Span::raw(format!(" {}   ", strings::LOGOUT)),
                Span::styled("[q]", key_style),
                Span::raw(" Гарах"),
            ]),
            (Screen::Browse { .. }, _) => Line::from(vec![
                Span::styled("[←↑↓→]", key_style),
                Span::raw(" Сонгох   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Үзэх   "),
                Span::styled("[f]", key_style),
                Span::raw(format!(" {}   ", strings::SEARCH_ACTION)),
                Span::styled("[Ctrl+L]", key_style),
                Span::raw(format!(" {}   ", strings::LOGOUT)),
                Span::styled("[q]", key_style),
                Span::raw(" Хаах"),
            ]),
        }
    }

    fn split_columns(&self, area: Rect) -> Vec<Rect> {
        let columns = GRID_COLUMNS.max(1) as u16;
        let percent = (100 / columns).max(1);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Percentage(percent); columns as usize])
            .split(area);
        chunks.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(ApiClient::new("http://127.0.0.1:5000"))
    }

    fn record(id: &str) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: format!("title-{id}"),
            channel: "chan".to_string(),
            video_url: format!("http://127.0.0.1:5000/media/{id}.mp4"),
            duration: "1:00".to_string(),
            views: 3,
            upload_date: "2024-01-01".to_string(),
            description: "desc".to_string(),
            tags: vec![],
        }
    }

    fn transport_error() -> ApiError {
        // A relative URL without a base never builds, which hands us a real
        // reqwest error without touching the network.
        let err = reqwest::blocking::Client::new()
            .get("no-scheme")
            .build()
            .expect_err("relative URL must fail to build");
        ApiError::Transport(err)
    }

    fn authenticate(app: &mut App, username: &str) {
        app.finish_login(username.to_string(), Ok(()));
    }

    fn browse(app: &App) -> &BrowseScreen {
        match &app.screen {
            Screen::Browse { browse, .. } => browse,
            Screen::Login(_) => panic!("expected browse screen"),
        }
    }

    fn browse_mut(app: &mut App) -> &mut BrowseScreen {
        match &mut app.screen {
            Screen::Browse { browse, .. } => browse,
            Screen::Login(_) => panic!("expected browse screen"),
        }
    }

    fn login_form(app: &App) -> &LoginForm {
        match &app.screen {
            Screen::Login(form) => form,
            Screen::Browse { .. } => panic!("expected login screen"),
        }
    }

    #[test]
    fn starts_unauthenticated() {
        let app = app();
        assert!(matches!(app.screen, Screen::Login(_)));
    }

    #[test]
    fn successful_login_creates_a_session_and_clears_the_error() {
        let mut app = app();
        if let Screen::Login(form) = &mut app.screen {
            form.error = Some("stale".to_string());
        }
        app.finish_login("a".to_string(), Ok(()));

        match &app.screen {
            Screen::Browse { session, browse } => {
                assert_eq!(session.username, "a");
                assert!(browse.results.is_empty());
                assert!(browse.query.is_empty());
            }
            Screen::Login(_) => panic!("login should have succeeded"),
        }
    }

    #[test]
    fn rejected_login_keeps_the_form_with_the_invalid_message() {
        let mut app = app();
        app.finish_login("a".to_string(), Err(ApiError::Rejected));
        let form = login_form(&app);
        assert_eq!(form.error.as_deref(), Some(strings::LOGIN_INVALID));
        assert!(!form.submitting);
    }

    #[test]
    fn transport_failure_on_login_shows_the_failed_message() {
        let mut app = app();
        app.finish_login("a".to_string(), Err(transport_error()));
        let form = login_form(&app);
        assert_eq!(form.error.as_deref(), Some(strings::LOGIN_FAILED));
        assert!(!form.submitting);
    }

    #[test]
    fn empty_form_submission_never_dispatches() {
        let mut app = app();
        app.submit_login();
        let form = login_form(&app);
        assert!(!form.submitting);
        assert_eq!(form.error.as_deref(), Some(strings::LOGIN_REQUIRED));
    }

    #[test]
    fn typing_on_the_login_screen_fills_the_focused_field() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a')).unwrap();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Char('b')).unwrap();
        let form = login_form(&app);
        assert_eq!(form.username, "a");
        assert_eq!(form.password, "b");
    }

    #[test]
    fn blank_query_never_dispatches_or_mutates_state() {
        let mut app = app();
        authenticate(&mut app, "a");
        browse_mut(&mut app).query = "   ".to_string();
        let seq_before = app.search_seq;

        assert!(!app.submit_search());

        let browse = browse(&app);
        assert!(!browse.is_loading);
        assert!(!browse.has_searched);
        assert!(browse.results.is_empty());
        assert_eq!(app.search_seq, seq_before);
    }

    #[test]
    fn dispatching_a_search_sets_the_loading_flag() {
        let mut app = app();
        authenticate(&mut app, "a");
        browse_mut(&mut app).query = "mario".to_string();

        assert!(app.submit_search());

        let b = browse(&app);
        assert!(b.is_loading);
        assert!(b.has_searched);
        assert_eq!(app.search_seq, 1);
    }

    #[test]
    fn submission_is_ignored_while_a_search_is_in_flight() {
        let mut app = app();
        authenticate(&mut app, "a");
        let b = browse_mut(&mut app);
        b.query = "mario".to_string();
        b.is_loading = true;
        let seq_before = app.search_seq;

        assert!(!app.submit_search());
        assert_eq!(app.search_seq, seq_before);
    }

    #[test]
    fn completed_search_replaces_results_in_backend_order() {
        let mut app = app();
        authenticate(&mut app, "a");
        browse_mut(&mut app).is_loading = true;
        app.search_seq = 1;

        app.finish_search(1, Ok(vec![record("x"), record("y"), record("z")]));

        let browse = browse(&app);
        assert!(!browse.is_loading);
        let ids: Vec<&str> = browse.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    #[test]
    fn failed_search_discards_prior_results() {
        let mut app = app();
        authenticate(&mut app, "a");
        browse_mut(&mut app).set_results(vec![record("old")]);
        browse_mut(&mut app).is_loading = true;
        app.search_seq = 2;

        app.finish_search(2, Err(transport_error()));

        let browse = browse(&app);
        assert!(!browse.is_loading);
        assert!(browse.results.is_empty());
    }

    #[test]
    fn stale_search_outcomes_are_discarded() {
        let mut app = app();
        authenticate(&mut app, "a");
        browse_mut(&mut app).set_results(vec![record("current")]);
        app.search_seq = 5;

        app.finish_search(4, Ok(vec![record("stale")]));

        let browse = browse(&app);
        assert_eq!(browse.results.len(), 1);
        assert_eq!(browse.results[0].id, "current");
    }

    #[test]
    fn logout_resets_everything_to_a_fresh_login() {
        let mut app = app();
        authenticate(&mut app, "a");
        let b = browse_mut(&mut app);
        b.query = "mario".to_string();
        b.set_results(vec![record("x")]);
        b.open_detail();

        app.handle_ctrl_l().unwrap();

        let form = login_form(&app);
        assert!(form.username.is_empty());
        assert!(form.password.is_empty());
        assert!(form.error.is_none());
    }

    #[test]
    fn search_outcome_arriving_after_logout_is_ignored() {
        let mut app = app();
        authenticate(&mut app, "a");
        browse_mut(&mut app).query = "mario".to_string();
        app.search_seq = 3;
        browse_mut(&mut app).is_loading = true;

        app.handle_ctrl_l().unwrap();
        app.finish_search(3, Ok(vec![record("late")]));

        assert!(matches!(app.screen, Screen::Login(_)));
    }

    #[test]
    fn search_mode_edits_the_query_in_place() {
        let mut app = app();
        authenticate(&mut app, "a");
        app.handle_key(KeyCode::Char('f')).unwrap();
        assert!(matches!(app.mode, Mode::Searching));

        app.handle_key(KeyCode::Char('m')).unwrap();
        app.handle_key(KeyCode::Char('a')).unwrap();
        app.handle_key(KeyCode::Backspace).unwrap();
        assert_eq!(browse(&app).query, "m");

        app.handle_key(KeyCode::Esc).unwrap();
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(browse(&app).query, "m");
    }

    #[test]
    fn enter_on_a_blank_search_keeps_the_bar_open() {
        let mut app = app();
        authenticate(&mut app, "a");
        app.handle_key(KeyCode::Char('/')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(app.mode, Mode::Searching));
        assert!(!browse(&app).is_loading);
    }

    #[test]
    fn grid_navigation_moves_by_row_and_column() {
        let mut app = app();
        authenticate(&mut app, "a");
        browse_mut(&mut app).set_results(
            (0..7).map(|i| record(&format!("r{i}"))).collect(),
        );

        app.handle_key(KeyCode::Right).unwrap();
        assert_eq!(browse(&app).selected, 1);
        app.handle_key(KeyCode::Down).unwrap();
        assert_eq!(browse(&app).selected, 1 + GRID_COLUMNS);
        app.handle_key(KeyCode::Up).unwrap();
        assert_eq!(browse(&app).selected, 1);
    }

    #[test]
    fn back_from_detail_returns_to_the_same_grid_state() {
        let mut app = app();
        authenticate(&mut app, "a");
        browse_mut(&mut app).query = "mario".to_string();
        browse_mut(&mut app).set_results(vec![record("x"), record("y")]);
        browse_mut(&mut app).selected = 1;
        browse_mut(&mut app).open_detail();

        app.handle_key(KeyCode::Esc).unwrap();

        let browse = browse(&app);
        assert!(browse.detail.is_none());
        assert_eq!(browse.query, "mario");
        assert_eq!(browse.selected, 1);
        assert_eq!(browse.results.len(), 2);
    }
}
