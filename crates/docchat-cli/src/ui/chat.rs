use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use docchat_sdk::{run_batch, AppShell, Backend, DocChatClient, DragPayload, UploadBatch};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use super::centered_rect;
use crate::app_state::{AppController, InputMode};
use crate::tui::Action;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct DocChatApp {
    shell: AppShell,
    client: DocChatClient,
    tx: UnboundedSender<Action>,
    should_quit: bool,

    input_mode: InputMode,
    path_buffer: String,
    alert: Option<String>,

    // Transcript viewport
    scroll: u16,
    max_scroll: u16,
    follow: bool,
    seen_revision: u64,

    frame: usize,
}

impl DocChatApp {
    pub fn new(client: DocChatClient, tx: UnboundedSender<Action>) -> Self {
        Self {
            shell: AppShell::new(),
            client,
            tx,
            should_quit: false,
            input_mode: InputMode::Chat,
            path_buffer: String::new(),
            alert: None,
            scroll: 0,
            max_scroll: 0,
            follow: true,
            seen_revision: u64::MAX,
            frame: 0,
        }
    }

    fn spinner(&self) -> &'static str {
        SPINNER[self.frame % SPINNER.len()]
    }

    // --- Network ----------------------------------------------------------

    fn send_chat(&mut self) {
        let Some(ticket) = self.shell.chat_mut().submit_input() else {
            return;
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.chat(ticket.message()).await;
            let _ = tx.send(Action::ChatFinished(result));
        });
    }

    fn spawn_batch(&self, batch: UploadBatch) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = run_batch(&client, batch).await;
            let _ = tx.send(Action::UploadFinished(outcome));
        });
    }

    // --- File selection ---------------------------------------------------

    /// The `Ctrl+O` prompt was confirmed: read the typed paths and upload.
    fn submit_path_prompt(&mut self) {
        let payload = DragPayload::from_pasted_text(&self.path_buffer);
        self.path_buffer.clear();
        self.input_mode = InputMode::Chat;

        if let Some(batch) = self.shell.uploads_mut().begin(payload.pdf_candidates()) {
            self.spawn_batch(batch);
        }
    }

    /// Pasted text is a drop when every token names an existing file.
    fn handle_paste(&mut self, text: &str) {
        match &self.input_mode {
            InputMode::PathPrompt => self.path_buffer.push_str(text.trim_end()),
            InputMode::DropConfirm(_) => {}
            InputMode::Chat => {
                let payload = DragPayload::from_pasted_text(text);
                let is_drop = payload.item_count() > 0 && payload.items().iter().all(|p| p.is_file());
                if is_drop {
                    self.shell.uploads_mut().drag_enter(&payload);
                    self.input_mode = InputMode::DropConfirm(payload);
                } else if !self.shell.chat().is_pending() {
                    self.shell.chat_mut().push_str(text);
                }
            }
        }
    }

    fn confirm_drop(&mut self, payload: &DragPayload) {
        self.input_mode = InputMode::Chat;
        if let Some(batch) = self.shell.uploads_mut().drop_payload(payload) {
            self.spawn_batch(batch);
        }
    }

    fn cancel_drop(&mut self) {
        self.input_mode = InputMode::Chat;
        self.shell.uploads_mut().drag_leave();
    }

    // --- Keys -------------------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // The alert is blocking: nothing else reacts until it is dismissed.
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return;
        }

        match self.input_mode.clone() {
            InputMode::Chat => self.handle_chat_key(key),
            InputMode::PathPrompt => match key.code {
                KeyCode::Enter => self.submit_path_prompt(),
                KeyCode::Esc => {
                    self.path_buffer.clear();
                    self.input_mode = InputMode::Chat;
                }
                KeyCode::Char(c) => self.path_buffer.push(c),
                KeyCode::Backspace => {
                    self.path_buffer.pop();
                }
                _ => {}
            },
            InputMode::DropConfirm(payload) => match key.code {
                KeyCode::Enter => self.confirm_drop(&payload),
                KeyCode::Esc => self.cancel_drop(),
                _ => {}
            },
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('o') {
                self.input_mode = InputMode::PathPrompt;
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::PageUp | KeyCode::Up => {
                let step = if key.code == KeyCode::PageUp { 10 } else { 1 };
                self.follow = false;
                self.scroll = self.scroll.saturating_sub(step);
            }
            KeyCode::PageDown | KeyCode::Down => {
                let step = if key.code == KeyCode::PageDown { 10 } else { 1 };
                self.scroll = self.scroll.saturating_add(step).min(self.max_scroll);
                self.follow = self.scroll >= self.max_scroll;
            }
            // Input is disabled while a reply is pending.
            _ if self.shell.chat().is_pending() => {}
            KeyCode::Enter => self.send_chat(),
            KeyCode::Char(c) => self.shell.chat_mut().push_char(c),
            KeyCode::Backspace => self.shell.chat_mut().backspace(),
            _ => {}
        }
    }

    // --- Rendering --------------------------------------------------------

    fn render_files(&self, f: &mut Frame, area: Rect) {
        let uploads = self.shell.uploads();
        let dropping = uploads.drop_zone().is_active();

        let title = if dropping {
            " Drop files here ".to_string()
        } else if uploads.is_uploading() {
            format!(" Uploaded files {} Uploading... ", self.spinner())
        } else {
            " Uploaded files ".to_string()
        };
        let border = if dropping {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border);

        if self.shell.files().is_empty() {
            let hint = Paragraph::new("No files yet.\nCtrl+O or drop PDFs here.")
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(hint, area);
            return;
        }

        let items: Vec<ListItem> = self
            .shell
            .files()
            .iter()
            .map(|file| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        file.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!(
                            "  {} · {}",
                            file.size_kb(),
                            file.uploaded_at.with_timezone(&Local).format("%H:%M:%S")
                        ),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();
        f.render_widget(List::new(items).block(block), area);
    }

    fn transcript_lines(&self) -> Vec<Line<'static>> {
        let chat = self.shell.chat();
        let mut lines = Vec::new();
        for m in chat.transcript() {
            let (label, color) = if m.is_user() {
                ("You", Color::Green)
            } else {
                ("Assistant", Color::Cyan)
            };
            lines.push(Line::from(Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            lines.extend(m.content.lines().map(|l| Line::from(l.to_string())));
            lines.push(Line::default());
        }
        if chat.is_pending() {
            lines.push(Line::from(Span::styled(
                format!("{} Thinking...", self.spinner()),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    }

    fn render_transcript(&mut self, f: &mut Frame, area: Rect) {
        let lines = self.transcript_lines();
        let inner_width = area.width.saturating_sub(2).max(1);
        let inner_height = area.height.saturating_sub(2);

        let total = wrapped_height(&lines, inner_width);
        self.max_scroll = total.saturating_sub(inner_height);

        let revision = self.shell.chat().revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.follow = true;
        }
        if self.follow || self.shell.chat().is_pending() {
            self.scroll = self.max_scroll;
        }
        self.scroll = self.scroll.min(self.max_scroll);

        let transcript = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .block(Block::default().borders(Borders::ALL).title(" Chat "));
        f.render_widget(transcript, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let chat = self.shell.chat();
        let (title, style) = if chat.is_pending() {
            (" Waiting for reply... ", Style::default().fg(Color::DarkGray))
        } else {
            (" Ask a question (Enter to send) ", Style::default())
        };
        let input = Paragraph::new(chat.input())
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(input, area);

        if self.input_mode == InputMode::Chat && self.alert.is_none() && !chat.is_pending() {
            let width = u16::try_from(chat.input().chars().count()).unwrap_or(u16::MAX);
            let x = area.x.saturating_add(1).saturating_add(width).min(area.right().saturating_sub(2));
            f.set_cursor_position((x, area.y + 1));
        }
    }

    fn render_overlays(&self, f: &mut Frame) {
        match &self.input_mode {
            InputMode::PathPrompt => {
                let area = centered_rect(60, 20, f.area());
                f.render_widget(Clear, area);
                let prompt = Paragraph::new(self.path_buffer.as_str())
                    .style(Style::default().fg(Color::Yellow))
                    .wrap(Wrap { trim: false })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Open PDF: path(s), Enter to upload, Esc to cancel "),
                    );
                f.render_widget(prompt, area);
            }
            InputMode::DropConfirm(payload) => {
                let area = centered_rect(60, 30, f.area());
                f.render_widget(Clear, area);
                let mut lines: Vec<Line> = payload
                    .items()
                    .iter()
                    .map(|p| Line::from(format!("  {}", p.display())))
                    .collect();
                lines.push(Line::default());
                lines.push(Line::from("Enter to upload the PDFs, Esc to cancel"));
                let confirm = Paragraph::new(lines).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" Drop {} item(s) ", payload.item_count()))
                        .border_style(Style::default().fg(Color::Cyan)),
                );
                f.render_widget(confirm, area);
            }
            InputMode::Chat => {}
        }

        if let Some(msg) = &self.alert {
            let area = centered_rect(50, 20, f.area());
            f.render_widget(Clear, area);
            let alert = Paragraph::new(vec![
                Line::from(msg.as_str()),
                Line::default(),
                Line::from(Span::styled("[ OK ]", Style::default().add_modifier(Modifier::BOLD))),
            ])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Upload failed ")
                    .style(Style::default().bg(Color::Red).fg(Color::White)),
            );
            f.render_widget(alert, area);
        }
    }
}

impl AppController for DocChatApp {
    fn update(&mut self, action: Action) {
        match action {
            Action::Tick => self.frame = self.frame.wrapping_add(1),
            Action::Key(key) => self.handle_key(key),
            Action::Paste(text) => {
                if self.alert.is_none() {
                    self.handle_paste(&text);
                }
            }
            Action::ChatFinished(result) => self.shell.chat_mut().finish(result),
            Action::UploadFinished(outcome) => {
                let report = self.shell.uploads_mut().finish(outcome);
                if let Some(alert) = self.shell.apply_upload_report(report) {
                    self.alert = Some(alert.message);
                }
            }
            Action::Resize(_, _) => {}
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(1)])
            .split(f.area());

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[0]);

        self.render_files(f, main_chunks[0]);
        self.render_transcript(f, main_chunks[1]);
        self.render_input(f, chunks[1]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("Ctrl+O", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" open PDF  "),
            Span::styled("paste paths", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" drop files  "),
            Span::styled("PgUp/PgDn", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" scroll  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" quit"),
        ]))
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(help, chunks[2]);

        self.render_overlays(f);
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Rows `lines` occupy once wrapped to `width` columns.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}
