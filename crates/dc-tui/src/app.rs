//! Application state and main UI controller

use crossterm::event::{Event, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

use dc_core::choice::Choice;
use dc_core::drops::ItemDrops;
use dc_core::session::{GameSession, Mode, SessionSignal, SessionState};
use dc_core::{LOG_WINDOW, MAX_CHOICES, MAX_DROPS};
use strum::IntoEnumIterator;

use crate::input::{UiCommand, key_to_command};
use crate::theme::Theme;

/// Application state
pub struct App {
    session: GameSession,
    theme: Theme,
    should_quit: bool,
}

impl App {
    pub fn new(session: GameSession, theme: Theme) -> Self {
        Self {
            session,
            theme,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance the game clocks. Called once per frame with the elapsed time.
    pub fn tick(&mut self, dt: f32) {
        self.session.tick(dt);
    }

    /// Convert a terminal event to a UI command. Only key presses matter;
    /// release and repeat events are dropped.
    pub fn handle_event(&self, event: Event) -> Option<UiCommand> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => key_to_command(key),
            _ => None,
        }
    }

    pub fn execute(&mut self, command: UiCommand) {
        match command {
            UiCommand::Slot(slot) => {
                if self.session.execute_choice(slot) == SessionSignal::Quit {
                    self.should_quit = true;
                }
            }
            UiCommand::Back => match self.session.state {
                SessionState::Playing if self.session.active_drops.is_some() => {
                    // Slot 0 is the tray's back button.
                    self.session.execute_choice(0);
                }
                SessionState::Playing | SessionState::Dead => self.session.goto_menu(),
                SessionState::Menu => self.should_quit = true,
            },
            UiCommand::Quit => self.should_quit = true,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        match self.session.state {
            SessionState::Menu => self.render_menu(frame),
            SessionState::Playing => {
                self.render_playing(frame);
                if let Some(drops) = &self.session.active_drops {
                    self.render_drop_tray(frame, drops);
                }
            }
            SessionState::Dead => {
                self.render_playing(frame);
                self.render_death_screen(frame);
            }
        }
    }

    fn render_menu(&self, frame: &mut Frame) {
        let area = centered_rect(50, 50, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Delver ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                "Choose your descent",
                Style::default().fg(self.theme.accent).bold(),
            )),
            Line::from(""),
        ];
        for (idx, mode) in Mode::iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}) ", idx + 1),
                    Style::default().fg(self.theme.accent),
                ),
                Span::styled(mode.to_string(), Style::default().fg(self.theme.text)),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("  4) ", Style::default().fg(self.theme.accent)),
            Span::styled("Quit", Style::default().fg(self.theme.text)),
        ]));

        let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
        frame.render_widget(paragraph, inner);
    }

    fn render_playing(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                   // Room header + timer
                Constraint::Min(MAX_CHOICES as u16 + 2), // Choice slots
                Constraint::Length(3),                   // Player status
                Constraint::Length(LOG_WINDOW as u16 + 2), // Event log
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_choices(frame, chunks[1]);
        self.render_status(frame, chunks[2]);
        self.render_log(frame, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        // The border flashes red while the screen shakes or the timer is
        // about to run out.
        let danger = self.session.shake > 0.0
            || (self.session.timer_enabled && self.session.timer <= 3.0);
        let border = if danger {
            self.theme.border_danger
        } else {
            self.theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = Line::from(vec![
            Span::styled(
                format!("Room {}", self.session.room_number),
                Style::default().fg(self.theme.accent).bold(),
            ),
            Span::raw("    "),
            Span::styled(
                format!("{} mode", self.session.mode),
                Style::default().fg(self.theme.text_dim),
            ),
            Span::raw("    "),
            Span::styled(
                self.format_timer(),
                if danger {
                    Style::default().fg(self.theme.bad).bold()
                } else {
                    Style::default().fg(self.theme.text)
                },
            ),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_choices(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Choices ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items: Vec<ListItem> = (0..MAX_CHOICES)
            .map(|slot| {
                let line = match &self.session.choices[slot] {
                    Some(choice) => Line::from(vec![
                        Span::styled(
                            format!("{}) ", slot + 1),
                            Style::default().fg(self.theme.accent),
                        ),
                        Span::styled(
                            describe_choice(choice),
                            Style::default().fg(self.theme.text),
                        ),
                    ]),
                    None => Line::from(Span::styled(
                        format!("{}) -", slot + 1),
                        Style::default().fg(self.theme.text_dim),
                    )),
                };
                ListItem::new(line)
            })
            .collect();
        frame.render_widget(List::new(items), inner);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Player ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let player = &self.session.player;
        let line = Line::from(vec![
            Span::styled(&player.name, Style::default().fg(self.theme.text).bold()),
            Span::raw("  "),
            Span::styled(player.status_line(), Style::default().fg(self.theme.text)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items: Vec<ListItem> = self
            .session
            .recent_log()
            .into_iter()
            .map(|line| ListItem::new(Line::from(line)))
            .collect();
        frame.render_widget(List::new(items), inner);
    }

    fn render_drop_tray(&self, frame: &mut Frame, drops: &ItemDrops) {
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Spoils ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = vec![Line::from(vec![
            Span::styled("  1) ", Style::default().fg(self.theme.accent)),
            Span::styled("Back", Style::default().fg(self.theme.text)),
        ])];
        for idx in 0..MAX_DROPS {
            let line = match drops.get(idx) {
                Some(drop) => Line::from(vec![
                    Span::styled(
                        format!("  {}) ", idx + 2),
                        Style::default().fg(self.theme.accent),
                    ),
                    Span::styled(drop.label(), Style::default().fg(self.theme.good)),
                ]),
                None => Line::from(Span::styled(
                    format!("  {}) -", idx + 2),
                    Style::default().fg(self.theme.text_dim),
                )),
            };
            lines.push(line);
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_death_screen(&self, frame: &mut Frame) {
        let area = centered_rect(50, 40, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_danger));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = vec![
            Line::from(Span::styled(
                "  You are dead  ",
                Style::default().fg(self.theme.bad).bold(),
            )),
            Line::from(""),
            Line::from(format!(
                "You fell in room {} ({} mode).",
                self.session.room_number, self.session.mode
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  1) ", Style::default().fg(self.theme.accent)),
                Span::raw("Menu"),
            ]),
            Line::from(vec![
                Span::styled("  2) ", Style::default().fg(self.theme.accent)),
                Span::raw("Retry"),
            ]),
        ];
        let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
        frame.render_widget(paragraph, inner);
    }

    fn format_timer(&self) -> String {
        if !self.session.timer_enabled {
            return "PRACTICE".to_string();
        }
        let secs = self.session.timer.ceil().max(0.0) as u32;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// One-line slot caption: the action plus what it acts on.
fn describe_choice(choice: &Choice) -> String {
    match choice {
        Choice::Advance => "Forward".to_string(),
        Choice::Fight(creature) => {
            format!("Fight {} ({})", creature.name, creature.status_line())
        }
        Choice::Collect(_) => "Collect spoils".to_string(),
        Choice::Pickup(Some(drop)) => format!("Pickup {}", drop.label()),
        Choice::Pickup(None) => "Pickup (taken)".to_string(),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
