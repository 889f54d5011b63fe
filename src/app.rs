use crossterm::event::KeyCode;
use quiz_practice::error::{QuizError, Result};
use quiz_practice::session::{parse_position, SessionEngine, SessionSnapshot, TickOutcome};
use quiz_practice::summary::{
    format_clock, progress_percent, AnswerStatus, HistorySummary, ScoreBand,
};
use quiz_practice::types::*;
use quiz_practice::SessionTick;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};
use tracing::{debug, info, warn};

const OPTION_KEYS: [char; 6] = ['a', 'b', 'c', 'd', 'e', 'f'];
const WARNING_SECS: u32 = 300;

pub struct App {
    engine: Option<SessionEngine>,
    pub mode: Mode,
    pub unit_filter: UnitFilter,
    pub difficulty_filter: DifficultyFilter,
    pub jump_buffer: String,
    pub status: Option<String>,
    pub review_scroll: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        engine: SessionEngine,
        mode: Mode,
        unit_filter: UnitFilter,
        difficulty_filter: DifficultyFilter,
    ) -> Self {
        Self {
            engine: Some(engine),
            mode,
            unit_filter,
            difficulty_filter,
            jump_buffer: String::new(),
            status: None,
            review_scroll: 0,
            should_quit: false,
        }
    }

    pub fn engine(&self) -> Option<&SessionEngine> {
        self.engine.as_ref()
    }

    pub fn phase(&self) -> PhaseKind {
        self.engine()
            .map_or(PhaseKind::Configuring, SessionEngine::phase)
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        if code == KeyCode::Esc {
            self.should_quit = true;
            return Ok(());
        }

        let outcome = match self.phase() {
            PhaseKind::Configuring => self.handle_configure_key(code),
            PhaseKind::Running => self.handle_running_key(code),
            PhaseKind::Finished => self.handle_finished_key(code),
        };

        match outcome {
            Err(e) if e.is_rejected_intent() => {
                warn!("Ignored input: {}", e);
                self.status = Some(e.to_string());
                Ok(())
            }
            Err(e @ QuizError::NoMatchingQuestions { .. }) => {
                self.status = Some(e.to_string());
                Ok(())
            }
            other => other,
        }
    }

    pub fn handle_tick(&mut self, tick: SessionTick) -> Result<()> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };
        if let Some(TickOutcome::TimedOut) = engine.tick_for(tick.0)? {
            info!(session = tick.0, "Time limit reached, session auto-submitted");
            self.status = Some("Time's up! Your answers were submitted automatically.".into());
            self.review_scroll = 0;
        }
        Ok(())
    }

    fn handle_configure_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char('m') => {
                self.mode = self.mode.toggled();
            }
            KeyCode::Char('u') => {
                let units = self
                    .engine()
                    .map(|e| e.catalog().units())
                    .unwrap_or_default();
                self.unit_filter = next_unit(&self.unit_filter, &units);
            }
            KeyCode::Char('d') => {
                self.difficulty_filter = next_difficulty(&self.difficulty_filter);
            }
            KeyCode::Enter => self.start_session()?,
            _ => {}
        }
        Ok(())
    }

    fn handle_running_key(&mut self, code: KeyCode) -> Result<()> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };

        match code {
            KeyCode::Char(c) if OPTION_KEYS.contains(&c) => {
                let option = (c as u8 - b'a') as usize;
                let feedback = engine.select_answer(option)?;
                self.status = feedback.map(|f| {
                    if f.is_correct {
                        "Correct!".to_string()
                    } else {
                        format!("Not quite, the answer is {}.", option_label(f.correct_index))
                    }
                });
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.jump_buffer.push(c);
            }
            KeyCode::Backspace => {
                self.jump_buffer.pop();
            }
            KeyCode::Enter if !self.jump_buffer.is_empty() => {
                let typed = std::mem::take(&mut self.jump_buffer);
                let position = parse_position(&typed)?;
                engine.jump_to(position)?;
                self.status = None;
            }
            KeyCode::Right | KeyCode::Char('n') => {
                engine.next()?;
                self.status = None;
            }
            KeyCode::Left | KeyCode::Char('p') => {
                engine.previous()?;
                self.status = None;
            }
            KeyCode::Char('s') => {
                let result = engine.submit()?;
                info!(score = result.score_percent, "Submitted by user");
                self.status = None;
                self.review_scroll = 0;
            }
            KeyCode::Char('r') => self.reset(),
            _ => {}
        }
        Ok(())
    }

    fn handle_finished_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.review_scroll = self.review_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.review_scroll = self.review_scroll.saturating_sub(1);
            }
            KeyCode::Char('r') | KeyCode::Enter => self.reset(),
            _ => {}
        }
        Ok(())
    }

    fn start_session(&mut self) -> Result<()> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };
        engine.start(
            self.mode,
            self.unit_filter.clone(),
            self.difficulty_filter.clone(),
        )?;
        self.status = None;
        self.jump_buffer.clear();
        Ok(())
    }

    fn reset(&mut self) {
        if let Some(engine) = self.engine.take() {
            self.engine = Some(engine.reset());
        }
        self.jump_buffer.clear();
        self.review_scroll = 0;
        self.status = None;
        debug!("Back to configuration");
    }

    pub fn render(&self, f: &mut Frame) {
        let Some(engine) = self.engine() else {
            return;
        };
        let snapshot = engine.snapshot();

        match snapshot.phase {
            PhaseKind::Configuring => self.render_configure(f, engine),
            PhaseKind::Running => self.render_running(f, &snapshot),
            PhaseKind::Finished => self.render_finished(f, engine, &snapshot),
        }
    }

    fn render_configure(&self, f: &mut Frame, engine: &SessionEngine) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(4),  // Statistics
                Constraint::Length(7),  // Test configuration
                Constraint::Min(5),     // Recent results
                Constraint::Length(3),  // Help
            ])
            .split(f.area());

        let title = Paragraph::new(Line::from(vec![Span::styled(
            "Practice Tests",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let history = engine.history();
        let summary = HistorySummary::from_results(&history);
        let stats = Paragraph::new(vec![
            Line::from(format!(
                "Questions: {}   Units: {}   Tests taken: {}",
                engine.catalog().len(),
                engine.catalog().units().len(),
                summary.tests_taken
            )),
            Line::from(vec![
                Span::raw("Average score: "),
                Span::styled(
                    format!("{}%", summary.average_score),
                    Style::default().fg(band_color(ScoreBand::for_score(summary.average_score))),
                ),
            ]),
        ])
        .block(Block::default().title("Statistics").borders(Borders::ALL));
        f.render_widget(stats, chunks[1]);

        let settings = engine.settings();
        let limit = format_clock(settings.time_limit(self.mode));
        let config = Paragraph::new(vec![
            Line::from(format!("[m] Mode:       {} ({} limit)", self.mode, limit)),
            Line::from(format!("[u] Unit:       {}", self.unit_filter)),
            Line::from(format!("[d] Difficulty: {}", self.difficulty_filter)),
            Line::from(""),
            Line::from(Span::styled(
                self.status.as_deref().unwrap_or("Press Enter to start"),
                Style::default().fg(Color::Yellow),
            )),
        ])
        .block(Block::default().title("Configure Your Test").borders(Borders::ALL));
        f.render_widget(config, chunks[2]);

        let mut recent: Vec<Line> = Vec::new();
        if history.is_empty() {
            recent.push(Line::from("No tests taken yet"));
        }
        for result in history.iter().take(5) {
            recent.push(Line::from(vec![
                Span::styled(
                    format!("{:>3}%", result.score_percent),
                    Style::default().fg(band_color(ScoreBand::for_score(result.score_percent))),
                ),
                Span::raw(format!(
                    "  {}/{} correct  Time: {}  {}",
                    result.correct_count(),
                    result.total_questions,
                    format_clock(result.time_spent_seconds),
                    result.completed_at.format("%Y-%m-%d %H:%M"),
                )),
            ]));
        }
        f.render_widget(
            Paragraph::new(recent)
                .block(Block::default().title("Recent Results").borders(Borders::ALL)),
            chunks[3],
        );

        self.render_help(f, chunks[4], "m mode | u unit | d difficulty | Enter start | Esc quit");
    }

    fn render_running(&self, f: &mut Frame, snapshot: &SessionSnapshot<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Mode, position and timer
                Constraint::Length(1),  // Progress
                Constraint::Min(8),     // Question and options
                Constraint::Length(5),  // Feedback
                Constraint::Length(3),  // Navigator
                Constraint::Length(3),  // Help
            ])
            .split(f.area());

        let Some(question) = snapshot.current_question() else {
            return;
        };
        let total = snapshot.question_set.len();
        let mode = snapshot.mode.unwrap_or(Mode::Practice);

        let timer_color = if mode == Mode::Timed && snapshot.remaining_seconds <= WARNING_SECS {
            Color::Red
        } else {
            Color::Green
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled(format!("{mode}"), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "   Question {} of {}   Answered {}/{}   ",
                snapshot.current_index + 1,
                total,
                snapshot.answered_count(),
                total
            )),
            Span::styled(
                format_clock(snapshot.remaining_seconds),
                Style::default().fg(timer_color).add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, chunks[0]);

        let progress = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(progress_percent(snapshot.current_index, total));
        f.render_widget(progress, chunks[1]);

        let selected = snapshot.selected_option();
        let feedback = snapshot.feedback.as_ref();
        let mut body = vec![
            Line::from(vec![
                Span::styled(
                    format!("{}", question.difficulty),
                    Style::default().fg(difficulty_color(question.difficulty)),
                ),
                Span::raw(format!("  {} | {}", question.unit, question.topic)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                question.prompt.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (i, option) in question.options.iter().enumerate() {
            let marker = option_label(i);
            let mut style = Style::default();
            if selected == Some(i) {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if let Some(fb) = feedback {
                if i == fb.correct_index {
                    style = style.fg(Color::Green);
                } else if i == fb.selected {
                    style = style.fg(Color::Red);
                }
            }
            body.push(Line::from(Span::styled(format!("  {marker}) {option}"), style)));
        }
        f.render_widget(
            Paragraph::new(body)
                .block(Block::default().title("Question").borders(Borders::ALL))
                .wrap(Wrap { trim: false }),
            chunks[2],
        );

        let feedback_text = match (feedback, &self.status) {
            (Some(fb), _) => vec![
                Line::from(Span::styled(
                    if fb.is_correct { "Correct!" } else { "Incorrect" },
                    Style::default().fg(if fb.is_correct { Color::Green } else { Color::Red }),
                )),
                Line::from(format!("Explanation: {}", fb.explanation)),
            ],
            (None, Some(status)) => vec![Line::from(status.as_str())],
            (None, None) => vec![],
        };
        f.render_widget(
            Paragraph::new(feedback_text)
                .block(Block::default().title("Feedback").borders(Borders::ALL))
                .wrap(Wrap { trim: true }),
            chunks[3],
        );

        let navigator: Vec<Span> = (0..total)
            .map(|position| {
                let mut style = if snapshot.answers.contains_key(&position) {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Gray)
                };
                if position == snapshot.current_index {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Span::styled(format!(" {} ", position + 1), style)
            })
            .collect();
        let title = if self.jump_buffer.is_empty() {
            "Questions".to_string()
        } else {
            format!("Questions (go to {})", self.jump_buffer)
        };
        f.render_widget(
            Paragraph::new(Line::from(navigator))
                .block(Block::default().title(title).borders(Borders::ALL)),
            chunks[4],
        );

        self.render_help(
            f,
            chunks[5],
            "a-f answer | ←/→ move | number+Enter go to | s submit | r reset | Esc quit",
        );
    }

    fn render_finished(&self, f: &mut Frame, engine: &SessionEngine, snapshot: &SessionSnapshot<'_>) {
        let Some(result) = snapshot.result else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),  // Score
                Constraint::Min(5),     // Review
                Constraint::Length(3),  // Help
            ])
            .split(f.area());

        let band = ScoreBand::for_score(result.score_percent);
        let mut header = vec![
            Line::from(Span::styled(
                format!("{}%", result.score_percent),
                Style::default().fg(band_color(band)).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "You answered {} out of {} questions correctly",
                result.correct_count(),
                result.total_questions
            )),
            Line::from(format!(
                "Correct: {}   Incorrect: {}   Time spent: {}",
                result.correct_count(),
                result.incorrect_count(),
                format_clock(result.time_spent_seconds)
            )),
        ];
        if let Some(status) = &self.status {
            header.push(Line::from(Span::styled(status.as_str(), Style::default().fg(Color::Yellow))));
        }
        f.render_widget(
            Paragraph::new(header)
                .block(Block::default().title("Test Completed!").borders(Borders::ALL))
                .alignment(Alignment::Center),
            chunks[0],
        );

        let mut review: Vec<Line> = Vec::new();
        for item in engine.review().unwrap_or_default() {
            let (label, color) = match item.status {
                AnswerStatus::Correct => ("correct", Color::Green),
                AnswerStatus::Incorrect => ("incorrect", Color::Red),
                AnswerStatus::Unanswered => ("unanswered", Color::Gray),
            };
            review.push(Line::from(vec![
                Span::styled(
                    format!("Q{}: ", item.position + 1),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(item.question.prompt.clone()),
                Span::styled(format!("  [{label}]"), Style::default().fg(color)),
            ]));
            review.push(Line::from(format!(
                "    Correct answer: {}",
                item.question.correct_option()
            )));
            if item.status == AnswerStatus::Incorrect {
                if let Some(answer) = item.selected_option() {
                    review.push(Line::from(Span::styled(
                        format!("    Your answer: {answer}"),
                        Style::default().fg(Color::Red),
                    )));
                }
            }
            review.push(Line::from(format!("    Explanation: {}", item.question.explanation)));
            review.push(Line::from(""));
        }
        f.render_widget(
            Paragraph::new(review)
                .block(Block::default().title("Question Review").borders(Borders::ALL))
                .wrap(Wrap { trim: false })
                .scroll((self.review_scroll, 0)),
            chunks[1],
        );

        self.render_help(f, chunks[2], "↑/↓ scroll | r take another test | Esc quit");
    }

    fn render_help(&self, f: &mut Frame, area: Rect, text: &str) {
        let help = Paragraph::new(Line::from(vec![Span::raw(text.to_string())]))
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(help, area);
    }
}

fn option_label(index: usize) -> char {
    OPTION_KEYS.get(index).map_or('?', |c| c.to_ascii_uppercase())
}

fn next_unit(current: &UnitFilter, units: &[String]) -> UnitFilter {
    let next_index = match current {
        Filter::All => 0,
        Filter::Only(unit) => match units.iter().position(|u| u == unit) {
            Some(i) => i + 1,
            None => 0,
        },
    };
    units
        .get(next_index)
        .map_or(Filter::All, |u| Filter::Only(u.clone()))
}

fn next_difficulty(current: &DifficultyFilter) -> DifficultyFilter {
    match current {
        Filter::All => Filter::Only(Difficulty::Easy),
        Filter::Only(Difficulty::Easy) => Filter::Only(Difficulty::Medium),
        Filter::Only(Difficulty::Medium) => Filter::Only(Difficulty::Hard),
        Filter::Only(Difficulty::Hard) => Filter::All,
    }
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Good => Color::Green,
        ScoreBand::Fair => Color::Yellow,
        ScoreBand::Poor => Color::Red,
    }
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}
