pub mod layout;
mod web;

pub use layout::{EdgeSegment, NodePoint, SceneLayout};
pub use web::WebVisualizer;

use crate::algorithms::{backtracking::EMPTY, dynamic, trie};
use crate::error::StepperResult;
use crate::registry::Layout as CollectionLayout;
use crate::runner::Session;
use crate::sink::VizState;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color as TuiColor, Modifier, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine},
        Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget, Wrap,
    },
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::runtime::Handle;

const TICK: Duration = Duration::from_millis(50);

/// Interactive terminal front end for one [`Session`]. Redraws on every tick
/// from a snapshot of the shared state, so it never blocks the pacer.
pub struct Visualizer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    session: Session,
    runtime: Handle,
    finished: bool,
}

impl Visualizer {
    pub fn for_session(session: Session, runtime: Handle) -> io::Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            session,
            runtime,
            finished: false,
        })
    }

    pub fn run(&mut self) -> StepperResult<()> {
        loop {
            self.render()?;
            if !event::poll(TICK)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !self.handle_key(key.code)? {
                        break;
                    }
                }
                Event::Resize(_, _) => self.render()?,
                _ => {}
            }
        }
        self.session.control().request_stop();
        self.runtime.block_on(self.session.wait())?;
        self.finish()?;
        Ok(())
    }

    /// Returns false when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> StepperResult<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(false),
            KeyCode::Char('s') | KeyCode::Char(' ') => {
                let _guard = self.runtime.enter();
                self.session.start();
            }
            KeyCode::Char('x') => self.session.stop(),
            KeyCode::Char('r') => self.runtime.block_on(self.session.reset())?,
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let speed = self.session.control().speed();
                self.session.set_speed(speed + 1);
            }
            KeyCode::Char('-') => {
                let speed = self.session.control().speed();
                self.session.set_speed(speed.saturating_sub(1));
            }
            _ => {}
        }
        Ok(true)
    }

    pub fn finish(&mut self) -> io::Result<()> {
        self.restore_terminal()
    }

    fn render(&mut self) -> io::Result<()> {
        let snapshot = self.session.snapshot();
        let params = self.session.params().describe(self.session.topic());
        let phase = self.session.phase().to_string();

        self.terminal.draw(|frame| {
            let size = frame.size();
            let vertical = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(6),
                    Constraint::Min(12),
                    Constraint::Length(3),
                    Constraint::Length(8),
                ])
                .split(size);

            let summary_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(34),
                    Constraint::Percentage(33),
                    Constraint::Percentage(33),
                ])
                .split(vertical[0]);

            frame.render_widget(Self::topic_block(&snapshot), summary_chunks[0]);
            frame.render_widget(Self::controls_block(&params), summary_chunks[1]);
            frame.render_widget(Self::stats_block(&snapshot, &phase), summary_chunks[2]);
            Self::render_collection(frame, &snapshot, vertical[1]);
            frame.render_widget(Self::outcome_block(&snapshot), vertical[2]);
            frame.render_widget(Self::log_block(&snapshot), vertical[3]);
        })?;
        Ok(())
    }

    fn topic_block(data: &VizState) -> Paragraph<'_> {
        let lines = vec![
            Line::from(Span::styled(
                data.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("time: {}", data.time)),
            Line::from(format!("space: {}", data.space)),
            Line::from(format!("size: {}", data.collection.len())),
        ];
        Paragraph::new(lines).block(Block::default().title("Topic").borders(Borders::ALL))
    }

    fn controls_block(params: &str) -> Paragraph<'_> {
        let lines = vec![
            Line::from(params),
            Line::from("s start   x stop   r reset"),
            Line::from("+/- speed   q quit"),
        ];
        Paragraph::new(lines)
            .block(Block::default().title("Parameters").borders(Borders::ALL))
            .wrap(Wrap { trim: true })
    }

    fn stats_block<'a>(data: &'a VizState, phase: &'a str) -> Paragraph<'a> {
        let lines = vec![
            Line::from(format!("comparisons: {}", data.comparisons)),
            Line::from(format!("accesses: {}", data.accesses)),
            Line::from(format!("step: {}/{}", data.step_index, data.steps_total)),
            Line::from(format!("phase: {phase}   speed: {}", data.speed)),
        ];
        Paragraph::new(lines).block(Block::default().title("Stats").borders(Borders::ALL))
    }

    fn outcome_block(data: &VizState) -> Paragraph<'_> {
        let line = match &data.banner {
            Some(banner) => Line::from(Span::styled(
                banner.as_str(),
                Style::default()
                    .fg(TuiColor::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            None if data.narration.is_empty() => Line::from("press s to start"),
            None => Line::from(data.narration.as_str()),
        };
        Paragraph::new(line).block(Block::default().title("Outcome").borders(Borders::ALL))
    }

    fn log_block(data: &VizState) -> Paragraph<'_> {
        let mut lines: Vec<Line> = data
            .logs
            .iter()
            .rev()
            .map(|entry| Line::from(entry.as_str()))
            .collect();
        if lines.is_empty() {
            lines.push(Line::from("logs will appear here"));
        }
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Live log (newest first)")
                    .borders(Borders::ALL),
            )
            .style(Style::default().fg(TuiColor::Gray))
    }

    fn render_collection(frame: &mut Frame, data: &VizState, area: Rect) {
        let title = if data.narration.is_empty() {
            "Collection".to_string()
        } else {
            format!("Collection: {}", data.narration)
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        match data.layout {
            CollectionLayout::Bars => frame.render_widget(Self::bar_chart(data, block, area), area),
            CollectionLayout::Graph | CollectionLayout::Tree => {
                frame.render_widget(Self::scene_canvas(data, block), area)
            }
            CollectionLayout::Board => frame.render_widget(Self::board(data).block(block), area),
            CollectionLayout::Boxes | CollectionLayout::Table | CollectionLayout::Word => {
                frame.render_widget(Self::boxes(data).block(block), area)
            }
        }
    }

    fn bar_chart<'a>(data: &'a VizState, block: Block<'a>, area: Rect) -> BarChart<'a> {
        let count = data.collection.len().max(1) as u16;
        let inner = area.width.saturating_sub(2);
        let bar_width = (inner / count).saturating_sub(1).clamp(1, 6);
        let bars: Vec<Bar> = data
            .collection
            .iter()
            .enumerate()
            .map(|(idx, &value)| {
                Bar::default()
                    .value(u64::try_from(value).unwrap_or(0))
                    .text_value(value.to_string())
                    .style(Style::default().fg(cell_color(data, idx)))
            })
            .collect();
        BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1)
    }

    fn boxes(data: &VizState) -> Paragraph<'_> {
        let mut cells = Vec::with_capacity(data.collection.len());
        let mut indices = Vec::with_capacity(data.collection.len());
        for (idx, &value) in data.collection.iter().enumerate() {
            let text = cell_text(data.layout, value);
            let width = text.chars().count().max(idx.to_string().len()) + 2;
            cells.push(Span::styled(
                format!("[{text:^w$}]", w = width - 2),
                Style::default().fg(cell_color(data, idx)),
            ));
            cells.push(Span::raw(" "));
            indices.push(Span::styled(
                format!(" {idx:^w$} ", w = width - 2),
                Style::default().fg(TuiColor::DarkGray),
            ));
            indices.push(Span::raw(" "));
        }
        let mut lines = vec![Line::from(cells), Line::from(indices)];
        if !data.visited.is_empty() {
            let order: Vec<String> = data.visited.iter().map(|v| cell_text(data.layout, *v)).collect();
            lines.push(Line::from(""));
            lines.push(Line::from(format!("visited: {}", order.join(" → "))));
        }
        Paragraph::new(lines).wrap(Wrap { trim: false })
    }

    fn board(data: &VizState) -> Paragraph<'_> {
        let size = data.collection.len();
        let mut lines = Vec::with_capacity(size + 2);
        for (row, &queen) in data.collection.iter().enumerate() {
            let color = cell_color(data, row);
            let spans: Vec<Span> = (0..size)
                .map(|col| {
                    if queen != EMPTY && queen as usize == col {
                        Span::styled(" Q ", Style::default().fg(color).add_modifier(Modifier::BOLD))
                    } else if (row + col) % 2 == 0 {
                        Span::styled(" · ", Style::default().fg(TuiColor::DarkGray))
                    } else {
                        Span::raw("   ")
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(format!("solutions found: {}", data.solutions.len())));
        Paragraph::new(lines)
    }

    fn scene_canvas<'a>(data: &'a VizState, block: Block<'a>) -> impl Widget + 'a {
        let scene = SceneLayout::for_state(data);
        Canvas::default()
            .block(block)
            .x_bounds([-1.1, 1.1])
            .y_bounds([-1.1, 1.1])
            .paint(move |ctx: &mut Context<'_>| {
                let Some(scene) = &scene else {
                    return;
                };
                for edge in &scene.edges {
                    let active = data.highlight.contains(&edge.from) && data.highlight.contains(&edge.to);
                    ctx.draw(&CanvasLine {
                        x1: edge.x1,
                        y1: edge.y1,
                        x2: edge.x2,
                        y2: edge.y2,
                        color: if active { TuiColor::Yellow } else { TuiColor::DarkGray },
                    });
                }
                ctx.layer();
                for node in &scene.nodes {
                    ctx.print(
                        node.x,
                        node.y,
                        Span::styled(
                            format!("({})", node.value),
                            Style::default().fg(cell_color(data, node.idx)),
                        ),
                    );
                }
            })
    }

    fn restore_terminal(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

fn cell_color(data: &VizState, idx: usize) -> TuiColor {
    if data.highlight.contains(&idx) {
        TuiColor::Yellow
    } else if data.resolved.contains(&idx) {
        TuiColor::Green
    } else {
        TuiColor::Cyan
    }
}

fn cell_text(layout: CollectionLayout, value: i64) -> String {
    match layout {
        CollectionLayout::Word => trie::query_text(&[value]),
        CollectionLayout::Table if value == dynamic::UNREACHABLE => "∞".to_string(),
        CollectionLayout::Table if value == dynamic::UNSET => "·".to_string(),
        _ => value.to_string(),
    }
}
