use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deck_common::{DeckPlan, Rgb, SlideInstruction};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

pub struct DeckPreview {
    plan: DeckPlan,
    current_slide: usize,
    running: bool,
}

fn color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb(r, g, b)
}

impl DeckPreview {
    pub fn new(plan: DeckPlan) -> Self {
        Self {
            plan,
            current_slide: 0,
            running: true,
        }
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            terminal.draw(|f| self.draw(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Left | KeyCode::Char('h') => self.previous_slide(),
            KeyCode::Right | KeyCode::Char('l') => self.next_slide(),
            _ => {}
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let theme = &self.plan.theme;
        let area = f.area();

        let block = Block::default()
            .title(format!(
                " {} ({}/{}) · {} ",
                self.plan.topic,
                self.current_slide + 1,
                self.plan.slide_count(),
                self.plan.theme_name.display_name()
            ))
            .title_bottom(" ←/h previous  →/l next  q quit ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color(theme.accent_color)))
            .style(Style::default().bg(color(theme.background_color)));

        let paragraph = Paragraph::new(self.slide_lines())
            .block(block)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    fn slide_lines(&self) -> Vec<Line<'_>> {
        let theme = &self.plan.theme;
        let title_style = Style::default()
            .fg(color(theme.title_color))
            .add_modifier(Modifier::BOLD);
        let content_style = Style::default().fg(color(theme.content_color));

        let Some(instruction) = self.plan.instructions.get(self.current_slide) else {
            return vec![Line::styled("No slide content", content_style)];
        };

        let mut lines = vec![Line::styled(instruction.title(), title_style), Line::default()];
        match instruction {
            SlideInstruction::Title { subtitle, .. } => {
                lines.push(Line::styled(subtitle.as_str(), content_style));
            }
            SlideInstruction::Content { bullets, kind, .. } => {
                for bullet in bullets {
                    lines.push(Line::styled(format!("• {bullet}"), content_style));
                }
                lines.push(Line::default());
                lines.push(Line::styled(
                    format!("[{kind}]"),
                    Style::default().fg(color(theme.accent_color)),
                ));
            }
        }

        if let Some(note) = self.plan.visual_note(self.current_slide) {
            lines.push(Line::default());
            lines.push(Line::styled(
                format!("Visual: {note}"),
                content_style.add_modifier(Modifier::DIM | Modifier::ITALIC),
            ));
        }
        lines
    }

    fn next_slide(&mut self) {
        if self.current_slide < self.plan.slide_count().saturating_sub(1) {
            self.current_slide += 1;
        }
    }

    fn previous_slide(&mut self) {
        if self.current_slide > 0 {
            self.current_slide -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_common::{SlideKind, SlideLayout, SlideRecord, ThemeName};
    use ratatui::backend::TestBackend;

    fn plan() -> DeckPlan {
        let record = SlideRecord::new("Roadmap")
            .with_content(["Ship beta", "Collect feedback"])
            .with_visual_note("gantt chart");
        DeckPlan {
            topic: "Launch".to_string(),
            theme_name: ThemeName::Tech,
            theme: ThemeName::Tech.settings().clone(),
            instructions: vec![
                SlideInstruction::Title {
                    title: "Launch".to_string(),
                    subtitle: "Created with Smart Presentation Generator".to_string(),
                },
                SlideInstruction::Content {
                    title: record.title.clone(),
                    bullets: record.content.clone(),
                    kind: SlideKind::Standard,
                    layout: SlideLayout::TitleAndContent,
                },
            ],
            slides: vec![record],
            output_name: "Launch_deadbeef.pptx".to_string(),
        }
    }

    fn render(preview: &DeckPreview) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 14)).unwrap();
        terminal.draw(|f| preview.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut preview = DeckPreview::new(plan());
        preview.handle_key(KeyCode::Left);
        assert_eq!(preview.current_slide(), 0);
        preview.handle_key(KeyCode::Char('l'));
        preview.handle_key(KeyCode::Right);
        assert_eq!(preview.current_slide(), 1);
        preview.handle_key(KeyCode::Char('h'));
        assert_eq!(preview.current_slide(), 0);
        preview.handle_key(KeyCode::Esc);
        assert!(!preview.is_running());
    }

    #[test]
    fn draws_title_slide_then_bullets_and_note() {
        let mut preview = DeckPreview::new(plan());
        let screen = render(&preview);
        assert!(screen.contains("Launch (1/2)"));
        assert!(screen.contains("Created with Smart Presentation Generator"));

        preview.handle_key(KeyCode::Right);
        let screen = render(&preview);
        assert!(screen.contains("Roadmap"));
        assert!(screen.contains("Ship beta"));
        assert!(screen.contains("Visual: gantt chart"));
    }

    #[test]
    fn empty_plan_shows_placeholder() {
        let mut plan = plan();
        plan.instructions.clear();
        plan.slides.clear();
        let screen = render(&DeckPreview::new(plan));
        assert!(screen.contains("No slide content"));
    }
}
