#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;

use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Gauge;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use tui_textarea::Input;
use tui_textarea::TextArea as TuiTextArea;

use crate::domain::models::Action;
use crate::domain::models::AnalysisRequest;
use crate::domain::models::AnalysisResult;
use crate::domain::models::Loading;
use crate::domain::models::ScoreBand;
use crate::domain::models::Session;
use crate::domain::models::TextArea;

pub const ANALYZER_MISSING_INPUT: &str = "Please paste both your resume and the job description.";
pub const ANALYZER_FALLBACK_ERROR: &str = "An error occurred during analysis. Please try again.";

const RESUME_TITLE: &str = "Your Resume";
const JOB_TITLE: &str = "Job Description";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalyzerField {
    Resume,
    Job,
}

pub struct AnalyzerView {
    pub resume: TuiTextArea<'static>,
    pub job: TuiTextArea<'static>,
    focus: AnalyzerField,
    result: Option<AnalysisResult>,
    error: Option<String>,
    loading: bool,
    pub scroll: u16,
    ticket: u64,
}

impl Default for AnalyzerView {
    fn default() -> AnalyzerView {
        let mut view = AnalyzerView {
            resume: TextArea::with_title(RESUME_TITLE),
            job: TextArea::with_title(JOB_TITLE),
            focus: AnalyzerField::Resume,
            result: None,
            error: None,
            loading: false,
            scroll: 0,
            ticket: 0,
        };
        view.sync_focus();

        return view;
    }
}

impl AnalyzerView {
    pub fn result(&self) -> Option<&AnalysisResult> {
        return self.result.as_ref();
    }

    pub fn error(&self) -> Option<&str> {
        return self.error.as_deref();
    }

    pub fn is_loading(&self) -> bool {
        return self.loading;
    }

    pub fn ticket(&self) -> u64 {
        return self.ticket;
    }

    pub fn focus(&self) -> AnalyzerField {
        return self.focus;
    }

    fn sync_focus(&mut self) {
        TextArea::set_focus(&mut self.resume, self.focus == AnalyzerField::Resume, RESUME_TITLE);
        TextArea::set_focus(&mut self.job, self.focus == AnalyzerField::Job, JOB_TITLE);
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            AnalyzerField::Resume => AnalyzerField::Job,
            AnalyzerField::Job => AnalyzerField::Resume,
        };
        self.sync_focus();
    }

    fn focused_mut(&mut self) -> &mut TuiTextArea<'static> {
        match self.focus {
            AnalyzerField::Resume => return &mut self.resume,
            AnalyzerField::Job => return &mut self.job,
        }
    }

    pub fn input(&mut self, input: Input) {
        self.focused_mut().input(input);
    }

    pub fn newline(&mut self) {
        self.focused_mut().insert_newline();
    }

    pub fn paste(&mut self, text: &str) {
        TextArea::paste(self.focused_mut(), text);
    }

    /// Validates and clears the previous outcome. Blank fields never reach
    /// the API.
    pub fn submit(&mut self, session: &Session) -> Option<Action> {
        if self.loading {
            return None;
        }

        let resume_text = TextArea::content(&self.resume);
        let job_description_text = TextArea::content(&self.job);
        if resume_text.trim().is_empty() || job_description_text.trim().is_empty() {
            self.error = Some(ANALYZER_MISSING_INPUT.to_string());
            return None;
        }

        let token = session.token()?;
        self.result = None;
        self.error = None;
        self.loading = true;
        self.scroll = 0;
        self.ticket += 1;

        return Some(Action::Analyze(
            token.to_string(),
            self.ticket,
            AnalysisRequest {
                resume_text,
                job_description_text,
            },
        ));
    }

    /// Clears both fields and the outcome. A request still in flight is
    /// ignored when it lands.
    pub fn reset(&mut self) {
        let ticket = self.ticket + 1;
        *self = AnalyzerView::default();
        self.ticket = ticket;
    }

    fn is_current(&self, ticket: u64) -> bool {
        return self.loading && ticket == self.ticket;
    }

    pub fn completed(&mut self, ticket: u64, result: AnalysisResult) {
        if !self.is_current(ticket) {
            tracing::debug!(ticket, "Discarding stale analysis result");
            return;
        }

        self.loading = false;
        self.result = Some(result);
    }

    pub fn failed(&mut self, ticket: u64, message: String) {
        if !self.is_current(ticket) {
            tracing::debug!(ticket, "Discarding stale analysis failure");
            return;
        }

        self.loading = false;
        self.error = Some(message);
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rect);

        let inputs = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[0]);

        frame.render_widget(self.resume.widget(), inputs[0]);
        frame.render_widget(self.job.widget(), inputs[1]);

        if self.loading {
            Loading::new("Analyzing...").render(frame, columns[1]);
            return;
        }

        let outcome = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(3), Constraint::Min(1)])
            .split(columns[1]);

        if let Some(result) = &self.result {
            let colour = match result.band() {
                ScoreBand::Strong => Color::Green,
                ScoreBand::Fair => Color::Yellow,
                ScoreBand::Weak => Color::Red,
            };
            let score = result.score_percent();

            frame.render_widget(
                Gauge::default()
                    .block(
                        Block::default()
                            .title("Match Score")
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded),
                    )
                    .gauge_style(Style::default().fg(colour))
                    .percent(score)
                    .label(format!("{score}%")),
                outcome[0],
            );

            frame.render_widget(
                Paragraph::new(AnalyzerView::result_lines(result))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded),
                    )
                    .wrap(Wrap { trim: false })
                    .scroll((self.scroll, 0)),
                outcome[1],
            );
            return;
        }

        let mut text = vec![Line::from(
            "Paste your resume and a job description, then press CTRL+S to analyze.",
        )];
        if let Some(error) = &self.error {
            text = vec![Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            ))];
        }

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .title("Analysis")
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded),
                )
                .wrap(Wrap { trim: false }),
            columns[1],
        );
    }

    pub fn result_lines(result: &AnalysisResult) -> Vec<Line<'static>> {
        let heading = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(Span::styled("Key Strengths", heading)),
            Line::from(result.strengths.to_string()),
            Line::from(""),
            Line::from(Span::styled("Areas for Improvement", heading)),
        ];

        for (idx, improvement) in result.improvements.iter().enumerate() {
            lines.push(Line::from(format!("{}. {improvement}", idx + 1)));
        }

        return lines;
    }
}
