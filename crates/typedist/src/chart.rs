//! Side-by-side comparison chart for two distributions.
//!
//! Left: grouped bars per type in canonical order. Right: scatter of the
//! paired percentages with a y = x reference line and type annotations.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Paragraph,
        canvas::{self, Canvas, Points},
    },
};
use typedist_core::{CategorySet, Distribution, format_correlation, format_percentage};

const LEFT_COLOR: Color = Color::Cyan;
const RIGHT_COLOR: Color = Color::Yellow;

/// Bars are drawn in tenths of a percent
const BAR_SCALE: f64 = 10.0;

/// A named distribution to plot
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub label: &'a str,
    pub distribution: &'a Distribution,
}

pub struct ComparisonChart<'a> {
    categories: &'a CategorySet,
    left: Series<'a>,
    right: Series<'a>,
    correlation: Option<f64>,
}

impl<'a> ComparisonChart<'a> {
    pub fn new(categories: &'a CategorySet, left: Series<'a>, right: Series<'a>) -> Self {
        Self {
            categories,
            left,
            right,
            correlation: None,
        }
    }

    /// Correlation shown in the scatter title
    pub fn with_correlation(mut self, correlation: Option<f64>) -> Self {
        self.correlation = correlation;
        self
    }

    /// Interactive loop: redraw until the user quits
    pub fn run(&self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame, frame.area()))?;
            if should_quit(&event::read()?) {
                tracing::info!("Chart closed");
                return Ok(());
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        self.render_legend(frame, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        self.render_bars(frame, columns[0]);
        self.render_scatter(frame, columns[1]);
    }

    fn render_legend(&self, frame: &mut Frame, area: Rect) {
        let legend = Line::from(vec![
            Span::styled("■ ", Style::default().fg(LEFT_COLOR)),
            Span::raw(self.left.label),
            Span::raw("   "),
            Span::styled("■ ", Style::default().fg(RIGHT_COLOR)),
            Span::raw(self.right.label),
            Span::styled("   (q to quit)", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(legend), area);
    }

    fn render_bars(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Type Distribution (%) ");

        let mut chart = BarChart::default()
            .block(block)
            .bar_width(1)
            .bar_gap(0)
            .group_gap(1)
            .max(to_bar_value(self.max_value()));

        for label in self.categories.iter() {
            let bars = [
                Bar::default()
                    .value(to_bar_value(self.left.distribution.get(label)))
                    .style(Style::default().fg(LEFT_COLOR)),
                Bar::default()
                    .value(to_bar_value(self.right.distribution.get(label)))
                    .style(Style::default().fg(RIGHT_COLOR)),
            ];
            chart = chart.data(BarGroup::default().label(Line::from(label)).bars(&bars));
        }

        frame.render_widget(chart, area);
    }

    fn render_scatter(&self, frame: &mut Frame, area: Rect) {
        let upper = (self.max_value() * 1.1).max(1.0);
        let points: Vec<(String, f64, f64)> = self
            .categories
            .iter()
            .map(|label| {
                (
                    label.to_string(),
                    self.left.distribution.get(label),
                    self.right.distribution.get(label),
                )
            })
            .collect();
        let coords: Vec<(f64, f64)> = points.iter().map(|(_, x, y)| (*x, *y)).collect();

        let title = format!(
            " x: {}  y: {}  r = {} ",
            self.left.label,
            self.right.label,
            format_correlation(self.correlation)
        );
        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ));

        let canvas = Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .x_bounds([0.0, upper])
            .y_bounds([0.0, upper])
            .paint(|ctx| {
                ctx.draw(&canvas::Line {
                    x1: 0.0,
                    y1: 0.0,
                    x2: upper,
                    y2: upper,
                    color: Color::Red,
                });
                ctx.draw(&Points {
                    coords: &coords,
                    color: Color::Green,
                });
                for (label, x, y) in &points {
                    ctx.print(*x, *y, Span::styled(label.clone(), Style::default().fg(Color::Gray)));
                }
                ctx.print(upper * 0.02, upper * 0.97, format_percentage(upper));
            });

        frame.render_widget(canvas, area);
    }

    /// Largest percentage across both series
    fn max_value(&self) -> f64 {
        self.categories
            .iter()
            .flat_map(|label| {
                [
                    self.left.distribution.get(label),
                    self.right.distribution.get(label),
                ]
            })
            .fold(0.0_f64, f64::max)
    }
}

fn to_bar_value(percentage: f64) -> u64 {
    (percentage.max(0.0) * BAR_SCALE).round() as u64
}

/// Quit on `q`, `Esc` or `Ctrl+C`
fn should_quit(event: &Event) -> bool {
    match event {
        Event::Key(KeyEvent {
            code, modifiers, kind: KeyEventKind::Press, ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use typedist_core::DistributionAnalyzer;

    fn render_to_text(chart: &ComparisonChart<'_>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| chart.render(frame, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_legend_and_titles() {
        let analyzer = DistributionAnalyzer::new();
        let chart = ComparisonChart::new(
            analyzer.categories(),
            Series {
                label: "China",
                distribution: analyzer.china_distribution(),
            },
            Series {
                label: "Global",
                distribution: analyzer.global_distribution(),
            },
        )
        .with_correlation(Some(0.9986));

        let text = render_to_text(&chart, 160, 40);

        assert!(text.contains("China"));
        assert!(text.contains("Global"));
        assert!(text.contains("Type Distribution"));
        assert!(text.contains("r = 0.999"));
    }

    #[test]
    fn test_undefined_correlation_title() {
        let categories = CategorySet::new(["A", "B"]).unwrap();
        let dist = Distribution::from_pairs([("A", 50.0), ("B", 50.0)]);
        let series = Series {
            label: "Toy",
            distribution: &dist,
        };
        let chart = ComparisonChart::new(&categories, series, series);

        let text = render_to_text(&chart, 160, 20);

        assert!(text.contains("r = undefined (zero variance)"));
    }

    #[test]
    fn test_bar_values_in_tenths() {
        assert_eq!(to_bar_value(13.8), 138);
        assert_eq!(to_bar_value(0.0), 0);
        assert_eq!(to_bar_value(-1.0), 0);
    }

    #[test]
    fn test_quit_keys() {
        let key = |code, modifiers| Event::Key(KeyEvent::new(code, modifiers));

        assert!(should_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(should_quit(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(should_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!should_quit(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
