pub mod charting;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LineGauge, Paragraph, Widget, Wrap},
    Frame,
};

use crate::{
    app::App,
    calculator::SampledSeries,
    session::Field,
    ui::charting::{compute_chart_bounds, format_label, reference_line},
    util::{format_fixed, format_plain, speed_kmh},
};

const INPUT_PANEL_WIDTH: u16 = 38;
const RESULT_CARD_HEIGHT: u16 = 6;
const PLACEHOLDER: &str = "--";

/// Draw whichever screen the app state selects
pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(&app.state).render(app, f);
}

struct SweepChart {
    title: &'static str,
    fixed: String,
    x_title: &'static str,
    caption: &'static str,
    color: Color,
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_italic() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC)
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Distance => "Distance (d)",
        Field::Time => "Time (t)",
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // legend
            ])
            .split(area);

        render_header(chunks[0], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(INPUT_PANEL_WIDTH), Constraint::Min(0)])
            .split(chunks[1]);

        render_input_panel(self, body[0], buf);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(RESULT_CARD_HEIGHT), Constraint::Min(0)])
            .split(body[1]);

        render_result_card(self, right[0], buf);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(right[1]);

        let result = self.session.result;
        let sweeps = self.session.sweeps.as_ref();

        render_sweep_chart(
            &SweepChart {
                title: "Impact of time on speed",
                fixed: result.map_or(PLACEHOLDER.to_string(), |r| {
                    format!("distance fixed at {} m", format_plain(r.distance))
                }),
                x_title: "time (s)",
                caption: "more time, lower speed (inverse)",
                color: Color::Blue,
            },
            sweeps.map(|s| &s.over_time),
            result.map(|r| r.time),
            charts[0],
            buf,
        );

        render_sweep_chart(
            &SweepChart {
                title: "Impact of distance on speed",
                fixed: result.map_or(PLACEHOLDER.to_string(), |r| {
                    format!("time fixed at {} s", format_plain(r.time))
                }),
                x_title: "distance (m)",
                caption: "more distance, higher speed (direct)",
                color: Color::Green,
            },
            sweeps.map(|s| &s.over_distance),
            result.map(|r| r.distance),
            charts[1],
            buf,
        );

        let legend = Paragraph::new(Span::styled(
            "(enter) calculate / (tab) field / (←→ pgup pgdn) adjust / (ctrl+r) reset / (f1) help / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        ));
        legend.render(chunks[2], buf);
    }
}

fn render_header(area: Rect, buf: &mut Buffer) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "VelocidadSim",
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  speed calculator  "),
        Span::styled("v = d / t", Style::default().fg(Color::Cyan)),
    ]));
    header.render(area, buf);
}

fn render_input_panel(app: &App, area: Rect, buf: &mut Buffer) {
    let error_height = if app.session.error.is_some() { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(error_height),
            Constraint::Min(0),
        ])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Inputs", bold()));
    let inner = block.inner(chunks[0]);
    block.render(chunks[0], buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_field(app, Field::Distance, rows[0], rows[1], buf);
    render_field(app, Field::Time, rows[3], rows[4], buf);

    if let Some(err) = app.session.error {
        let red = Style::default().fg(Color::Red);
        Paragraph::new(Span::styled(err.to_string(), red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(red)
                    .title(Span::styled("Validation error", red.add_modifier(Modifier::BOLD))),
            )
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);
    }

    Paragraph::new(vec![
        Line::from(Span::styled("v = d / t", bold().fg(Color::Cyan))).alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "Speed is directly proportional to distance and inversely proportional to time.",
            dim_italic(),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Formula"))
    .wrap(Wrap { trim: true })
    .render(chunks[2], buf);
}

fn render_field(app: &App, field: Field, line_area: Rect, gauge_area: Rect, buf: &mut Buffer) {
    let focused = app.session.focus == field;
    let text = app.session.inputs.get(field);
    let accent = Style::default().fg(Color::LightBlue);

    let mut spans = vec![
        Span::styled(if focused { "▸ " } else { "  " }, accent),
        Span::styled(format!("{}: ", field_label(field)), bold()),
        Span::raw(text.to_string()),
    ];
    if focused {
        spans.push(Span::styled(
            "█",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    spans.push(Span::styled(format!(" {}", field.unit()), dim_italic()));
    Paragraph::new(Line::from(spans)).render(line_area, buf);

    let (min, max) = field.slider_range();
    let ratio = ((field.slider_value(text) - min) / (max - min)).clamp(0.0, 1.0);
    LineGauge::default()
        .filled_style(if focused { accent } else { Style::default().fg(Color::Gray) })
        .label(format!("{}-{}", format_plain(min), format_plain(max)))
        .ratio(ratio)
        .render(gauge_area, buf);
}

fn render_result_card(app: &App, area: Rect, buf: &mut Buffer) {
    let result = app.session.result;
    let speed = result.map_or(PLACEHOLDER.to_string(), |r| format_fixed(r.speed, 2));

    let mut lines = vec![Line::from(vec![
        Span::styled(speed, bold().fg(Color::White)),
        Span::styled(" m/s", Style::default().fg(Color::Gray)),
    ])];

    if let Some(r) = result {
        if app.show_kmh {
            lines.push(Line::from(vec![
                Span::raw("Equivalent to "),
                Span::styled(format!("{} km/h", format_fixed(speed_kmh(r.speed), 2)), bold()),
            ]));
        }
        lines.push(Line::from(Span::styled(
            format!(
                "distance {} m  →  time {} s",
                format_plain(r.distance),
                format_plain(r.time)
            ),
            dim_italic(),
        )));
    }

    if app.session.dirty {
        lines.push(Line::from(Span::styled(
            "inputs changed, press Enter to recalculate",
            Style::default().fg(Color::Yellow),
        )));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("Calculated result", bold())),
        )
        .render(area, buf);
}

fn render_sweep_chart(
    chart: &SweepChart,
    series: Option<&SampledSeries>,
    current: Option<f64>,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(chart.title, bold()))
        .title_bottom(Span::styled(chart.caption, dim_italic()));
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    Paragraph::new(Span::styled(chart.fixed.as_str(), dim_italic())).render(rows[0], buf);

    let Some(series) = series else {
        Paragraph::new("no data yet")
            .alignment(Alignment::Center)
            .render(rows[1], buf);
        return;
    };

    let coords = series.coords();
    let bounds = compute_chart_bounds(&coords);
    let marker = current.map(|x| reference_line(x, &bounds));

    let mut datasets = vec![Dataset::default()
        .name("speed")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(chart.color))
        .data(&coords)];
    if let Some(marker) = marker.as_ref() {
        datasets.push(
            Dataset::default()
                .name("current")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(marker),
        );
    }

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(chart.x_title)
                .bounds(bounds.x)
                .labels(vec![
                    Span::styled(format_label(bounds.x[0]), bold()),
                    Span::styled(format_label(bounds.x[1]), bold()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("m/s")
                .bounds(bounds.y)
                .labels(vec![
                    Span::styled(format_label(bounds.y[0]), bold()),
                    Span::styled(format_label(bounds.y[1]), bold()),
                ]),
        )
        .render(rows[1], buf);
}

/// Help screen: key bindings and the formula
pub fn render_help(app: &App, area: Rect, buf: &mut Buffer) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let binding = |k: &'static str, what: &'static str| {
        Line::from(vec![Span::styled(format!("{k:>14}  "), key), Span::raw(what)])
    };

    let mut lines = vec![
        Line::from(Span::styled("Speed = distance / time", bold())),
        Line::from("Distance in metres, time in seconds, speed in m/s."),
    ];
    if app.show_kmh {
        lines.push(Line::from("km/h = m/s × 3.6"));
    }
    lines.extend([
        Line::from(""),
        binding("0-9 . e + -", "edit the focused field"),
        binding("backspace", "delete the last character"),
        binding("ctrl+u", "clear the focused field"),
        binding("tab / ↑ ↓", "switch between distance and time"),
        binding("← →", "adjust by 1"),
        binding("pgup / pgdn", "adjust by 10"),
        binding("enter", "calculate"),
        binding("ctrl+r", "reset to defaults"),
        binding("f1", "toggle this help"),
        binding("esc", "back / quit"),
    ]);

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("Help", bold())),
        )
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &App, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_calculator_shows_default_result() {
        let app = App::new(&Config::default());
        let out = rendered(&app, Rect::new(0, 0, 120, 32));

        assert!(out.contains("10.00 m/s"));
        assert!(out.contains("36.00 km/h"));
        assert!(out.contains("Impact of time on speed"));
        assert!(out.contains("Impact of distance on speed"));
        assert!(out.contains("distance fixed at 100 m"));
        assert!(!out.contains("Validation error"));
    }

    #[test]
    fn test_calculator_hides_kmh_when_disabled() {
        let cfg = Config {
            show_kmh: false,
            ..Config::default()
        };
        let out = rendered(&App::new(&cfg), Rect::new(0, 0, 120, 32));
        assert!(out.contains("10.00 m/s"));
        assert!(!out.contains("km/h"));
    }

    #[test]
    fn test_calculator_shows_error_and_placeholder() {
        let mut app = App::new(&Config::default());
        app.session.inputs.time = "-1".into();
        app.session.calculate();

        let out = rendered(&app, Rect::new(0, 0, 120, 32));
        assert!(out.contains("Validation error"));
        assert!(out.contains("Time must be greater"));
        assert!(out.contains("-- m/s"));
        // the last sweep is still charted
        assert!(!out.contains("no data yet"));
    }

    #[test]
    fn test_calculator_without_any_sweep() {
        let cfg = Config {
            distance: "abc".into(),
            ..Config::default()
        };
        let out = rendered(&App::new(&cfg), Rect::new(0, 0, 120, 32));
        assert!(out.contains("no data yet"));
        assert!(out.contains("Please enter valid"));
    }

    #[test]
    fn test_calculator_shows_dirty_hint() {
        let mut app = App::new(&Config::default());
        app.session.insert_char('5');
        let out = rendered(&app, Rect::new(0, 0, 120, 32));
        assert!(out.contains("press Enter"));
        assert!(out.contains("1005"));
    }

    #[test]
    fn test_calculator_small_area() {
        let app = App::new(&Config::default());
        let area = Rect::new(0, 0, 60, 20);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert!(*buffer.area() == area);
    }

    #[test]
    fn test_help_screen_lists_keys() {
        let app = App::new(&Config::default());
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        render_help(&app, area, &mut buffer);
        let out = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(out.contains("Speed = distance / time"));
        assert!(out.contains("reset to defaults"));
        assert!(out.contains("km/h = m/s"));
    }

    #[test]
    fn test_draw_follows_app_state() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(&Config::default());

        terminal.draw(|f| draw(&app, f)).unwrap();
        let out = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(out.contains("Calculated result"));

        app.state = crate::app::AppState::Help;
        terminal.draw(|f| draw(&app, f)).unwrap();
        let out = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(out.contains("toggle this help"));
        assert!(!out.contains("Calculated result"));
    }
}
