//! TUI rendering using ratatui.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use formcall_form::FormView;

use super::app::{App, MessageDirection};

/// Draw the TUI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(8),    // Form + log
            Constraint::Length(1), // Status/Progress bar
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_tabs(frame, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    draw_form(frame, app, body[0]);
    draw_log(frame, app, body[1]);
    draw_status(frame, app, chunks[3]);
    draw_footer(frame, chunks[4]);
}

/// Draw the header bar.
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(" formcall - {} ", app.view().title()))
        .style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD));
    frame.render_widget(header, area);
}

/// Draw the screen tabs.
fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = app
        .screens
        .iter()
        .map(|view| {
            let marker = if view.is_busy() { " *" } else { "" };
            Line::from(format!("{}{}", view.title(), marker))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current)
        .block(Block::default().borders(Borders::ALL).title(" Screens "))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

/// Draw the visible form: subtitle, fields, buttons, result and error.
fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let show_error = !view.error().is_empty();

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(view.fields().iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Min(3));
    if show_error {
        constraints.push(Constraint::Length(5));
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let subtitle = Paragraph::new(format!(" {}", view.subtitle()))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(subtitle, rows[0]);

    for (index, field) in view.fields().iter().enumerate() {
        let focused = index == app.focused_field;
        let area = rows[1 + index];

        let (text, style) = if field.is_empty() {
            (field.placeholder.clone(), Style::default().fg(Color::DarkGray))
        } else {
            (field.value().to_string(), Style::default())
        };

        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let input = Paragraph::new(text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", field.label)),
        );
        frame.render_widget(input, area);

        if focused {
            let len = u16::try_from(field.value().chars().count()).unwrap_or(u16::MAX);
            let cursor_x = area.x.saturating_add(1).saturating_add(len);
            frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    let button_row = rows[1 + view.fields().len()];
    draw_buttons(frame, view, app.selected_action, button_row);

    let result_area = rows[2 + view.fields().len()];
    let result = Paragraph::new(view.result().to_string())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Result "));
    frame.render_widget(result, result_area);

    if show_error {
        let error_area = rows[3 + view.fields().len()];
        let error = Paragraph::new(view.error().to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error "),
            );
        frame.render_widget(error, error_area);
    }
}

/// Draw the buttons; all are greyed out while the view is busy.
fn draw_buttons(frame: &mut Frame, view: &FormView, selected: usize, area: Rect) {
    let count = view.actions().len().max(1) as u32;
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    let busy = view.is_busy();
    for (index, action) in view.actions().iter().enumerate() {
        let style = if busy {
            Style::default().bg(Color::DarkGray).fg(Color::Gray)
        } else if index == selected {
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Blue)
        };

        let button = Paragraph::new(action.label_for(busy).to_string())
            .style(style)
            .centered()
            .block(Block::default().borders(Borders::ALL).title(format!(" F{} ", index + 1)));
        frame.render_widget(button, cells[index]);
    }
}

/// Draw the activity log.
fn draw_log(frame: &mut Frame, app: &App, area: Rect) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let start = app.messages.len().saturating_sub(inner_height);

    let items: Vec<ListItem> = app.messages[start..]
        .iter()
        .map(|msg| {
            let style = match msg.direction {
                MessageDirection::Sent => Style::default().fg(Color::Cyan),
                MessageDirection::Received => Style::default().fg(Color::Green),
                MessageDirection::System => Style::default().fg(Color::Yellow),
            };

            let prefix = match msg.direction {
                MessageDirection::Sent => format!("[{}] > ", msg.screen),
                MessageDirection::Received => format!("[{}] ", msg.screen),
                MessageDirection::System => String::new(),
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", msg.timestamp.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{}{}", prefix, msg.content), style),
            ]))
        })
        .collect();

    let log = List::new(items).block(Block::default().borders(Borders::ALL).title(" Activity "));
    frame.render_widget(log, area);
}

/// Draw the status/progress bar.
fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    if app.any_busy() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
            .ratio(app.progress)
            .label(" [working...] ");
        frame.render_widget(gauge, area);
    } else {
        let status_text = match app.view().settled_at() {
            Some(at) => format!(" Ready - last call settled {} ", at.format("%H:%M:%S")),
            None => " Ready ".to_string(),
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        frame.render_widget(status, area);
    }
}

/// Draw the footer with keybindings.
fn draw_footer(frame: &mut Frame, area: Rect) {
    let keys = " Tab: screen | Up/Down: field | Left/Right/F1-F2: button | Enter: press | Ctrl+R: reset | Esc: quit ";
    let footer = Paragraph::new(keys).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcall_commands::CommandRegistry;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use tokio::runtime::Handle;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_draw_calculator() {
        let app = App::new(Arc::new(CommandRegistry::new()), Handle::current());
        let screen = render(&app);

        assert!(screen.contains("Python Addition Calculator"));
        assert!(screen.contains("Enter first number"));
        assert!(screen.contains("Calculate Sum"));
        assert!(!screen.contains(" Error "));
    }

    #[tokio::test]
    async fn test_draw_busy_and_error() {
        let mut app = App::new(Arc::new(CommandRegistry::new()), Handle::current());
        app.submit();
        let screen = render(&app);
        assert!(screen.contains(" Error "));
        assert!(screen.contains("Please enter both numbers"));

        app.screens[0].set_field(0, "2");
        app.screens[0].set_field(1, "3");
        app.screens[0].begin_submit(0);
        let screen = render(&app);
        assert!(screen.contains("Calculating..."));
        assert!(screen.contains("[working...]"));
    }

    #[tokio::test]
    async fn test_draw_very_long_field_value() {
        let mut app = App::new(Arc::new(CommandRegistry::new()), Handle::current());
        assert!(app.select_screen("commands"));
        app.screens[1].set_field(0, "a".repeat(70_000));

        let screen = render(&app);
        assert!(screen.contains("aaaa"));
        assert!(screen.contains("Add with name"));
    }
}
