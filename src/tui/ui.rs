//! UI rendering for the `ViewApp`.

use super::app::ViewApp;
use super::events::{handle_key_event, Event, EventHandler};
use crate::config::TuiPreferences;
use crate::tui::theme::{colors, set_theme, Theme};
use crate::tui::widgets::{
    check_terminal_size, render_size_warning, Tree, MIN_HEIGHT, MIN_WIDTH,
};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io::{self, stdout};

/// Run the `ViewApp` TUI.
pub fn run_view_tui(app: &mut ViewApp) -> io::Result<()> {
    // Load theme preference
    let prefs = TuiPreferences::load();
    set_theme(Theme::from_name(&prefs.theme));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if app.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Event handler
    let events = EventHandler::default();

    // Main loop
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Resize(_, _) => {}
            Event::Tick => {
                app.tick += 1;
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    if app.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Main render function.
fn render(frame: &mut Frame, app: &mut ViewApp) {
    let area = frame.area();

    if check_terminal_size(area.width, area.height).is_err() {
        render_size_warning(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    // Main layout: header, content, status bar, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);

    if app.filter_input.is_some() {
        render_filter_input(frame, area, app);
    }
    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let scheme = colors();
    let tree = app.explorer.tree();
    let root_name = tree
        .root()
        .map(|id| tree.node(id).name.clone())
        .unwrap_or_else(|| "empty".to_string());

    let header_line = Line::from(vec![
        Span::styled(
            " archtree ",
            Style::default()
                .fg(scheme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(root_name, Style::default().fg(scheme.text)),
        Span::styled(
            format!("  {} nodes, depth {}", tree.len(), tree.max_depth()),
            Style::default().fg(scheme.text_muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(header_line), area);
}

fn render_content(frame: &mut Frame, area: Rect, app: &mut ViewApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_tree_panel(frame, chunks[0], app);
    render_detail_panel(frame, chunks[1], app);
}

fn render_tree_panel(frame: &mut Frame, area: Rect, app: &mut ViewApp) {
    let scheme = colors();
    let lines = app.visible_lines();

    let mut title = " Catalog ".to_string();
    if !app.explorer.criteria().is_empty() {
        let misses = app.not_found.len();
        title = format!(" Catalog (filtered, {misses} hidden) ");
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(scheme.border_focused))
        .title(title);
    let tree = Tree::new(&lines).block(block);
    frame.render_stateful_widget(tree, area, &mut app.tree_state);
}

fn render_detail_panel(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let scheme = colors();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(scheme.border))
        .title(" Details ");

    // The panel follows selection notifications; with nothing selected it
    // previews the node under the cursor.
    let name = app.detail.clone().or_else(|| app.cursor_node());
    let Some(name) = name else {
        frame.render_widget(
            Paragraph::new("No node").block(block),
            area,
        );
        return;
    };
    let Some(node) = app.explorer.tree().node_by_name(&name) else {
        frame.render_widget(Paragraph::new("No node").block(block), area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    let title_style = Style::default()
        .fg(scheme.primary)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(scheme.text_muted);

    lines.push(Line::from(Span::styled(node.name.clone(), title_style)));
    if app.explorer.is_active(&name) {
        lines.push(Line::from(Span::styled(
            "selected",
            Style::default().fg(scheme.active),
        )));
    }
    lines.push(Line::default());

    if let Some(s) = node.satisfaction {
        lines.push(Line::from(vec![
            Span::styled("satisfaction  ", label_style),
            Span::raw(format!("{s:.2}")),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("depth         ", label_style),
        Span::raw(node.depth.to_string()),
    ]));

    let list_row = |label: &str, values: &[String]| -> Line<'static> {
        let rendered = if values.is_empty() {
            "-".to_string()
        } else {
            values.join(", ")
        };
        Line::from(vec![
            Span::styled(format!("{label:<14}"), label_style),
            Span::raw(rendered),
        ])
    };

    lines.push(list_row("depends on", &node.depends_on));
    lines.push(list_row("dependents", &node.dependents));
    lines.push(list_row("related", &node.index.related_nodes));
    lines.push(Line::default());
    lines.push(list_row("technos", &node.index.technos));
    lines.push(list_row("hosts", &node.index.hosts));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let scheme = colors();
    let content = if let Some(msg) = &app.status_message {
        Span::styled(msg.clone(), Style::default().fg(scheme.warning))
    } else {
        let criteria = app.explorer.criteria();
        let mut parts = Vec::new();
        if !criteria.name.is_empty() {
            parts.push(format!("name~'{}'", criteria.name));
        }
        if !criteria.technos.is_empty() {
            parts.push(format!("technos={}", criteria.technos.join("+")));
        }
        if !criteria.hosts.is_empty() {
            parts.push(format!("hosts={}", criteria.hosts.join("+")));
        }
        if parts.is_empty() {
            Span::styled("no filters", Style::default().fg(scheme.text_muted))
        } else {
            Span::styled(
                format!("filters: {}", parts.join("  ")),
                Style::default().fg(scheme.accent),
            )
        }
    };
    frame.render_widget(Paragraph::new(Line::from(content)), area);
}

fn render_footer(frame: &mut Frame, area: Rect, _app: &ViewApp) {
    let scheme = colors();
    let hints = "j/k move  Space fold  Enter select  / name  t technos  h hosts  c clear  r reload  ? help  q quit";
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(scheme.text_muted))),
        area,
    );
}

fn render_filter_input(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let Some(field) = app.filter_input else {
        return;
    };
    let scheme = colors();
    let popup = centered_rect(50, 3, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(scheme.border_focused))
        .title(format!(" Filter by {} ", field.label()));
    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.input_buffer.clone()),
        Span::styled("█", Style::default().fg(scheme.accent)),
    ]))
    .block(block);
    frame.render_widget(input, popup);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let scheme = colors();
    let popup = centered_rect(56, 16, area);
    frame.render_widget(Clear, popup);

    let rows = [
        ("j/k, arrows", "move the cursor"),
        ("g / G", "first / last node"),
        ("Space", "expand or collapse the node"),
        ("e / w", "expand all / collapse all"),
        ("Enter", "select the node (again to unselect)"),
        ("Esc", "unselect"),
        ("/", "filter by name"),
        ("t", "filter by technologies (all must match)"),
        ("h", "filter by hosts (all must match)"),
        ("c", "clear filters"),
        ("r", "reload the payload from disk"),
        ("T", "toggle theme"),
        ("q, Ctrl+C", "quit"),
    ];
    let mut lines: Vec<Line> = rows
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("  {key:<12}"),
                    Style::default().fg(scheme.accent),
                ),
                Span::styled(*desc, Style::default().fg(scheme.text)),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "  Selecting a node fades everything unrelated to it.",
        Style::default().fg(scheme.text_muted),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(scheme.border_focused))
        .title(" Help ");
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Center a fixed-size rect inside `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_within_bounds() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 10, area);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 10);
        assert!(popup.x + popup.width <= area.width);
        assert!(popup.y + popup.height <= area.height);
    }

    #[test]
    fn test_centered_rect_clamps_to_small_area() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = centered_rect(50, 16, area);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 8);
    }
}
