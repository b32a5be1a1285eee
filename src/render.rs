use marksearch_search::LineMatch;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::viewer::Viewer;

const ERROR_COLOR: Color = Color::Rgb(250, 122, 122);
const ACCENT_COLOR: Color = Color::Rgb(120, 160, 250);

pub fn ui(f: &mut Frame, viewer: &Viewer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_input(f, viewer, chunks[0]);
    render_status(f, viewer, chunks[1]);
    render_results(f, viewer, chunks[2]);

    let help_text =
        " Esc: Quit | Alt-c: Case | Alt-w: Word | Alt-r: Regex | PgUp/PgDn: Page | Ctrl-u: Clear ";
    let help = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}

fn render_input(f: &mut Frame, viewer: &Viewer, area: Rect) {
    let has_error = viewer.state.error().is_some();
    let options = viewer.state.options();

    let flag = |label: &'static str, enabled: bool| {
        if enabled {
            Span::styled(label, Style::default().fg(ACCENT_COLOR).bold())
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    };
    let title = Line::from(vec![
        Span::raw(format!(" {} ", viewer.title)),
        flag("[Aa]", options.case_sensitive),
        Span::raw(" "),
        flag("[ab]", options.whole_word),
        Span::raw(" "),
        flag("[.*]", options.regex),
        Span::raw(" "),
    ]);

    let input = Paragraph::new(viewer.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if has_error {
                Style::default().fg(ERROR_COLOR)
            } else {
                Style::default()
            })
            .title(title),
    );
    f.render_widget(input, area);

    let cursor_x = area.x + 1 + viewer.input.chars().count() as u16;
    f.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
}

fn render_status(f: &mut Frame, viewer: &Viewer, area: Rect) {
    let state = &viewer.state;
    let mut status = state.summary();
    if viewer.is_search_pending() {
        status.push_str(" …");
    }

    let style = if state.error().is_some() {
        Style::default().fg(ERROR_COLOR)
    } else {
        Style::default().fg(Color::Gray)
    };
    f.render_widget(Paragraph::new(format!(" {}", status)).style(style), area);
}

fn render_results(f: &mut Frame, viewer: &Viewer, area: Rect) {
    let state = &viewer.state;

    let mut block = Block::default().borders(Borders::ALL).title(" Results ");
    if state.result().has_pagination() {
        block = block.title_bottom(
            Line::from(format!(
                " Page {} of {} ",
                state.current_page(),
                state.page_count()
            ))
            .right_aligned(),
        );
    }

    if let Some(error) = state.error() {
        let prompt = Paragraph::new(format!("{}. Fix the pattern to see matches.", error))
            .style(Style::default().fg(ERROR_COLOR))
            .block(block);
        f.render_widget(prompt, area);
        return;
    }

    let items: Vec<ListItem> = state.visible_matches().iter().map(result_item).collect();
    f.render_widget(List::new(items).block(block), area);
}

fn result_item(line_match: &LineMatch) -> ListItem<'_> {
    let occurrences = if line_match.occurrences > 1 {
        format!(" ×{}", line_match.occurrences)
    } else {
        String::new()
    };

    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:>6}", line_match.line_number),
            Style::default().fg(ACCENT_COLOR),
        ),
        Span::styled(format!("{:<4}", occurrences), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::raw(line_match.preview.as_str()),
    ]))
}
