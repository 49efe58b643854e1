use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use super::app::{App, InputMode};
use crate::internal::highlight::{Segment, highlight};
use crate::internal::share::ShareTarget;
use crate::utils::theme_loader::TuiTheme;

pub fn draw(app: &mut App, f: &mut Frame) {
    let start = std::time::Instant::now();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_top_bar(app, f, chunks[0]);
    render_list(app, f, chunks[1]);
    render_status_bar(app, f, chunks[2]);

    // The detail overlay mounts whenever an article is opened.
    if app.opened_article().is_some() {
        render_detail(app, f);
    }

    if app.share_menu.is_some() {
        render_share_menu(app, f);
    }

    if app.input_mode == InputMode::Search {
        render_search_overlay(app, f);
    }

    if app.notification.is_some() {
        render_notification(app, f);
    }

    if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
        tracing::debug!(elapsed = ?start.elapsed(), "render.draw");
    }
}

/// Map highlighter segments onto styled spans: plain segments keep `base`,
/// matched segments get the theme's highlight colors.
fn highlighted_spans(text: &str, term: &str, base: Style, theme: &TuiTheme) -> Vec<Span<'static>> {
    highlight(text, term)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(text) => Span::styled(text, base),
            Segment::Matched(text) => Span::styled(
                text,
                Style::default()
                    .bg(theme.highlight_bg)
                    .fg(theme.highlight_fg),
            ),
        })
        .collect()
}

/// Wrap summary text to the card width, keeping at most `max_lines` lines.
/// Matches spanning a wrap point are highlighted per line, the same accepted
/// boundary as per-paragraph highlighting in the detail view.
pub fn wrap_summary(text: &str, width: u16, max_lines: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    textwrap::wrap(text, width as usize)
        .into_iter()
        .take(max_lines)
        .map(|line| line.into_owned())
        .collect()
}

fn render_top_bar(app: &App, f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(14)])
        .split(area);

    let identity = format!("{} - {}", app.config.site.name, app.config.site.tagline);
    let left = Paragraph::new(identity).style(
        Style::default()
            .bg(app.theme.background)
            .fg(app.theme.foreground)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(left, chunks[0]);

    let right = Paragraph::new(format!("Theme: {}", app.theme_preference.mode()))
        .alignment(Alignment::Right)
        .style(
            Style::default()
                .bg(app.theme.background)
                .fg(app.theme.meta),
        );
    f.render_widget(right, chunks[1]);
}

fn render_list(app: &mut App, f: &mut Frame, area: Rect) {
    if app.is_no_results() {
        render_no_results(app, f, area);
        return;
    }

    let visible = app.visible_indices();
    let term = app.search_input.clone();
    let excerpt_budget = app.config.ui.excerpt_length;
    let card_width = area.width.saturating_sub(4).max(20);

    let items: Vec<ListItem> = visible
        .iter()
        .map(|&index| {
            let article = &app.articles[index];

            let title_line = Line::from(highlighted_spans(
                &article.title,
                &term,
                Style::default()
                    .fg(app.theme.foreground)
                    .add_modifier(Modifier::BOLD),
                &app.theme,
            ));

            let meta_line = Line::from(vec![
                Span::styled(article.date.clone(), Style::default().fg(app.theme.meta)),
                Span::styled(" | by ", Style::default().fg(app.theme.border)),
                Span::styled(article.author.clone(), Style::default().fg(app.theme.author)),
            ]);

            let summary = article.summary(excerpt_budget);
            let mut lines = vec![title_line, meta_line];
            for wrapped in wrap_summary(&summary, card_width, 2) {
                lines.push(Line::from(highlighted_spans(
                    &wrapped,
                    &term,
                    Style::default().fg(app.theme.meta),
                    &app.theme,
                )));
            }
            lines.push(Line::from(""));

            ListItem::new(lines)
        })
        .collect();

    let title = match term.is_empty() {
        true => format!(
            "{} v{} - {} articles",
            app.config.site.name,
            app.app_version,
            visible.len()
        ),
        false => {
            let noun = match visible.len() {
                1 => "post",
                _ => "posts",
            };
            format!(
                "{} v{} - {} {} found for '{}'",
                app.config.site.name,
                app.app_version,
                visible.len(),
                noun,
                term
            )
        }
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::new(
                    app.config.ui.padding.horizontal,
                    app.config.ui.padding.horizontal,
                    app.config.ui.padding.vertical,
                    app.config.ui.padding.vertical,
                ))
                .border_style(Style::default().fg(app.theme.border))
                .title(title)
                .title_style(Style::default().fg(app.theme.foreground)),
        )
        .style(Style::default().bg(app.theme.background))
        .highlight_style(
            Style::default()
                .bg(app.theme.selection_bg)
                .fg(app.theme.selection_fg)
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_no_results(app: &mut App, f: &mut Frame, area: Rect) {
    let term = app.search_input.clone();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No articles found",
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Try adjusting your search terms,",
            Style::default().fg(app.theme.meta),
        )),
        Line::from(Span::styled(
            "or press C to show all articles.",
            Style::default().fg(app.theme.meta),
        )),
    ];

    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border))
                .title(format!(
                    "{} v{} - 0 posts found for '{}'",
                    app.config.site.name, app.app_version, term
                ))
                .title_style(Style::default().fg(app.theme.foreground)),
        );
    f.render_widget(p, area);
}

fn render_detail(app: &App, f: &mut Frame) {
    let Some(article) = app.opened_article() else {
        return;
    };
    let term = &app.search_input;

    let area = f.area();
    let popup_width = (area.width.saturating_mul(4) / 5).max(20).min(area.width);
    let popup_height = (area.height.saturating_mul(4) / 5).max(8).min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(highlighted_spans(
        &article.title,
        term,
        Style::default()
            .fg(app.theme.foreground)
            .add_modifier(Modifier::BOLD),
        &app.theme,
    )));

    lines.push(Line::from(vec![
        Span::styled(article.date.clone(), Style::default().fg(app.theme.meta)),
        Span::styled(" | by ", Style::default().fg(app.theme.border)),
        Span::styled(article.author.clone(), Style::default().fg(app.theme.author)),
    ]));

    // Tags are highlighted one by one; a match can never span two tags.
    let mut tag_spans: Vec<Span> = Vec::new();
    for tag in &article.tags {
        tag_spans.push(Span::styled("[", Style::default().fg(app.theme.border)));
        tag_spans.extend(highlighted_spans(
            tag,
            term,
            Style::default().fg(app.theme.tag),
            &app.theme,
        ));
        tag_spans.push(Span::styled("] ", Style::default().fg(app.theme.border)));
    }
    if !tag_spans.is_empty() {
        lines.push(Line::from(tag_spans));
    }

    // Paragraphs are split on the blank-line delimiter and highlighted
    // independently, so a match spanning two paragraphs is never one unit.
    for paragraph in article.paragraphs() {
        lines.push(Line::from(""));
        lines.push(Line::from(highlighted_spans(
            paragraph,
            term,
            Style::default().fg(app.theme.foreground),
            &app.theme,
        )));
    }

    let p = Paragraph::new(lines)
        .style(
            Style::default()
                .fg(app.theme.foreground)
                .bg(app.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::new(
                    app.config.ui.padding.horizontal.max(1),
                    app.config.ui.padding.horizontal.max(1),
                    app.config.ui.padding.vertical,
                    app.config.ui.padding.vertical,
                ))
                .border_style(Style::default().fg(app.theme.border))
                .title(" Article ")
                .title_style(Style::default().fg(app.theme.foreground)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll.min(u16::MAX as usize) as u16, 0));

    f.render_widget(Clear, popup_area);
    f.render_widget(p, popup_area);
}

fn render_share_menu(app: &App, f: &mut Frame) {
    let Some(selected) = app.share_menu else {
        return;
    };

    let area = f.area();
    let popup_width = 32.min(area.width.saturating_sub(4));
    let popup_height = (ShareTarget::ALL.len() as u16) + 2;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    let items: Vec<ListItem> = ShareTarget::ALL
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let style = match i == selected {
                true => Style::default()
                    .fg(app.theme.selection_fg)
                    .bg(app.theme.selection_bg)
                    .add_modifier(Modifier::BOLD),
                false => Style::default().fg(app.theme.foreground),
            };
            ListItem::new(format!(" {}", target)).style(style)
        })
        .collect();

    let domain = crate::utils::url::extract_domain(&app.config.site.base_url)
        .unwrap_or_else(|| app.config.site.base_url.clone());

    let list = List::new(items)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.selection_bg))
                .title(format!(" Share ({}) ", domain))
                .title_style(Style::default().fg(app.theme.foreground)),
        );

    f.render_widget(Clear, popup_area);
    f.render_widget(list, popup_area);
}

fn render_search_overlay(app: &App, f: &mut Frame) {
    let area = f.area();

    let search_width = 60.min(area.width.saturating_sub(4));
    let search_height = 3;

    let search_x = (area.width.saturating_sub(search_width)) / 2;
    let search_y = (area.height.saturating_sub(search_height)) / 2;

    let search_area = Rect::new(search_x, search_y, search_width, search_height);

    // Display the search query with cursor
    let display_text = format!("{}█", app.search_input);

    let search_box = Paragraph::new(display_text)
        .style(
            Style::default()
                .fg(app.theme.foreground)
                .bg(app.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.selection_bg))
                .title(" Search (Enter: keep, Esc: cancel) ")
                .title_style(
                    Style::default()
                        .fg(app.theme.selection_fg)
                        .bg(app.theme.selection_bg)
                        .add_modifier(Modifier::BOLD),
                ),
        );

    f.render_widget(Clear, search_area);
    f.render_widget(search_box, search_area);
}

fn render_notification(app: &App, f: &mut Frame) {
    if let Some(notification) = &app.notification {
        let area = f.area();

        let popup_width = (notification.message.len() as u16 + 4).min(area.width.saturating_sub(4));
        let popup_height = 3;

        let popup_x = (area.width.saturating_sub(popup_width)) / 2;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2;

        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        let popup = Paragraph::new(notification.message.as_str())
            .style(
                Style::default()
                    .bg(app.theme.selection_bg)
                    .fg(app.theme.selection_fg)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border))
                    .title("Info")
                    .title_style(Style::default().fg(app.theme.foreground)),
            )
            .alignment(Alignment::Center);

        f.render_widget(Clear, popup_area);
        f.render_widget(popup, popup_area);
    }
}

fn render_status_bar(app: &App, f: &mut Frame, area: Rect) {
    let status = if app.input_mode == InputMode::Search {
        "Search: Type to filter | Enter: Keep | Esc: Cancel".to_string()
    } else if app.share_menu.is_some() {
        "j/k: Choose | Enter: Share | Esc: Close".to_string()
    } else if app.opened_article().is_some() {
        "Esc/q: Back to search | j/k: Scroll | s: Share | t: Theme".to_string()
    } else {
        let filter_hint = match app.search_input.is_empty() {
            true => String::new(),
            false => format!(" | Filter: {} | C: Clear", app.search_input),
        };
        format!(
            "/: Search | j/k: Nav | Enter: Open | t: Theme | q: Quit{}",
            filter_hint
        )
    };

    let p = Paragraph::new(status).style(
        Style::default()
            .bg(app.theme.selection_bg)
            .fg(app.theme.selection_fg),
    );
    f.render_widget(p, area);
}
