//! Details screen and poster gallery

use libcinescope::ImageUrls;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::DetailsState;
use crate::ui::{centered_rect, color, poster_label};

pub fn render(frame: &mut Frame, area: Rect, details: &DetailsState, images: &ImageUrls, colors: bool) {
    let block = Block::default().title(" Details ").borders(Borders::ALL);

    let Some(movie) = details.movie.ready().filter(|_| !details.is_loading()) else {
        let loading = Paragraph::new("...Loading")
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(loading, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Percentage(40), Constraint::Length(1)])
        .split(inner);

    let mut lines = Vec::new();
    if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(Line::from(Span::styled(
            tagline.to_string(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    let poster = poster_label(images, movie.poster_path.as_deref());
    lines.push(Line::from(vec![
        Span::styled("Poster: ", color(colors, Color::Gray)),
        Span::styled(poster, color(colors, Color::Blue).add_modifier(Modifier::UNDERLINED)),
    ]));
    lines.push(Line::from(""));

    let mut title = vec![Span::styled(
        movie.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(date) = movie.release_date.as_deref().filter(|d| !d.is_empty()) {
        title.push(Span::styled(format!("  {}", date), color(colors, Color::Gray)));
    }
    lines.push(Line::from(title));

    let rating = movie
        .vote_average
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "-".to_string());
    lines.push(Line::from(vec![
        Span::styled("Rating: ", color(colors, Color::Gray)),
        Span::styled(rating, color(colors, Color::Yellow)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Overview",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(movie.overview.clone()));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);
    render_related(frame, chunks[1], details, images, colors);

    let hints = if details.posters().is_empty() {
        "Enter: Open related | Esc: Back | F1: Help"
    } else {
        "p: Posters | Enter: Open related | Esc: Back | F1: Help"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, color(colors, Color::Gray))),
        chunks[2],
    );

    if details.gallery_open {
        render_gallery(frame, area, details, images, colors);
    }
}

fn render_related(frame: &mut Frame, area: Rect, details: &DetailsState, images: &ImageUrls, colors: bool) {
    let block = Block::default().title(" Related ").borders(Borders::TOP);
    let related = details.related_movies();

    if related.is_empty() {
        let empty = Paragraph::new("No related movies found.").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let rows = usize::from(area.height.saturating_sub(1)).max(1);
    let offset = (details.related_selected + 1).saturating_sub(rows);

    let lines: Vec<Line> = related
        .iter()
        .enumerate()
        .skip(offset)
        .take(rows)
        .map(|(index, movie)| {
            let poster = Span::styled(
                format!("  {}", poster_label(images, movie.poster_path.as_deref())),
                color(colors, Color::DarkGray),
            );
            let title = if index == details.related_selected {
                Span::styled(
                    format!("> {}", movie.title),
                    color(colors, Color::Yellow).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(format!("  {}", movie.title))
            };
            Line::from(vec![title, poster])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Modal listing every poster URL, the selected one highlighted
fn render_gallery(frame: &mut Frame, area: Rect, details: &DetailsState, images: &ImageUrls, colors: bool) {
    let popup_area = centered_rect(80, 70, area);
    let posters = details.posters();

    let mut lines = vec![
        Line::from(format!("Poster {} of {}", details.gallery_selected + 1, posters.len())),
        Line::from(""),
    ];
    for (index, poster) in posters.iter().enumerate() {
        let url = images.url(&poster.file_path);
        let line = if index == details.gallery_selected {
            Line::from(Span::styled(
                format!("> {}", url),
                color(colors, Color::Yellow).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(format!("  {}", url))
        };
        lines.push(line);
    }

    let rows = usize::from(popup_area.height.saturating_sub(4));
    let scroll = (details.gallery_selected + 3).saturating_sub(rows);

    let gallery = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Posters (Left/Right, Esc to close) ")
                .borders(Borders::ALL)
                .border_style(color(colors, Color::Cyan)),
        )
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(gallery, popup_area);
}
