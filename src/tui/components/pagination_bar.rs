//! Pagination control
//!
//! `‹ Prev  1 2 [3] 4 5  Next ›` with a sliding window of page buttons.
//! Prev/Next are dimmed when there is nowhere to go. With zero pages (empty
//! result set) only the disabled arrows are shown.

use crate::engine::paginate::page_window;
use crate::engine::ViewSnapshot;
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Page buttons shown at once
pub const MAX_PAGE_BUTTONS: usize = 7;

/// One element of the bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageButton {
    Prev { enabled: bool },
    Page { number: usize, current: bool },
    Next { enabled: bool },
}

/// Lay out the bar for a snapshot
pub fn buttons(snapshot: &ViewSnapshot<'_>) -> Vec<PageButton> {
    let current = snapshot.current_page;
    let total = snapshot.total_pages;
    let mut out = vec![PageButton::Prev {
        enabled: snapshot.has_prev(),
    }];
    out.extend(
        page_window(current, total, MAX_PAGE_BUTTONS).map(|number| PageButton::Page {
            number,
            current: number == current,
        }),
    );
    out.push(PageButton::Next {
        enabled: snapshot.has_next(),
    });
    out
}

pub fn render(f: &mut Frame, area: Rect, snapshot: &ViewSnapshot<'_>, theme: &Theme) {
    let enabled = Style::default().fg(theme.foreground);
    let disabled = Style::default().fg(theme.muted);
    let current_style = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    for button in buttons(snapshot) {
        match button {
            PageButton::Prev { enabled: on } => {
                spans.push(Span::styled("‹ Prev ", if on { enabled } else { disabled }));
            }
            PageButton::Page { number, current } => {
                if current {
                    spans.push(Span::styled(format!(" [{}]", number), current_style));
                } else {
                    spans.push(Span::styled(format!(" {}", number), enabled));
                }
            }
            PageButton::Next { enabled: on } => {
                spans.push(Span::styled("  Next ›", if on { enabled } else { disabled }));
            }
        }
    }

    if snapshot.total_pages > 0 {
        spans.push(Span::styled(
            format!(
                "   page {} of {}",
                snapshot.current_page, snapshot.total_pages
            ),
            disabled,
        ));
    }

    let p = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .style(theme.base());
    f.render_widget(p, area);
}
