//! Single-line text input
//!
//! Backs the search box and the two editor fields. The cursor is a char
//! index, so multi-byte input edits cleanly. An optional `max_len` caps the
//! number of chars; keys that would exceed it are swallowed.

use crate::theme::Theme;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position in chars
    cursor: usize,
    max_len: Option<usize>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Replace the contents and move the cursor to the end
    ///
    /// Values loaded from outside (a fetched record) are taken whole even
    /// if longer than `max_len`; the cap only applies to typing.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn insert(&mut self, c: char) -> bool {
        if self.max_len.is_some_and(|max| self.char_count() >= max) {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        true
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.char_count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    /// Render as a line; the cursor cell is reversed when focused
    pub fn line(&self, theme: &Theme, focused: bool) -> Line<'static> {
        let style = Style::default().fg(theme.foreground);
        if !focused {
            return Line::from(Span::styled(self.value.clone(), style));
        }

        let at = self.byte_index(self.cursor);
        let (before, rest) = self.value.split_at(at);
        let mut rest_chars = rest.chars();
        let under = rest_chars.next().map(String::from).unwrap_or_else(|| " ".into());
        let after: String = rest_chars.collect();

        Line::from(vec![
            Span::styled(before.to_string(), style),
            Span::styled(under, style.add_modifier(Modifier::REVERSED)),
            Span::styled(after, style),
        ])
    }
}

impl Interactive for TextInput {
    /// Returns `Handled::Yes` for editing keys, even when they change
    /// nothing (backspace at start, typing past `max_len`).
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                self.clear();
                Handled::Yes
            }
            KeyCode::Char(_) if ctrl => Handled::No,
            KeyCode::Char(c) => {
                self.insert(c);
                Handled::Yes
            }
            KeyCode::Backspace => {
                self.backspace();
                Handled::Yes
            }
            KeyCode::Delete => {
                self.delete();
                Handled::Yes
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Handled::Yes
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                Handled::Yes
            }
            KeyCode::Home => {
                self.cursor = 0;
                Handled::Yes
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("←→:move  Ctrl+U:clear")
    }
}
