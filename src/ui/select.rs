//! Selection list state
//!
//! Cursor handling for the interactive selection prompt, kept free of any
//! terminal I/O.

use crossterm::event::{KeyCode, KeyModifiers};
use std::ops::Range;

/// Outcome of a key press on a selection list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAction {
    /// Keep reading keys
    Continue,
    /// The highlighted entry was chosen
    Chosen(usize),
    /// The user gave up
    Cancelled,
}

/// Cursor over a fixed list of candidates
#[derive(Debug, Clone)]
pub struct SelectState {
    len: usize,
    pub selected: usize,
    /// First candidate shown when the list is taller than the screen
    offset: usize,
}

impl SelectState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            selected: 0,
            offset: 0,
        }
    }

    /// Scroll so the selection is inside a window of `height` rows and
    /// return the candidates to draw
    pub fn visible(&mut self, height: usize) -> Range<usize> {
        let height = height.max(1).min(self.len);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
        self.offset = self.offset.min(self.len - height);
        self.offset..self.offset + height
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.selected = (self.selected + 1) % self.len;
        }
    }

    pub fn previous(&mut self) {
        if self.len > 0 {
            self.selected = (self.selected + self.len - 1) % self.len;
        }
    }

    /// Apply a key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> SelectAction {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return SelectAction::Cancelled;
        }

        match code {
            KeyCode::Esc | KeyCode::Char('q') => return SelectAction::Cancelled,
            KeyCode::Enter => return SelectAction::Chosen(self.selected),
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => self.next(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => self.previous(),
            KeyCode::Home => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = self.len.saturating_sub(1),
            // Quick jump to position 1-9
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                if idx < self.len {
                    self.selected = idx;
                }
            },
            _ => {},
        }
        SelectAction::Continue
    }
}

/// Cut `text` to at most `width` characters so it never wraps
pub fn fit_width(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut fitted: String = text.chars().take(width.saturating_sub(1)).collect();
    fitted.push('~');
    fitted
}

/// Interpret a typed answer: a 1-based index or an exact candidate
pub fn parse_answer(answer: &str, candidates: &[String]) -> Option<usize> {
    let answer = answer.trim();
    if let Ok(n) = answer.parse::<usize>() {
        if n >= 1 && n <= candidates.len() {
            return Some(n - 1);
        }
    }
    candidates.iter().position(|c| c == answer)
}
