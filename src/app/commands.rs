//! Command handlers - input editing, scrolling and popups

use crate::app::AppState;

/// Lines moved by PageUp / PageDown
const PAGE_LINES: u16 = 10;

impl AppState {
    // ========================
    // Input editing
    // ========================
    //
    // The input box is disabled while a turn is in flight: edits are dropped.

    pub fn move_cursor_left(&mut self) {
        if !self.can_accept_input() {
            return;
        }
        if self.cursor_position > 0 {
            self.cursor_position = self.input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if !self.can_accept_input() {
            return;
        }
        if self.cursor_position < self.input.len() {
            self.cursor_position = self.input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if !self.can_accept_input() {
            return;
        }
        if self.cursor_position <= self.input.len() {
            self.input.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn insert_newline(&mut self) {
        self.enter_char('\n');
    }

    pub fn delete_char(&mut self) {
        if !self.can_accept_input() || self.cursor_position == 0 {
            return;
        }
        let prev_pos = self.input[..self.cursor_position]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.input.remove(prev_pos);
        self.cursor_position = prev_pos;
    }

    // ========================
    // Transcript scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.scroll_back = self.scroll_back.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_back = self.scroll_back.saturating_sub(1);
    }

    pub fn page_up(&mut self) {
        self.scroll_back = self.scroll_back.saturating_add(PAGE_LINES);
    }

    pub fn page_down(&mut self) {
        self.scroll_back = self.scroll_back.saturating_sub(PAGE_LINES);
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
