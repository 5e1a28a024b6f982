//! Sorting and pagination for the call details table

use crate::types::LogEntry;
use std::cmp::Ordering;
use std::ops::Range;

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Default rows per page
pub const ITEMS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    CreatedAt,
    TokenName,
    Model,
    Time,
    PromptTokens,
    CompletionTokens,
    Quota,
}

impl SortColumn {
    /// Sortable columns in table order
    pub const ALL: [SortColumn; 7] = [
        SortColumn::CreatedAt,
        SortColumn::TokenName,
        SortColumn::Model,
        SortColumn::Time,
        SortColumn::PromptTokens,
        SortColumn::CompletionTokens,
        SortColumn::Quota,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SortColumn::CreatedAt => "Created At",
            SortColumn::TokenName => "Token Name",
            SortColumn::Model => "Model",
            SortColumn::Time => "Time",
            SortColumn::PromptTokens => "Prompt Tokens",
            SortColumn::CompletionTokens => "Completion Tokens",
            SortColumn::Quota => "Quota",
        }
    }

    pub fn compare(self, a: &LogEntry, b: &LogEntry) -> Ordering {
        match self {
            SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
            SortColumn::TokenName => locale_cmp(&a.token_name, &b.token_name),
            SortColumn::Model => locale_cmp(&a.model_name, &b.model_name),
            SortColumn::Time => a.use_time.cmp(&b.use_time),
            SortColumn::PromptTokens => a.prompt_tokens.cmp(&b.prompt_tokens),
            SortColumn::CompletionTokens => a.completion_tokens.cmp(&b.completion_tokens),
            SortColumn::Quota => a.quota.cmp(&b.quota),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Collation order of a character: punctuation and symbols, then digits, then letters
fn collation_key(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c)
}

/// Locale-style string order for the text columns.
///
/// Characters are case-folded and ranked punctuation < digits < letters, so
/// `gpt_4` sorts before `gpt4o`. Strings equal after folding put lowercase first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| {
        s.chars()
            .flat_map(char::to_lowercase)
            .map(collation_key)
            .collect::<Vec<_>>()
    };

    fold(a).cmp(&fold(b)).then_with(|| b.cmp(a))
}

/// Sort, page and selection state of the call table
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub sort: Option<(SortColumn, SortDirection)>,
    /// Index into `SortColumn::ALL` of the highlighted header
    pub header_cursor: usize,
    /// Zero-based
    pub page: usize,
    pub page_size: usize,
    /// Row index within the current page
    pub selected: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort: None,
            header_cursor: 0,
            page: 0,
            page_size: ITEMS_PER_PAGE,
            selected: 0,
        }
    }
}

impl TableState {
    /// Go back to the first row without touching sort or page size
    pub fn rewind(&mut self) {
        self.page = 0;
        self.selected = 0;
    }

    pub fn header_column(&self) -> SortColumn {
        SortColumn::ALL[self.header_cursor % SortColumn::ALL.len()]
    }

    pub fn move_header_left(&mut self) {
        self.header_cursor = self.header_cursor.saturating_sub(1);
    }

    pub fn move_header_right(&mut self) {
        self.header_cursor = (self.header_cursor + 1).min(SortColumn::ALL.len() - 1);
    }

    /// Ascending, then descending, then unsorted for the same column
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((column, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == column => None,
            _ => Some((column, SortDirection::Ascending)),
        };
        self.rewind();
    }

    /// Row order for `logs`; stable, so equal keys keep their API order
    pub fn sorted_indices(&self, logs: &[LogEntry]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..logs.len()).collect();

        if let Some((column, direction)) = self.sort {
            indices.sort_by(|&a, &b| {
                let ordering = column.compare(&logs[a], &logs[b]);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        indices
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// The pager is hidden when everything fits on one page
    pub fn shows_pager(&self, total: usize) -> bool {
        total > self.page_size
    }

    /// Positions (into the sorted order) visible on the current page
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let page = self.page.min(self.page_count(total) - 1);
        let start = page * self.page_size;
        start..(start + self.page_size).min(total)
    }

    pub fn next_page(&mut self, total: usize) {
        if self.page + 1 < self.page_count(total) {
            self.page += 1;
            self.selected = 0;
        }
    }

    pub fn previous_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.selected = 0;
        }
    }

    /// Jump to a one-based page number, clamped to the valid range
    pub fn jump_to(&mut self, page_number: usize, total: usize) {
        self.page = page_number.clamp(1, self.page_count(total)) - 1;
        self.selected = 0;
    }

    pub fn cycle_page_size(&mut self) {
        let index = PAGE_SIZE_OPTIONS
            .iter()
            .position(|&size| size == self.page_size)
            .map(|i| (i + 1) % PAGE_SIZE_OPTIONS.len())
            .unwrap_or(0);
        self.page_size = PAGE_SIZE_OPTIONS[index];
        self.rewind();
    }

    pub fn select_next(&mut self, total: usize) {
        let rows = self.page_range(total).len();
        if self.selected + 1 < rows {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// The entry under the cursor, taking sort order and page into account
    pub fn selected_entry<'a>(&self, logs: &'a [LogEntry]) -> Option<&'a LogEntry> {
        let order = self.sorted_indices(logs);
        let position = self.page_range(logs.len()).start + self.selected;
        order.get(position).map(|&i| &logs[i])
    }
}
