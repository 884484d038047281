//! A text input with a filtered dropdown, shared by the user picker and the
//! reason picker.
//!
//! [`Typeahead`] only holds interaction state. Options are borrowed from the
//! caller on every call, so the list always reflects the current directory
//! or catalog, and committing a choice goes through a caller-supplied
//! callback.

use std::marker::PhantomData;

/// Something a [`Typeahead`] can list.
pub trait TypeaheadOption {
    /// Text shown for the option; also the sort key and the exact-match key.
    fn label(&self) -> &str;

    /// Whether the option should stay listed for `needle`, which the caller
    /// has already lower-cased.
    fn matches(&self, needle: &str) -> bool {
        self.label().to_lowercase().contains(needle)
    }

    /// Options listed regardless of the search text.
    fn always_listed(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOrder {
    /// Case-insensitive by label; equal labels keep source order.
    Alphabetical,
    /// Source order.
    Insertion,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeaheadState {
    #[default]
    Closed,
    Open {
        search: String,
        highlight: Option<usize>,
    },
}

#[derive(Debug, Clone)]
pub struct Typeahead<T> {
    state: TypeaheadState,
    order: OptionOrder,
    exact_match_on_enter: bool,
    _options: PhantomData<fn() -> T>,
}

impl<T: TypeaheadOption> Typeahead<T> {
    pub fn new(order: OptionOrder) -> Self {
        Self {
            state: TypeaheadState::Closed,
            order,
            exact_match_on_enter: false,
            _options: PhantomData,
        }
    }

    /// On Enter without a highlighted option, commit the option whose label
    /// equals the search text, ignoring case.
    pub fn with_exact_match_on_enter(mut self) -> Self {
        self.exact_match_on_enter = true;
        self
    }

    pub fn state(&self) -> &TypeaheadState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, TypeaheadState::Open { .. })
    }

    pub fn search(&self) -> &str {
        match &self.state {
            TypeaheadState::Open { search, .. } => search,
            TypeaheadState::Closed => "",
        }
    }

    pub fn highlight(&self) -> Option<usize> {
        match self.state {
            TypeaheadState::Open { highlight, .. } => highlight,
            TypeaheadState::Closed => None,
        }
    }

    /// Opens with nothing highlighted; an open dropdown keeps its state.
    pub fn open(&mut self) {
        if !self.is_open() {
            self.state = TypeaheadState::Open {
                search: String::new(),
                highlight: None,
            };
        }
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Closing also forgets the search text and highlight.
    pub fn close(&mut self) {
        self.state = TypeaheadState::Closed;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.state = TypeaheadState::Open {
            search: text.into(),
            highlight: None,
        };
    }

    /// The options currently listed, in display order.
    pub fn visible<'o>(&self, source: &'o [T]) -> Vec<&'o T> {
        let needle = self.search().to_lowercase();
        let mut listed: Vec<&T> = source
            .iter()
            .filter(|option| option.always_listed() || option.matches(&needle))
            .collect();
        if self.order == OptionOrder::Alphabetical {
            listed.sort_by_cached_key(|option| option.label().to_lowercase());
        }
        listed
    }

    pub fn highlighted<'o>(&self, source: &'o [T]) -> Option<&'o T> {
        let index = self.highlight()?;
        self.visible(source).get(index).copied()
    }

    /// Moves the highlight down one option, stopping at the last one.
    pub fn highlight_next(&mut self, source: &[T]) {
        let count = self.visible(source).len();
        if let TypeaheadState::Open { highlight, .. } = &mut self.state {
            *highlight = match (*highlight, count) {
                (_, 0) => None,
                (None, _) => Some(0),
                (Some(i), count) => Some((i + 1).min(count - 1)),
            };
        }
    }

    /// Moves the highlight up one option, stopping at the first one.
    pub fn highlight_previous(&mut self, source: &[T]) {
        let count = self.visible(source).len();
        if let TypeaheadState::Open { highlight, .. } = &mut self.state {
            *highlight = match (*highlight, count) {
                (_, 0) => None,
                (None, _) => Some(0),
                (Some(i), count) => Some(i.saturating_sub(1).min(count - 1)),
            };
        }
    }

    /// Commits `option` and closes.
    pub fn select(&mut self, option: &T, commit: impl FnOnce(&T)) {
        commit(option);
        self.close();
    }

    /// Commits the highlighted option, or the exact label match when enabled.
    /// Returns whether anything was committed; the dropdown stays open
    /// otherwise.
    pub fn enter(&mut self, source: &[T], commit: impl FnOnce(&T)) -> bool {
        if !self.is_open() {
            return false;
        }
        let chosen = match self.highlighted(source) {
            Some(option) => Some(option),
            None if self.exact_match_on_enter => {
                let needle = self.search().to_lowercase();
                source
                    .iter()
                    .find(|option| option.label().to_lowercase() == needle)
            }
            None => None,
        };
        match chosen {
            Some(option) => {
                self.select(option, commit);
                true
            }
            None => false,
        }
    }
}
