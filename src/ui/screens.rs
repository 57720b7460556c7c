//! Screen-local state for the customer view. The ledger screen's state lives
//! directly on `App`; the customer screen gets its own struct because it
//! derives and owns an ordering (sorted distinct names) that the store never
//! promises — `unique_customer_names` is an unordered set by contract.

use std::collections::HashSet;

/// Distinct customer names with a selection, shown beside the selected
/// customer's visit history.
pub(crate) struct CustomerScreen {
    pub(crate) names: Vec<String>,
    pub(crate) selected: usize,
}

impl CustomerScreen {
    /// Sort the derived name set so the listing is stable between refreshes.
    pub(crate) fn new(names: HashSet<String>) -> Self {
        let mut names: Vec<String> = names.into_iter().collect();
        names.sort();
        Self { names, selected: 0 }
    }

    /// Rebuild the name list after a mutation, keeping the same customer
    /// selected when they still exist.
    pub(crate) fn refresh(&mut self, names: HashSet<String>) {
        let current = self.current_name().map(str::to_string);
        let mut names: Vec<String> = names.into_iter().collect();
        names.sort();
        self.names = names;

        self.selected = current
            .and_then(|name| self.names.iter().position(|candidate| *candidate == name))
            .unwrap_or(0);
        self.ensure_in_bounds();
    }

    pub(crate) fn current_name(&self) -> Option<&str> {
        self.names.get(self.selected).map(String::as_str)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.names.is_empty() {
            return;
        }
        let len = self.names.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.names.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.names.is_empty() {
            self.selected = self.names.len() - 1;
        }
    }

    fn ensure_in_bounds(&mut self) {
        if self.names.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.names.len() {
            self.selected = self.names.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> HashSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn names_are_sorted_for_display() {
        let screen = CustomerScreen::new(names(&["Can", "Ayşe", "Bora"]));
        assert_eq!(screen.names, ["Ayşe", "Bora", "Can"]);
    }

    #[test]
    fn refresh_follows_the_selected_customer() {
        let mut screen = CustomerScreen::new(names(&["Ayşe", "Bora", "Can"]));
        screen.move_selection(2);
        assert_eq!(screen.current_name(), Some("Can"));

        screen.refresh(names(&["Ayşe", "Can"]));
        assert_eq!(screen.current_name(), Some("Can"));

        screen.refresh(names(&["Ayşe"]));
        assert_eq!(screen.current_name(), Some("Ayşe"));
    }

    #[test]
    fn selection_clamps_at_the_edges() {
        let mut screen = CustomerScreen::new(names(&["Ayşe", "Can"]));
        screen.move_selection(-3);
        assert_eq!(screen.selected, 0);
        screen.move_selection(10);
        assert_eq!(screen.selected, 1);
    }
}
