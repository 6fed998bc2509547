use std::collections::HashSet;
use std::hash::Hash;

/// Checked rows of the current page.
///
/// The checked set is always a subset of the page ids: toggling an id that
/// is not on the page is ignored, and replacing the page clears the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id: Eq + Hash + Clone> {
    page_ids: Vec<Id>,
    checked: HashSet<Id>,
}

impl<Id: Eq + Hash + Clone> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            page_ids: Vec::new(),
            checked: HashSet::new(),
        }
    }
}

impl<Id: Eq + Hash + Clone> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// New page rendered: remember its ids and drop the previous selection.
    pub fn replace_page(&mut self, page_ids: Vec<Id>) {
        self.page_ids = page_ids;
        self.checked.clear();
    }

    pub fn toggle(&mut self, id: &Id, checked: bool) {
        if !self.page_ids.contains(id) {
            return;
        }
        if checked {
            self.checked.insert(id.clone());
        } else {
            self.checked.remove(id);
        }
    }

    /// Sets or clears every id of the current page
    pub fn toggle_all(&mut self, checked: bool) {
        if checked {
            self.checked = self.page_ids.iter().cloned().collect();
        } else {
            self.checked.clear();
        }
    }

    /// True iff the page is non-empty and every id on it is checked
    pub fn select_all(&self) -> bool {
        !self.page_ids.is_empty() && self.page_ids.iter().all(|id| self.checked.contains(id))
    }

    /// Some but not all rows are checked
    pub fn is_partial(&self) -> bool {
        !self.checked.is_empty() && !self.select_all()
    }

    pub fn is_checked(&self, id: &Id) -> bool {
        self.checked.contains(id)
    }

    /// Checked ids in page order
    pub fn checked_ids(&self) -> Vec<Id> {
        self.page_ids
            .iter()
            .filter(|id| self.checked.contains(*id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    pub fn clear(&mut self) {
        self.checked.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: &[i64]) -> Selection<i64> {
        let mut selection = Selection::new();
        selection.replace_page(ids.to_vec());
        selection
    }

    #[test]
    fn select_all_then_deselect_one() {
        let mut selection = page(&[1, 2, 3, 4]);
        selection.toggle_all(true);
        assert!(selection.select_all());

        selection.toggle(&3, false);
        assert!(!selection.select_all());
        assert!(selection.is_partial());
        assert_eq!(selection.checked_ids(), vec![1, 2, 4]);
    }

    #[test]
    fn empty_page_is_never_all_selected() {
        let mut selection = page(&[]);
        selection.toggle_all(true);
        assert!(!selection.select_all());
        assert!(selection.is_empty());
    }

    #[test]
    fn ids_off_the_page_are_ignored() {
        let mut selection = page(&[10, 20]);
        selection.toggle(&30, true);
        assert!(selection.is_empty());

        selection.toggle(&20, true);
        assert!(selection.is_checked(&20));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn replacing_the_page_clears_selection() {
        let mut selection = page(&[1, 2]);
        selection.toggle_all(true);

        selection.replace_page(vec![2, 3]);
        assert!(selection.is_empty());
        assert!(!selection.select_all());

        selection.toggle_all(true);
        selection.toggle_all(false);
        assert!(selection.is_empty());
    }
}
