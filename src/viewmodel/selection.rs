/// Trait for navigable list views with selection
pub trait Selectable {
    /// Returns the number of items in the list
    fn len(&self) -> usize;

    /// Returns the currently selected index
    fn selected(&self) -> usize;

    /// Sets the selected index directly
    fn set_selected(&mut self, index: usize);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move selection up with wraparound
    fn move_up(&mut self) {
        let len = self.len();
        if len == 0 {
            self.set_selected(0);
            return;
        }
        let selected = self.selected();
        self.set_selected(if selected == 0 { len - 1 } else { selected - 1 });
    }

    /// Move selection down with wraparound
    fn move_down(&mut self) {
        let len = self.len();
        if len == 0 {
            self.set_selected(0);
            return;
        }
        let selected = self.selected();
        self.set_selected(if selected + 1 >= len { 0 } else { selected + 1 });
    }

    /// Jump up by `page` rows, stopping at the first item
    fn page_up(&mut self, page: usize) {
        let selected = self.selected();
        self.set_selected(selected.saturating_sub(page));
    }

    /// Jump down by `page` rows, stopping at the last item
    fn page_down(&mut self, page: usize) {
        let last = self.len().saturating_sub(1);
        let selected = self.selected();
        self.set_selected((selected + page).min(last));
    }
}
