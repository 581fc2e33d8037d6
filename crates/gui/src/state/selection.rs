use shared::ObjectId;

/// Single-object selection: a weak reference into the scene by id
#[derive(Default, Debug)]
pub struct SelectionState {
    selected: Option<ObjectId>,
}

impl SelectionState {
    /// Selected object, if any
    pub fn primary(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    /// Check if an object is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Select a single object (replaces previous selection)
    pub fn select(&mut self, id: ObjectId) {
        self.selected = Some(id);
    }

    /// Clear selection
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_empty() {
        let s = SelectionState::default();
        assert!(s.primary().is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn test_select_single() {
        let mut s = SelectionState::default();
        s.select("a".to_string());
        assert_eq!(s.primary(), Some(&"a".to_string()));
        assert!(s.is_selected("a"));
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut s = SelectionState::default();
        s.select("a".to_string());
        s.select("b".to_string());
        assert!(!s.is_selected("a"));
        assert!(s.is_selected("b"));
    }

    #[test]
    fn test_clear() {
        let mut s = SelectionState::default();
        s.select("a".to_string());
        s.clear();
        assert!(s.primary().is_none());
    }
}
