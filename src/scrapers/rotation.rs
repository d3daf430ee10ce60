use std::sync::atomic::{AtomicUsize, Ordering};

/// Round-robin over a fixed list (proxies, user agents).
///
/// The cursor is atomic so a shared scraper can hand out items through `&self`.
#[derive(Debug)]
pub struct Rotator<T> {
    items: Vec<T>,
    cursor: AtomicUsize,
}

impl<T> Rotator<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            cursor: AtomicUsize::new(0),
        }
    }

    /// The current item; advances the cursor. `None` only when empty.
    pub fn next_item(&self) -> Option<&T> {
        if self.items.is_empty() {
            return None;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed) % self.items.len();
        self.items.get(i)
    }

    /// Keep only the items matching `keep`; the cursor restarts at the front.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
        self.cursor = AtomicUsize::new(0);
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
