//! Container: The set of cells currently attached to the viewport.

use super::CellId;

/// Attached cells in back-to-front order.
///
/// The container only tracks identities; the cells themselves are owned by
/// the view's current/next slots.
#[derive(Debug, Default, Clone)]
pub struct Container {
    attached: Vec<CellId>,
}

impl Container {
    /// Create an empty container.
    pub const fn new() -> Self {
        Self { attached: Vec::new() }
    }

    /// Attach a cell on top. Attaching twice moves it to the top.
    pub fn add(&mut self, id: CellId) {
        self.remove(id);
        self.attached.push(id);
    }

    /// Detach a cell. Returns `false` if it was not attached.
    pub fn remove(&mut self, id: CellId) -> bool {
        if let Some(pos) = self.attached.iter().position(|&a| a == id) {
            self.attached.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check whether a cell is attached.
    pub fn contains(&self, id: CellId) -> bool {
        self.attached.contains(&id)
    }

    /// Attached ids, back to front.
    pub fn ids(&self) -> &[CellId] {
        &self.attached
    }

    /// Number of attached cells.
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    /// Check if nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Detach everything.
    pub fn clear(&mut self) {
        self.attached.clear();
    }
}
