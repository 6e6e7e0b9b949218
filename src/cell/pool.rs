//! Cell pool: Recipe registry plus a reuse list of idle cells.
//!
//! Cells leave the pool through [`CellPool::dequeue`] and come back through
//! [`CellPool::release`] once they have rolled out of the viewport. The reuse
//! list holds each cell identity at most once.

use super::{CellId, NoticeCell};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared by every pool, so cells built by different pools never collide.
static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(0);

/// A cell coming out of a prefabricated layout.
///
/// Layout recipes yield type-erased items; only a leading `Prefab<C>` counts
/// as a cell. The prefab declares its own reuse identifier, the way a
/// template-loaded view does.
#[derive(Debug)]
pub struct Prefab<C> {
    /// Identifier the prefab declares for itself.
    pub reuse_identifier: Option<String>,
    /// Initial content.
    pub content: C,
}

impl<C> Prefab<C> {
    /// Create a prefab cell declaring `reuse_identifier`.
    pub fn new(reuse_identifier: impl Into<String>, content: C) -> Self {
        Self {
            reuse_identifier: Some(reuse_identifier.into()),
            content,
        }
    }
}

/// How the pool builds a fresh cell for an identifier.
pub enum CellRecipe<C> {
    /// Construct content directly; the cell is tagged with the registered identifier.
    Class(Box<dyn Fn() -> C>),
    /// Instantiate a prefabricated layout and take its first item.
    Layout(Box<dyn Fn() -> Vec<Box<dyn Any>>>),
}

impl<C> CellRecipe<C> {
    /// Recipe from a content constructor.
    pub fn class(make: impl Fn() -> C + 'static) -> Self {
        Self::Class(Box::new(make))
    }

    /// Recipe from a layout instantiation function.
    pub fn layout(instantiate: impl Fn() -> Vec<Box<dyn Any>> + 'static) -> Self {
        Self::Layout(Box::new(instantiate))
    }
}

impl<C> fmt::Debug for CellRecipe<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(_) => f.write_str("CellRecipe::Class"),
            Self::Layout(_) => f.write_str("CellRecipe::Layout"),
        }
    }
}

/// Recipe registry and reuse list.
pub struct CellPool<C> {
    recipes: HashMap<String, CellRecipe<C>>,
    idle: Vec<NoticeCell<C>>,
}

impl<C: 'static> CellPool<C> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self {
            recipes: HashMap::new(),
            idle: Vec::new(),
        }
    }

    /// Register a recipe. A later registration for the same identifier wins.
    pub fn register(&mut self, identifier: impl Into<String>, recipe: CellRecipe<C>) {
        self.recipes.insert(identifier.into(), recipe);
    }

    /// Check whether a recipe exists for `identifier`.
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.recipes.contains_key(identifier)
    }

    /// Take an idle cell for `identifier`, or build one from its recipe.
    ///
    /// Returns `None` for an empty identifier, an unregistered identifier
    /// with no matching idle cell, or a layout whose first item is not a cell.
    pub fn dequeue(&mut self, identifier: &str) -> Option<NoticeCell<C>> {
        if identifier.is_empty() {
            return None;
        }

        if let Some(pos) = self
            .idle
            .iter()
            .position(|cell| cell.reuse_identifier() == Some(identifier))
        {
            let cell = self.idle.swap_remove(pos);
            tracing::trace!(id = cell.id().0, identifier, "reusing idle cell");
            return Some(cell);
        }

        let fresh = match self.recipes.get(identifier)? {
            CellRecipe::Class(make) => (Some(identifier.to_owned()), make()),
            CellRecipe::Layout(instantiate) => {
                let first = instantiate().into_iter().next()?;
                let prefab = first.downcast::<Prefab<C>>().ok()?;
                if prefab.reuse_identifier.is_none() {
                    tracing::warn!(
                        identifier,
                        "layout cell declares no reuse identifier; it will never be reused"
                    );
                }
                (prefab.reuse_identifier, prefab.content)
            }
        };

        let cell = self.allocate(fresh.0, fresh.1);
        tracing::trace!(id = cell.id().0, identifier, "created cell");
        Some(cell)
    }

    /// Build a cell outside of any recipe.
    ///
    /// Useful for data sources that construct content themselves; the pool
    /// still hands out the identity.
    pub fn make_cell(&mut self, reuse_identifier: Option<String>, content: C) -> NoticeCell<C> {
        self.allocate(reuse_identifier, content)
    }

    /// Return an idle cell to the reuse list.
    ///
    /// The caller must already have detached it from the viewport. Returns
    /// `false` if a cell with the same identity is already pooled.
    pub fn release(&mut self, cell: NoticeCell<C>) -> bool {
        if self.contains(cell.id()) {
            return false;
        }
        self.idle.push(cell);
        true
    }

    /// Check whether a cell identity is pooled.
    pub fn contains(&self, id: CellId) -> bool {
        self.idle.iter().any(|cell| cell.id() == id)
    }

    /// Number of idle cells.
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Identities of the idle cells.
    pub fn idle_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.idle.iter().map(NoticeCell::id)
    }

    /// Drop every idle cell. Recipes stay registered.
    pub fn clear(&mut self) {
        self.idle.clear();
    }

    #[allow(clippy::unused_self)]
    fn allocate(&self, reuse_identifier: Option<String>, content: C) -> NoticeCell<C> {
        let id = CellId(NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed));
        NoticeCell::new(id, reuse_identifier, content)
    }
}

impl<C: 'static> Default for CellPool<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for CellPool<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellPool")
            .field("recipes", &self.recipes.keys().collect::<Vec<_>>())
            .field("idle", &self.idle.len())
            .finish()
    }
}
