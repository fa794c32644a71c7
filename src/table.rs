use std::marker::PhantomData;

use canopy_core::{
    CanopyError, Forest, ForestConfig, ForestRecord, Result, SQL, Scope, Tree, cte,
    expressions::{eq, is_in, is_null},
    materialize,
};

use crate::store::Store;

/// Forest queries over one adjacency-list table.
///
/// Each call renders a single statement, runs it through the given store and
/// links the rows in memory. Nothing is cached: every call returns fresh
/// records.
#[derive(Debug, Clone)]
pub struct ForestTable<T> {
    config: ForestConfig,
    _record: PhantomData<fn() -> T>,
}

impl<T: ForestRecord> ForestTable<T> {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            _record: PhantomData,
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Loads every row matched by `scope` together with all of its
    /// descendants. Rows whose parent is outside the result become the
    /// forest's top-level nodes.
    pub fn find_forest<S: Store<T>>(&self, store: &mut S, scope: &Scope) -> Result<Forest<T>> {
        let statement = cte::forest_query(&self.config, scope).build(S::DIALECT);
        let records = store.fetch_all(&statement)?;
        Ok(materialize(records))
    }

    /// Loads the tree rooted at `id`.
    ///
    /// Fails with [`CanopyError::NotFound`] when the row does not exist or when
    /// it sits in a parent cycle and therefore never becomes top-level.
    pub fn find_tree<S: Store<T>>(&self, store: &mut S, id: T::Id) -> Result<Tree<T>> {
        let scope = Scope::all().filter(eq(
            self.config.primary_key_column(),
            SQL::param(id.clone()),
        ));
        let forest = self.find_forest(store, &scope)?;

        let root = forest
            .roots()
            .find(|node| node.id() == id)
            .map(|node| node.node_id())
            .ok_or(CanopyError::NotFound)?;

        forest.into_tree(root).ok_or(CanopyError::NotFound)
    }

    /// Loads the trees rooted at each of `ids`.
    ///
    /// All or nothing: unless every id comes back as its own top-level tree
    /// the call fails with [`CanopyError::NotFound`]. An id that lies inside
    /// another requested tree counts as missing.
    pub fn find_trees<S, I>(&self, store: &mut S, ids: I) -> Result<Forest<T>>
    where
        S: Store<T>,
        I: IntoIterator<Item = T::Id>,
    {
        let ids: Vec<T::Id> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(Forest::default());
        }

        let requested = ids.len();
        let scope = Scope::all().filter(is_in(self.config.primary_key_column(), ids));
        let forest = self.find_forest(store, &scope)?;

        if forest.roots().len() != requested {
            return Err(CanopyError::NotFound);
        }
        Ok(forest)
    }

    /// Extends `scope` to all descendants of the rows it matches.
    ///
    /// Filters added afterwards narrow the extended set:
    /// `with_descendants(id = X).filter(id = X)` is just `X`.
    pub fn with_descendants(&self, scope: Scope) -> Scope {
        scope.with_descendants(&self.config)
    }

    /// Rows without a parent reference.
    pub fn roots(&self) -> Scope {
        Scope::all().filter(is_null(self.config.foreign_key_column()))
    }

    /// Loads the rows matched by `scope` as plain records, without descendants
    /// and without links.
    pub fn load<S: Store<T>>(&self, store: &mut S, scope: &Scope) -> Result<Vec<T>> {
        let statement = cte::rows_query(&self.config, scope).build(S::DIALECT);
        store.fetch_all(&statement)
    }
}
