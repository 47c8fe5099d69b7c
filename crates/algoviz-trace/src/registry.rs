//! Explicit lookup table from problem id to visualizer factory.
//!
//! Nothing registers itself: [`Registry::builtin`] lists every shipped
//! algorithm, and embedders add their own with [`Registry::register`].
//! Visualizers are constructed on demand by [`Registry::resolve`].

use std::collections::BTreeMap;

use algoviz_core::ProblemId;
use thiserror::Error;

use crate::generators::backtracking::{Permutations, Subsets};
use crate::generators::binary_search::SearchInsert;
use crate::generators::dynamic_programming::{ClimbingStairs, MaxSubarray};
use crate::generators::heap::KthLargest;
use crate::generators::matrix::{RotateImage, SpiralMatrix};
use crate::generators::sorting::MergeSort;
use crate::generators::stack::ValidParentheses;
use crate::generators::two_pointers::{ContainerWithMostWater, MoveZeroes, TwoSumSorted};
use crate::visualizer::{Algorithm, AlgorithmInfo, Visualizer};

/// Builds a fresh visualizer instance.
pub type Factory = fn() -> Box<dyn Visualizer>;

/// Errors raised while populating a [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A visualizer with this id is already registered.
    #[error("problem {id} is already registered")]
    Duplicate { id: ProblemId },
}

fn make<A: Algorithm + Default>() -> Box<dyn Visualizer> {
    Box::new(A::default())
}

/// Maps [`ProblemId`]s to visualizer factories, ordered by id.
#[derive(Default)]
pub struct Registry {
    factories: BTreeMap<ProblemId, Factory>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in visualizer.
    pub fn builtin() -> Self {
        let builtins: [(ProblemId, Factory); 13] = [
            (MoveZeroes::ID, make::<MoveZeroes>),
            (TwoSumSorted::ID, make::<TwoSumSorted>),
            (ContainerWithMostWater::ID, make::<ContainerWithMostWater>),
            (SearchInsert::ID, make::<SearchInsert>),
            (ValidParentheses::ID, make::<ValidParentheses>),
            (Subsets::ID, make::<Subsets>),
            (Permutations::ID, make::<Permutations>),
            (ClimbingStairs::ID, make::<ClimbingStairs>),
            (MaxSubarray::ID, make::<MaxSubarray>),
            (KthLargest::ID, make::<KthLargest>),
            (RotateImage::ID, make::<RotateImage>),
            (SpiralMatrix::ID, make::<SpiralMatrix>),
            (MergeSort::ID, make::<MergeSort>),
        ];
        Registry {
            factories: builtins.into_iter().collect(),
        }
    }

    /// Adds a factory under `id`.
    ///
    /// Returns [`RegistryError::Duplicate`] if `id` is taken; the existing
    /// entry is kept.
    pub fn register(&mut self, id: ProblemId, factory: Factory) -> Result<(), RegistryError> {
        if self.factories.contains_key(&id) {
            return Err(RegistryError::Duplicate { id });
        }
        self.factories.insert(id, factory);
        Ok(())
    }

    /// Constructs the visualizer registered under `id`.
    pub fn resolve(&self, id: ProblemId) -> Option<Box<dyn Visualizer>> {
        self.factories.get(&id).map(|factory| factory())
    }

    pub fn contains(&self, id: ProblemId) -> bool {
        self.factories.contains_key(&id)
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ProblemId> + '_ {
        self.factories.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Metadata of every registered visualizer, ordered by id.
    pub fn catalog(&self) -> Vec<&'static AlgorithmInfo> {
        self.factories.values().map(|factory| factory().info()).collect()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("ids", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_thirteen_sorted_entries() {
        let reg = Registry::builtin();
        assert_eq!(reg.len(), 13);
        let ids: Vec<u32> = reg.ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![11, 20, 35, 46, 48, 53, 54, 70, 78, 167, 215, 283, 912]);
    }

    #[test]
    fn resolved_info_matches_key() {
        let reg = Registry::builtin();
        for id in reg.ids() {
            let vis = reg.resolve(id).unwrap();
            assert_eq!(vis.info().id, id);
        }
    }

    #[test]
    fn catalog_is_ordered_by_id() {
        let catalog = Registry::builtin().catalog();
        assert!(catalog.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(catalog[0].title, "Container With Most Water");
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut reg = Registry::builtin();
        let err = reg
            .register(MoveZeroes::ID, make::<MergeSort>)
            .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate { id: ProblemId(283) });
        assert_eq!(reg.resolve(MoveZeroes::ID).unwrap().info().title, "Move Zeroes");
    }

    #[test]
    fn register_into_empty_registry() {
        let mut reg = Registry::new();
        assert!(reg.is_empty());
        reg.register(ProblemId(1), make::<ClimbingStairs>).unwrap();
        assert!(reg.contains(ProblemId(1)));
        assert!(reg.resolve(ProblemId(2)).is_none());
    }
}
