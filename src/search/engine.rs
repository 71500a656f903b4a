//! The Dijkstra/A* search core.

use std::collections::BinaryHeap;
use std::time::Instant;

use log::{debug, trace};

use crate::config::{MultiTargetPolicy, SearchConfig};
use crate::core::CellIndex;
use crate::cost::{CostFunction, COST_MAX};
use crate::error::{Result, SearchError};
use crate::image::ScalarImage;
use crate::search::node::{Node, NodeState, OpenEntry};
use crate::search::outcome::{SearchOutcome, Termination};
use crate::search::INVALID_PREDECESSOR;

/// Minimum-cost path search over a grid, driven by a pluggable cost strategy.
///
/// The engine owns a node arena sized to the grid (`O(cells)` regardless of
/// how much is explored). One call to [`run`](SearchEngine::run) blocks
/// until termination; the populated arena then serves path extraction and
/// output building read-only until [`clean_up`](SearchEngine::clean_up) or
/// the next run. A single engine must not run concurrent searches, but
/// independent engines may share one initialized cost function.
pub struct SearchEngine<'a, const D: usize> {
    image: &'a ScalarImage<D>,
    cost_function: &'a dyn CostFunction<D>,
    config: SearchConfig,
    start: Option<CellIndex<D>>,
    targets: Vec<CellIndex<D>>,
    nodes: Vec<Node>,
    visit_order: Vec<usize>,
}

impl<'a, const D: usize> SearchEngine<'a, D> {
    /// Create an engine with the default configuration.
    pub fn new(image: &'a ScalarImage<D>, cost_function: &'a dyn CostFunction<D>) -> Self {
        Self::with_config(image, cost_function, SearchConfig::default())
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(
        image: &'a ScalarImage<D>,
        cost_function: &'a dyn CostFunction<D>,
        config: SearchConfig,
    ) -> Self {
        Self {
            image,
            cost_function,
            config,
            start: None,
            targets: Vec::new(),
            nodes: Vec::new(),
            visit_order: Vec::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Set the start cell.
    pub fn set_start(&mut self, start: CellIndex<D>) {
        self.start = Some(start);
    }

    /// Register an additional target cell.
    pub fn add_target(&mut self, target: CellIndex<D>) {
        self.targets.push(target);
    }

    /// Replace the registered targets.
    pub fn set_targets(&mut self, targets: Vec<CellIndex<D>>) {
        self.targets = targets;
    }

    /// Targets in registration order.
    pub fn targets(&self) -> &[CellIndex<D>] {
        &self.targets
    }

    /// The grid being searched.
    pub fn image(&self) -> &ScalarImage<D> {
        self.image
    }

    /// The node arena of the last run; empty before the first run or after
    /// [`clean_up`](SearchEngine::clean_up).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node record for a cell, if a run has populated the arena.
    pub fn node(&self, cell: CellIndex<D>) -> Option<&Node> {
        let flat = self.image.index_of(cell)?;
        self.nodes.get(flat)
    }

    /// Flat indices of cells in the order they were closed. Empty unless
    /// `record_visit_order` was enabled for the last run.
    pub fn visit_order(&self) -> &[usize] {
        &self.visit_order
    }

    /// Release the node arena and the visit-order log.
    pub fn clean_up(&mut self) {
        self.nodes = Vec::new();
        self.visit_order = Vec::new();
    }

    /// Run the search to termination.
    ///
    /// Fails fast on configuration errors without touching the arena.
    /// Time-budget expiry and unreachable targets are normal outcomes
    /// reported through [`SearchOutcome`], not errors.
    pub fn run(&mut self) -> Result<SearchOutcome> {
        let run_started = Instant::now();

        let start = self.start.ok_or(SearchError::MissingStart)?;
        let start_flat = self.image.index_of(start).ok_or_else(|| {
            SearchError::IndexOutOfBounds {
                index: format!("{:?}", start.components()),
            }
        })?;
        let mut target_flats = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            let flat = self.image.index_of(*target).ok_or_else(|| {
                SearchError::IndexOutOfBounds {
                    index: format!("{:?}", target.components()),
                }
            })?;
            target_flats.push(flat);
        }
        if self.targets.is_empty() && !self.config.compute_all_distances {
            return Err(SearchError::NoTargets);
        }
        match self.cost_function.initialized_extent() {
            None => return Err(SearchError::CostFunctionNotInitialized),
            Some(extent) if extent != *self.image.extent() => {
                return Err(SearchError::ImageShapeMismatch {
                    data_len: extent.iter().product(),
                    extent_len: self.image.len(),
                });
            }
            Some(_) => {}
        }

        debug!(
            "[Search] run: start={:?}, {} target(s), mode={:?}, all_distances={}",
            start.components(),
            self.targets.len(),
            self.config.neighbor_mode,
            self.config.compute_all_distances
        );

        let len = self.image.len();
        self.nodes.clear();
        self.nodes.resize(len, Node::default());
        self.visit_order.clear();

        let mode = self.config.neighbor_mode;
        let offsets = mode.offsets::<D>();
        let min_cost = self.cost_function.min_cost();
        let use_heuristic = self.config.use_heuristic
            && !self.config.compute_all_distances
            && min_cost > 0.0
            && !self.targets.is_empty();

        // Pending targets: (flat index, registration index, cell).
        let mut pending: Vec<(usize, usize, CellIndex<D>)> = target_flats
            .iter()
            .enumerate()
            .map(|(reg, &flat)| (flat, reg, self.targets[reg]))
            .collect();
        let mut targets_closed = vec![false; self.targets.len()];

        // Admissible per-step lower bound: every edge costs at least
        // min_cost, and any path needs at least grid_distance steps.
        let heuristic = |cell: &CellIndex<D>, pending: &[(usize, usize, CellIndex<D>)]| {
            pending
                .iter()
                .map(|(_, _, target)| mode.grid_distance(cell, target) as f64 * min_cost)
                .fold(f64::INFINITY, f64::min)
        };

        let deadline = self.config.time_budget.map(|budget| run_started + budget);

        let start_estimate = if use_heuristic {
            heuristic(&start, &pending)
        } else {
            0.0
        };
        self.nodes[start_flat].distance = 0.0;
        self.nodes[start_flat].estimate = start_estimate;
        self.nodes[start_flat].state = NodeState::Open;

        let mut open = BinaryHeap::new();
        open.push(OpenEntry {
            index: start_flat,
            estimate: start_estimate,
        });

        let mut termination = Termination::QueueExhausted;
        let mut closed_count = 0usize;

        'search: while let Some(entry) = open.pop() {
            let ci = entry.index;
            // Stale queue entry for an already finalized cell.
            if self.nodes[ci].state == NodeState::Closed {
                continue;
            }
            self.nodes[ci].state = NodeState::Closed;
            closed_count += 1;
            if self.config.record_visit_order {
                self.visit_order.push(ci);
            }

            if !pending.is_empty() {
                let mut closed_a_target = false;
                pending.retain(|&(flat, reg, _)| {
                    if flat == ci {
                        targets_closed[reg] = true;
                        closed_a_target = true;
                        false
                    } else {
                        true
                    }
                });
                if closed_a_target && !self.config.compute_all_distances {
                    match self.config.multi_target_policy {
                        MultiTargetPolicy::FirstTarget => {
                            termination = Termination::FirstTargetReached;
                            break 'search;
                        }
                        MultiTargetPolicy::AllTargets => {
                            if pending.is_empty() {
                                termination = Termination::AllTargetsReached;
                                break 'search;
                            }
                        }
                    }
                }
            }

            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    termination = Termination::TimedOut;
                    break 'search;
                }
            }

            let current = self.image.cell_at(ci);
            let current_distance = self.nodes[ci].distance;

            for offset in &offsets {
                let neighbor = current + *offset;
                let Some(ni) = self.image.index_of(neighbor) else {
                    continue;
                };
                if self.nodes[ni].state == NodeState::Closed {
                    continue;
                }
                let edge = self.cost_function.cost(current, neighbor);
                // Forbidden edges are only traversed when an exhaustive run
                // must close every cell; the sentinel distance marks them.
                if edge >= COST_MAX && !self.config.compute_all_distances {
                    continue;
                }
                // Saturate at the sentinel so cells deep inside a forbidden
                // region keep a finite distance and still close.
                let candidate = (current_distance + edge).min(COST_MAX);
                if candidate < self.nodes[ni].distance {
                    let h = if use_heuristic && !pending.is_empty() {
                        heuristic(&neighbor, &pending)
                    } else {
                        0.0
                    };
                    let node = &mut self.nodes[ni];
                    node.distance = candidate;
                    node.estimate = candidate + h;
                    node.predecessor = ci;
                    node.state = NodeState::Open;
                    open.push(OpenEntry {
                        index: ni,
                        estimate: candidate + h,
                    });
                }
            }
        }

        let elapsed = run_started.elapsed();
        if termination == Termination::QueueExhausted
            && !self.config.compute_all_distances
            && !targets_closed.iter().all(|&c| c)
        {
            debug!("[Search] open set exhausted with unreachable target(s)");
        }
        trace!(
            "[Search] done: {:?}, {} cell(s) closed in {:?}",
            termination,
            closed_count,
            elapsed
        );

        Ok(SearchOutcome {
            termination,
            closed_count,
            targets_closed,
            elapsed,
        })
    }

    /// Extract the start→target path by walking predecessor links.
    ///
    /// `None` when the target was never closed (unreachable, timed out, or
    /// no run yet). The start cell produces a length-1 path to itself.
    pub fn path_to(&self, target: CellIndex<D>) -> Option<Vec<CellIndex<D>>> {
        let flat = self.image.index_of(target)?;
        if self.nodes.get(flat).map(|n| n.state) != Some(NodeState::Closed) {
            return None;
        }
        let mut path = Vec::new();
        let mut current = flat;
        loop {
            path.push(self.image.cell_at(current));
            let predecessor = self.nodes[current].predecessor;
            if predecessor == INVALID_PREDECESSOR {
                break;
            }
            current = predecessor;
        }
        path.reverse();
        trace!("[Search] extracted path of {} cell(s)", path.len());
        Some(path)
    }

    /// Extract a path for every registered target, in registration order.
    pub fn paths(&self) -> Vec<Option<Vec<CellIndex<D>>>> {
        self.targets
            .iter()
            .map(|&target| self.path_to(target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NeighborMode;
    use std::time::Duration;

    /// Every edge costs 1; the simplest valid strategy.
    struct UniformCost<const D: usize> {
        extent: Option<[usize; D]>,
    }

    impl<const D: usize> UniformCost<D> {
        fn initialized(image: &ScalarImage<D>) -> Self {
            let mut cf = Self { extent: None };
            cf.initialize(image).unwrap();
            cf
        }
    }

    impl<const D: usize> CostFunction<D> for UniformCost<D> {
        fn initialize(&mut self, image: &ScalarImage<D>) -> Result<()> {
            self.extent = Some(*image.extent());
            Ok(())
        }

        fn initialized_extent(&self) -> Option<[usize; D]> {
            self.extent
        }

        fn cost(&self, _from: CellIndex<D>, _to: CellIndex<D>) -> f64 {
            1.0
        }

        fn min_cost(&self) -> f64 {
            1.0
        }
    }

    /// Uniform cost with a sentinel wall along axis-0 coordinate 2.
    struct WalledCost {
        extent: Option<[usize; 2]>,
    }

    impl CostFunction<2> for WalledCost {
        fn initialize(&mut self, image: &ScalarImage<2>) -> Result<()> {
            self.extent = Some(*image.extent());
            Ok(())
        }

        fn initialized_extent(&self) -> Option<[usize; 2]> {
            self.extent
        }

        fn cost(&self, _from: CellIndex<2>, to: CellIndex<2>) -> f64 {
            if to.components()[0] == 2 { COST_MAX } else { 1.0 }
        }

        fn min_cost(&self) -> f64 {
            1.0
        }
    }

    fn grid_5x5() -> ScalarImage<2> {
        ScalarImage::filled([5, 5], [1.0, 1.0], 0.0).unwrap()
    }

    #[test]
    fn test_five_by_five_faces() {
        let image = grid_5x5();
        let cf = UniformCost::initialized(&image);
        let mut engine = SearchEngine::new(&image, &cf);
        engine.set_start(CellIndex::new([0, 0]));
        engine.add_target(CellIndex::new([4, 4]));

        let outcome = engine.run().unwrap();
        assert_eq!(outcome.termination, Termination::AllTargetsReached);
        assert!(outcome.all_targets_closed());

        let path = engine.path_to(CellIndex::new([4, 4])).unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path[0], CellIndex::new([0, 0]));
        assert_eq!(path[8], CellIndex::new([4, 4]));
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(&pair[1], NeighborMode::Faces));
        }

        let target_node = engine.node(CellIndex::new([4, 4])).unwrap();
        assert!((target_node.distance - 8.0).abs() < 1e-12);
        let start_node = engine.node(CellIndex::new([0, 0])).unwrap();
        assert_eq!(start_node.distance, 0.0);
    }

    #[test]
    fn test_full_neighbors_diagonal_path() {
        let image = grid_5x5();
        let cf = UniformCost::initialized(&image);
        let config = SearchConfig::default().with_full_neighbors();
        let mut engine = SearchEngine::with_config(&image, &cf, config);
        engine.set_start(CellIndex::new([0, 0]));
        engine.add_target(CellIndex::new([4, 4]));

        engine.run().unwrap();
        let path = engine.path_to(CellIndex::new([4, 4])).unwrap();
        assert_eq!(path.len(), 5);
        let target_node = engine.node(CellIndex::new([4, 4])).unwrap();
        assert!((target_node.distance - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_start_equals_target() {
        let image = grid_5x5();
        let cf = UniformCost::initialized(&image);
        let mut engine = SearchEngine::new(&image, &cf);
        engine.set_start(CellIndex::new([2, 2]));
        engine.add_target(CellIndex::new([2, 2]));

        let outcome = engine.run().unwrap();
        assert!(outcome.all_targets_closed());
        let path = engine.path_to(CellIndex::new([2, 2])).unwrap();
        assert_eq!(path, vec![CellIndex::new([2, 2])]);
    }

    #[test]
    fn test_configuration_errors() {
        let image = grid_5x5();
        let cf = UniformCost::initialized(&image);

        let mut engine = SearchEngine::new(&image, &cf);
        assert!(matches!(engine.run(), Err(SearchError::MissingStart)));

        engine.set_start(CellIndex::new([0, 0]));
        assert!(matches!(engine.run(), Err(SearchError::NoTargets)));

        engine.add_target(CellIndex::new([9, 9]));
        assert!(matches!(
            engine.run(),
            Err(SearchError::IndexOutOfBounds { .. })
        ));
        // Failed runs never expose a partial arena.
        assert!(engine.nodes().is_empty());
    }

    #[test]
    fn test_uninitialized_cost_function_rejected() {
        let image = grid_5x5();
        let cf = UniformCost::<2> { extent: None };
        let mut engine = SearchEngine::new(&image, &cf);
        engine.set_start(CellIndex::new([0, 0]));
        engine.add_target(CellIndex::new([4, 4]));
        assert!(matches!(
            engine.run(),
            Err(SearchError::CostFunctionNotInitialized)
        ));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let image = grid_5x5();
        let other = ScalarImage::filled([3, 3], [1.0, 1.0], 0.0).unwrap();
        let cf = UniformCost::initialized(&other);
        let mut engine = SearchEngine::new(&image, &cf);
        engine.set_start(CellIndex::new([0, 0]));
        engine.add_target(CellIndex::new([4, 4]));
        assert!(matches!(
            engine.run(),
            Err(SearchError::ImageShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_all_distances_closes_everything() {
        let image = grid_5x5();
        let cf = UniformCost::initialized(&image);
        let config = SearchConfig::default().with_all_distances();
        let mut engine = SearchEngine::with_config(&image, &cf, config);
        engine.set_start(CellIndex::new([0, 0]));

        let outcome = engine.run().unwrap();
        assert_eq!(outcome.termination, Termination::QueueExhausted);
        assert_eq!(outcome.closed_count, 25);
        for flat in 0..image.len() {
            let node = &engine.nodes()[flat];
            assert_eq!(node.state, NodeState::Closed);
            let cell = image.cell_at(flat);
            let expected = cell.manhattan_distance(&CellIndex::new([0, 0])) as f64;
            assert!((node.distance - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_determinism() {
        let image = grid_5x5();
        let cf = UniformCost::initialized(&image);
        let mut engine = SearchEngine::new(&image, &cf);
        engine.set_start(CellIndex::new([0, 0]));
        engine.add_target(CellIndex::new([4, 2]));

        engine.run().unwrap();
        let first = engine.path_to(CellIndex::new([4, 2])).unwrap();
        let first_distances: Vec<f64> = engine.nodes().iter().map(|n| n.distance).collect();

        engine.run().unwrap();
        let second = engine.path_to(CellIndex::new([4, 2])).unwrap();
        let second_distances: Vec<f64> = engine.nodes().iter().map(|n| n.distance).collect();

        assert_eq!(first, second);
        assert_eq!(first_distances, second_distances);
    }

    #[test]
    fn test_multi_target_all_targets() {
        let image = grid_5x5();
        let cf = UniformCost::initialized(&image);
        let mut engine = SearchEngine::new(&image, &cf);
        engine.set_start(CellIndex::new([0, 0]));
        engine.set_targets(vec![CellIndex::new([4, 0]), CellIndex::new([0, 4])]);

        let outcome = engine.run().unwrap();
        assert_eq!(outcome.termination, Termination::AllTargetsReached);
        assert_eq!(outcome.targets_closed, vec![true, true]);

        let paths = engine.paths();
        assert_eq!(paths.len(), 2);
        // Each path independently optimal.
        assert_eq!(paths[0].as_ref().unwrap().len(), 5);
        assert_eq!(paths[1].as_ref().unwrap().len(), 5);
    }

    #[test]
    fn test_multi_target_first_target_policy() {
        let image = grid_5x5();
        let cf = UniformCost::initialized(&image);
        let config = SearchConfig::default()
            .with_multi_target_policy(MultiTargetPolicy::FirstTarget);
        let mut engine = SearchEngine::with_config(&image, &cf, config);
        engine.set_start(CellIndex::new([0, 0]));
        // The far corner cannot close before the adjacent cell.
        engine.set_targets(vec![CellIndex::new([4, 4]), CellIndex::new([1, 0])]);

        let outcome = engine.run().unwrap();
        assert_eq!(outcome.termination, Termination::FirstTargetReached);
        assert_eq!(outcome.targets_closed, vec![false, true]);
        assert!(engine.path_to(CellIndex::new([4, 4])).is_none());
        assert!(engine.path_to(CellIndex::new([1, 0])).is_some());
    }

    #[test]
    fn test_unreachable_target_stays_unclosed() {
        let image = grid_5x5();
        let mut cf = WalledCost { extent: None };
        cf.initialize(&image).unwrap();
        let mut engine = SearchEngine::new(&image, &cf);
        engine.set_start(CellIndex::new([0, 0]));
        engine.add_target(CellIndex::new([4, 4]));

        let outcome = engine.run().unwrap();
        assert_eq!(outcome.termination, Termination::QueueExhausted);
        assert_eq!(outcome.targets_closed, vec![false]);
        assert!(engine.path_to(CellIndex::new([4, 4])).is_none());
        // The wall cells were never even opened.
        let wall_node = engine.node(CellIndex::new([2, 3])).unwrap();
        assert_eq!(wall_node.state, NodeState::Unvisited);
    }

    #[test]
    fn test_all_distances_crosses_walls_with_sentinel() {
        let image = grid_5x5();
        let mut cf = WalledCost { extent: None };
        cf.initialize(&image).unwrap();
        let config = SearchConfig::default().with_all_distances();
        let mut engine = SearchEngine::with_config(&image, &cf, config);
        engine.set_start(CellIndex::new([0, 0]));

        let outcome = engine.run().unwrap();
        assert_eq!(outcome.closed_count, 25);
        let wall_node = engine.node(CellIndex::new([2, 0])).unwrap();
        assert_eq!(wall_node.state, NodeState::Closed);
        assert!(wall_node.distance >= COST_MAX);
    }

    #[test]
    fn test_all_distances_closes_thick_forbidden_regions() {
        // Entering any cell with x >= 1 is forbidden.
        struct BlockedStrip {
            extent: Option<[usize; 2]>,
        }

        impl CostFunction<2> for BlockedStrip {
            fn initialize(&mut self, image: &ScalarImage<2>) -> Result<()> {
                self.extent = Some(*image.extent());
                Ok(())
            }

            fn initialized_extent(&self) -> Option<[usize; 2]> {
                self.extent
            }

            fn cost(&self, _from: CellIndex<2>, to: CellIndex<2>) -> f64 {
                if to.components()[0] >= 1 { COST_MAX } else { 1.0 }
            }

            fn min_cost(&self) -> f64 {
                1.0
            }
        }

        let image = ScalarImage::filled([6, 1], [1.0, 1.0], 0.0).unwrap();
        let mut cf = BlockedStrip { extent: None };
        cf.initialize(&image).unwrap();
        let config = SearchConfig::default().with_all_distances();
        let mut engine = SearchEngine::with_config(&image, &cf, config);
        engine.set_start(CellIndex::new([0, 0]));

        let outcome = engine.run().unwrap();
        // Distances saturate at the sentinel, so cells several forbidden
        // steps deep still get a finite distance and close.
        assert_eq!(outcome.closed_count, 6);
        for x in 1..6 {
            let node = engine.node(CellIndex::new([x, 0])).unwrap();
            assert_eq!(node.state, NodeState::Closed);
            assert!(node.distance.is_finite());
            assert!(node.distance >= COST_MAX);
        }
    }

    #[test]
    fn test_zero_time_budget_closes_only_start() {
        let image = ScalarImage::filled([50, 50], [1.0, 1.0], 0.0).unwrap();
        let cf = UniformCost::initialized(&image);
        let config = SearchConfig::default().with_time_budget(Duration::ZERO);
        let mut engine = SearchEngine::with_config(&image, &cf, config);
        engine.set_start(CellIndex::new([0, 0]));
        engine.add_target(CellIndex::new([49, 49]));

        let outcome = engine.run().unwrap();
        assert_eq!(outcome.termination, Termination::TimedOut);
        assert_eq!(outcome.closed_count, 1);
        assert_eq!(
            engine.node(CellIndex::new([0, 0])).unwrap().state,
            NodeState::Closed
        );
        assert!(engine.path_to(CellIndex::new([49, 49])).is_none());
    }

    #[test]
    fn test_visit_order_recorded() {
        let image = grid_5x5();
        let cf = UniformCost::initialized(&image);
        let config = SearchConfig::default().with_visit_order();
        let mut engine = SearchEngine::with_config(&image, &cf, config);
        engine.set_start(CellIndex::new([2, 2]));
        engine.add_target(CellIndex::new([4, 4]));

        let outcome = engine.run().unwrap();
        assert_eq!(engine.visit_order().len(), outcome.closed_count);
        assert_eq!(
            engine.visit_order()[0],
            image.index_of(CellIndex::new([2, 2])).unwrap()
        );
    }

    #[test]
    fn test_three_dimensional_search() {
        let image = ScalarImage::filled([3, 3, 3], [1.0, 1.0, 1.0], 0.0).unwrap();
        let cf = UniformCost::initialized(&image);
        let mut engine = SearchEngine::new(&image, &cf);
        engine.set_start(CellIndex::new([0, 0, 0]));
        engine.add_target(CellIndex::new([2, 2, 2]));

        engine.run().unwrap();
        let path = engine.path_to(CellIndex::new([2, 2, 2])).unwrap();
        assert_eq!(path.len(), 7);
        let node = engine.node(CellIndex::new([2, 2, 2])).unwrap();
        assert!((node.distance - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_three_dimensional_full_neighbors() {
        let image = ScalarImage::filled([3, 3, 3], [1.0, 1.0, 1.0], 0.0).unwrap();
        let cf = UniformCost::initialized(&image);
        let config = SearchConfig::default().with_full_neighbors();
        let mut engine = SearchEngine::with_config(&image, &cf, config);
        engine.set_start(CellIndex::new([0, 0, 0]));
        engine.add_target(CellIndex::new([2, 2, 2]));

        engine.run().unwrap();
        // Diagonal steps cut the corner-to-corner path to Chebyshev length.
        let path = engine.path_to(CellIndex::new([2, 2, 2])).unwrap();
        assert_eq!(path.len(), 3);
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(&pair[1], NeighborMode::Full));
        }
        let node = engine.node(CellIndex::new([2, 2, 2])).unwrap();
        assert!((node.distance - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_clean_up_releases_arena() {
        let image = grid_5x5();
        let cf = UniformCost::initialized(&image);
        let mut engine = SearchEngine::new(&image, &cf);
        engine.set_start(CellIndex::new([0, 0]));
        engine.add_target(CellIndex::new([4, 4]));

        engine.run().unwrap();
        assert!(engine.path_to(CellIndex::new([4, 4])).is_some());

        engine.clean_up();
        assert!(engine.nodes().is_empty());
        assert!(engine.path_to(CellIndex::new([4, 4])).is_none());
    }
}
