//! Property tests over randomly generated layouts.
//!
//! Layouts are built on a grid of 50x50 cells. Every cell holds at most one
//! rectangle that keeps at least the spacing to the next row and column, so
//! the generated input is always free of spacing violations. Nested
//! layouts additionally place a child strictly inside some of the cells.

use cinch::{
    Compactor, Graph, Node, NodeId, UniformSpacing, constraints::ConstraintAlgorithm,
    direction::Direction, fuzzy, geometry::Rect,
};
use float_cmp::approx_eq;
use proptest::prelude::*;

const CELL: f64 = 50.0;
const SPACING: f64 = 5.0;
const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
struct Cell {
    index: usize,
    row: usize,
    col: usize,
    rect: Rect,
    grouped: bool,
}

// ===================
// Strategies
// ===================

fn cell_strategy(row: usize, col: usize) -> impl Strategy<Value = Option<Cell>> {
    (
        any::<bool>(),
        5.0f64..40.0,
        5.0f64..40.0,
        0.0f64..=1.0,
        0.0f64..=1.0,
        any::<bool>(),
    )
        .prop_map(move |(present, width, height, fx, fy, grouped)| {
            present.then(|| {
                let x = col as f64 * CELL + fx * (CELL - SPACING - width);
                let y = row as f64 * CELL + fy * (CELL - SPACING - height);
                Cell {
                    index: 0,
                    row,
                    col,
                    rect: Rect::new(x, y, width, height),
                    grouped,
                }
            })
        })
}

fn layout_strategy() -> impl Strategy<Value = Vec<Cell>> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(rows, cols)| {
        let cells: Vec<_> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| cell_strategy(row, col)))
            .collect();
        cells.prop_map(|cells| {
            cells
                .into_iter()
                .flatten()
                .enumerate()
                .map(|(index, cell)| Cell { index, ..cell })
                .collect()
        })
    })
}

#[derive(Debug, Clone)]
struct NestedLayout {
    cells: Vec<Cell>,
    /// Children as the index of their parent cell and their rectangle.
    children: Vec<(usize, Rect)>,
}

fn child_strategy(parent: Rect) -> impl Strategy<Value = Option<Rect>> {
    (
        any::<bool>(),
        0.1f64..0.9,
        0.1f64..0.9,
        0.05f64..0.95,
        0.05f64..0.95,
    )
        .prop_map(move |(present, fw, fh, fx, fy)| {
            present.then(|| {
                let width = parent.width() * fw;
                let height = parent.height() * fh;
                Rect::new(
                    parent.x() + fx * (parent.width() - width),
                    parent.y() + fy * (parent.height() - height),
                    width,
                    height,
                )
            })
        })
}

fn nested_layout_strategy() -> impl Strategy<Value = NestedLayout> {
    layout_strategy().prop_flat_map(|cells| {
        let children: Vec<_> = cells.iter().map(|cell| child_strategy(cell.rect)).collect();
        (Just(cells), children).prop_map(|(cells, children)| NestedLayout {
            cells,
            children: children
                .into_iter()
                .enumerate()
                .filter_map(|(parent, child)| child.map(|rect| (parent, rect)))
                .collect(),
        })
    })
}

fn shuffled_layout_strategy() -> impl Strategy<Value = (Vec<Cell>, Vec<Cell>)> {
    layout_strategy().prop_flat_map(|cells| (Just(cells.clone()), Just(cells).prop_shuffle()))
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::all().to_vec())
}

fn algorithm_strategy() -> impl Strategy<Value = ConstraintAlgorithm> {
    prop::sample::select(vec![
        ConstraintAlgorithm::Quadratic,
        ConstraintAlgorithm::Scanline,
    ])
}

// ===================
// Helpers
// ===================

fn build(cells: &[Cell]) -> (Graph, Vec<NodeId>) {
    let mut graph = Graph::new();
    let nodes = cells
        .iter()
        .map(|cell| graph.add_node(Node::new(cell.rect)))
        .collect();
    (graph, nodes)
}

/// Builds the cells, then their children with the parent link set.
fn build_nested(layout: &NestedLayout) -> (Graph, Vec<NodeId>) {
    let (mut graph, mut nodes) = build(&layout.cells);
    for &(parent, rect) in &layout.children {
        let parent = nodes[parent];
        nodes.push(graph.add_node(Node::new(rect).with_parent(parent)));
    }
    (graph, nodes)
}

/// Builds the cells and groups runs of flagged cells that follow each other
/// along the compaction axis of `direction`. A present cell that is not
/// flagged ends a run, so no other node sits between two members.
fn build_with_runs(cells: &[Cell], direction: Direction) -> (Graph, Vec<NodeId>) {
    let (mut graph, nodes) = build(cells);
    let position = |cell: &Cell| {
        if direction.is_horizontal() {
            (cell.row, cell.col)
        } else {
            (cell.col, cell.row)
        }
    };
    let mut order: Vec<usize> = (0..cells.len()).collect();
    order.sort_by_key(|&index| position(&cells[index]));

    let mut flush = |run: &mut Vec<NodeId>| {
        if !run.is_empty() {
            graph.add_group(&run[..]).unwrap();
            run.clear();
        }
    };
    let mut run = Vec::new();
    let mut line = None;
    for index in order {
        let (cell_line, _) = position(&cells[index]);
        if line != Some(cell_line) {
            flush(&mut run);
            line = Some(cell_line);
        }
        if cells[index].grouped {
            run.push(nodes[index]);
        } else {
            flush(&mut run);
        }
    }
    flush(&mut run);

    (graph, nodes)
}

/// Groups the flagged cells of each column, or of each row for vertical
/// passes. Groups along the cross axis cannot form cycles.
fn add_groups(graph: &mut Graph, cells: &[Cell], nodes: &[NodeId], direction: Direction) {
    let lines = cells.iter().map(|cell| cell.row.max(cell.col)).max().unwrap_or(0) + 1;
    for line in 0..lines {
        let members: Vec<NodeId> = cells
            .iter()
            .zip(nodes)
            .filter(|(cell, _)| {
                let cell_line = if direction.is_horizontal() { cell.col } else { cell.row };
                cell.grouped && cell_line == line
            })
            .map(|(_, &node)| node)
            .collect();
        if !members.is_empty() {
            graph.add_group(&members).unwrap();
        }
    }
}

fn compactor(graph: &mut Graph, algorithm: ConstraintAlgorithm) -> Compactor<'_> {
    Compactor::new(graph)
        .with_constraint_algorithm(algorithm)
        .with_spacing_handler(UniformSpacing::uniform(SPACING))
}

fn compact(
    graph: &mut Graph,
    algorithm: ConstraintAlgorithm,
    directions: &[Direction],
) -> Result<(), TestCaseError> {
    compactor(graph, algorithm)
        .compact_sequence(directions)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    Ok(())
}

/// Largest gap between `a` and `b` along either axis.
fn separation(a: Rect, b: Rect) -> f64 {
    let gap_x = (b.x() - a.max_x()).max(a.x() - b.max_x());
    let gap_y = (b.y() - a.max_y()).max(a.y() - b.max_y());
    gap_x.max(gap_y)
}

/// Checks every pair except a parent and its child.
fn check_separated(graph: &Graph, nodes: &[NodeId]) -> Result<(), TestCaseError> {
    for (i, &a) in nodes.iter().enumerate() {
        for &b in &nodes[i + 1..] {
            if graph.node(a).parent() == Some(b) || graph.node(b).parent() == Some(a) {
                continue;
            }
            let ra = graph.node(a).hitbox();
            let rb = graph.node(b).hitbox();
            prop_assert!(
                separation(ra, rb) >= SPACING - 1e-3,
                "{a} at {ra:?} and {b} at {rb:?} are closer than the spacing"
            );
        }
    }
    Ok(())
}

fn positions(graph: &Graph, nodes: &[NodeId]) -> Vec<Rect> {
    nodes.iter().map(|&node| graph.node(node).hitbox()).collect()
}

// ===================
// Property Test Functions
// ===================

/// Pairs never end up closer than the spacing, and constraints stay acyclic.
fn check_no_overlap(
    (mut graph, nodes): (Graph, Vec<NodeId>),
    directions: &[Direction],
    algorithm: ConstraintAlgorithm,
) -> Result<(), TestCaseError> {
    {
        let mut compactor = compactor(&mut graph, algorithm);
        for &direction in directions {
            compactor
                .calculate_constraints(direction)
                .map_err(|err| TestCaseError::fail(err.to_string()))?;
            prop_assert_eq!(compactor.graph().find_group_cycle(), None);
            compactor
                .compact(direction)
                .map_err(|err| TestCaseError::fail(err.to_string()))?;
        }
    }
    check_separated(&graph, &nodes)
}

/// Members keep their offsets to the rest of their group.
fn check_group_rigidity(
    cells: &[Cell],
    direction: Direction,
    algorithm: ConstraintAlgorithm,
) -> Result<(), TestCaseError> {
    let (mut graph, nodes) = build(cells);
    add_groups(&mut graph, cells, &nodes, direction);
    compact(&mut graph, algorithm, &[direction])?;

    for group in graph.groups() {
        let reference = graph.node(group.reference()).hitbox();
        let original_reference = cells[group.reference().index()].rect;
        for &member in group.nodes() {
            let hitbox = graph.node(member).hitbox();
            let original = cells[member.index()].rect;
            prop_assert!(approx_eq!(
                f64,
                hitbox.x() - reference.x(),
                original.x() - original_reference.x(),
                epsilon = EPSILON
            ));
            prop_assert!(approx_eq!(
                f64,
                hitbox.y() - reference.y(),
                original.y() - original_reference.y(),
                epsilon = EPSILON
            ));
        }
    }
    check_separated(&graph, &nodes)
}

/// Compacting back and forth returns to the first result.
fn check_direction_round_trip(
    cells: &[Cell],
    direction: Direction,
    algorithm: ConstraintAlgorithm,
) -> Result<(), TestCaseError> {
    let (mut graph, nodes) = build(cells);
    compact(&mut graph, algorithm, &[direction])?;
    let first = positions(&graph, &nodes);

    compact(&mut graph, algorithm, &[direction.opposite(), direction])?;

    for (actual, expected) in positions(&graph, &nodes).iter().zip(&first) {
        prop_assert!(approx_eq!(f64, actual.x(), expected.x(), epsilon = EPSILON));
        prop_assert!(approx_eq!(f64, actual.y(), expected.y(), epsilon = EPSILON));
    }
    Ok(())
}

/// The insertion order of the nodes does not matter.
fn check_order_invariance(
    cells: &[Cell],
    shuffled: &[Cell],
    direction: Direction,
    algorithm: ConstraintAlgorithm,
) -> Result<(), TestCaseError> {
    let (mut graph, nodes) = build(cells);
    compact(&mut graph, algorithm, &[direction])?;

    let (mut shuffled_graph, shuffled_nodes) = build(shuffled);
    compact(&mut shuffled_graph, algorithm, &[direction])?;

    for (cell, &node) in shuffled.iter().zip(&shuffled_nodes) {
        let actual = shuffled_graph.node(node).hitbox();
        let expected = graph.node(nodes[cell.index]).hitbox();
        prop_assert!(approx_eq!(f64, actual.x(), expected.x(), epsilon = EPSILON));
        prop_assert!(approx_eq!(f64, actual.y(), expected.y(), epsilon = EPSILON));
    }
    Ok(())
}

/// Both constraint algorithms yield the same layout.
fn check_algorithms_agree(
    build: impl Fn() -> (Graph, Vec<NodeId>),
    directions: &[Direction],
) -> Result<(), TestCaseError> {
    let (mut quadratic, nodes) = build();
    compact(&mut quadratic, ConstraintAlgorithm::Quadratic, directions)?;

    let (mut scanline, _) = build();
    compact(&mut scanline, ConstraintAlgorithm::Scanline, directions)?;

    for (actual, expected) in positions(&scanline, &nodes)
        .iter()
        .zip(&positions(&quadratic, &nodes))
    {
        prop_assert!(approx_eq!(f64, actual.x(), expected.x(), epsilon = EPSILON));
        prop_assert!(approx_eq!(f64, actual.y(), expected.y(), epsilon = EPSILON));
    }
    Ok(())
}

/// After a left pass every node rests at the start of the strip or against
/// a node that requires spacing to it.
fn check_left_minimality(
    cells: &[Cell],
    algorithm: ConstraintAlgorithm,
) -> Result<(), TestCaseError> {
    let Some(min_start) = cells.iter().map(|cell| cell.rect.x()).reduce(f64::min) else {
        return Ok(());
    };
    let (mut graph, nodes) = build(cells);
    compact(&mut graph, algorithm, &[Direction::Left])?;

    for &node in &nodes {
        let hitbox = graph.node(node).hitbox();
        if approx_eq!(f64, hitbox.x(), min_start, epsilon = EPSILON) {
            continue;
        }
        let blocked = nodes.iter().any(|&other| {
            let other = graph.node(other).hitbox();
            fuzzy::gt(other.max_y() + SPACING, hitbox.y())
                && fuzzy::lt(other.y(), hitbox.max_y() + SPACING)
                && approx_eq!(f64, other.max_x() + SPACING, hitbox.x(), epsilon = EPSILON)
        });
        prop_assert!(blocked, "{node} at {hitbox:?} could move further left");
    }
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn no_overlap(
        cells in layout_strategy(),
        directions in prop::collection::vec(direction_strategy(), 1..6),
        algorithm in algorithm_strategy(),
    ) {
        check_no_overlap(build(&cells), &directions, algorithm)?;
    }

    #[test]
    fn group_rigidity(
        cells in layout_strategy(),
        direction in direction_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        check_group_rigidity(&cells, direction, algorithm)?;
    }

    #[test]
    fn direction_round_trip(
        cells in layout_strategy(),
        direction in direction_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        check_direction_round_trip(&cells, direction, algorithm)?;
    }

    #[test]
    fn order_invariance(
        (cells, shuffled) in shuffled_layout_strategy(),
        direction in direction_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        check_order_invariance(&cells, &shuffled, direction, algorithm)?;
    }

    #[test]
    fn algorithms_agree(
        cells in layout_strategy(),
        directions in prop::collection::vec(direction_strategy(), 1..6),
    ) {
        check_algorithms_agree(|| build(&cells), &directions)?;
    }

    #[test]
    fn no_overlap_with_group_runs(
        cells in layout_strategy(),
        direction in direction_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        let directions = [direction, direction.opposite(), direction];
        check_no_overlap(build_with_runs(&cells, direction), &directions, algorithm)?;
    }

    #[test]
    fn algorithms_agree_with_group_runs(
        cells in layout_strategy(),
        direction in direction_strategy(),
    ) {
        let directions = [direction, direction.opposite(), direction];
        check_algorithms_agree(|| build_with_runs(&cells, direction), &directions)?;
    }

    #[test]
    fn no_overlap_with_children(
        layout in nested_layout_strategy(),
        directions in prop::collection::vec(direction_strategy(), 1..6),
        algorithm in algorithm_strategy(),
    ) {
        check_no_overlap(build_nested(&layout), &directions, algorithm)?;
    }

    #[test]
    fn algorithms_agree_with_children(
        layout in nested_layout_strategy(),
        directions in prop::collection::vec(direction_strategy(), 1..6),
    ) {
        check_algorithms_agree(|| build_nested(&layout), &directions)?;
    }

    #[test]
    fn left_minimality(cells in layout_strategy(), algorithm in algorithm_strategy()) {
        check_left_minimality(&cells, algorithm)?;
    }
}
