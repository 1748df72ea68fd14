//! Hashiwokakero ("build bridges") front-end.
//!
//! Digit cells are islands; bridges run horizontally or vertically to the
//! nearest island, carry one or two spans, may not cross, and every
//! island's clue gives the exact number of incident spans. The clue
//! counts are linear sum constraints; crossing exclusion and
//! connectedness go through external predicates.

use std::collections::VecDeque;
use std::fmt::Write as _;

use crate::error::Result;
use crate::puzzles::PuzzleGrid;
use crate::solver::engine::Solver;
use crate::solver::external::{BoundsView, ExternalConstraint};
use crate::solver::model::VariableId;

pub type NodeId = usize;
pub type LinkId = usize;

/// An island cell.
#[derive(Debug, Clone)]
pub struct Node {
    pub x: usize,
    pub y: usize,
    pub size: u8,
    links: Vec<LinkId>,
}

/// A candidate bridge between two islands with no island in between.
#[derive(Debug, Clone)]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
    pub horizontal: bool,
}

/// The degeometrised puzzle: islands, candidate links, and the pairs of
/// links that would cross.
#[derive(Debug, Clone)]
pub struct HashiPuzzle {
    height: usize,
    nodes: Vec<Node>,
    links: Vec<Link>,
    crossings: Vec<(LinkId, LinkId)>,
}

impl HashiPuzzle {
    /// Extracts islands and candidate links from the grid. Every
    /// non-digit cell is water.
    pub fn from_grid(grid: &PuzzleGrid) -> Result<Self> {
        let width = grid.width();
        let height = grid.height();

        let mut node_at = vec![vec![None; width]; height];
        let mut nodes = Vec::new();
        for y in 0..height {
            for x in 0..width {
                if let Some(size) = grid.digit(x, y) {
                    node_at[y][x] = Some(nodes.len());
                    nodes.push(Node {
                        x,
                        y,
                        size,
                        links: Vec::new(),
                    });
                }
            }
        }

        // Each island links to the nearest island rightwards and the
        // nearest island downwards; farther islands are shadowed.
        let mut links: Vec<Link> = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let Some(a) = node_at[y][x] else { continue };
                if let Some(b) = (x + 1..width).find_map(|xx| node_at[y][xx]) {
                    links.push(Link {
                        a,
                        b,
                        horizontal: true,
                    });
                }
                if let Some(b) = (y + 1..height).find_map(|yy| node_at[yy][x]) {
                    links.push(Link {
                        a,
                        b,
                        horizontal: false,
                    });
                }
            }
        }

        for (id, link) in links.iter().enumerate() {
            nodes[link.a].links.push(id);
            nodes[link.b].links.push(id);
        }

        let mut crossings = Vec::new();
        for (h_id, h) in links.iter().enumerate() {
            if !h.horizontal {
                continue;
            }
            let y = nodes[h.a].y;
            let (x_a, x_b) = (nodes[h.a].x, nodes[h.b].x);
            for (v_id, v) in links.iter().enumerate() {
                if v.horizontal {
                    continue;
                }
                let x = nodes[v.a].x;
                let (y_a, y_b) = (nodes[v.a].y, nodes[v.b].y);
                if y_a < y && y < y_b && x_a < x && x < x_b {
                    crossings.push((h_id, v_id));
                }
            }
        }

        Ok(Self {
            height,
            nodes,
            links,
            crossings,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn crossings(&self) -> &[(LinkId, LinkId)] {
        &self.crossings
    }

    /// Builds the constraint model: one `[0, 2]` variable per candidate
    /// link and one `[size, size]` constraint per island over its
    /// incident links. Returns the link variables indexed by [`LinkId`].
    pub fn build_model(&self, solver: &mut Solver<'_>) -> Result<Vec<VariableId>> {
        let vars = self
            .links
            .iter()
            .map(|_| solver.create_variable(0, 2))
            .collect::<Result<Vec<_>>>()?;
        for node in &self.nodes {
            let cons = solver.create_constraint(i32::from(node.size), i32::from(node.size))?;
            for &link in &node.links {
                solver.add_variable(cons, vars[link])?;
            }
        }
        Ok(vars)
    }

    /// The crossing-exclusion predicate for this puzzle.
    pub fn no_crossing(&self, vars: &[VariableId]) -> NoCrossing {
        NoCrossing {
            pairs: self
                .crossings
                .iter()
                .map(|&(h, v)| (vars[h], vars[v]))
                .collect(),
        }
    }

    /// The single-component predicate for this puzzle.
    pub fn connectivity(&self, vars: &[VariableId]) -> Connectivity {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for (id, link) in self.links.iter().enumerate() {
            adjacency[link.a].push((link.b, vars[id]));
            adjacency[link.b].push((link.a, vars[id]));
        }
        Connectivity { adjacency }
    }

    /// Reads the solved span count of every link.
    pub fn bridges(&self, solver: &Solver<'_>, vars: &[VariableId]) -> Result<Vec<i32>> {
        vars.iter().map(|&var| solver.value(var)).collect()
    }

    /// Renders the solution as a GraphViz graph with position-pinned
    /// island nodes and one edge per bridge span.
    pub fn render_dot(&self, bridges: &[i32]) -> String {
        let mut out = String::from("graph {\n");
        for (id, node) in self.nodes.iter().enumerate() {
            let _ = writeln!(
                out,
                "n{}_{} [ label={}\npos=\"{},{}!\"]",
                id,
                node.size,
                node.size,
                node.x,
                self.height - node.y - 1
            );
        }
        for (id, link) in self.links.iter().enumerate() {
            for _ in 0..bridges[id] {
                let _ = writeln!(
                    out,
                    "n{}_{} -- n{}_{};",
                    link.a, self.nodes[link.a].size, link.b, self.nodes[link.b].size
                );
            }
        }
        out.push_str("}\n");
        out
    }
}

/// Two links that cross may not both carry bridges.
pub struct NoCrossing {
    pairs: Vec<(VariableId, VariableId)>,
}

impl ExternalConstraint for NoCrossing {
    fn is_consistent(&self, bounds: &BoundsView<'_>) -> bool {
        self.pairs
            .iter()
            .all(|&(h, v)| bounds.lmin(h) == 0 || bounds.lmin(v) == 0)
    }
}

/// Once every link is fixed, the bridged islands must form one connected
/// component.
pub struct Connectivity {
    adjacency: Vec<Vec<(NodeId, VariableId)>>,
}

impl ExternalConstraint for Connectivity {
    fn is_consistent(&self, bounds: &BoundsView<'_>) -> bool {
        if self.adjacency.len() <= 1 {
            return true;
        }
        let all_fixed = self
            .adjacency
            .iter()
            .flatten()
            .all(|&(_, var)| bounds.fixed(var));
        if !all_fixed {
            return true;
        }

        let mut seen = vec![false; self.adjacency.len()];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(node) = queue.pop_front() {
            for &(other, var) in &self.adjacency[node] {
                if bounds.value(var) > 0 && !seen[other] {
                    seen[other] = true;
                    reached += 1;
                    queue.push_back(other);
                }
            }
        }
        reached == self.adjacency.len()
    }
}
