/// Route between two nodes: the visited nodes from source to target inclusive,
/// and the summed edge weight along them.
///
/// An unreachable target is a normal value: empty path, infinite distance.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    pub path: Vec<usize>,
    pub distance: f64,
}

impl PathResult {

    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            distance: f64::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty() && self.distance.is_finite()
    }

    pub fn source(&self) -> Option<usize> {
        self.path.first().copied()
    }

    pub fn target(&self) -> Option<usize> {
        self.path.last().copied()
    }

    /// Number of edges travelled
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// True when `a` and `b` are consecutive on the path, in either order
    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.path
            .windows(2)
            .any(|pair| (pair[0] == a && pair[1] == b) || (pair[0] == b && pair[1] == a))
    }
}
