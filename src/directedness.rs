use std::fmt::Debug;

/// Marker type representing directed graph edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Directed;

/// Marker type representing undirected graph edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Undirected;

/// Trait defining the directedness behavior of graph edges.
///
/// This trait is implemented by [`Directed`] and [`Undirected`] marker types
/// to decide, at compile time, whether adding an edge materializes one or
/// both adjacency directions.
pub trait Directedness: Copy + Debug + Default + 'static {
    fn is_directed() -> bool;

    /// Returns true if an edge stored as `(from, to)` connects `a` and `b`
    /// under this directedness.
    fn connects(from: usize, to: usize, a: usize, b: usize) -> bool {
        (from == a && to == b) || (!Self::is_directed() && from == b && to == a)
    }
}

impl Directedness for Directed {
    fn is_directed() -> bool {
        true
    }
}

impl Directedness for Undirected {
    fn is_directed() -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connects() {
        assert!(Directed::connects(0, 1, 0, 1));
        assert!(!Directed::connects(0, 1, 1, 0));
        assert!(Undirected::connects(0, 1, 1, 0));
        assert!(!Undirected::connects(0, 1, 0, 2));
    }
}
