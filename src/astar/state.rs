//! Search-tree nodes: persistent paths, visited sets, partial tour states.

use crate::model::City;
use std::rc::Rc;

#[derive(Debug)]
struct PathNode {
    city: City,
    parent: Option<Rc<PathNode>>,
}

/// Persistent path of cities.
///
/// Extending a path allocates one node and shares the whole prefix with
/// the parent, so sibling successors never copy their common prefix.
#[derive(Debug, Clone)]
pub struct TourPath {
    head: Rc<PathNode>,
    len: usize,
}

impl TourPath {
    /// A path holding only `origin`.
    pub fn singleton(origin: City) -> Self {
        Self {
            head: Rc::new(PathNode {
                city: origin,
                parent: None,
            }),
            len: 1,
        }
    }

    /// A new path equal to `self` followed by `city`.
    pub fn extend(&self, city: City) -> Self {
        Self {
            head: Rc::new(PathNode {
                city,
                parent: Some(Rc::clone(&self.head)),
            }),
            len: self.len + 1,
        }
    }

    /// Most recently visited city.
    pub fn last(&self) -> City {
        self.head.city
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Never true; a path always holds its origin.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Cities from origin to the last visited city.
    pub fn to_vec(&self) -> Vec<City> {
        let mut cities = Vec::with_capacity(self.len + 1);
        let mut node = Some(&self.head);
        while let Some(n) = node {
            cities.push(n.city);
            node = n.parent.as_ref();
        }
        cities.reverse();
        cities
    }
}

impl Drop for TourPath {
    // Unlink uniquely-owned ancestors one at a time so dropping a deep path
    // cannot overflow the stack through recursive `Rc` drops.
    fn drop(&mut self) {
        let Some(head) = Rc::get_mut(&mut self.head) else {
            return;
        };
        let mut next = head.parent.take();
        while let Some(node) = next {
            next = match Rc::try_unwrap(node) {
                Ok(mut inner) => inner.parent.take(),
                Err(_) => None,
            };
        }
    }
}

/// Set of visited cities as a bitset sized to the instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedSet {
    words: Vec<u64>,
    count: usize,
}

impl VisitedSet {
    /// An empty set able to hold cities `0..n`.
    pub fn new(n: usize) -> Self {
        Self {
            words: vec![0; n.div_ceil(64).max(1)],
            count: 0,
        }
    }

    /// Inserts `city`; returns `false` if it was already present.
    pub fn insert(&mut self, city: City) -> bool {
        let (w, b) = (city / 64, city % 64);
        let mask = 1u64 << b;
        if self.words[w] & mask != 0 {
            return false;
        }
        self.words[w] |= mask;
        self.count += 1;
        true
    }

    /// A copy of `self` with `city` added.
    pub fn with(&self, city: City) -> Self {
        let mut next = self.clone();
        next.insert(city);
        next
    }

    #[inline]
    pub fn contains(&self, city: City) -> bool {
        self.words
            .get(city / 64)
            .is_some_and(|w| w & (1u64 << (city % 64)) != 0)
    }

    /// Number of cities in the set.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Cities in `0..n` not in the set, ascending.
    pub fn unvisited(&self, n: usize) -> impl Iterator<Item = City> + '_ {
        (0..n).filter(move |&c| !self.contains(c))
    }
}

/// One node of the search tree: a partial tour and its bookkeeping costs.
///
/// Created by the engine when a parent is expanded and never modified
/// afterwards.
#[derive(Debug, Clone)]
pub struct PartialTourState {
    path: TourPath,
    visited: VisitedSet,
    g: f64,
    f: f64,
}

impl PartialTourState {
    /// The root state at `origin` for an instance of `n` cities.
    pub fn root(origin: City, n: usize, h: f64) -> Self {
        let mut visited = VisitedSet::new(n);
        visited.insert(origin);
        Self {
            path: TourPath::singleton(origin),
            visited,
            g: 0.0,
            f: h,
        }
    }

    /// The successor reached by travelling to `city`.
    ///
    /// `visited` must already contain `city`; the engine builds it first so
    /// the heuristic can be evaluated on it.
    pub fn successor(&self, city: City, visited: VisitedSet, g: f64, h: f64) -> Self {
        debug_assert!(visited.contains(city));
        Self {
            path: self.path.extend(city),
            visited,
            g,
            f: g + h,
        }
    }

    pub fn path(&self) -> &TourPath {
        &self.path
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Accumulated cost of the path.
    pub fn g(&self) -> f64 {
        self.g
    }

    /// `g + h`.
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Heuristic part of the estimate.
    pub fn h(&self) -> f64 {
        self.f - self.g
    }

    pub fn last_city(&self) -> City {
        self.path.last()
    }

    /// Whether the path holds all `n` cities.
    pub fn is_complete(&self, n: usize) -> bool {
        self.visited.len() == n
    }
}
