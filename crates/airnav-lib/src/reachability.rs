use std::collections::{BTreeSet, VecDeque};

use crate::network::Network;
use crate::space::Space;

/// Every node connected to `start` by any path, `start` included.
///
/// Traversal is breadth-first over an explicit queue, so arbitrarily large
/// components never grow the call stack. An unknown `start` yields an empty set.
pub fn reachable_from<S: Space>(network: &Network<S>, start: &S::Key) -> BTreeSet<S::Key> {
    let Some(start_idx) = network.index_of(start) else {
        return BTreeSet::new();
    };

    visit(network, start_idx, None)
        .into_iter()
        .enumerate()
        .filter(|(_, seen)| *seen)
        .map(|(idx, _)| network.node_at(idx).key.clone())
        .collect()
}

/// Whether `goal` lies in the same connected component as `start`.
pub fn is_reachable<S: Space>(network: &Network<S>, start: &S::Key, goal: &S::Key) -> bool {
    match (network.index_of(start), network.index_of(goal)) {
        (Some(start_idx), Some(goal_idx)) => is_reachable_index(network, start_idx, goal_idx),
        _ => false,
    }
}

pub(crate) fn is_reachable_index<S: Space>(
    network: &Network<S>,
    start: usize,
    goal: usize,
) -> bool {
    visit(network, start, Some(goal))[goal]
}

/// Breadth-first sweep from `start`, returning a visited flag per node index.
/// Stops as soon as `goal` is marked, when one is given.
fn visit<S: Space>(network: &Network<S>, start: usize, goal: Option<usize>) -> Vec<bool> {
    let mut visited = vec![false; network.node_count()];
    let mut queue = VecDeque::new();

    visited[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if Some(current) == goal {
            break;
        }
        for (next, _) in network.links(current) {
            if visited[next] {
                continue;
            }
            visited[next] = true;
            if Some(next) == goal {
                return visited;
            }
            queue.push_back(next);
        }
    }

    visited
}
