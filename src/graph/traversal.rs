//! BFS over undirected links.

use std::collections::{HashMap, HashSet, VecDeque};

/// Weakly connected components of the graph spanned by `nodes` and `links`.
///
/// Components are ordered by the first node that appears in `nodes`, and
/// members keep the order of `nodes`. Links naming a node outside `nodes` are
/// ignored.
pub fn connected_components<'a, I>(nodes: &[String], links: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let position: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (a, b) in links {
        if let (Some(&ia), Some(&ib)) = (position.get(a), position.get(b)) {
            adjacency[ia].push(ib);
            adjacency[ib].push(ia);
        }
    }

    let mut visited = HashSet::new();
    let mut components = Vec::new();

    for start in 0..nodes.len() {
        if !visited.insert(start) {
            continue;
        }
        let mut members = vec![start];
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for &next in &adjacency[current] {
                if visited.insert(next) {
                    members.push(next);
                    queue.push_back(next);
                }
            }
        }

        members.sort_unstable();
        components.push(members.into_iter().map(|i| nodes[i].clone()).collect());
    }

    components
}
