use super::Graph;
use crate::graph_config::GraphConfig;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct Reach {
    distance: u32,
    seed: usize,
}

/// Annotate every node with its hop count to the closest seed.
///
/// Distances are found by repeated passes of edge relaxation over the link
/// list, stopping after a pass with no update or after
/// `max_label_iterations` passes. On graphs deeper than that bound far nodes
/// can keep an overestimated distance or stay unreached. Links are
/// returned untouched; nodes no seed reaches get `distance: None`.
pub fn label_distances(mut graph: Graph, seed_ids: &[String], config: &GraphConfig) -> Graph {
    let seed_set: FxHashSet<&str> = seed_ids.iter().map(String::as_str).collect();

    let labels: Vec<Option<(u32, String, String)>> = {
        let mut seeds: Vec<(&str, &str)> = Vec::new();
        let mut reached: FxHashMap<&str, Reach> = FxHashMap::default();

        for node in &graph.nodes {
            if seed_set.contains(node.id.as_str()) && !reached.contains_key(node.id.as_str()) {
                reached.insert(
                    node.id.as_str(),
                    Reach {
                        distance: 0,
                        seed: seeds.len(),
                    },
                );
                seeds.push((node.id.as_str(), node.name.as_str()));
            }
        }

        let passes = relax_until_stable(&graph, &mut reached, config.max_label_iterations);
        debug!(passes, reached = reached.len(), "distance labeling finished");

        graph
            .nodes
            .iter()
            .map(|node| {
                reached.get(node.id.as_str()).map(|reach| {
                    let (seed_id, seed_name) = seeds[reach.seed];
                    (reach.distance, seed_id.to_string(), seed_name.to_string())
                })
            })
            .collect()
    };

    for (node, label) in graph.nodes.iter_mut().zip(labels) {
        match label {
            Some((distance, seed_id, seed_name)) => {
                node.distance = Some(distance);
                node.closest_seed_id = Some(seed_id);
                node.closest_seed_name = Some(seed_name);
            }
            None => {
                node.distance = None;
                node.closest_seed_id = None;
                node.closest_seed_name = None;
            }
        }
    }

    graph
}

/// Returns the number of passes made.
fn relax_until_stable<'g>(
    graph: &'g Graph,
    reached: &mut FxHashMap<&'g str, Reach>,
    max_passes: usize,
) -> usize {
    let mut passes = 0;
    let mut changed = true;

    while changed && passes < max_passes {
        changed = false;
        passes += 1;

        for link in &graph.links {
            let source = reached.get(link.source.as_str()).copied();
            let target = reached.get(link.target.as_str()).copied();

            match (source, target) {
                (Some(from), None) => {
                    reached.insert(link.target.as_str(), step_from(from));
                    changed = true;
                }
                (None, Some(from)) => {
                    reached.insert(link.source.as_str(), step_from(from));
                    changed = true;
                }
                // Only the target side is relaxed once both ends are known
                (Some(from), Some(to)) if from.distance + 1 < to.distance => {
                    reached.insert(link.target.as_str(), step_from(from));
                    changed = true;
                }
                _ => {}
            }
        }
    }

    passes
}

fn step_from(reach: Reach) -> Reach {
    Reach {
        distance: reach.distance + 1,
        seed: reach.seed,
    }
}
