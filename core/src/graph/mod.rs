pub mod builder;
pub mod distance;

pub use builder::{SeedArtists, build_graph, build_taste_graph};
pub use distance::label_distances;

use crate::models::Artist;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Seed,
    Related,
    Recommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Related,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub popularity: u8,
    pub genres: Vec<String>,
    pub image: Option<String>,
    /// Hops to the nearest seed; `None` when no seed reaches this node
    pub distance: Option<u32>,
    pub closest_seed_id: Option<String>,
    pub closest_seed_name: Option<String>,
}

impl GraphNode {
    pub fn from_artist(artist: Artist, kind: NodeKind, default_popularity: u8) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            kind,
            popularity: artist.popularity.unwrap_or(default_popularity),
            genres: artist.genres,
            image: artist.image_url,
            distance: None,
            closest_seed_id: None,
            closest_seed_name: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub value: u32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LinkKind>,
}

/// Nodes and links of one build. Links are never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    /// How many raw links run from `source` to `target`.
    pub fn link_multiplicity(&self, source: &str, target: &str) -> usize {
        self.links
            .iter()
            .filter(|link| link.source == source && link.target == target)
            .count()
    }

    /// One link per (source, target, kind) with summed weights, first-seen order.
    pub fn aggregated_links(&self) -> Vec<GraphLink> {
        let mut positions: FxHashMap<(&str, &str, Option<LinkKind>), usize> = FxHashMap::default();
        let mut aggregated: Vec<GraphLink> = Vec::new();

        for link in &self.links {
            let key = (link.source.as_str(), link.target.as_str(), link.kind);
            match positions.get(&key) {
                Some(&position) => aggregated[position].value += link.value,
                None => {
                    positions.insert(key, aggregated.len());
                    aggregated.push(link.clone());
                }
            }
        }

        aggregated
    }
}
