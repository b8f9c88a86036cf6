use super::{Graph, GraphLink, GraphNode, LinkKind, NodeKind, label_distances};
use crate::directory::{ArtistDirectory, fetch_artists};
use crate::error::Result;
use crate::graph_config::GraphConfig;
use crate::models::{Artist, ArtistRef, Seed, Track, extract_artists, seed_artist_ids};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

const RECOMMENDATION_LINK_WEIGHT: u32 = 1;
const RELATED_LINK_WEIGHT: u32 = 2;

/// Seed artists as the caller has them: bare ids still to be resolved, or full records.
#[derive(Debug, Clone)]
pub enum SeedArtists {
    Ids(Vec<String>),
    Resolved(Vec<Artist>),
}

impl From<Vec<String>> for SeedArtists {
    fn from(ids: Vec<String>) -> Self {
        SeedArtists::Ids(ids)
    }
}

impl From<Vec<Artist>> for SeedArtists {
    fn from(artists: Vec<Artist>) -> Self {
        SeedArtists::Resolved(artists)
    }
}

/// Build the artist graph around the seeds.
///
/// Seeds come first, then the artists of the recommended tracks, then up to
/// `related_per_seed` related artists for each of the first
/// `expanded_seed_limit` seeds. A node keeps the kind it was created with;
/// later steps only add links to it.
///
/// Failing to resolve seed or recommendation artists aborts the build. A
/// failed related-artist lookup only leaves that seed unexpanded.
pub async fn build_graph<D>(
    directory: &D,
    seeds: SeedArtists,
    recommended_tracks: &[Track],
    config: &GraphConfig,
) -> Result<Graph>
where
    D: ArtistDirectory + ?Sized,
{
    let seed_artists = resolve_seed_artists(directory, seeds, config).await?;
    let mut builder = GraphAssembly::new(config.default_popularity);

    for artist in &seed_artists {
        builder.insert_if_absent(artist.clone(), NodeKind::Seed);
    }

    add_recommendation_nodes(&mut builder, directory, recommended_tracks, config).await?;
    add_recommendation_links(&mut builder, &seed_artists, recommended_tracks);
    expand_related_artists(&mut builder, directory, &seed_artists, config).await;

    let graph = builder.finish();
    debug!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        "artist graph built"
    );
    Ok(graph)
}

/// Seeds → graph → distance labels, the full pipeline behind the taste map.
pub async fn build_taste_graph<D>(
    directory: &D,
    seeds: &[Seed],
    recommended_tracks: &[Track],
    config: &GraphConfig,
) -> Result<Graph>
where
    D: ArtistDirectory + ?Sized,
{
    let seed_ids = seed_artist_ids(seeds, recommended_tracks);
    let graph = build_graph(
        directory,
        SeedArtists::Ids(seed_ids.clone()),
        recommended_tracks,
        config,
    )
    .await?;

    Ok(label_distances(graph, &seed_ids, config))
}

async fn resolve_seed_artists<D>(
    directory: &D,
    seeds: SeedArtists,
    config: &GraphConfig,
) -> Result<Vec<Artist>>
where
    D: ArtistDirectory + ?Sized,
{
    match seeds {
        SeedArtists::Resolved(artists) => Ok(artists),
        SeedArtists::Ids(ids) if ids.is_empty() => Ok(Vec::new()),
        SeedArtists::Ids(ids) => fetch_artists(directory, &ids, config.artist_batch_size).await,
    }
}

async fn add_recommendation_nodes<D>(
    builder: &mut GraphAssembly,
    directory: &D,
    recommended_tracks: &[Track],
    config: &GraphConfig,
) -> Result<()>
where
    D: ArtistDirectory + ?Sized,
{
    let track_artists = extract_artists(recommended_tracks);
    if track_artists.is_empty() {
        return Ok(());
    }

    let ids: Vec<String> = track_artists.iter().map(|artist| artist.id.clone()).collect();
    let details = fetch_artists(directory, &ids, config.artist_batch_size).await?;

    for artist in details {
        builder.insert_if_absent(artist, NodeKind::Recommendation);
    }

    // Artists the directory did not return still anchor their links
    for artist_ref in track_artists {
        if !builder.contains(&artist_ref.id) {
            builder.insert_if_absent(artist_from_ref(artist_ref), NodeKind::Recommendation);
        }
    }

    Ok(())
}

/// Every (track, track artist, seed) triple with distinct ids yields one link.
fn add_recommendation_links(builder: &mut GraphAssembly, seed_artists: &[Artist], recommended_tracks: &[Track]) {
    for track in recommended_tracks {
        for artist in &track.artists {
            for seed in seed_artists {
                if artist.id != seed.id {
                    builder.link(&seed.id, &artist.id, RECOMMENDATION_LINK_WEIGHT, None);
                }
            }
        }
    }
}

async fn expand_related_artists<D>(
    builder: &mut GraphAssembly,
    directory: &D,
    seed_artists: &[Artist],
    config: &GraphConfig,
) where
    D: ArtistDirectory + ?Sized,
{
    for seed in seed_artists.iter().take(config.expanded_seed_limit) {
        let related = match directory.get_related_artists(&seed.id).await {
            Ok(related) => related,
            Err(e) => {
                warn!(seed_id = %seed.id, error = %e, "related artist lookup failed, skipping seed");
                Vec::new()
            }
        };

        for artist in related.into_iter().take(config.related_per_seed) {
            let target = artist.id.clone();
            builder.insert_if_absent(artist, NodeKind::Related);
            builder.link(&seed.id, &target, RELATED_LINK_WEIGHT, Some(LinkKind::Related));
        }
    }
}

fn artist_from_ref(artist_ref: ArtistRef) -> Artist {
    Artist::new(artist_ref.id, artist_ref.name)
}

/// Graph under construction, local to one build.
struct GraphAssembly {
    nodes: Vec<GraphNode>,
    positions: FxHashMap<String, usize>,
    links: Vec<GraphLink>,
    default_popularity: u8,
}

impl GraphAssembly {
    fn new(default_popularity: u8) -> Self {
        Self {
            nodes: Vec::new(),
            positions: FxHashMap::default(),
            links: Vec::new(),
            default_popularity,
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// First writer wins: an existing node is never replaced or re-typed.
    fn insert_if_absent(&mut self, artist: Artist, kind: NodeKind) -> bool {
        if self.contains(&artist.id) {
            return false;
        }

        self.positions.insert(artist.id.clone(), self.nodes.len());
        self.nodes
            .push(GraphNode::from_artist(artist, kind, self.default_popularity));
        true
    }

    fn link(&mut self, source: &str, target: &str, value: u32, kind: Option<LinkKind>) {
        self.links.push(GraphLink {
            source: source.to_string(),
            target: target.to_string(),
            value,
            kind,
        });
    }

    fn finish(self) -> Graph {
        Graph {
            nodes: self.nodes,
            links: self.links,
        }
    }
}
