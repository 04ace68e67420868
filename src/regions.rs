//! Связные области карты: материки и озёра

use std::collections::{BTreeMap, HashMap};

use petgraph::algo::connected_components;
use petgraph::graph::UnGraph;
use serde::Serialize;

use crate::biome::Biome;
use crate::graph::{Center, Map};

/// Граф соседства полигонов, отобранных `member`.
/// Вес узла: индекс полигона в карте.
pub fn build_center_graph<F>(map: &Map, member: F) -> UnGraph<usize, ()>
where
    F: Fn(&Center) -> bool,
{
    let mut graph = UnGraph::new_undirected();
    let mut id_to_node = HashMap::new();

    for p in map.centers.iter().filter(|p| member(*p)) {
        id_to_node.insert(p.index, graph.add_node(p.index));
    }

    for p in &map.centers {
        let Some(&a) = id_to_node.get(&p.index) else {
            continue;
        };
        for &r in &p.neighbors {
            // Каждое ребро добавляется один раз, со стороны меньшего индекса
            if p.index < r
                && let Some(&b) = id_to_node.get(&r)
            {
                graph.add_edge(a, b, ());
            }
        }
    }
    graph
}

/// Число связных массивов суши
#[must_use]
pub fn count_landmasses(map: &Map) -> usize {
    connected_components(&build_center_graph(map, |p| !p.water))
}

/// Число озёр (связных водоёмов, не связанных с океаном)
#[must_use]
pub fn count_lakes(map: &Map) -> usize {
    connected_components(&build_center_graph(map, |p| p.water && !p.ocean))
}

/// Сводка по готовой карте
#[derive(Debug, Clone, Default, Serialize)]
pub struct MapSummary {
    pub centers: usize,
    pub corners: usize,
    pub edges: usize,
    pub land_centers: usize,
    pub ocean_centers: usize,
    pub lake_centers: usize,
    pub coast_centers: usize,
    pub landmasses: usize,
    pub lakes: usize,
    pub river_edges: usize,
    pub max_river_flow: u32,
    pub biomes: BTreeMap<Biome, usize>,
}

#[must_use]
pub fn summarize(map: &Map) -> MapSummary {
    let mut biomes = BTreeMap::new();
    for biome in map.centers.iter().filter_map(|p| p.biome) {
        *biomes.entry(biome).or_insert(0) += 1;
    }

    MapSummary {
        centers: map.centers.len(),
        corners: map.corners.len(),
        edges: map.edges.len(),
        land_centers: map.centers.iter().filter(|p| !p.water).count(),
        ocean_centers: map.centers.iter().filter(|p| p.ocean).count(),
        lake_centers: map.centers.iter().filter(|p| p.water && !p.ocean).count(),
        coast_centers: map.centers.iter().filter(|p| p.coast).count(),
        landmasses: count_landmasses(map),
        lakes: count_lakes(map),
        river_edges: map.edges.iter().filter(|e| e.river > 0).count(),
        max_river_flow: map.edges.iter().map(|e| e.river).max().unwrap_or(0),
        biomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::tessellation::RegularGrid;

    fn grid_map(n: usize) -> Map {
        build_graph(&RegularGrid::new(n, 100.0, true), 100.0).unwrap()
    }

    #[test]
    fn two_islands_separated_by_water() {
        let mut map = grid_map(5);
        // Суша только в столбцах 1 и 3
        for p in &mut map.centers {
            let column = p.index % 5;
            p.water = column != 1 && column != 3;
        }
        assert_eq!(count_landmasses(&map), 2);
    }

    #[test]
    fn lakes_exclude_ocean() {
        let mut map = grid_map(5);
        for p in &mut map.centers {
            p.water = p.index == 6 || p.index == 18;
            p.ocean = p.index == 18;
        }
        assert_eq!(count_lakes(&map), 1);
        assert_eq!(count_landmasses(&map), 1);
    }

    #[test]
    fn graph_has_one_edge_per_neighbor_pair() {
        let map = grid_map(3);
        let graph = build_center_graph(&map, |_| true);
        assert_eq!(graph.node_count(), 9);
        assert_eq!(graph.edge_count(), 12);
    }

    #[test]
    fn summary_counts_biomes_and_rivers() {
        let mut map = grid_map(2);
        map.centers[0].biome = Some(Biome::Ocean);
        map.centers[1].biome = Some(Biome::Ocean);
        map.centers[2].biome = Some(Biome::Grassland);
        map.edges[0].river = 3;

        let summary = summarize(&map);
        assert_eq!(summary.centers, 4);
        assert_eq!(summary.biomes.get(&Biome::Ocean), Some(&2));
        assert_eq!(summary.biomes.get(&Biome::Grassland), Some(&1));
        assert_eq!(summary.river_edges, 1);
        assert_eq!(summary.max_river_flow, 3);
    }
}
