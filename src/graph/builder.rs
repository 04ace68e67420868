use std::collections::HashMap;

use tracing::debug;

use crate::error::MapError;
use crate::graph::{Center, CornerIndex, Edge, Map};
use crate::tessellation::Tessellation;

/// Строит граф центров, углов и рёбер по результату тесселяции.
///
/// Каждое двойственное ребро даёт одно [`Edge`]. Центры ищутся по точной
/// позиции точки; сторона Делоне без совпадающей точки пропускается.
/// Все списки смежности заполняются симметрично и без повторов.
pub fn build_graph<T: Tessellation + ?Sized>(tessellation: &T, size: f64) -> Result<Map, MapError> {
    let mut map = Map::new(size);
    let mut center_lookup = HashMap::new();

    for &point in tessellation.sites() {
        let index = map.centers.len();
        map.centers.push(Center::new(index, point));
        center_lookup.insert(point.bits_key(), index);
    }

    let mut corner_index = CornerIndex::new(size);

    for dual in tessellation.dual_edges() {
        let index = map.edges.len();
        let mut edge = Edge::new(index);

        let (a, b) = dual.voronoi;
        edge.midpoint = match (a.defined(), b.defined()) {
            (Some(a), Some(b)) => Some(a.lerp(b, 0.5)),
            _ => None,
        };

        // Рёбра указывают на углы и центры
        edge.v0 = corner_index.lookup_or_insert(&mut map.corners, a);
        edge.v1 = corner_index.lookup_or_insert(&mut map.corners, b);
        edge.d0 = center_lookup.get(&dual.delaunay.0.bits_key()).copied();
        edge.d1 = center_lookup.get(&dual.delaunay.1.bits_key()).copied();

        link_edge(&mut map, &edge);
        map.edges.push(edge);
    }

    debug!(
        centers = map.centers.len(),
        corners = map.corners.len(),
        edges = map.edges.len(),
        "graph built"
    );

    map.validate()?;
    Ok(map)
}

fn link_edge(map: &mut Map, edge: &Edge) {
    let centers = [edge.d0, edge.d1];
    let corners = [edge.v0, edge.v1];

    // Центры и углы указывают на рёбра
    for d in centers.into_iter().flatten() {
        map.centers[d].borders.push(edge.index);
    }
    for v in corners.into_iter().flatten() {
        map.corners[v].protrudes.push(edge.index);
    }

    if let (Some(d0), Some(d1)) = (edge.d0, edge.d1)
        && d0 != d1
    {
        push_unique(&mut map.centers[d0].neighbors, d1);
        push_unique(&mut map.centers[d1].neighbors, d0);
    }

    if let (Some(v0), Some(v1)) = (edge.v0, edge.v1)
        && v0 != v1
    {
        push_unique(&mut map.corners[v0].adjacent, v1);
        push_unique(&mut map.corners[v1].adjacent, v0);
    }

    for d in centers.into_iter().flatten() {
        for v in corners.into_iter().flatten() {
            push_unique(&mut map.centers[d].corners, v);
            push_unique(&mut map.corners[v].touches, d);
        }
    }
}

fn push_unique(list: &mut Vec<usize>, x: usize) {
    if !list.contains(&x) {
        list.push(x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::tessellation::{DualEdge, RegularGrid};

    struct Fixed {
        sites: Vec<Point>,
        edges: Vec<DualEdge>,
    }

    impl Tessellation for Fixed {
        fn sites(&self) -> &[Point] {
            &self.sites
        }
        fn dual_edges(&self) -> &[DualEdge] {
            &self.edges
        }
    }

    #[test]
    fn grid_graph_is_symmetric() {
        let grid = RegularGrid::new(3, 90.0, true);
        let map = build_graph(&grid, 90.0).unwrap();

        assert_eq!(map.centers.len(), 9);
        // 4×4 узла решётки
        assert_eq!(map.corners.len(), 16);
        // 12 внутренних рёбер + 12 граничных
        assert_eq!(map.edges.len(), 24);

        let middle = &map.centers[4];
        assert_eq!(middle.neighbors.len(), 4);
        assert_eq!(middle.corners.len(), 4);
        assert_eq!(middle.borders.len(), 4);
        assert!(map.validate().is_ok());
    }

    #[test]
    fn endpoints_within_tolerance_merge() {
        let sites = vec![Point::new(10.0, 10.0), Point::new(30.0, 10.0), Point::new(20.0, 30.0)];
        let edges = vec![
            DualEdge {
                delaunay: (sites[0], sites[1]),
                voronoi: (Point::new(20.0, 0.0), Point::new(20.0, 17.5)),
            },
            DualEdge {
                delaunay: (sites[1], sites[2]),
                voronoi: (Point::new(20.03, 17.52), Point::new(40.0, 27.0)),
            },
        ];
        let map = build_graph(&Fixed { sites, edges }, 40.0).unwrap();

        assert_eq!(map.edges[0].v1, map.edges[1].v0);
        assert_eq!(map.corners.len(), 3);
        assert_eq!(map.corners[1].touches, vec![0, 1, 2]);
    }

    #[test]
    fn unmatched_delaunay_endpoint_is_skipped() {
        let sites = vec![Point::new(10.0, 10.0)];
        let edges = vec![DualEdge {
            delaunay: (sites[0], Point::new(55.0, 55.0)),
            voronoi: (Point::new(20.0, 0.0), Point::UNDEFINED),
        }];
        let map = build_graph(&Fixed { sites, edges }, 40.0).unwrap();

        let edge = &map.edges[0];
        assert_eq!(edge.d0, Some(0));
        assert_eq!(edge.d1, None);
        assert_eq!(edge.v1, None);
        assert_eq!(edge.midpoint, None);
        assert!(map.centers[0].neighbors.is_empty());
        assert_eq!(map.corners.len(), 1);
        assert!(map.corners[0].border);
    }
}
