use crate::models::{RouteNode, StationOnRoute};
use rust_decimal::prelude::ToPrimitive;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Convert selector rows into DAG nodes. Selector order (ascending fraction)
/// is preserved, so mileages come out non-decreasing.
///
/// The decimal price is cast to f64 here; the loss is deliberate: the DP
/// inner loop runs on floats, exact arithmetic comes back at aggregation.
pub fn build_nodes(rows: &[StationOnRoute], total_miles: f64) -> Vec<RouteNode> {
    rows.iter()
        .map(|s| RouteNode {
            mileage: s.fraction * total_miles,
            price: s.retail_price.to_f64().unwrap_or_default(),
            lat: s.lat,
            lon: s.lon,
            name: s.name.clone(),
            address: s.address.clone(),
            station_id: Some(s.opis_id),
        })
        .collect()
}

/// Group stations into `segment_miles`-long buckets along the route and keep
/// only the cheapest station per bucket, ties going to the first encountered
/// (the lower mileage, given selector order). Output ascends by bucket.
///
/// Long routes return hundreds of near-duplicate candidates clustered at
/// interchanges; one node per 50-mile bucket keeps the DAG small without
/// losing the cheapest local price, which is all the optimizer reads.
pub fn prefilter_stations(nodes: Vec<RouteNode>, segment_miles: f64) -> Vec<RouteNode> {
    let mut cheapest: BTreeMap<i64, RouteNode> = BTreeMap::new();

    for node in nodes {
        let bucket = (node.mileage / segment_miles).floor() as i64;
        match cheapest.entry(bucket) {
            Entry::Vacant(slot) => {
                slot.insert(node);
            }
            Entry::Occupied(mut slot) => {
                if node.price < slot.get().price {
                    slot.insert(node);
                }
            }
        }
    }

    cheapest.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn node(mileage: f64, price: f64, name: &str) -> RouteNode {
        RouteNode {
            mileage,
            price,
            lat: 40.0,
            lon: -74.0,
            name: name.to_string(),
            address: String::new(),
            station_id: Some(1),
        }
    }

    fn row(fraction: f64, price: &str, opis_id: i32) -> StationOnRoute {
        StationOnRoute {
            opis_id,
            name: format!("Station {}", opis_id),
            address: "I-40 Exit 12".to_string(),
            retail_price: price.parse::<Decimal>().unwrap(),
            lat: 35.0,
            lon: -100.0,
            fraction,
        }
    }

    #[test]
    fn build_nodes_scales_fraction_to_mileage() {
        let rows = vec![row(0.25, "3.199", 10), row(0.5, "2.899", 11)];
        let nodes = build_nodes(&rows, 800.0);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].mileage, 200.0);
        assert_eq!(nodes[1].mileage, 400.0);
        assert_eq!(nodes[0].price, 3.199);
        assert_eq!(nodes[0].station_id, Some(10));
        assert_eq!(nodes[1].name, "Station 11");
    }

    #[test]
    fn build_nodes_preserves_selector_order() {
        let rows = vec![row(0.1, "3.0", 1), row(0.4, "2.0", 2), row(0.9, "4.0", 3)];
        let nodes = build_nodes(&rows, 1000.0);
        let mileages: Vec<f64> = nodes.iter().map(|n| n.mileage).collect();
        assert_eq!(mileages, vec![100.0, 400.0, 900.0]);
    }

    #[test]
    fn empty_returns_empty() {
        assert!(prefilter_stations(vec![], 50.0).is_empty());
    }

    #[test]
    fn single_station_passes_through() {
        let result = prefilter_stations(vec![node(100.0, 3.0, "A")], 25.0);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "A");
    }

    #[test]
    fn two_stations_same_segment_keeps_cheapest() {
        let nodes = vec![node(10.0, 4.0, "Expensive"), node(12.0, 2.5, "Cheap")];
        let result = prefilter_stations(nodes, 25.0);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Cheap");
    }

    #[test]
    fn three_stations_clustered_keeps_one() {
        // Real scenario: 3 stations within 23 miles
        let nodes = vec![
            node(800.0, 2.837, "Quiktrip"),
            node(803.0, 2.832, "CEFCO"),
            node(823.0, 2.821, "RACEWAY"),
        ];
        let result = prefilter_stations(nodes, 25.0);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "RACEWAY");
    }

    #[test]
    fn stations_in_different_segments_all_kept() {
        let nodes = vec![
            node(100.0, 3.0, "A"),
            node(300.0, 2.5, "B"),
            node(500.0, 2.8, "C"),
        ];
        assert_eq!(prefilter_stations(nodes, 25.0).len(), 3);
    }

    #[test]
    fn segment_size_affects_grouping() {
        let nodes = vec![node(10.0, 3.0, "A"), node(40.0, 2.5, "B")];
        assert_eq!(prefilter_stations(nodes.clone(), 25.0).len(), 2);

        let result_50 = prefilter_stations(nodes, 50.0);
        assert_eq!(result_50.len(), 1);
        assert_eq!(result_50[0].name, "B");
    }

    #[test]
    fn price_tie_keeps_first_encountered() {
        let nodes = vec![node(10.0, 3.0, "First"), node(20.0, 3.0, "Second")];
        let result = prefilter_stations(nodes, 50.0);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "First");
    }

    #[test]
    fn output_preserves_node_data() {
        let mut station = node(100.0, 3.0, "A");
        station.address = "123 St".to_string();
        let result = prefilter_stations(vec![station], 25.0);
        assert_eq!(result[0].lat, 40.0);
        assert_eq!(result[0].address, "123 St");
    }

    #[test]
    fn output_sorted_by_segment() {
        let nodes = vec![
            node(500.0, 3.0, "C"),
            node(100.0, 2.5, "A"),
            node(300.0, 2.8, "B"),
        ];
        let result = prefilter_stations(nodes, 25.0);
        let mileages: Vec<f64> = result.iter().map(|n| n.mileage).collect();
        assert_eq!(mileages, vec![100.0, 300.0, 500.0]);
    }

    #[test]
    fn buckets_collapse_to_cheapest_each() {
        // Bucket 0 (0-50) keeps mile 48 @ 3.1; bucket 1 (50-100) keeps mile 60 @ 3.3
        let nodes = vec![
            node(10.0, 3.5, "A"),
            node(12.0, 3.2, "B"),
            node(15.0, 3.45, "C"),
            node(40.0, 3.9, "D"),
            node(48.0, 3.1, "E"),
            node(60.0, 3.3, "F"),
        ];
        let result = prefilter_stations(nodes, 50.0);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "E");
        assert_eq!(result[0].mileage, 48.0);
        assert_eq!(result[1].name, "F");
        assert_eq!(result[1].mileage, 60.0);
    }

    #[test]
    fn prefilter_is_a_fixed_point() {
        let nodes = vec![
            node(10.0, 3.5, "A"),
            node(48.0, 3.1, "B"),
            node(60.0, 3.3, "C"),
            node(140.0, 2.9, "D"),
        ];
        let once = prefilter_stations(nodes, 50.0);
        let twice = prefilter_stations(once.clone(), 50.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn consecutive_mileages_strictly_increase() {
        let nodes = vec![
            node(3.0, 3.0, "A"),
            node(49.9, 2.0, "B"),
            node(50.0, 4.0, "C"),
            node(120.0, 3.0, "D"),
            node(121.0, 3.5, "E"),
        ];
        let result = prefilter_stations(nodes, 50.0);
        for pair in result.windows(2) {
            assert!(pair[0].mileage < pair[1].mileage);
        }
    }
}
