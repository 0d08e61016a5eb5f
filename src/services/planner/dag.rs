//! Minimum fuel cost as a shortest path on a DAG.
//!
//! Nodes: Start (mile 0), stations (mileage = fraction x total_miles),
//! Finish. An edge `i -> j` exists iff `mileage[j] - mileage[i] <= range`.
//! Weight: `(dist / mpg) x price[i]`. Fuel for a leg is bought at the node
//! where the leg begins, and the Start node sells for free (full departure
//! tank).

use crate::models::{RouteNode, Stop};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// The optimal refuel plan for one node sequence. `stops` excludes the
/// synthetic endpoints; totals are exact decimal sums over every leg driven,
/// including the free Start leg's gallons.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOutcome {
    pub stops: Vec<Stop>,
    pub total_cost: Decimal,
    pub total_gallons: Decimal,
}

/// Solve the refuel DAG by DP in index order.
///
/// `nodes` must be sorted by mileage with the synthetic Start first and
/// Finish last. Returns `None` when Finish is unreachable (some gap wider
/// than `range_mi` has no station in it).
pub fn optimize(nodes: &[RouteNode], range_mi: f64, mpg: u32) -> Option<PathOutcome> {
    if nodes.len() < 2 {
        return Some(PathOutcome {
            stops: Vec::new(),
            total_cost: Decimal::ZERO,
            total_gallons: Decimal::ZERO,
        });
    }

    let n = nodes.len();
    let mpg_f = f64::from(mpg);

    let mileages: Vec<f64> = nodes.iter().map(|node| node.mileage).collect();
    let mut prices: Vec<f64> = nodes.iter().map(|node| node.price).collect();
    prices[0] = 0.0; // Start never charges

    let mut min_cost = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    min_cost[0] = 0.0;

    // Topological order = index order (nodes already sorted by mileage).
    // The inner loop breaks at the first node past the range window; strict
    // `<` relaxation keeps the earlier predecessor on cost ties.
    for i in 0..n {
        if min_cost[i].is_infinite() {
            continue;
        }
        for j in (i + 1)..n {
            let dist_ij = mileages[j] - mileages[i];
            if dist_ij > range_mi {
                break;
            }
            let cost_ij = dist_ij / mpg_f * prices[i];
            let new_cost = min_cost[i] + cost_ij;
            if new_cost < min_cost[j] {
                min_cost[j] = new_cost;
                parent[j] = Some(i);
            }
        }
    }

    // Reconstruct Finish -> Start
    let mut path: Vec<usize> = Vec::new();
    let mut cursor = Some(n - 1);
    while let Some(idx) = cursor {
        path.push(idx);
        cursor = parent[idx];
    }
    path.reverse();

    if path[0] != 0 {
        return None;
    }

    // Re-walk the chosen legs in decimal for the reported numbers
    let mpg_d = Decimal::from(mpg);
    let mut stops: Vec<Stop> = Vec::new();
    let mut total_cost = Decimal::ZERO;
    let mut total_gallons = Decimal::ZERO;

    for pair in path.windows(2) {
        let (i, j) = (pair[0], pair[1]);
        let dist_ij = mileages[j] - mileages[i];
        let gallons_ij = Decimal::from_f64(dist_ij).unwrap_or_default() / mpg_d;
        let cost_ij = gallons_ij * Decimal::from_f64(prices[i]).unwrap_or_default();
        total_gallons += gallons_ij;
        total_cost += cost_ij;

        if i > 0 {
            // The Start leg burns tank fuel and emits no stop
            let node = &nodes[i];
            stops.push(Stop {
                mileage: node.mileage,
                lat: node.lat,
                lon: node.lon,
                name: node.name.clone(),
                address: node.address.clone(),
                price: node.price,
                gallons: gallons_ij.to_f64().unwrap_or_default(),
                cost: cost_ij.to_f64().unwrap_or_default(),
            });
        }
    }

    Some(PathOutcome {
        stops,
        total_cost,
        total_gallons,
    })
}
