// Copyright  (C) 2020, Kisio Digital and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Kisio Digital (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io


use super::label::{Label, LabelIdx, LabelPool};
use crate::profiles::CriteriaWeights;
use crate::subway_data::Line;

/// Ceilings of the score normalization.
pub const MAX_TRAVEL_TIME_MINUTES: f64 = 120.0;
pub const MAX_TRANSFERS: f64 = 4.0;

/// Ceilings of the epsilon-similarity space. Travel time is normalized on
/// the longest crossing of the network (~90 minutes), congestion on the
/// highest observed peak ratio.
const EPSILON_TIME_CEILING: f64 = 90.0;
const EPSILON_TRANSFERS_CEILING: f64 = 3.0;
const EPSILON_CONGESTION_CEILING: f64 = 1.3;

/// Hard cap of labels kept per (line, transfers) state of a bag.
pub const MAX_LABELS_PER_STATE: usize = 50;

/// Returns `true` if `a` dominates `b`.
///
/// Transfers and arrival time always participate. The remaining criteria
/// participate only when their weight is positive for the active profile,
/// so a label cannot be discarded for being worse on an axis the ranking
/// ignores. At least one participating comparison must be strict.
pub fn dominates(a: &Label, b: &Label, weights: &CriteriaWeights) -> bool {
    if a.transfers > b.transfers {
        return false;
    }
    if a.arrival_time > b.arrival_time {
        return false;
    }
    if weights.transfer_difficulty > 0.0 && a.max_transfer_difficulty > b.max_transfer_difficulty {
        return false;
    }
    if weights.congestion > 0.0 && a.avg_congestion() > b.avg_congestion() {
        return false;
    }
    if weights.convenience > 0.0 && a.avg_convenience() < b.avg_convenience() {
        return false;
    }

    a.transfers < b.transfers
        || a.arrival_time < b.arrival_time
        || (weights.transfer_difficulty > 0.0
            && a.max_transfer_difficulty < b.max_transfer_difficulty)
        || (weights.congestion > 0.0 && a.avg_congestion() < b.avg_congestion())
        || (weights.convenience > 0.0 && a.avg_convenience() > b.avg_convenience())
}

/// Normalized weighted score of a label; lower is better.
pub fn weighted_score(label: &Label, weights: &CriteriaWeights) -> f64 {
    let norm_time = (label.arrival_time / MAX_TRAVEL_TIME_MINUTES).min(1.0);
    let norm_transfers = (f64::from(label.transfers) / MAX_TRANSFERS).min(1.0);
    let norm_difficulty = label.max_transfer_difficulty;
    // convenience is a maximized criterion, invert it
    let norm_convenience = 1.0 - label.avg_convenience().min(1.0);
    let norm_congestion = label.avg_congestion().min(1.0);

    weights.travel_time * norm_time
        + weights.transfers * norm_transfers
        + weights.transfer_difficulty * norm_difficulty
        + weights.convenience * norm_convenience
        + weights.congestion * norm_congestion
}

fn normalized_vector(label: &Label) -> [f64; 5] {
    [
        label.arrival_time / EPSILON_TIME_CEILING,
        f64::from(label.transfers) / EPSILON_TRANSFERS_CEILING,
        label.max_transfer_difficulty,
        label.avg_convenience(),
        label.avg_congestion() / EPSILON_CONGESTION_CEILING,
    ]
}

/// Weighted euclidean distance between the normalized cost vectors of two
/// labels; within `epsilon` the labels are considered interchangeable and
/// only the better-scored one is kept.
pub fn epsilon_similar(a: &Label, b: &Label, epsilon: f64, weights: &CriteriaWeights) -> bool {
    let va = normalized_vector(a);
    let vb = normalized_vector(b);
    let criteria_weights = [
        weights.travel_time,
        weights.transfers,
        weights.transfer_difficulty,
        weights.convenience,
        weights.congestion,
    ];
    let mut distance_squared = 0.0;
    for ((value_a, value_b), weight) in va.iter().zip(vb.iter()).zip(criteria_weights.iter()) {
        let diff = value_a - value_b;
        distance_squared += weight * diff * diff;
    }
    distance_squared.sqrt() <= epsilon
}

/// The non-dominated labels of one station.
///
/// At an interchange hub, transfer insertions compare only against labels
/// riding the same line, so that a good path on one line cannot prune the
/// bags of the others.
#[derive(Debug, Clone, Default)]
pub struct Bag {
    elements: Vec<LabelIdx>,
}

impl Bag {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabelIdx> {
        self.elements.iter()
    }

    /// Inserts without any check. Reserved for origin labels.
    pub fn add_unchecked(&mut self, label_idx: LabelIdx) {
        self.elements.push(label_idx);
    }

    /// Tries to insert `candidate` while keeping the bag a Pareto front :
    /// a dominated candidate is rejected, an accepted candidate evicts the
    /// incumbents it dominates. When `restrict_to_line` is set, only
    /// incumbents on that line participate.
    ///
    /// Returns `true` if the candidate was accepted.
    pub fn try_insert(
        &mut self,
        candidate: LabelIdx,
        pool: &LabelPool,
        weights: &CriteriaWeights,
        epsilon: f64,
        restrict_to_line: Option<Line>,
    ) -> bool {
        let candidate_label = &pool[candidate];

        for &incumbent in &self.elements {
            let incumbent_label = &pool[incumbent];
            if let Some(line) = restrict_to_line {
                if incumbent_label.line != line {
                    continue;
                }
            }
            if dominates(incumbent_label, candidate_label, weights) {
                return false;
            }
        }

        // similarity pruning, scoped to the candidate's (line, transfers)
        // state : keep only the better-scored of two interchangeable labels
        let mut similar_position = None;
        for (position, &incumbent) in self.elements.iter().enumerate() {
            let incumbent_label = &pool[incumbent];
            if incumbent_label.line != candidate_label.line
                || incumbent_label.transfers != candidate_label.transfers
            {
                continue;
            }
            if epsilon_similar(candidate_label, incumbent_label, epsilon, weights) {
                if weighted_score(candidate_label, weights)
                    >= weighted_score(incumbent_label, weights)
                {
                    return false;
                }
                similar_position = Some(position);
                break;
            }
        }
        if let Some(position) = similar_position {
            self.elements.remove(position);
        }

        self.elements.retain(|&incumbent| {
            let incumbent_label = &pool[incumbent];
            if let Some(line) = restrict_to_line {
                if incumbent_label.line != line {
                    return true;
                }
            }
            !dominates(candidate_label, incumbent_label, weights)
        });

        self.elements.push(candidate);
        self.enforce_bound(candidate_label.line, candidate_label.transfers, pool, weights);
        true
    }

    /// Drops the worst-scored label of a (line, transfers) state when the
    /// state grows past [`MAX_LABELS_PER_STATE`].
    fn enforce_bound(
        &mut self,
        line: Line,
        transfers: u8,
        pool: &LabelPool,
        weights: &CriteriaWeights,
    ) {
        let mut state_size = 0;
        let mut worst: Option<(usize, f64)> = None;
        for (position, &incumbent) in self.elements.iter().enumerate() {
            let incumbent_label = &pool[incumbent];
            if incumbent_label.line != line || incumbent_label.transfers != transfers {
                continue;
            }
            state_size += 1;
            let score = weighted_score(incumbent_label, weights);
            let is_worse = match worst {
                Some((_, worst_score)) => score > worst_score,
                None => true,
            };
            if is_worse {
                worst = Some((position, score));
            }
        }
        if state_size > MAX_LABELS_PER_STATE {
            if let Some((position, _)) = worst {
                self.elements.remove(position);
            }
        }
    }
}
