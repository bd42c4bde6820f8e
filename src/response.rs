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


use crate::engine::bag::weighted_score;
use crate::engine::label::LabelIdx;
use crate::engine::{LabelPool, MultiCriteriaRaptor};
use crate::request::Request;

use std::collections::BTreeSet;
use tracing::trace;

/// One ranked end-to-end journey.
///
/// `route_sequence` holds every station code from origin to destination,
/// intermediates included; `route_lines[i]` is the line tag on which the
/// rider reaches `route_sequence[i]` (the origin entry carries the line of
/// the first boarding). `transfer_info` lists `(station code, from line,
/// to line)` for each interchange, in travel order.
#[derive(Debug, Clone)]
pub struct Itinerary {
    pub rank: usize,
    pub route_sequence: Vec<String>,
    pub route_lines: Vec<String>,
    pub transfer_info: Vec<(String, String, String)>,
    pub total_time_minutes: f64,
    pub transfers: u8,
    pub avg_convenience: f64,
    pub avg_congestion: f64,
    pub max_transfer_difficulty: f64,
    pub score: f64,
}

/// Defensive reconstruction failures. These mean the store and the labels
/// disagree about the network, which a well-formed build cannot produce.
#[derive(Debug, Clone)]
pub enum BadJourney {
    ParentChainTooLong,
    DepthMismatch { depth: u16, chain_length: usize },
    RideEndMismatch { expected: String, got: String },
}

impl std::fmt::Display for BadJourney {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadJourney::ParentChainTooLong => {
                write!(f, "A label's parent chain is longer than the label pool.")
            }
            BadJourney::DepthMismatch {
                depth,
                chain_length,
            } => write!(
                f,
                "A label of depth {} reconstructed into a chain of {} labels.",
                depth, chain_length
            ),
            BadJourney::RideEndMismatch { expected, got } => write!(
                f,
                "A ride leg was expected to end at {} but the line order ends it at {}.",
                expected, got
            ),
        }
    }
}

impl std::error::Error for BadJourney {}

struct Candidate {
    route_sequence: Vec<String>,
    route_lines: Vec<String>,
    transfer_info: Vec<(String, String, String)>,
    leaf: LabelIdx,
    score: f64,
}

impl Request<'_> {
    /// Rebuilds, scores, deduplicates and ranks the destination labels of a
    /// finished search. An empty vector means no route was found, which is
    /// not an error.
    pub fn create_responses(
        &self,
        engine: &MultiCriteriaRaptor,
    ) -> Result<Vec<Itinerary>, BadJourney> {
        let pool = engine.pool();
        let mut candidates = Vec::new();
        for leaf in engine.destination_labels(self) {
            let (route_sequence, route_lines, transfer_info) = self.reconstruct(pool, leaf)?;
            let score = weighted_score(&pool[leaf], self.weights());
            trace!(
                "Candidate route with {} stations, score {}",
                route_sequence.len(),
                score
            );
            candidates.push(Candidate {
                route_sequence,
                route_lines,
                transfer_info,
                leaf,
                score,
            });
        }

        // ties keep the candidate created first, so repeated solves of the
        // same request rank identically
        candidates.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut seen_sequences = BTreeSet::new();
        let mut responses = Vec::new();
        for candidate in candidates {
            if responses.len() >= self.nb_of_responses() {
                break;
            }
            if !seen_sequences.insert(candidate.route_sequence.clone()) {
                continue;
            }
            let label = &pool[candidate.leaf];
            responses.push(Itinerary {
                rank: responses.len() + 1,
                route_sequence: candidate.route_sequence,
                route_lines: candidate.route_lines,
                transfer_info: candidate.transfer_info,
                total_time_minutes: label.arrival_time,
                transfers: label.transfers,
                avg_convenience: label.avg_convenience(),
                avg_congestion: label.avg_congestion(),
                max_transfer_difficulty: label.max_transfer_difficulty,
                score: candidate.score,
            });
        }
        Ok(responses)
    }

    #[allow(clippy::type_complexity)]
    fn reconstruct(
        &self,
        pool: &LabelPool,
        leaf: LabelIdx,
    ) -> Result<(Vec<String>, Vec<String>, Vec<(String, String, String)>), BadJourney> {
        let data = self.data();

        let mut chain = Vec::new();
        let mut current = Some(leaf);
        while let Some(label_idx) = current {
            chain.push(label_idx);
            if chain.len() > pool.len() {
                return Err(BadJourney::ParentChainTooLong);
            }
            current = pool[label_idx].parent;
        }
        chain.reverse();

        let leaf_label = &pool[leaf];
        if usize::from(leaf_label.depth) != chain.len() {
            return Err(BadJourney::DepthMismatch {
                depth: leaf_label.depth,
                chain_length: chain.len(),
            });
        }

        let root = &pool[chain[0]];
        let mut route_sequence = vec![data.code(root.stop).to_string()];
        let mut route_lines = vec![data.line_name(root.line).to_string()];
        let mut transfer_info = Vec::new();

        for window in chain.windows(2) {
            let previous = &pool[window[0]];
            let current = &pool[window[1]];
            if previous.line != current.line {
                // an interchange : report it at the station it starts from,
                // and walk over to the record on the new line
                transfer_info.push((
                    data.code(previous.stop).to_string(),
                    data.line_name(previous.line).to_string(),
                    data.line_name(current.line).to_string(),
                ));
                if current.stop != previous.stop {
                    route_sequence.push(data.code(current.stop).to_string());
                    route_lines.push(data.line_name(current.line).to_string());
                }
            } else {
                let ride = data.intermediate_stations(previous.stop, current.stop, current.line);
                match ride.last() {
                    Some(&last) if last == current.stop => {}
                    Some(&last) => {
                        return Err(BadJourney::RideEndMismatch {
                            expected: data.code(current.stop).to_string(),
                            got: data.code(last).to_string(),
                        })
                    }
                    None => {
                        return Err(BadJourney::RideEndMismatch {
                            expected: data.code(current.stop).to_string(),
                            got: String::new(),
                        })
                    }
                }
                for stop in ride {
                    route_sequence.push(data.code(stop).to_string());
                    route_lines.push(data.line_name(current.line).to_string());
                }
            }
        }

        Ok((route_sequence, route_lines, transfer_info))
    }
}
