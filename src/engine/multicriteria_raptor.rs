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


use super::bag::Bag;
use super::label::{Label, LabelIdx, LabelPool};
use crate::geometry;
use crate::profiles::transfer_difficulty;
use crate::request::{Request, SearchSignal};
use crate::subway_data::{Direction, Stop};
use crate::time::local_day_and_bucket;

use tracing::debug;

/// Scaling constant of the ride-hop time : meters divided by 550 yields
/// minutes at the network's scheduled operating speed (about 33 km/h).
pub const RIDE_DISTANCE_SCALING: f64 = 550.0;

/// A hop between two adjacent stations never takes less than one minute.
pub const MIN_HOP_TIME_MINUTES: f64 = 1.0;

/// The round-based multi-criteria engine.
///
/// One round performs a ride expansion then a transfer expansion for every
/// station marked in the previous round. Per-station bags keep only
/// non-dominated labels; the label arena and the marking buffers are owned
/// by the engine and reused across searches.
pub struct MultiCriteriaRaptor {
    pool: LabelPool,
    bags: Vec<Bag>,
    is_marked: Vec<bool>,
    marked_stops: Vec<Stop>,
    queue: Vec<Stop>,
    scratch_labels: Vec<LabelIdx>,
    nb_of_rounds: u8,
}

impl MultiCriteriaRaptor {
    pub fn new(nb_of_stops: usize) -> Self {
        Self {
            pool: LabelPool::new(),
            bags: vec![Bag::new(); nb_of_stops],
            is_marked: vec![false; nb_of_stops],
            marked_stops: Vec::new(),
            queue: Vec::new(),
            scratch_labels: Vec::new(),
            nb_of_rounds: 0,
        }
    }

    pub fn compute(&mut self, request: &Request<'_>, signal: &SearchSignal) {
        debug_assert!(self.bags.len() == request.data().nb_of_stops());
        self.clear();
        self.init_with_origin(request);

        for round in 1..=request.max_rounds() {
            if self.marked_stops.is_empty() {
                break;
            }
            if signal.is_cancelled() {
                debug!("Search cancelled before round {}", round);
                break;
            }
            self.nb_of_rounds = round;

            std::mem::swap(&mut self.queue, &mut self.marked_stops);
            self.marked_stops.clear();
            let queue = std::mem::take(&mut self.queue);
            for &stop in &queue {
                self.is_marked[stop.idx] = false;
            }

            for &stop in &queue {
                if request.is_destination(stop) {
                    // a label that reached a destination is not expanded
                    continue;
                }
                self.scratch_labels.clear();
                for &label_idx in self.bags[stop.idx].iter() {
                    // labels created in this very round wait for the next one
                    if self.pool[label_idx].created_round < round {
                        self.scratch_labels.push(label_idx);
                    }
                }
                let labels = std::mem::take(&mut self.scratch_labels);
                for &label_idx in &labels {
                    self.ride(label_idx, request, round);
                    self.transfer(label_idx, request, round);
                }
                self.scratch_labels = labels;
            }

            self.queue = queue;
            self.queue.clear();

            debug!(
                "Round {} done, {} labels in the pool, {} stations marked",
                round,
                self.pool.len(),
                self.marked_stops.len()
            );
        }
    }

    fn clear(&mut self) {
        self.pool.clear();
        for bag in &mut self.bags {
            bag.clear();
        }
        for flag in &mut self.is_marked {
            *flag = false;
        }
        self.marked_stops.clear();
        self.queue.clear();
        self.scratch_labels.clear();
        self.nb_of_rounds = 0;
    }

    // one origin label per line of the origin hub
    fn init_with_origin(&mut self, request: &Request<'_>) {
        let origin = request.origin();
        for &line in request.data().lines_at(origin) {
            let label = Label {
                arrival_time: 0.0,
                convenience_sum: 0.0,
                congestion_sum: 0.0,
                max_transfer_difficulty: 0.0,
                transfers: 0,
                depth: 1,
                parent: None,
                stop: origin,
                line,
                direction: Direction::Unknown,
                created_round: 0,
                is_first_move: true,
            };
            let label_idx = self.pool.push(label);
            self.bags[origin.idx].add_unchecked(label_idx);
        }
        self.mark(origin);
    }

    /// Phase A : rides the label's line in both applicable directions,
    /// creating one label per reachable station.
    fn ride(&mut self, label_idx: LabelIdx, request: &Request<'_>, round: u8) {
        let label = self.pool[label_idx].clone();
        let data = request.data();

        for &(direction, stops_ahead) in data.ride_directions(label.stop, label.line).iter() {
            let mut cumulated_time = 0.0_f64;
            let mut previous = label.stop;
            for &next in stops_ahead {
                if self.pool.has_ancestor_at(label_idx, next) {
                    // U-turn or cycle; the hop origin stays unchanged
                    continue;
                }

                let distance =
                    geometry::distance_coord_to_coord(data.coord(previous), data.coord(next));
                cumulated_time += (distance / RIDE_DISTANCE_SCALING).max(MIN_HOP_TIME_MINUTES);
                let arrival_time = label.arrival_time + cumulated_time;

                let instant = request.instant_at(arrival_time);
                let (day_class, bucket) = local_day_and_bucket(instant);
                let hop_congestion =
                    data.congestion(previous, label.line, direction, day_class, bucket);

                let new_label = Label {
                    arrival_time,
                    convenience_sum: label.convenience_sum,
                    congestion_sum: label.congestion_sum + hop_congestion,
                    max_transfer_difficulty: label.max_transfer_difficulty,
                    transfers: label.transfers,
                    depth: label.depth + 1,
                    parent: Some(label_idx),
                    stop: next,
                    line: label.line,
                    direction,
                    created_round: round,
                    is_first_move: false,
                };
                let new_idx = self.pool.push(new_label);
                let accepted = self.bags[next.idx].try_insert(
                    new_idx,
                    &self.pool,
                    request.weights(),
                    request.epsilon(),
                    None,
                );
                if accepted {
                    self.mark(next);
                }
                previous = next;
            }
        }
    }

    /// Phase B : walks to every other line of the hub that has an
    /// interchange record.
    fn transfer(&mut self, label_idx: LabelIdx, request: &Request<'_>, round: u8) {
        let label = self.pool[label_idx].clone();
        if label.is_first_move && label.parent.is_some() {
            // no back-to-back interchanges at the same hub
            return;
        }
        let data = request.data();

        for &to_line in data.lines_at(label.stop) {
            if to_line == label.line {
                continue;
            }
            let transfer = match data.transfer(label.stop, label.line, to_line) {
                Some(transfer) => transfer,
                None => continue,
            };
            let to_stop = transfer.to_stop();
            if request.is_destination(to_stop) {
                // reaching the hub already was the arrival
                continue;
            }

            let transfer_time = transfer.distance_m() / (request.walking_speed_m_per_s() * 60.0);
            let station_score = request.convenience(label.stop);
            let convenience_sum = label.convenience_sum + station_score;
            let difficulty = transfer_difficulty(transfer.distance_m(), convenience_sum);

            let new_label = Label {
                arrival_time: label.arrival_time + transfer_time,
                convenience_sum,
                congestion_sum: label.congestion_sum,
                max_transfer_difficulty: label.max_transfer_difficulty.max(difficulty),
                transfers: label.transfers + 1,
                depth: label.depth + 1,
                parent: Some(label_idx),
                stop: to_stop,
                line: to_line,
                direction: Direction::Unknown,
                created_round: round,
                is_first_move: true,
            };
            let new_idx = self.pool.push(new_label);
            let accepted = self.bags[to_stop.idx].try_insert(
                new_idx,
                &self.pool,
                request.weights(),
                request.epsilon(),
                Some(to_line),
            );
            if accepted {
                self.mark(to_stop);
            }
        }
    }

    fn mark(&mut self, stop: Stop) {
        if !self.is_marked[stop.idx] {
            self.is_marked[stop.idx] = true;
            self.marked_stops.push(stop);
        }
    }

    pub fn pool(&self) -> &LabelPool {
        &self.pool
    }

    pub fn bag(&self, stop: Stop) -> &Bag {
        &self.bags[stop.idx]
    }

    /// The unranked candidate set : every label sitting at a destination.
    pub fn destination_labels(&self, request: &Request<'_>) -> Vec<LabelIdx> {
        let mut result = Vec::new();
        for &stop in request.destinations() {
            result.extend(self.bags[stop.idx].iter().copied());
        }
        result
    }

    pub fn nb_of_rounds(&self) -> u8 {
        self.nb_of_rounds
    }

    pub fn nb_of_labels(&self) -> usize {
        self.pool.len()
    }
}
