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


use super::{
    CongestionBuckets, Direction, Line, LineData, NextStops, Stop, StopData, SubwayData,
    TransferData, DEFAULT_CONGESTION,
};
use crate::collections::NetworkCollections;
use crate::geometry::Coord;
use crate::time::{parse_bucket_name, DayClass, NB_OF_TIME_BUCKETS};

use std::collections::HashMap;
use tracing::warn;

impl SubwayData {
    /// Builds the store from the persisted collections.
    ///
    /// Records referencing unknown station codes or line tags are skipped
    /// with a warning; they never fail the build.
    pub fn new(collections: &NetworkCollections) -> Self {
        let mut data = Self {
            stops_data: Vec::with_capacity(collections.stations.len()),
            code_to_stop: HashMap::new(),
            lines_data: Vec::new(),
            name_to_line: HashMap::new(),
            next_on_line: HashMap::new(),
            station_order: HashMap::new(),
            transfers: HashMap::new(),
            congestion: HashMap::new(),
        };

        data.create_lines(collections);
        data.create_stops(collections);
        data.create_station_orders(collections);
        data.create_adjacencies(collections);
        data.create_transfers(collections);
        data.create_congestion(collections);

        data
    }

    fn create_lines(&mut self, collections: &NetworkCollections) {
        for record in collections.stations.values() {
            if self.name_to_line.contains_key(&record.line) {
                continue;
            }
            let line = Line {
                idx: self.lines_data.len(),
            };
            self.lines_data.push(LineData {
                name: record.line.clone(),
                is_circular: collections.circular_lines.contains(&record.line),
                ordered_stops: Vec::new(),
            });
            self.name_to_line.insert(record.line.clone(), line);
        }
    }

    fn create_stops(&mut self, collections: &NetworkCollections) {
        for (code, record) in &collections.stations {
            let line = self.name_to_line[&record.line];
            let stop = Stop {
                idx: self.stops_data.len(),
            };
            self.stops_data.push(StopData {
                code: code.clone(),
                name: record.name.clone(),
                normalized_name: normalized_station_name(&record.name),
                line,
                coord: Coord {
                    lat: record.lat,
                    lon: record.lon,
                },
                lines_at_station: Vec::new(),
            });
            self.code_to_stop.insert(code.clone(), stop);
        }

        // a hub serves every line that has a record under the same
        // normalized name
        let mut lines_of_hub: HashMap<&str, Vec<Line>> = HashMap::new();
        for stop_data in &self.stops_data {
            lines_of_hub
                .entry(stop_data.normalized_name.as_str())
                .or_insert_with(Vec::new)
                .push(stop_data.line);
        }
        for lines in lines_of_hub.values_mut() {
            lines.sort();
            lines.dedup();
        }
        let lines_at_station: Vec<Vec<Line>> = self
            .stops_data
            .iter()
            .map(|stop_data| lines_of_hub[stop_data.normalized_name.as_str()].clone())
            .collect();
        for (stop_data, lines) in self.stops_data.iter_mut().zip(lines_at_station) {
            stop_data.lines_at_station = lines;
        }
    }

    fn create_station_orders(&mut self, collections: &NetworkCollections) {
        for ((code, line_name), order) in &collections.station_order {
            let (stop, line) = match self.resolve(code, line_name, "station_order") {
                Some(resolved) => resolved,
                None => continue,
            };
            self.station_order.insert((stop, line), *order);
            self.lines_data[line.idx].ordered_stops.push((*order, stop));
        }
        for line_data in &mut self.lines_data {
            line_data.ordered_stops.sort();
        }
    }

    fn create_adjacencies(&mut self, collections: &NetworkCollections) {
        for ((code, line_name), record) in &collections.line_stations {
            let (stop, line) = match self.resolve(code, line_name, "line_stations") {
                Some(resolved) => resolved,
                None => continue,
            };
            let mut next_stops = NextStops::default();
            for next_code in &record.up {
                match self.code_to_stop.get(next_code) {
                    Some(next_stop) => next_stops.up.push(*next_stop),
                    None => warn!(
                        "Unknown station code '{}' in the up adjacency of ({}, {}). I'll skip it.",
                        next_code, code, line_name
                    ),
                }
            }
            for next_code in &record.down {
                match self.code_to_stop.get(next_code) {
                    Some(next_stop) => next_stops.down.push(*next_stop),
                    None => warn!(
                        "Unknown station code '{}' in the down adjacency of ({}, {}). I'll skip it.",
                        next_code, code, line_name
                    ),
                }
            }
            self.next_on_line.insert((stop, line), next_stops);
        }
    }

    fn create_transfers(&mut self, collections: &NetworkCollections) {
        // (normalized hub name, line) -> the record of that hub on that line
        let mut hub_record: HashMap<(&str, Line), Stop> = HashMap::new();
        for (idx, stop_data) in self.stops_data.iter().enumerate() {
            hub_record
                .entry((stop_data.normalized_name.as_str(), stop_data.line))
                .or_insert(Stop { idx });
        }

        for ((code, from_line_name, to_line_name), record) in &collections.transfers {
            let (stop, from_line) = match self.resolve(code, from_line_name, "transfers") {
                Some(resolved) => resolved,
                None => continue,
            };
            let to_line = match self.name_to_line.get(to_line_name) {
                Some(line) => *line,
                None => {
                    warn!(
                        "Unknown line tag '{}' in transfer ({}, {}, {}). I'll skip it.",
                        to_line_name, code, from_line_name, to_line_name
                    );
                    continue;
                }
            };
            let normalized_name = self.stops_data[stop.idx].normalized_name.as_str();
            let to_stop = match hub_record.get(&(normalized_name, to_line)) {
                Some(to_stop) => *to_stop,
                None => {
                    warn!(
                        "Transfer ({}, {}, {}) has no station record on the target line. I'll skip it.",
                        code, from_line_name, to_line_name
                    );
                    continue;
                }
            };
            self.transfers.insert(
                (stop, from_line, to_line),
                TransferData {
                    distance_m: record.distance_m,
                    to_stop,
                },
            );
        }
    }

    fn create_congestion(&mut self, collections: &NetworkCollections) {
        for ((code, line_name, direction_name, day_name), buckets) in &collections.congestion {
            let (stop, line) = match self.resolve(code, line_name, "congestion") {
                Some(resolved) => resolved,
                None => continue,
            };
            let direction = match direction_name.parse::<Direction>() {
                Ok(direction) => direction,
                Err(err) => {
                    warn!("{} in congestion entry for ({}, {}). I'll skip it.", err, code, line_name);
                    continue;
                }
            };
            let day_class = match day_name.parse::<DayClass>() {
                Ok(day_class) => day_class,
                Err(err) => {
                    warn!("{} in congestion entry for ({}, {}). I'll skip it.", err, code, line_name);
                    continue;
                }
            };
            let mut table: CongestionBuckets = [DEFAULT_CONGESTION; NB_OF_TIME_BUCKETS];
            for (bucket_name, ratio) in buckets {
                match parse_bucket_name(bucket_name) {
                    Some(bucket) => table[bucket] = *ratio,
                    None => warn!(
                        "Bad bucket name '{}' in congestion entry for ({}, {}). I'll skip it.",
                        bucket_name, code, line_name
                    ),
                }
            }
            self.congestion.insert((stop, line, direction, day_class), table);
        }
    }

    fn resolve(&self, code: &str, line_name: &str, table: &str) -> Option<(Stop, Line)> {
        let stop = match self.code_to_stop.get(code) {
            Some(stop) => *stop,
            None => {
                warn!(
                    "Unknown station code '{}' in {} data. I'll skip this entry.",
                    code, table
                );
                return None;
            }
        };
        let line = match self.name_to_line.get(line_name) {
            Some(line) => *line,
            None => {
                warn!(
                    "Unknown line tag '{}' in {} data. I'll skip this entry.",
                    line_name, table
                );
                return None;
            }
        };
        Some((stop, line))
    }
}

/// Hub identity : records of the same physical station share a name up to a
/// parenthesized suffix and a trailing "역".
pub(crate) fn normalized_station_name(name: &str) -> String {
    let head = match name.split('(').next() {
        Some(head) => head,
        None => name,
    };
    let head = head.trim();
    let head = head.strip_suffix("역").unwrap_or(head);
    head.trim().to_string()
}
