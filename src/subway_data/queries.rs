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
    Direction, Line, NextStops, Stop, SubwayData, TransferData, DEFAULT_CONGESTION,
};
use crate::geometry::Coord;
use crate::time::DayClass;

impl SubwayData {
    pub fn nb_of_stops(&self) -> usize {
        self.stops_data.len()
    }

    pub fn nb_of_lines(&self) -> usize {
        self.lines_data.len()
    }

    pub fn stop_of_code(&self, code: &str) -> Option<Stop> {
        self.code_to_stop.get(code).copied()
    }

    pub fn code(&self, stop: Stop) -> &str {
        &self.stops_data[stop.idx].code
    }

    pub fn station_name(&self, stop: Stop) -> &str {
        &self.stops_data[stop.idx].name
    }

    pub fn coord(&self, stop: Stop) -> &Coord {
        &self.stops_data[stop.idx].coord
    }

    pub fn line_of(&self, stop: Stop) -> Line {
        self.stops_data[stop.idx].line
    }

    /// Every line of the physical hub `stop` belongs to, own line included.
    pub fn lines_at(&self, stop: Stop) -> &[Line] {
        &self.stops_data[stop.idx].lines_at_station
    }

    pub fn line_of_name(&self, name: &str) -> Option<Line> {
        self.name_to_line.get(name).copied()
    }

    pub fn line_name(&self, line: Line) -> &str {
        &self.lines_data[line.idx].name
    }

    pub fn is_circular(&self, line: Line) -> bool {
        self.lines_data[line.idx].is_circular
    }

    pub fn next_on_line(&self, stop: Stop, line: Line) -> Option<&NextStops> {
        self.next_on_line.get(&(stop, line))
    }

    /// The two ride expansions available from `stop` along `line` : the
    /// direction tag and the ordered stops ahead. Ascending station order is
    /// Up (In on circular lines), descending is Down (Out).
    pub fn ride_directions(&self, stop: Stop, line: Line) -> [(Direction, &[Stop]); 2] {
        let (ascending, descending) = if self.is_circular(line) {
            (Direction::In, Direction::Out)
        } else {
            (Direction::Up, Direction::Down)
        };
        match self.next_on_line.get(&(stop, line)) {
            Some(next_stops) => [
                (ascending, next_stops.up.as_slice()),
                (descending, next_stops.down.as_slice()),
            ],
            None => {
                let empty: &[Stop] = &[];
                [(ascending, empty), (descending, empty)]
            }
        }
    }

    pub fn transfer(&self, stop: Stop, from_line: Line, to_line: Line) -> Option<&TransferData> {
        self.transfers.get(&(stop, from_line, to_line))
    }

    pub fn station_order(&self, stop: Stop, line: Line) -> Option<u32> {
        self.station_order.get(&(stop, line)).copied()
    }

    /// Congestion ratio of a ride starting at `stop`, for the given
    /// direction, day class and half-hour bucket. Missing entries yield
    /// [`DEFAULT_CONGESTION`].
    pub fn congestion(
        &self,
        stop: Stop,
        line: Line,
        direction: Direction,
        day_class: DayClass,
        bucket: usize,
    ) -> f64 {
        match self.congestion.get(&(stop, line, direction, day_class)) {
            Some(buckets) => match buckets.get(bucket) {
                Some(ratio) => *ratio,
                None => DEFAULT_CONGESTION,
            },
            None => DEFAULT_CONGESTION,
        }
    }

    /// Stations crossed riding `line` from `from` to `to`, in travel order,
    /// excluding `from` and including `to`. If either endpoint has no order
    /// entry on `line`, the ride collapses to `[to]`.
    pub fn intermediate_stations(&self, from: Stop, to: Stop, line: Line) -> Vec<Stop> {
        let (from_order, to_order) =
            match (self.station_order(from, line), self.station_order(to, line)) {
                (Some(from_order), Some(to_order)) => (from_order, to_order),
                _ => return vec![to],
            };

        let ordered_stops = &self.lines_data[line.idx].ordered_stops;
        let mut result = Vec::new();
        if from_order < to_order {
            for &(order, stop) in ordered_stops.iter() {
                if order > from_order && order <= to_order {
                    result.push(stop);
                }
            }
        } else {
            for &(order, stop) in ordered_stops.iter().rev() {
                if order < from_order && order >= to_order {
                    result.push(stop);
                }
            }
        }
        if result.is_empty() {
            result.push(to);
        }
        result
    }
}
