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


use crate::geometry::Coord;
use crate::time::{DayClass, NB_OF_TIME_BUCKETS};

use std::collections::HashMap;

mod init;
mod queries;

/// Congestion ratio applied when no table entry matches.
pub const DEFAULT_CONGESTION: f64 = 0.5;

/// A station record, bound to one line. A physical interchange hub appears
/// once per line, all records sharing the same normalized name.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Stop {
    pub(crate) idx: usize,
}

/// An interned line tag.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Line {
    pub(crate) idx: usize,
}

/// Direction of a ride along a line. Radial lines use Up/Down, circular
/// lines In/Out. Unknown marks labels created by a departure or a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    In,
    Out,
    Unknown,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
            Direction::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = BadDirection;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            _ => Err(BadDirection {
                direction_name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug)]
pub struct BadDirection {
    pub direction_name: String,
}

impl std::fmt::Display for BadDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bad direction '{}'. Expected one of up/down/in/out.",
            self.direction_name
        )
    }
}

impl std::error::Error for BadDirection {}

#[derive(Debug)]
pub struct StopData {
    pub(crate) code: String,
    pub(crate) name: String,
    pub(crate) normalized_name: String,
    pub(crate) line: Line,
    pub(crate) coord: Coord,
    /// every line of the physical hub this record belongs to, own line included
    pub(crate) lines_at_station: Vec<Line>,
}

#[derive(Debug)]
pub struct LineData {
    pub(crate) name: String,
    pub(crate) is_circular: bool,
    /// stops of the line with their order rank, sorted by rank
    pub(crate) ordered_stops: Vec<(u32, Stop)>,
}

/// An interchange walk from a station record to the record of the same hub
/// on another line.
#[derive(Debug, Clone, Copy)]
pub struct TransferData {
    pub(crate) distance_m: f64,
    pub(crate) to_stop: Stop,
}

impl TransferData {
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn to_stop(&self) -> Stop {
        self.to_stop
    }
}

/// Stops reachable from a given stop along its line, one ordered list per
/// direction.
#[derive(Debug, Clone, Default)]
pub struct NextStops {
    pub(crate) up: Vec<Stop>,
    pub(crate) down: Vec<Stop>,
}

pub(crate) type CongestionBuckets = [f64; NB_OF_TIME_BUCKETS];

/// The immutable in-memory network store : station records, interned lines,
/// per-line directional adjacency, interchange walks and time-bucketed
/// congestion tables. Built once at startup, read-only afterwards.
pub struct SubwayData {
    pub(crate) stops_data: Vec<StopData>,
    pub(crate) code_to_stop: HashMap<String, Stop>,
    pub(crate) lines_data: Vec<LineData>,
    pub(crate) name_to_line: HashMap<String, Line>,
    pub(crate) next_on_line: HashMap<(Stop, Line), NextStops>,
    pub(crate) station_order: HashMap<(Stop, Line), u32>,
    pub(crate) transfers: HashMap<(Stop, Line, Line), TransferData>,
    pub(crate) congestion: HashMap<(Stop, Line, Direction, DayClass), CongestionBuckets>,
}
