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


use std::collections::{BTreeMap, BTreeSet};

/// The persisted network inputs, as read at startup.
///
/// These collections are the construction input of
/// [`SubwayData`](crate::subway_data::SubwayData); they mirror the shape of
/// the persisted tables (station records, per-line adjacency and order,
/// interchange distances, time-bucketed congestion ratios).
///
/// All maps are keyed by external station codes and line tags; resolution to
/// compact internal identifiers happens once, at build time.
#[derive(Debug, Default)]
pub struct NetworkCollections {
    /// station code -> record
    pub stations: BTreeMap<String, StationRecord>,
    /// (station code, line tag) -> stations reachable per direction, in order
    pub line_stations: BTreeMap<(String, String), LineStationsRecord>,
    /// (station code, line tag) -> rank of the station on the line
    pub station_order: BTreeMap<(String, String), u32>,
    /// (station code, from line, to line) -> interchange walk
    pub transfers: BTreeMap<(String, String, String), TransferRecord>,
    /// (station code, line, direction tag, day class tag)
    ///   -> bucket column name `t_<minutes>` -> congestion ratio
    pub congestion: BTreeMap<(String, String, String, String), BTreeMap<String, f64>>,
    /// lines whose ends are joined; their directions are tagged in/out
    pub circular_lines: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct StationRecord {
    pub name: String,
    pub line: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default)]
pub struct LineStationsRecord {
    /// station codes reachable riding toward ascending order
    pub up: Vec<String>,
    /// station codes reachable riding toward descending order
    pub down: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct TransferRecord {
    pub distance_m: f64,
}
