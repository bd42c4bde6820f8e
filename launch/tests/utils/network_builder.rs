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


//! Provides an easy way to create a `baro::SubwayData`
//!
//! ```
//! let data = NetworkBuilder::default()
//!     .station("G1", "강남", "2호선", 37.0, 127.0)
//!     .station("G2", "역삼", "2호선", 37.001, 127.0)
//!     .order("2호선", &["G1", "G2"])
//!     .build();
//! ```

use baro::collections::{
    LineStationsRecord, NetworkCollections, StationRecord, TransferRecord,
};
use baro::SubwayData;

use std::collections::BTreeMap;

/// Builder used to easily create a `SubwayData`.
///
/// Stations are declared first, then `order` freezes a line's sequence and
/// derives the per-direction adjacency the way the loaders do : stations of
/// ascending order are reachable riding up (in on circular lines), the
/// others riding down (out).
pub struct NetworkBuilder {
    collections: NetworkCollections,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self {
            collections: NetworkCollections::default(),
        }
    }
}

impl NetworkBuilder {
    pub fn station(mut self, code: &str, name: &str, line: &str, lat: f64, lon: f64) -> Self {
        let previous = self.collections.stations.insert(
            code.to_string(),
            StationRecord {
                name: name.to_string(),
                line: line.to_string(),
                lat,
                lon,
            },
        );
        assert!(previous.is_none(), "station {} already exists", code);
        self
    }

    /// Freezes the sequence of `line` and derives its adjacency.
    pub fn order(mut self, line: &str, codes: &[&str]) -> Self {
        for (rank, code) in codes.iter().enumerate() {
            self.collections
                .station_order
                .insert((code.to_string(), line.to_string()), rank as u32);
            let up = codes[rank + 1..].iter().map(|c| c.to_string()).collect();
            let down = codes[..rank].iter().rev().map(|c| c.to_string()).collect();
            self.collections.line_stations.insert(
                (code.to_string(), line.to_string()),
                LineStationsRecord { up, down },
            );
        }
        self
    }

    pub fn circular(mut self, line: &str) -> Self {
        self.collections.circular_lines.insert(line.to_string());
        self
    }

    pub fn transfer(mut self, code: &str, from_line: &str, to_line: &str, distance_m: f64) -> Self {
        self.collections.transfers.insert(
            (code.to_string(), from_line.to_string(), to_line.to_string()),
            TransferRecord { distance_m },
        );
        self
    }

    /// Sets one congestion ratio for every half-hour bucket of the table.
    pub fn congestion_flat(
        mut self,
        code: &str,
        line: &str,
        direction: &str,
        day_class: &str,
        ratio: f64,
    ) -> Self {
        let mut buckets = BTreeMap::new();
        for minutes in (0..1440).step_by(30) {
            buckets.insert(format!("t_{}", minutes), ratio);
        }
        self.collections.congestion.insert(
            (
                code.to_string(),
                line.to_string(),
                direction.to_string(),
                day_class.to_string(),
            ),
            buckets,
        );
        self
    }

    /// Sets the ratio of a single bucket, identified by its minutes from
    /// midnight; the other buckets keep the default.
    pub fn congestion_bucket(
        mut self,
        code: &str,
        line: &str,
        direction: &str,
        day_class: &str,
        minutes_from_midnight: u32,
        ratio: f64,
    ) -> Self {
        let key = (
            code.to_string(),
            line.to_string(),
            direction.to_string(),
            day_class.to_string(),
        );
        self.collections
            .congestion
            .entry(key)
            .or_insert_with(BTreeMap::new)
            .insert(format!("t_{}", minutes_from_midnight), ratio);
        self
    }

    pub fn build(self) -> SubwayData {
        SubwayData::new(&self.collections)
    }
}
