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


use baro::chrono::{NaiveDateTime, TimeZone};
use baro::chrono_tz::Asia::Seoul;

/// Parses a datetime formatted like `20240115T090000`, interpreted in Seoul
/// local time, into epoch seconds.
pub fn parse_datetime(string_datetime: &str) -> Result<i64, BadDateTime> {
    let naive = NaiveDateTime::parse_from_str(string_datetime, "%Y%m%dT%H%M%S").map_err(|_| {
        BadDateTime {
            string_datetime: string_datetime.to_string(),
        }
    })?;
    match Seoul.from_local_datetime(&naive).single() {
        Some(datetime) => Ok(datetime.timestamp()),
        None => Err(BadDateTime {
            string_datetime: string_datetime.to_string(),
        }),
    }
}

#[derive(Debug)]
pub struct BadDateTime {
    pub string_datetime: String,
}

impl std::fmt::Display for BadDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unable to parse {} as a datetime. Expected something formatted like 20240115T090000.",
            self.string_datetime
        )
    }
}

impl std::error::Error for BadDateTime {}
