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


use chrono::{Datelike, TimeZone, Timelike, Weekday};
use chrono_tz::Asia::Seoul;

/// Congestion tables are bucketed by half hours, so a day holds 48 buckets.
pub const NB_OF_TIME_BUCKETS: usize = 48;

/// Congestion data is segmented by the kind of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayClass {
    Weekday,
    Saturday,
    Sunday,
}

impl std::fmt::Display for DayClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayClass::Weekday => write!(f, "weekday"),
            DayClass::Saturday => write!(f, "sat"),
            DayClass::Sunday => write!(f, "sun"),
        }
    }
}

impl std::str::FromStr for DayClass {
    type Err = BadDayClass;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekday" => Ok(DayClass::Weekday),
            "sat" => Ok(DayClass::Saturday),
            "sun" => Ok(DayClass::Sunday),
            _ => Err(BadDayClass {
                day_class_name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug)]
pub struct BadDayClass {
    pub day_class_name: String,
}

impl std::fmt::Display for BadDayClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bad day class '{}'. Expected one of weekday/sat/sun.",
            self.day_class_name
        )
    }
}

impl std::error::Error for BadDayClass {}

/// Day class and half-hour bucket of an epoch instant, in Seoul local time.
pub fn local_day_and_bucket(epoch_seconds: i64) -> (DayClass, usize) {
    let datetime = Seoul.timestamp(epoch_seconds, 0);
    let day_class = match datetime.weekday() {
        Weekday::Sat => DayClass::Saturday,
        Weekday::Sun => DayClass::Sunday,
        _ => DayClass::Weekday,
    };
    let minutes_from_midnight = datetime.hour() * 60 + datetime.minute();
    (day_class, bucket_of_minutes(minutes_from_midnight))
}

pub fn bucket_of_minutes(minutes_from_midnight: u32) -> usize {
    (minutes_from_midnight / 30) as usize
}

/// Parses a bucket column name of the form `t_<minutes_from_midnight>`,
/// where the minutes are a multiple of 30 below 1440.
pub fn parse_bucket_name(name: &str) -> Option<usize> {
    let minutes: u32 = name.strip_prefix("t_")?.parse().ok()?;
    if minutes % 30 != 0 || minutes >= 1440 {
        return None;
    }
    Some(bucket_of_minutes(minutes))
}
