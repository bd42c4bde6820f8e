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


use crate::profiles::{Profile, ALL_PROFILES, NB_OF_PROFILES};
use crate::subway_data::{Stop, SubwayData};

use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use tracing::debug;

pub const NB_OF_FACILITIES: usize = 9;

/// Slope of the sigmoid normalizing raw facility sums into [0, 1].
/// Fixed for the whole process lifetime so scores stay comparable.
pub const SIGMOID_SLOPE: f64 = 3.0;

/// Counters of the nine accessibility facilities of a station.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FacilityCounts {
    pub charger: f64,
    pub elevator: f64,
    pub escalator: f64,
    pub lift: f64,
    pub moving_walk: f64,
    pub safe_platform: f64,
    pub sign_phone: f64,
    pub toilet: f64,
    pub helper: f64,
}

/// One update row : the stations it applies to, and their new counters.
#[derive(Debug, Clone)]
pub struct FacilityUpdate {
    pub station_codes: Vec<String>,
    pub counts: FacilityCounts,
}

/// How much each facility matters per profile.
/// 0.0 : irrelevant, 3.0 : nice to have, 5.0 : required.
#[derive(Debug, Clone, Copy)]
pub struct FacilityWeights {
    pub charger: f64,
    pub elevator: f64,
    pub escalator: f64,
    pub lift: f64,
    pub moving_walk: f64,
    pub safe_platform: f64,
    pub sign_phone: f64,
    pub toilet: f64,
    pub helper: f64,
}

const PHY_FACILITY_WEIGHTS: FacilityWeights = FacilityWeights {
    charger: 3.0,
    elevator: 5.0,
    escalator: 3.0,
    lift: 2.0,
    moving_walk: 2.0,
    safe_platform: 5.0,
    sign_phone: 0.0,
    toilet: 3.0,
    helper: 4.0,
};

const VIS_FACILITY_WEIGHTS: FacilityWeights = FacilityWeights {
    charger: 0.0,
    elevator: 3.0,
    escalator: 3.0,
    lift: 0.0,
    moving_walk: 2.0,
    safe_platform: 5.0,
    sign_phone: 0.0,
    toilet: 0.0,
    helper: 4.0,
};

const AUD_FACILITY_WEIGHTS: FacilityWeights = FacilityWeights {
    charger: 0.0,
    elevator: 3.0,
    escalator: 3.0,
    lift: 0.0,
    moving_walk: 2.0,
    safe_platform: 3.0,
    sign_phone: 4.5,
    toilet: 0.0,
    helper: 4.0,
};

const ELD_FACILITY_WEIGHTS: FacilityWeights = FacilityWeights {
    charger: 0.0,
    elevator: 4.0,
    escalator: 4.0,
    lift: 0.0,
    moving_walk: 4.0,
    safe_platform: 4.0,
    sign_phone: 0.0,
    toilet: 1.0,
    helper: 4.0,
};

pub fn facility_weights(profile: Profile) -> &'static FacilityWeights {
    match profile {
        Profile::Phy => &PHY_FACILITY_WEIGHTS,
        Profile::Vis => &VIS_FACILITY_WEIGHTS,
        Profile::Aud => &AUD_FACILITY_WEIGHTS,
        Profile::Eld => &ELD_FACILITY_WEIGHTS,
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Convenience score in [0, 1] of a station with `counts`, for `profile`.
pub fn convenience_of_counts(counts: &FacilityCounts, profile: Profile) -> f64 {
    let weights = facility_weights(profile);
    let raw = counts.charger * weights.charger
        + counts.elevator * weights.elevator
        + counts.escalator * weights.escalator
        + counts.lift * weights.lift
        + counts.moving_walk * weights.moving_walk
        + counts.safe_platform * weights.safe_platform
        + counts.sign_phone * weights.sign_phone
        + counts.toilet * weights.toilet
        + counts.helper * weights.helper;
    sigmoid(SIGMOID_SLOPE * raw)
}

type ScoreTable = Vec<[f64; NB_OF_PROFILES]>;

/// Per-station, per-profile convenience scores, recomputed on facility
/// updates and read by searches.
///
/// A search acquires the read guard once and keeps it for the whole
/// propagation, so it always observes a snapshot consistent from start to
/// finish. Updates take the write lock and therefore wait for in-flight
/// searches to drain.
pub struct FacilityScoreService {
    scores: RwLock<ScoreTable>,
}

impl FacilityScoreService {
    /// All scores start at 0.0 until a facility update installs real data.
    pub fn new(nb_of_stops: usize) -> Self {
        Self {
            scores: RwLock::new(vec![[0.0; NB_OF_PROFILES]; nb_of_stops]),
        }
    }

    pub fn read_guard(&self) -> ConvenienceGuard<'_> {
        ConvenienceGuard {
            table: self.scores.read().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Applies `updates` atomically. Rows referencing unknown station codes
    /// are skipped. Scores are computed outside the lock; the write lock is
    /// held only for the installation.
    pub fn update(&self, updates: &[FacilityUpdate], data: &SubwayData) {
        let mut staged: Vec<(Stop, [f64; NB_OF_PROFILES])> = Vec::new();
        for update in updates {
            let mut scores = [0.0; NB_OF_PROFILES];
            for profile in &ALL_PROFILES {
                scores[profile.idx()] = convenience_of_counts(&update.counts, *profile);
            }
            for code in &update.station_codes {
                match data.stop_of_code(code) {
                    Some(stop) => staged.push((stop, scores)),
                    None => debug!(
                        "Unknown station code '{}' in a facility update. I'll skip it.",
                        code
                    ),
                }
            }
        }

        let mut table = self.scores.write().unwrap_or_else(PoisonError::into_inner);
        for (stop, scores) in staged {
            if let Some(entry) = table.get_mut(stop.idx) {
                *entry = scores;
            }
        }
    }
}

/// A consistent snapshot of the convenience scores, held for the duration
/// of a search.
pub struct ConvenienceGuard<'a> {
    table: RwLockReadGuard<'a, ScoreTable>,
}

impl ConvenienceGuard<'_> {
    pub fn convenience(&self, stop: Stop, profile: Profile) -> f64 {
        match self.table.get(stop.idx) {
            Some(scores) => scores[profile.idx()],
            None => 0.0,
        }
    }
}
