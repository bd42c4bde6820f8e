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


use crate::facilities::ConvenienceGuard;
use crate::profiles::{CriteriaWeights, Profile};
use crate::subway_data::{Stop, SubwayData};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const DEFAULT_MAX_ROUNDS: u8 = 5;
pub const DEFAULT_NB_OF_RESPONSES: usize = 3;

/// The caller-provided description of one journey query.
#[derive(Debug, Clone)]
pub struct RequestInput {
    /// requested departure, in epoch seconds
    pub departure_epoch_seconds: i64,
    pub origin_code: String,
    pub destination_codes: Vec<String>,
    /// one of PHY/VIS/AUD/ELD
    pub profile: String,
    pub max_rounds: u8,
    pub nb_of_responses: usize,
}

impl RequestInput {
    pub fn new(
        departure_epoch_seconds: i64,
        origin_code: String,
        destination_codes: Vec<String>,
        profile: String,
    ) -> Self {
        Self {
            departure_epoch_seconds,
            origin_code,
            destination_codes,
            profile,
            max_rounds: DEFAULT_MAX_ROUNDS,
            nb_of_responses: DEFAULT_NB_OF_RESPONSES,
        }
    }
}

/// A validated query : codes resolved to internal identifiers, profile
/// parsed, and the convenience snapshot pinned for the whole search.
pub struct Request<'data> {
    data: &'data SubwayData,
    convenience: ConvenienceGuard<'data>,
    origin: Stop,
    destinations: Vec<Stop>,
    is_destination: Vec<bool>,
    departure_epoch_seconds: i64,
    profile: Profile,
    weights: &'static CriteriaWeights,
    epsilon: f64,
    walking_speed_m_per_s: f64,
    max_rounds: u8,
    nb_of_responses: usize,
}

impl<'data> Request<'data> {
    pub fn new(
        data: &'data SubwayData,
        convenience: ConvenienceGuard<'data>,
        input: &RequestInput,
    ) -> Result<Self, BadRequest> {
        let profile: Profile = input
            .profile
            .parse()
            .map_err(|_| BadRequest::InvalidProfile(input.profile.clone()))?;

        let origin = data
            .stop_of_code(&input.origin_code)
            .ok_or_else(|| BadRequest::UnknownStation(input.origin_code.clone()))?;

        let mut destinations = Vec::with_capacity(input.destination_codes.len());
        let mut is_destination = vec![false; data.nb_of_stops()];
        for code in &input.destination_codes {
            let stop = data
                .stop_of_code(code)
                .ok_or_else(|| BadRequest::UnknownStation(code.clone()))?;
            if !is_destination[stop.idx] {
                is_destination[stop.idx] = true;
                destinations.push(stop);
            }
        }

        Ok(Self {
            data,
            convenience,
            origin,
            destinations,
            is_destination,
            departure_epoch_seconds: input.departure_epoch_seconds,
            profile,
            weights: profile.criteria_weights(),
            epsilon: profile.epsilon(),
            walking_speed_m_per_s: profile.walking_speed_m_per_s(),
            max_rounds: input.max_rounds,
            nb_of_responses: input.nb_of_responses,
        })
    }

    pub fn data(&self) -> &'data SubwayData {
        self.data
    }

    pub fn origin(&self) -> Stop {
        self.origin
    }

    pub fn destinations(&self) -> &[Stop] {
        &self.destinations
    }

    pub fn is_destination(&self, stop: Stop) -> bool {
        self.is_destination[stop.idx]
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn weights(&self) -> &'static CriteriaWeights {
        self.weights
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn walking_speed_m_per_s(&self) -> f64 {
        self.walking_speed_m_per_s
    }

    pub fn max_rounds(&self) -> u8 {
        self.max_rounds
    }

    pub fn nb_of_responses(&self) -> usize {
        self.nb_of_responses
    }

    /// Convenience score of `stop` for the requested profile, read from the
    /// snapshot pinned at request construction.
    pub fn convenience(&self, stop: Stop) -> f64 {
        self.convenience.convenience(stop, self.profile)
    }

    /// The absolute instant, in epoch seconds, of a point `arrival_minutes`
    /// after the requested departure.
    pub fn instant_at(&self, arrival_minutes: f64) -> i64 {
        self.departure_epoch_seconds + (arrival_minutes * 60.0) as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadRequest {
    UnknownStation(String),
    InvalidProfile(String),
}

impl std::fmt::Display for BadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadRequest::UnknownStation(code) => {
                write!(f, "The station code '{}' is not in the network.", code)
            }
            BadRequest::InvalidProfile(profile) => write!(
                f,
                "The profile '{}' is not one of PHY/VIS/AUD/ELD.",
                profile
            ),
        }
    }
}

impl std::error::Error for BadRequest {}

/// Cooperative cancellation of a search, checked between rounds.
#[derive(Debug, Clone, Default)]
pub struct SearchSignal {
    cancelled: Arc<AtomicBool>,
}

impl SearchSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
