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


pub mod network_builder;

use baro::facilities::FacilityScoreService;
use baro::request::RequestInput;
use baro::response::Itinerary;
use baro::tracing::dispatcher::DefaultGuard;
use baro::SubwayData;
use failure::Error;
use launch::datetime::parse_datetime;
use launch::solver::Solver;

use std::collections::BTreeSet;

pub fn init_logger() -> DefaultGuard {
    launch::logger::init_test_logger()
}

/// A journey query in test-friendly form : datetimes as strings, defaults
/// everywhere else.
pub struct Config {
    pub departure_datetime: String,
    pub origin: String,
    pub destinations: Vec<String>,
    pub profile: String,
    pub max_rounds: u8,
    pub nb_of_responses: usize,
}

impl Config {
    pub fn new(departure_datetime: &str, origin: &str, destination: &str) -> Self {
        Self {
            departure_datetime: departure_datetime.to_string(),
            origin: origin.to_string(),
            destinations: vec![destination.to_string()],
            profile: "PHY".to_string(),
            max_rounds: baro::request::DEFAULT_MAX_ROUNDS,
            nb_of_responses: baro::request::DEFAULT_NB_OF_RESPONSES,
        }
    }

    pub fn with_destinations(departure_datetime: &str, origin: &str, destinations: &[&str]) -> Self {
        Self {
            destinations: destinations.iter().map(|code| code.to_string()).collect(),
            ..Self::new(departure_datetime, origin, "unused")
        }
    }

    pub fn profile(mut self, profile: &str) -> Self {
        self.profile = profile.to_string();
        self
    }

    pub fn max_rounds(mut self, max_rounds: u8) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

pub fn request_input(config: &Config) -> Result<RequestInput, Error> {
    let departure_epoch_seconds = parse_datetime(&config.departure_datetime)?;
    Ok(RequestInput {
        departure_epoch_seconds,
        origin_code: config.origin.clone(),
        destination_codes: config.destinations.clone(),
        profile: config.profile.clone(),
        max_rounds: config.max_rounds,
        nb_of_responses: config.nb_of_responses,
    })
}

pub fn build_and_solve(
    data: &SubwayData,
    facilities: &FacilityScoreService,
    config: &Config,
) -> Result<Vec<Itinerary>, Error> {
    let input = request_input(config)?;
    let mut solver = Solver::new(data.nb_of_stops());
    let responses = solver.solve_request(data, facilities, &input)?;
    check_invariants(&responses);
    Ok(responses)
}

/// The properties every response set must satisfy, whatever the query.
pub fn check_invariants(responses: &[Itinerary]) {
    assert!(responses.len() <= 3);
    for (position, itinerary) in responses.iter().enumerate() {
        assert_eq!(itinerary.rank, position + 1);
        assert_eq!(itinerary.route_sequence.len(), itinerary.route_lines.len());
        assert!(!itinerary.route_sequence.is_empty());
        assert_eq!(itinerary.transfer_info.len(), usize::from(itinerary.transfers));
        assert!(itinerary.total_time_minutes >= 0.0);
        assert!(itinerary.avg_convenience >= 0.0 && itinerary.avg_convenience <= 1.0);
        assert!(itinerary.avg_congestion >= 0.0);
        assert!(
            itinerary.max_transfer_difficulty >= 0.0 && itinerary.max_transfer_difficulty <= 1.0
        );
        if position > 0 {
            assert!(responses[position - 1].score <= itinerary.score);
        }

        // no station visited twice
        let distinct: BTreeSet<&String> = itinerary.route_sequence.iter().collect();
        assert_eq!(distinct.len(), itinerary.route_sequence.len());
    }

    // journeys are distinct
    let distinct_sequences: BTreeSet<&Vec<String>> =
        responses.iter().map(|itinerary| &itinerary.route_sequence).collect();
    assert_eq!(distinct_sequences.len(), responses.len());
}
