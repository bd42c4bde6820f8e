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


use baro::facilities::FacilityScoreService;
use baro::request::{BadRequest, Request, RequestInput, SearchSignal};
use baro::response::{BadJourney, Itinerary};
use baro::tracing::debug;
use baro::{MultiCriteriaRaptor, SubwayData};

use std::time::SystemTime;

/// Owns an engine and runs the request -> compute -> responses sequence.
///
/// The engine buffers are reused across requests; a solver serves one
/// request at a time, concurrent requests each use their own solver.
pub struct Solver {
    engine: MultiCriteriaRaptor,
}

impl Solver {
    pub fn new(nb_of_stops: usize) -> Self {
        Self {
            engine: MultiCriteriaRaptor::new(nb_of_stops),
        }
    }

    pub fn solve_request(
        &mut self,
        data: &SubwayData,
        facilities: &FacilityScoreService,
        request_input: &RequestInput,
    ) -> Result<Vec<Itinerary>, SolveError> {
        self.solve_request_with_signal(data, facilities, request_input, &SearchSignal::new())
    }

    /// Same as [`solve_request`](Self::solve_request), with a caller-owned
    /// cancellation signal checked at round boundaries.
    pub fn solve_request_with_signal(
        &mut self,
        data: &SubwayData,
        facilities: &FacilityScoreService,
        request_input: &RequestInput,
        signal: &SearchSignal,
    ) -> Result<Vec<Itinerary>, SolveError> {
        // the read guard pins the convenience snapshot for the whole search
        let request = Request::new(data, facilities.read_guard(), request_input)?;

        debug!("Start computing journeys");
        let request_timer = SystemTime::now();
        self.engine.compute(&request, signal);
        debug!(
            "Journeys computed in {} ms with {} rounds and {} labels",
            request_timer.elapsed().unwrap_or_default().as_millis(),
            self.engine.nb_of_rounds(),
            self.engine.nb_of_labels(),
        );

        let responses = request.create_responses(&self.engine)?;
        debug!("Nb of journeys found : {}", responses.len());
        Ok(responses)
    }
}

#[derive(Debug)]
pub enum SolveError {
    BadRequest(BadRequest),
    BadJourney(BadJourney),
}

impl From<BadRequest> for SolveError {
    fn from(err: BadRequest) -> Self {
        SolveError::BadRequest(err)
    }
}

impl From<BadJourney> for SolveError {
    fn from(err: BadJourney) -> Self {
        SolveError::BadJourney(err)
    }
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::BadRequest(err) => write!(f, "{}", err),
            SolveError::BadJourney(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SolveError {}
