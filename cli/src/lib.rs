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


use anyhow::Error;
use baro::request::RequestInput;
use baro::tracing::info;
use launch::config::{LaunchParams, RequestParams};
use launch::datetime::parse_datetime;
use launch::read::read;
use launch::solver::Solver;

use std::fmt::Display;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "baro_cli",
    about = "Run accessible journey queries from the command line.",
    rename_all = "snake_case"
)]
pub struct BaseOptions {
    #[structopt(flatten)]
    pub launch_params: LaunchParams,

    #[structopt(flatten)]
    pub request_params: RequestParams,

    /// origin station code
    #[structopt(long)]
    pub start: String,

    /// destination station code(s)
    #[structopt(long)]
    pub end: Vec<String>,

    /// departure datetime of the query, formatted like 20240115T090000,
    /// in Seoul local time
    #[structopt(long)]
    pub departure_datetime: String,
}

impl Display for BaseOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "--input_data_path {:?} --start {} --end {} --departure_datetime {} {}",
            self.launch_params.input_data_path,
            self.start,
            self.end.join(" --end "),
            self.departure_datetime,
            self.request_params
        )
    }
}

pub fn run_query(options: BaseOptions) -> Result<(), Error> {
    info!("Launching with options : {}", options);

    let (data, facilities) = read(&options.launch_params)?;
    let mut solver = Solver::new(data.nb_of_stops());

    let departure_epoch_seconds = parse_datetime(&options.departure_datetime)?;
    let request_input = RequestInput {
        departure_epoch_seconds,
        origin_code: options.start.clone(),
        destination_codes: options.end.clone(),
        profile: options.request_params.profile.clone(),
        max_rounds: options.request_params.max_rounds,
        nb_of_responses: options.request_params.nb_of_responses,
    };

    let responses = solver.solve_request(&data, &facilities, &request_input)?;
    if responses.is_empty() {
        info!(
            "No journey found from {} to {}.",
            options.start,
            options.end.join(", ")
        );
        return Ok(());
    }

    for itinerary in &responses {
        println!(
            "#{} [{}] {:.1} min, {} transfer(s), score {:.4}",
            itinerary.rank,
            options.request_params.profile,
            itinerary.total_time_minutes,
            itinerary.transfers,
            itinerary.score,
        );
        println!("  stations : {}", itinerary.route_sequence.join(" > "));
        for (station, from_line, to_line) in &itinerary.transfer_info {
            println!("  transfer at {} : {} -> {}", station, from_line, to_line);
        }
        println!(
            "  avg convenience {:.2}, avg congestion {:.2}, max transfer difficulty {:.2}",
            itinerary.avg_convenience, itinerary.avg_congestion, itinerary.max_transfer_difficulty,
        );
    }
    Ok(())
}
