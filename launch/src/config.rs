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


use baro::request::{DEFAULT_MAX_ROUNDS, DEFAULT_NB_OF_RESPONSES};
use baro::tracing::warn;

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use structopt::StructOpt;

pub const DEFAULT_PROFILE: &str = "PHY";

/// Where and how to load the persisted network data.
#[derive(Debug, Serialize, Deserialize, StructOpt, Clone)]
#[structopt(rename_all = "snake_case")]
pub struct LaunchParams {
    /// directory containing the network csv files
    #[structopt(long)]
    pub input_data_path: std::path::PathBuf,
}

impl LaunchParams {
    pub fn new(input_data_path: std::path::PathBuf) -> Self {
        Self { input_data_path }
    }
}

/// Parameters of one journey query.
#[derive(Debug, Serialize, Deserialize, StructOpt, Clone)]
#[structopt(rename_all = "snake_case")]
pub struct RequestParams {
    /// accessibility profile of the rider (PHY/VIS/AUD/ELD)
    #[structopt(long, default_value = DEFAULT_PROFILE)]
    #[serde(default = "default_profile")]
    pub profile: String,

    /// maximum number of rounds (i.e. of interchanges plus one)
    #[structopt(long, default_value = "5")]
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u8,

    /// number of ranked journeys to return
    #[structopt(long, default_value = "3")]
    #[serde(default = "default_nb_of_responses")]
    pub nb_of_responses: usize,
}

pub fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

pub fn default_max_rounds() -> u8 {
    DEFAULT_MAX_ROUNDS
}

pub fn default_nb_of_responses() -> usize {
    DEFAULT_NB_OF_RESPONSES
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            max_rounds: default_max_rounds(),
            nb_of_responses: default_nb_of_responses(),
        }
    }
}

impl Display for RequestParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "--profile {} --max_rounds {} --nb_of_responses {}",
            self.profile, self.max_rounds, self.nb_of_responses
        )
    }
}

// - var not set -> use default value
// - var set but non-unicode -> warn and use default value
// - var set but not parsable -> warn and use default value
pub fn parse_env_var<T, Parser, ParseErr>(var_name: &str, default_value: T, parser: Parser) -> T
where
    Parser: Fn(&str) -> Result<T, ParseErr>,
    ParseErr: Display,
    T: Debug,
{
    match std::env::var(var_name) {
        Ok(s) => match parser(&s) {
            Ok(val) => val,
            Err(err) => {
                warn!(
                    "Could not parse env var {} : {}. I'll use the default value '{:?}' instead",
                    var_name, err, default_value
                );
                default_value
            }
        },
        Err(std::env::VarError::NotPresent) => default_value,
        Err(std::env::VarError::NotUnicode(err)) => {
            warn!(
                "Badly formed env var {} : {:?}. I'll use the default value {:?} instead",
                var_name, err, default_value
            );
            default_value
        }
    }
}
