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


mod utils;

use baro::facilities::{FacilityCounts, FacilityScoreService, FacilityUpdate};
use baro::profiles::Profile;
use baro::SubwayData;
use failure::Error;
use std::sync::Arc;
use utils::network_builder::NetworkBuilder;
use utils::{build_and_solve, Config};

fn hub_network() -> SubwayData {
    NetworkBuilder::default()
        .station("V1", "사당", "4호선", 37.000, 127.000)
        .station("V2", "총신대입구", "4호선", 37.001, 127.000)
        .station("V3", "동작", "4호선", 37.002, 127.000)
        .station("W2", "총신대입구", "7호선", 37.001, 127.000)
        .station("W3", "남성", "7호선", 37.001, 127.001)
        .order("4호선", &["V1", "V2", "V3"])
        .order("7호선", &["W2", "W3"])
        .transfer("V2", "4호선", "7호선", 60.0)
        .build()
}

fn well_equipped(codes: &[&str]) -> FacilityUpdate {
    FacilityUpdate {
        station_codes: codes.iter().map(|code| code.to_string()).collect(),
        counts: FacilityCounts {
            elevator: 1.0,
            safe_platform: 2.0,
            helper: 1.0,
            ..FacilityCounts::default()
        },
    }
}

#[test]
fn test_facility_update_changes_the_ranking() -> Result<(), Error> {
    let _log_guard = utils::init_logger();

    let data = hub_network();
    let facilities = FacilityScoreService::new(data.nb_of_stops());
    let config =
        Config::with_destinations("20240115T090000", "V1", &["V3", "W3"]).profile("VIS");

    // before the update the hub scores nothing : the direct ride wins
    let responses = build_and_solve(&data, &facilities, &config)?;
    assert_eq!(responses[0].route_sequence, vec!["V1", "V2", "V3"]);
    assert!((responses[0].avg_convenience - 0.0).abs() < 1e-9);

    facilities.update(&[well_equipped(&["V2", "W2"])], &data);

    // afterwards the interchange at the equipped hub takes the lead
    let responses = build_and_solve(&data, &facilities, &config)?;
    assert_eq!(responses[0].route_sequence, vec!["V1", "V2", "W2", "W3"]);
    assert!((responses[0].avg_convenience - 0.25).abs() < 1e-6);

    Ok(())
}

#[test]
fn test_rows_with_unknown_stations_are_skipped() {
    let _log_guard = utils::init_logger();

    let data = hub_network();
    let facilities = FacilityScoreService::new(data.nb_of_stops());
    facilities.update(&[well_equipped(&["NOPE", "V2"])], &data);

    let guard = facilities.read_guard();
    let v2 = data.stop_of_code("V2").unwrap();
    let v1 = data.stop_of_code("V1").unwrap();
    assert!(guard.convenience(v2, Profile::Vis) > 0.99);
    assert!((guard.convenience(v1, Profile::Vis) - 0.0).abs() < 1e-9);
}

#[test]
fn test_a_search_keeps_its_snapshot_while_an_update_waits() {
    let _log_guard = utils::init_logger();

    let data = Arc::new(hub_network());
    let facilities = Arc::new(FacilityScoreService::new(data.nb_of_stops()));
    let v2 = data.stop_of_code("V2").unwrap();

    // the guard plays the role of an in-flight search
    let guard = facilities.read_guard();

    let update_facilities = Arc::clone(&facilities);
    let update_data = Arc::clone(&data);
    let updater = std::thread::spawn(move || {
        update_facilities.update(&[well_equipped(&["V2"])], &update_data);
    });

    // while the guard lives, the writer is parked and the snapshot intact
    assert!((guard.convenience(v2, Profile::Vis) - 0.0).abs() < 1e-9);
    drop(guard);

    updater.join().expect("the update thread panicked");
    let guard = facilities.read_guard();
    assert!(guard.convenience(v2, Profile::Vis) > 0.99);
}
