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

use baro::facilities::FacilityScoreService;
use baro::SubwayData;
use failure::Error;
use utils::network_builder::NetworkBuilder;
use utils::{build_and_solve, Config};

// Line A goes T1-T2-T3, line B goes U2-U3; T2 and U2 are the same physical
// hub, 120 meters of walking apart.
fn crossing_network() -> SubwayData {
    NetworkBuilder::default()
        .station("T1", "합정", "2호선", 37.000, 127.000)
        .station("T2", "홍대입구", "2호선", 37.001, 127.000)
        .station("T3", "신촌", "2호선", 37.002, 127.000)
        .station("U2", "홍대입구", "공항철도", 37.001, 127.000)
        .station("U3", "공덕", "공항철도", 37.001, 127.001)
        .order("2호선", &["T1", "T2", "T3"])
        .order("공항철도", &["U2", "U3"])
        .transfer("T2", "2호선", "공항철도", 120.0)
        .build()
}

#[test]
fn test_routing_with_transfers() -> Result<(), Error> {
    let _log_guard = utils::init_logger();

    let data = crossing_network();
    let facilities = FacilityScoreService::new(data.nb_of_stops());
    let config = Config::new("20240115T090000", "T1", "U3");
    let responses = build_and_solve(&data, &facilities, &config)?;

    assert_eq!(responses.len(), 1);
    let journey = &responses[0];
    assert_eq!(journey.route_sequence, vec!["T1", "T2", "U2", "U3"]);
    assert_eq!(
        journey.route_lines,
        vec!["2호선", "2호선", "공항철도", "공항철도"]
    );
    assert_eq!(journey.transfers, 1);
    assert_eq!(
        journey.transfer_info,
        vec![(
            "T2".to_string(),
            "2호선".to_string(),
            "공항철도".to_string()
        )]
    );

    // one minute of ride, 120m at the wheelchair speed of 0.5 m/s, one more
    // minute of ride
    assert!((journey.total_time_minutes - 6.0).abs() < 1e-9);

    // difficulty : 0.6 * 120/300 + 0.4 * 1.0, nothing convenient on the way
    assert!((journey.max_transfer_difficulty - 0.64).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_walking_speed_depends_on_the_profile() -> Result<(), Error> {
    let _log_guard = utils::init_logger();

    let data = crossing_network();
    let facilities = FacilityScoreService::new(data.nb_of_stops());

    // hearing impaired riders walk 0.98 m/s : 120m in ~2.04 minutes
    let config = Config::new("20240115T090000", "T1", "U3").profile("AUD");
    let responses = build_and_solve(&data, &facilities, &config)?;

    assert_eq!(responses.len(), 1);
    let expected = 2.0 + 120.0 / (0.98 * 60.0);
    assert!((responses[0].total_time_minutes - expected).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_transfer_from_the_end_of_a_line() -> Result<(), Error> {
    let _log_guard = utils::init_logger();

    // A2 ends line A; the only way out of it is the interchange
    let data = NetworkBuilder::default()
        .station("A1", "마천", "5호선", 37.000, 127.000)
        .station("A2", "오금", "5호선", 37.001, 127.000)
        .station("B2", "오금", "3호선", 37.001, 127.000)
        .station("B3", "경찰병원", "3호선", 37.001, 127.001)
        .order("5호선", &["A1", "A2"])
        .order("3호선", &["B2", "B3"])
        .transfer("A2", "5호선", "3호선", 90.0)
        .build();
    let facilities = FacilityScoreService::new(data.nb_of_stops());
    let config = Config::new("20240115T090000", "A1", "B3");
    let responses = build_and_solve(&data, &facilities, &config)?;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].route_sequence, vec!["A1", "A2", "B2", "B3"]);
    assert_eq!(responses[0].transfers, 1);

    Ok(())
}

#[test]
fn test_missing_transfer_record_means_no_interchange() -> Result<(), Error> {
    let _log_guard = utils::init_logger();

    // same crossing, but no transfer record : the destination is unreachable
    let data = NetworkBuilder::default()
        .station("T1", "합정", "2호선", 37.000, 127.000)
        .station("T2", "홍대입구", "2호선", 37.001, 127.000)
        .station("U2", "홍대입구", "공항철도", 37.001, 127.000)
        .station("U3", "공덕", "공항철도", 37.001, 127.001)
        .order("2호선", &["T1", "T2"])
        .order("공항철도", &["U2", "U3"])
        .build();
    let facilities = FacilityScoreService::new(data.nb_of_stops());
    let config = Config::new("20240115T090000", "T1", "U3");
    let responses = build_and_solve(&data, &facilities, &config)?;

    assert!(responses.is_empty());

    Ok(())
}
