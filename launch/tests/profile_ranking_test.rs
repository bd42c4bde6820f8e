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
use baro::SubwayData;
use failure::Error;
use rstest::rstest;
use utils::network_builder::NetworkBuilder;
use utils::{build_and_solve, Config};

// A direct line V1-V2-V3, and a parallel branch through the V2 hub :
// transfer to line B at V2, one stop to W3. W3 and V3 are distinct
// stations, both accepted as destinations.
fn convenience_network() -> SubwayData {
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

fn equip_the_hub(data: &SubwayData) -> FacilityScoreService {
    let facilities = FacilityScoreService::new(data.nb_of_stops());
    facilities.update(
        &[FacilityUpdate {
            station_codes: vec!["V2".to_string(), "W2".to_string()],
            counts: FacilityCounts {
                elevator: 1.0,
                safe_platform: 2.0,
                helper: 1.0,
                ..FacilityCounts::default()
            },
        }],
        data,
    );
    facilities
}

#[test]
fn test_convenience_outweighs_a_transfer_for_the_visually_impaired() -> Result<(), Error> {
    let _log_guard = utils::init_logger();

    let data = convenience_network();
    let facilities = equip_the_hub(&data);
    let config =
        Config::with_destinations("20240115T090000", "V1", &["V3", "W3"]).profile("VIS");
    let responses = build_and_solve(&data, &facilities, &config)?;

    assert_eq!(responses.len(), 2);

    // the interchange at the well equipped hub wins despite the extra
    // transfer and the extra walking time
    let best = &responses[0];
    assert_eq!(best.route_sequence, vec!["V1", "V2", "W2", "W3"]);
    assert_eq!(best.transfers, 1);
    assert!((best.avg_convenience - 0.25).abs() < 1e-6);
    assert!((best.max_transfer_difficulty - 0.32).abs() < 1e-6);

    let direct = &responses[1];
    assert_eq!(direct.route_sequence, vec!["V1", "V2", "V3"]);
    assert_eq!(direct.transfers, 0);
    assert!(best.avg_convenience > direct.avg_convenience);

    Ok(())
}

// Line 2 is saturated (flat ratio 1.4), line 5 is nearly empty; H2 is the
// interchange hub, H4 and F4 both count as the destination.
fn congestion_network() -> SubwayData {
    NetworkBuilder::default()
        .station("H1", "홍대입구", "2호선", 37.000, 127.000)
        .station("H2", "을지로", "2호선", 37.001, 127.000)
        .station("H3", "왕십리", "2호선", 37.002, 127.000)
        .station("H4", "잠실", "2호선", 37.003, 127.000)
        .station("F2", "을지로", "5호선", 37.001, 127.000)
        .station("F3", "답십리", "5호선", 37.001, 127.001)
        .station("F4", "잠실", "5호선", 37.001, 127.002)
        .order("2호선", &["H1", "H2", "H3", "H4"])
        .order("5호선", &["F2", "F3", "F4"])
        .transfer("H2", "2호선", "5호선", 30.0)
        .congestion_flat("H1", "2호선", "up", "weekday", 1.4)
        .congestion_flat("H2", "2호선", "up", "weekday", 1.4)
        .congestion_flat("H3", "2호선", "up", "weekday", 1.4)
        .congestion_flat("F2", "5호선", "up", "weekday", 0.05)
        .congestion_flat("F3", "5호선", "up", "weekday", 0.05)
        .build()
}

#[test]
fn test_the_elderly_trade_a_transfer_for_less_congestion() -> Result<(), Error> {
    let _log_guard = utils::init_logger();

    let data = congestion_network();
    let facilities = FacilityScoreService::new(data.nb_of_stops());
    let config =
        Config::with_destinations("20240115T180000", "H1", &["H4", "F4"]).profile("ELD");
    let responses = build_and_solve(&data, &facilities, &config)?;

    assert_eq!(responses.len(), 2);

    let best = &responses[0];
    assert_eq!(best.route_sequence, vec!["H1", "H2", "F2", "F3", "F4"]);
    assert_eq!(best.transfers, 1);

    let direct = &responses[1];
    assert_eq!(direct.route_sequence, vec!["H1", "H2", "H3", "H4"]);
    assert_eq!(direct.transfers, 0);

    // the whole point of the detour
    assert!(best.avg_congestion < direct.avg_congestion);
    // and it costs an interchange and some walking
    assert!(best.total_time_minutes > direct.total_time_minutes);

    Ok(())
}

#[rstest]
#[case::phy("PHY")]
#[case::vis("VIS")]
#[case::aud("AUD")]
#[case::eld("ELD")]
fn test_every_profile_gets_ranked_journeys(#[case] profile: &str) -> Result<(), Error> {
    let _log_guard = utils::init_logger();

    let data = congestion_network();
    let facilities = FacilityScoreService::new(data.nb_of_stops());
    let config =
        Config::with_destinations("20240115T180000", "H1", &["H4", "F4"]).profile(profile);

    // build_and_solve checks ranking and metric invariants on every profile
    let responses = build_and_solve(&data, &facilities, &config)?;
    assert!(!responses.is_empty());
    for journey in &responses {
        assert_eq!(journey.route_sequence.first().map(String::as_str), Some("H1"));
        let last = journey.route_sequence.last().map(String::as_str);
        assert!(last == Some("H4") || last == Some("F4"));
    }

    Ok(())
}
