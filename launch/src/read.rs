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


use super::config;

use anyhow::{Context, Error};
use baro::collections::{LineStationsRecord, NetworkCollections, StationRecord, TransferRecord};
use baro::facilities::{FacilityCounts, FacilityScoreService, FacilityUpdate};
use baro::tracing::{debug, info, warn};
use baro::SubwayData;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::SystemTime;

/// Reads the network csv files, builds the store and installs the initial
/// facility scores.
///
/// All files are semicolon-delimited with a header line. `congestion.csv`
/// and `facilities.csv` are optional; without them searches run on default
/// congestion and zero convenience.
pub fn read(
    launch_params: &config::LaunchParams,
) -> Result<(SubwayData, FacilityScoreService), Error> {
    let dir = &launch_params.input_data_path;
    let read_timer = SystemTime::now();

    let mut collections = NetworkCollections::default();
    read_stations(&dir.join("stations.csv"), &mut collections)?;
    read_lines(&dir.join("lines.csv"), &mut collections)?;
    read_sections(&dir.join("sections.csv"), &mut collections)?;
    read_transfers(&dir.join("transfers.csv"), &mut collections)?;

    let congestion_filepath = dir.join("congestion.csv");
    if congestion_filepath.is_file() {
        read_congestion(&congestion_filepath, &mut collections)?;
    } else {
        warn!(
            "No congestion file at {:?}. I'll use the default congestion everywhere.",
            congestion_filepath
        );
    }

    info!(
        "Network collections read : {} stations, {} ordered entries, {} transfers, {} congestion tables",
        collections.stations.len(),
        collections.station_order.len(),
        collections.transfers.len(),
        collections.congestion.len(),
    );

    let data = SubwayData::new(&collections);
    let facilities = FacilityScoreService::new(data.nb_of_stops());

    let facilities_filepath = dir.join("facilities.csv");
    if facilities_filepath.is_file() {
        let updates = read_facilities(&facilities_filepath)?;
        info!("Applying {} facility rows", updates.len());
        facilities.update(&updates, &data);
    } else {
        warn!(
            "No facility file at {:?}. Convenience scores stay at zero until an update.",
            facilities_filepath
        );
    }

    let read_duration = read_timer.elapsed().unwrap_or_default().as_millis();
    info!(
        "Subway data constructed in {} ms : {} stations on {} lines",
        read_duration,
        data.nb_of_stops(),
        data.nb_of_lines()
    );

    Ok((data, facilities))
}

fn reader(filepath: &Path) -> Result<csv::Reader<std::fs::File>, Error> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_path(filepath)
        .with_context(|| format!("Unable to open {:?}", filepath))
}

// station_cd;name;line;lat;lon
fn read_stations(filepath: &Path, collections: &mut NetworkCollections) -> Result<(), Error> {
    let mut reader = reader(filepath)?;
    let mut record = csv::StringRecord::new();
    while reader
        .read_record(&mut record)
        .with_context(|| format!("Error reading {:?}", filepath))?
    {
        let parsed = parse_station_record(&record);
        match parsed {
            Ok((code, station)) => {
                collections.stations.insert(code, station);
            }
            Err(parse_error) => debug!(
                "Error reading {:?} at line {} : {}. I'll skip this line.",
                filepath,
                reader.position().line(),
                parse_error
            ),
        }
    }
    Ok(())
}

fn parse_station_record(
    record: &csv::StringRecord,
) -> Result<(String, StationRecord), Box<dyn std::error::Error>> {
    if record.len() != 5 {
        return Err(From::from(format!(
            "Expected 5 fields, but got {}",
            record.len()
        )));
    }
    let lat: f64 = record[3].parse()?;
    let lon: f64 = record[4].parse()?;
    Ok((
        record[0].to_string(),
        StationRecord {
            name: record[1].to_string(),
            line: record[2].to_string(),
            lat,
            lon,
        },
    ))
}

// line;circular
fn read_lines(filepath: &Path, collections: &mut NetworkCollections) -> Result<(), Error> {
    let mut reader = reader(filepath)?;
    let mut record = csv::StringRecord::new();
    while reader
        .read_record(&mut record)
        .with_context(|| format!("Error reading {:?}", filepath))?
    {
        if record.len() != 2 {
            debug!(
                "Error reading {:?} at line {} : expected 2 fields, but got {}. I'll skip this line.",
                filepath,
                reader.position().line(),
                record.len()
            );
            continue;
        }
        if &record[1] == "1" {
            collections.circular_lines.insert(record[0].to_string());
        }
    }
    Ok(())
}

// line;station_cd;station_order
fn read_sections(filepath: &Path, collections: &mut NetworkCollections) -> Result<(), Error> {
    let mut reader = reader(filepath)?;
    let mut record = csv::StringRecord::new();
    let mut ordered_lines: BTreeMap<String, Vec<(u32, String)>> = BTreeMap::new();
    while reader
        .read_record(&mut record)
        .with_context(|| format!("Error reading {:?}", filepath))?
    {
        let parsed = parse_section_record(&record);
        match parsed {
            Ok((line, code, order)) => {
                collections
                    .station_order
                    .insert((code.clone(), line.clone()), order);
                ordered_lines.entry(line).or_default().push((order, code));
            }
            Err(parse_error) => debug!(
                "Error reading {:?} at line {} : {}. I'll skip this line.",
                filepath,
                reader.position().line(),
                parse_error
            ),
        }
    }

    // the per-direction adjacency is the order walk : ascending codes are
    // reachable riding up/in, descending ones riding down/out
    for (line, mut stations) in ordered_lines {
        stations.sort();
        let codes: Vec<String> = stations.into_iter().map(|(_, code)| code).collect();
        for (position, code) in codes.iter().enumerate() {
            let up = codes[position + 1..].to_vec();
            let down = codes[..position].iter().rev().cloned().collect();
            collections
                .line_stations
                .insert((code.clone(), line.clone()), LineStationsRecord { up, down });
        }
    }
    Ok(())
}

fn parse_section_record(
    record: &csv::StringRecord,
) -> Result<(String, String, u32), Box<dyn std::error::Error>> {
    if record.len() != 3 {
        return Err(From::from(format!(
            "Expected 3 fields, but got {}",
            record.len()
        )));
    }
    let order: u32 = record[2].parse()?;
    Ok((record[0].to_string(), record[1].to_string(), order))
}

// station_cd;from_line;to_line;distance
fn read_transfers(filepath: &Path, collections: &mut NetworkCollections) -> Result<(), Error> {
    let mut reader = reader(filepath)?;
    let mut record = csv::StringRecord::new();
    while reader
        .read_record(&mut record)
        .with_context(|| format!("Error reading {:?}", filepath))?
    {
        let parsed = parse_transfer_record(&record);
        match parsed {
            Ok((key, transfer)) => {
                collections.transfers.insert(key, transfer);
            }
            Err(parse_error) => debug!(
                "Error reading {:?} at line {} : {}. I'll skip this line.",
                filepath,
                reader.position().line(),
                parse_error
            ),
        }
    }
    Ok(())
}

fn parse_transfer_record(
    record: &csv::StringRecord,
) -> Result<((String, String, String), TransferRecord), Box<dyn std::error::Error>> {
    if record.len() != 4 {
        return Err(From::from(format!(
            "Expected 4 fields, but got {}",
            record.len()
        )));
    }
    let distance_m: f64 = record[3].parse()?;
    if !distance_m.is_finite() || distance_m < 0.0 {
        return Err(From::from(format!(
            "The fourth field {} is not a valid distance.",
            &record[3]
        )));
    }
    Ok((
        (
            record[0].to_string(),
            record[1].to_string(),
            record[2].to_string(),
        ),
        TransferRecord { distance_m },
    ))
}

// station_cd;line;direction;day_class;t_0;t_30;...;t_1410
fn read_congestion(filepath: &Path, collections: &mut NetworkCollections) -> Result<(), Error> {
    let mut reader = reader(filepath)?;
    let headers = reader
        .headers()
        .with_context(|| format!("Error reading the header of {:?}", filepath))?
        .clone();
    let bucket_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| name.starts_with("t_"))
        .map(|(column, name)| (column, name.to_string()))
        .collect();

    let mut record = csv::StringRecord::new();
    while reader
        .read_record(&mut record)
        .with_context(|| format!("Error reading {:?}", filepath))?
    {
        if record.len() < 4 {
            debug!(
                "Error reading {:?} at line {} : expected at least 4 fields, but got {}. I'll skip this line.",
                filepath,
                reader.position().line(),
                record.len()
            );
            continue;
        }
        let key = (
            record[0].to_string(),
            record[1].to_string(),
            record[2].to_string(),
            record[3].to_string(),
        );
        let mut buckets = BTreeMap::new();
        for (column, name) in &bucket_columns {
            let field = match record.get(*column) {
                Some(field) => field,
                None => continue,
            };
            match field.parse::<f64>() {
                Ok(ratio) if ratio.is_finite() && ratio >= 0.0 => {
                    buckets.insert(name.clone(), ratio);
                }
                _ => debug!(
                    "Bad congestion ratio '{}' in {:?} at line {}. I'll skip this bucket.",
                    field,
                    filepath,
                    reader.position().line()
                ),
            }
        }
        collections.congestion.insert(key, buckets);
    }
    Ok(())
}

// station_cd_list;charger;elevator;escalator;lift;movingwalk;safe_platform;sign_phone;toilet;helper
// the station_cd_list field holds comma separated codes
pub fn read_facilities(filepath: &Path) -> Result<Vec<FacilityUpdate>, Error> {
    let mut reader = reader(filepath)?;
    let mut updates = Vec::new();
    let mut record = csv::StringRecord::new();
    while reader
        .read_record(&mut record)
        .with_context(|| format!("Error reading {:?}", filepath))?
    {
        let parsed = parse_facility_record(&record);
        match parsed {
            Ok(update) => updates.push(update),
            Err(parse_error) => debug!(
                "Error reading {:?} at line {} : {}. I'll skip this line.",
                filepath,
                reader.position().line(),
                parse_error
            ),
        }
    }
    Ok(updates)
}

fn parse_facility_record(
    record: &csv::StringRecord,
) -> Result<FacilityUpdate, Box<dyn std::error::Error>> {
    if record.len() != 10 {
        return Err(From::from(format!(
            "Expected 10 fields, but got {}",
            record.len()
        )));
    }
    let station_codes: Vec<String> = record[0]
        .split(',')
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .collect();
    let mut counters = [0.0_f64; 9];
    for (slot, counter) in counters.iter_mut().enumerate() {
        *counter = record[slot + 1].parse()?;
    }
    Ok(FacilityUpdate {
        station_codes,
        counts: FacilityCounts {
            charger: counters[0],
            elevator: counters[1],
            escalator: counters[2],
            lift: counters[3],
            moving_walk: counters[4],
            safe_platform: counters[5],
            sign_phone: counters[6],
            toilet: counters[7],
            helper: counters[8],
        },
    })
}
