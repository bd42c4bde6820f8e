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


pub const NB_OF_PROFILES: usize = 4;

/// A rider accessibility profile.
///
/// The profile drives the criteria weighting, the walking speed used for
/// interchanges, and the epsilon of the similarity pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Wheelchair user
    Phy,
    /// Visually impaired
    Vis,
    /// Hearing impaired
    Aud,
    /// Elderly
    Eld,
}

pub const ALL_PROFILES: [Profile; NB_OF_PROFILES] =
    [Profile::Phy, Profile::Vis, Profile::Aud, Profile::Eld];

/// Weights of the five ranking criteria, in fixed order :
/// travel time, transfers, transfer difficulty, convenience, congestion.
///
/// Each vector sums to ~1. A zero weight removes the criterion from
/// dominance checks as well as from the final score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriteriaWeights {
    pub travel_time: f64,
    pub transfers: f64,
    pub transfer_difficulty: f64,
    pub convenience: f64,
    pub congestion: f64,
}

const PHY_WEIGHTS: CriteriaWeights = CriteriaWeights {
    travel_time: 0.0543,
    transfers: 0.4826,
    transfer_difficulty: 0.2391,
    convenience: 0.1196,
    congestion: 0.1044,
};

const VIS_WEIGHTS: CriteriaWeights = CriteriaWeights {
    travel_time: 0.0623,
    transfers: 0.1198,
    transfer_difficulty: 0.2043,
    convenience: 0.4938,
    congestion: 0.1198,
};

const AUD_WEIGHTS: CriteriaWeights = CriteriaWeights {
    travel_time: 0.1519,
    transfers: 0.2938,
    transfer_difficulty: 0.0823,
    convenience: 0.3897,
    congestion: 0.0823,
};

const ELD_WEIGHTS: CriteriaWeights = CriteriaWeights {
    travel_time: 0.0739,
    transfers: 0.1304,
    transfer_difficulty: 0.2174,
    convenience: 0.0609,
    congestion: 0.5174,
};

impl Profile {
    pub fn idx(self) -> usize {
        match self {
            Profile::Phy => 0,
            Profile::Vis => 1,
            Profile::Aud => 2,
            Profile::Eld => 3,
        }
    }

    pub fn criteria_weights(self) -> &'static CriteriaWeights {
        match self {
            Profile::Phy => &PHY_WEIGHTS,
            Profile::Vis => &VIS_WEIGHTS,
            Profile::Aud => &AUD_WEIGHTS,
            Profile::Eld => &ELD_WEIGHTS,
        }
    }

    pub fn walking_speed_m_per_s(self) -> f64 {
        match self {
            Profile::Phy => 0.50,
            Profile::Vis => 0.80,
            Profile::Aud => 0.98,
            Profile::Eld => 0.70,
        }
    }

    /// Radius of the similarity pruning in normalized criteria space.
    pub fn epsilon(self) -> f64 {
        match self {
            Profile::Phy => 0.06,
            Profile::Vis => 0.08,
            Profile::Aud => 0.10,
            Profile::Eld => 0.08,
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Phy => write!(f, "PHY"),
            Profile::Vis => write!(f, "VIS"),
            Profile::Aud => write!(f, "AUD"),
            Profile::Eld => write!(f, "ELD"),
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = BadProfile;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PHY" => Ok(Profile::Phy),
            "VIS" => Ok(Profile::Vis),
            "AUD" => Ok(Profile::Aud),
            "ELD" => Ok(Profile::Eld),
            _ => Err(BadProfile {
                profile_name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug)]
pub struct BadProfile {
    pub profile_name: String,
}

impl std::fmt::Display for BadProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bad profile '{}'. Expected one of PHY/VIS/AUD/ELD.",
            self.profile_name
        )
    }
}

impl std::error::Error for BadProfile {}

/// Difficulty of one interchange, in [0, 1].
///
/// 60% of the difficulty comes from the walking distance (300m and above is
/// the worst case), 40% from the inconvenience of the stations crossed so
/// far, where the inconvenience decays with the accumulated convenience.
pub fn transfer_difficulty(distance_m: f64, convenience_sum: f64) -> f64 {
    let distance_score = (distance_m / 300.0).min(1.0);
    let inconvenience = if convenience_sum > 0.01 {
        1.0 / (1.0 + convenience_sum)
    } else {
        1.0
    };
    (0.6 * distance_score + 0.4 * inconvenience).min(1.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_about_one() {
        for profile in &ALL_PROFILES {
            let w = profile.criteria_weights();
            let sum =
                w.travel_time + w.transfers + w.transfer_difficulty + w.convenience + w.congestion;
            assert!((sum - 1.0).abs() < 0.01, "{} sums to {}", profile, sum);
        }
    }

    #[test]
    fn difficulty_without_any_convenience_is_full_inconvenience() {
        // 150m of walking, nothing convenient on the way
        let difficulty = transfer_difficulty(150.0, 0.0);
        assert!((difficulty - (0.6 * 0.5 + 0.4)).abs() < 1e-9);
    }

    #[test]
    fn difficulty_decays_with_accumulated_convenience() {
        let hard = transfer_difficulty(150.0, 0.0);
        let easier = transfer_difficulty(150.0, 1.0);
        assert!(easier < hard);
        assert!((easier - (0.6 * 0.5 + 0.4 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn difficulty_saturates_at_300m() {
        assert!((transfer_difficulty(300.0, 0.0) - 1.0).abs() < 1e-9);
        assert!((transfer_difficulty(1_000.0, 0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn profile_tags_round_trip() {
        for profile in &ALL_PROFILES {
            let parsed: Profile = profile.to_string().parse().unwrap();
            assert_eq!(parsed, *profile);
        }
        assert!("XYZ".parse::<Profile>().is_err());
    }
}
