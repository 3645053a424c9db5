//! Great-circle distance matrix construction.

use crate::error::InvalidInputError;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A geographic location in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// Create a new location.
    pub fn new(lat: f64, lon: f64) -> Self {
        Location { lat, lon }
    }

    /// Check that both coordinates are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Calculate the great-circle distance to another location in kilometres.
    pub fn distance_km(&self, other: &Location) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        // Rounding can push near-antipodal points just above 1
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lon): (f64, f64)) -> Self {
        Location::new(lat, lon)
    }
}

/// A square, symmetric matrix of whole-kilometre travel costs.
///
/// Deserialization goes through [`DistanceMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDistanceMatrix")]
pub struct DistanceMatrix {
    rows: Vec<Vec<i64>>,
}

/// Unchecked wire form of a [`DistanceMatrix`].
#[derive(Deserialize)]
struct RawDistanceMatrix {
    rows: Vec<Vec<i64>>,
}

impl TryFrom<RawDistanceMatrix> for DistanceMatrix {
    type Error = InvalidInputError;

    fn try_from(raw: RawDistanceMatrix) -> Result<Self, Self::Error> {
        DistanceMatrix::from_rows(raw.rows)
    }
}

impl DistanceMatrix {
    /// Wrap a precomputed matrix, checking the invariants the engine relies on.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, InvalidInputError> {
        let n = rows.len();
        if n == 0 {
            return Err(InvalidInputError::NoLocations);
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(InvalidInputError::MatrixNotSquare {
                    row: i,
                    found: row.len(),
                    expected: n,
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if value < 0 || (i == j && value != 0) {
                    return Err(InvalidInputError::InvalidMatrixEntry {
                        from: i,
                        to: j,
                        value,
                    });
                }
            }
        }

        for i in 0..n {
            for j in i + 1..n {
                if rows[i][j] != rows[j][i] {
                    return Err(InvalidInputError::AsymmetricMatrix { from: i, to: j });
                }
            }
        }

        Ok(DistanceMatrix { rows })
    }

    /// Number of nodes covered by the matrix.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Distance from one node to another.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.rows[from][to]
    }

    /// Borrow the raw rows.
    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Largest entry of the matrix.
    pub fn max_entry(&self) -> i64 {
        self.rows.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Build the N×N great-circle distance matrix for the given locations.
///
/// Entries are rounded to the nearest kilometre. Only the upper triangle is
/// computed; the lower one is mirrored so the result is symmetric by
/// construction.
pub fn build_distance_matrix(locations: &[Location]) -> Result<DistanceMatrix, InvalidInputError> {
    if locations.is_empty() {
        return Err(InvalidInputError::NoLocations);
    }

    if let Some((index, location)) = locations.iter().enumerate().find(|(_, l)| !l.is_valid()) {
        return Err(InvalidInputError::InvalidCoordinate {
            index,
            lat: location.lat,
            lon: location.lon,
        });
    }

    let n = locations.len();
    let mut rows = vec![vec![0; n]; n];

    for i in 0..n {
        for j in i + 1..n {
            let distance = locations[i].distance_km(&locations[j]).round() as i64;
            rows[i][j] = distance;
            rows[j][i] = distance;
        }
    }

    Ok(DistanceMatrix { rows })
}
