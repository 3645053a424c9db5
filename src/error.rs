//! Error types for model construction and engine misuse.

use thiserror::Error;

/// Reasons a routing request is rejected before any search takes place.
///
/// These are never retried: the caller has to fix the input. An infeasible
/// search is not an error, see [`crate::engine::SearchOutcome::Infeasible`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// No locations were supplied, so there is not even a depot.
    #[error("at least one location (the depot) is required")]
    NoLocations,
    /// A coordinate is not finite or outside the valid latitude/longitude range.
    #[error("location {index} has an invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { index: usize, lat: f64, lon: f64 },
    /// A precomputed matrix is not square.
    #[error("distance matrix row {row} has {found} entries, expected {expected}")]
    MatrixNotSquare {
        row: usize,
        found: usize,
        expected: usize,
    },
    /// A precomputed matrix has a negative entry or a non-zero diagonal.
    #[error("distance matrix entry ({from}, {to}) = {value} is not allowed")]
    InvalidMatrixEntry { from: usize, to: usize, value: i64 },
    /// A precomputed matrix is not symmetric.
    #[error("distance matrix is not symmetric at ({from}, {to})")]
    AsymmetricMatrix { from: usize, to: usize },
    /// The demand vector does not cover every node.
    #[error("expected {expected} demands (one per location), got {found}")]
    DemandCountMismatch { expected: usize, found: usize },
    /// Stored coordinates do not cover every node.
    #[error("expected {expected} locations (one per node), got {found}")]
    LocationCountMismatch { expected: usize, found: usize },
    /// Vehicle ids and capacities disagree in length.
    #[error("expected {expected} vehicle ids (one per capacity), got {found}")]
    VehicleCountMismatch { expected: usize, found: usize },
    /// The fleet is empty.
    #[error("at least one vehicle is required")]
    NoVehicles,
    /// A customer demand is negative.
    #[error("demand of node {node} is negative ({demand})")]
    NegativeDemand { node: usize, demand: i64 },
    /// The depot must not carry demand.
    #[error("depot demand must be 0, got {0}")]
    DepotDemand(i64),
    /// A vehicle capacity is zero or negative.
    #[error("capacity of vehicle {vehicle} must be positive, got {capacity}")]
    NonPositiveCapacity { vehicle: String, capacity: i64 },
    /// Two vehicles share the same identifier.
    #[error("vehicle id {0:?} is used more than once")]
    DuplicateVehicleId(String),
    /// Summed demands, capacities or route distances do not fit in an `i64`.
    #[error("total {0} exceeds the supported integer range")]
    QuantityOverflow(&'static str),
    /// The requested variant is listed but not implemented.
    #[error("routing variant {0:?} is not supported")]
    UnsupportedVariant(String),
    /// The successor chain of a vehicle does not reach its end token.
    #[error("assignment does not form a route for vehicle {0}")]
    BrokenRoute(usize),
    /// The engine was driven out of order (e.g. solved before configuration).
    #[error("routing engine is {actual}, expected {expected}")]
    EngineState {
        expected: &'static str,
        actual: &'static str,
    },
}
