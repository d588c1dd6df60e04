//! Static gravity well configuration.
//!
//! The map is a single black hole orbited by three planets. Each well is a set
//! of concentric rings; rings further out have more sectors and drift more
//! slowly. Wells are linked by fixed transfer points on their outermost rings.
//! None of this data is part of the mutable game state.

use crate::{Position, WellId};

/// Identifier of the central black hole.
pub const BLACK_HOLE: WellId = WellId::new(0);
/// Identifier of the first planet.
pub const ALPHA: WellId = WellId::new(1);
/// Identifier of the second planet.
pub const BETA: WellId = WellId::new(2);
/// Identifier of the third planet.
pub const GAMMA: WellId = WellId::new(3);

/// Ring around each planet that hosts the planet's trade station.
pub const STATION_RING: u32 = 2;

/// Describes the geometry of a single ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingConfig {
    /// One-based ring index.
    pub ring: u32,
    /// Number of discrete sectors around the ring.
    pub sectors: u32,
    /// Sectors advanced per turn by orbital drift.
    pub velocity: u32,
}

/// Kinds of gravity wells present on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WellKind {
    /// The central black hole where ships deploy and respawn.
    BlackHole,
    /// A planet hosting a trade station.
    Planet,
}

/// Static description of a gravity well.
#[derive(Debug)]
pub struct GravityWell {
    /// Identifier of the well.
    pub id: WellId,
    /// Display name of the well.
    pub name: &'static str,
    /// Whether the well is the black hole or a planet.
    pub kind: WellKind,
    /// Rings ordered from innermost to outermost.
    pub rings: &'static [RingConfig],
}

impl GravityWell {
    /// Returns the configuration of the requested ring, if it exists.
    #[must_use]
    pub fn ring(&self, ring: u32) -> Option<&'static RingConfig> {
        self.rings.iter().find(|config| config.ring == ring)
    }

    /// Index of the outermost ring of the well.
    #[must_use]
    pub fn outermost_ring(&self) -> u32 {
        self.rings.iter().map(|config| config.ring).max().unwrap_or(0)
    }
}

/// Fixed coordinate pair linking two wells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferPoint {
    /// Coordinate a ship must occupy to depart.
    pub from: Position,
    /// Coordinate the ship arrives at in the destination well.
    pub to: Position,
}

static BLACK_HOLE_RINGS: [RingConfig; 4] = [
    RingConfig {
        ring: 1,
        sectors: 6,
        velocity: 3,
    },
    RingConfig {
        ring: 2,
        sectors: 12,
        velocity: 3,
    },
    RingConfig {
        ring: 3,
        sectors: 18,
        velocity: 2,
    },
    RingConfig {
        ring: 4,
        sectors: 24,
        velocity: 1,
    },
];

static PLANET_RINGS: [RingConfig; 3] = [
    RingConfig {
        ring: 1,
        sectors: 6,
        velocity: 2,
    },
    RingConfig {
        ring: 2,
        sectors: 12,
        velocity: 1,
    },
    RingConfig {
        ring: 3,
        sectors: 18,
        velocity: 1,
    },
];

/// Every gravity well on the map.
pub static WELLS: [GravityWell; 4] = [
    GravityWell {
        id: BLACK_HOLE,
        name: "black hole",
        kind: WellKind::BlackHole,
        rings: &BLACK_HOLE_RINGS,
    },
    GravityWell {
        id: ALPHA,
        name: "alpha",
        kind: WellKind::Planet,
        rings: &PLANET_RINGS,
    },
    GravityWell {
        id: BETA,
        name: "beta",
        kind: WellKind::Planet,
        rings: &PLANET_RINGS,
    },
    GravityWell {
        id: GAMMA,
        name: "gamma",
        kind: WellKind::Planet,
        rings: &PLANET_RINGS,
    },
];

/// Precomputed transfer points, one per ordered well pair.
pub static TRANSFER_POINTS: [TransferPoint; 6] = [
    TransferPoint {
        from: Position::new(BLACK_HOLE, 4, 0),
        to: Position::new(ALPHA, 3, 0),
    },
    TransferPoint {
        from: Position::new(ALPHA, 3, 0),
        to: Position::new(BLACK_HOLE, 4, 0),
    },
    TransferPoint {
        from: Position::new(BLACK_HOLE, 4, 8),
        to: Position::new(BETA, 3, 0),
    },
    TransferPoint {
        from: Position::new(BETA, 3, 0),
        to: Position::new(BLACK_HOLE, 4, 8),
    },
    TransferPoint {
        from: Position::new(BLACK_HOLE, 4, 16),
        to: Position::new(GAMMA, 3, 0),
    },
    TransferPoint {
        from: Position::new(GAMMA, 3, 0),
        to: Position::new(BLACK_HOLE, 4, 16),
    },
];

/// Looks up a gravity well by identifier.
#[must_use]
pub fn well(id: WellId) -> Option<&'static GravityWell> {
    WELLS.iter().find(|well| well.id == id)
}

/// Looks up the ring configuration for a well/ring pair.
#[must_use]
pub fn ring(well_id: WellId, ring: u32) -> Option<&'static RingConfig> {
    well(well_id).and_then(|well| well.ring(ring))
}

/// Iterates over every planet in map order.
pub fn planets() -> impl Iterator<Item = &'static GravityWell> {
    WELLS
        .iter()
        .filter(|well| well.kind == WellKind::Planet)
}

/// Identifiers of every planet in map order.
#[must_use]
pub fn planet_ids() -> Vec<WellId> {
    planets().map(|well| well.id).collect()
}

/// Returns the transfer point connecting `from` to `to`, if the wells are linked.
#[must_use]
pub fn transfer_point(from: WellId, to: WellId) -> Option<&'static TransferPoint> {
    TRANSFER_POINTS
        .iter()
        .find(|point| point.from.well == from && point.to.well == to)
}
