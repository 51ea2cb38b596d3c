pub mod audit;
pub mod grid;
pub mod id;
pub mod layout;
pub mod model;
pub mod symmetry;

pub use audit::{AuditDiagnostic, AuditSeverity, audit_map};
pub use grid::{edge_weight, snap};
pub use id::{EntityId, EntityRef, IdGenerator};
pub use layout::{DEFAULT_GRID_SIZE, MapLayout, Symmetry};
pub use model::*;
pub use symmetry::{DeletionSet, Mirror, Placement, PlacementError};

// Re-export kurbo geometry so downstream crates share one Point type.
pub use kurbo::{Point, Vec2};
