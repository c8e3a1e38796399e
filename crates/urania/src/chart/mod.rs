pub mod error;
pub mod houses;
pub mod resolver;
pub mod time;
pub mod types;
pub mod wire;

pub use error::ResolutionError;
pub use houses::{ascendant_longitude, equal_houses};
pub use resolver::{parse_place, resolve_with_fallback, PositionResolver};
pub use time::to_instant;
pub use types::{BirthContext, ChartPositions, HouseCusp, PositionSource};
pub use wire::{WireAspect, WireChart, WireHouse, WirePosition};
