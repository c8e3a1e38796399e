pub mod mapper;
pub mod types;

pub use mapper::{normalize_longitude, ZodiacMapper};
pub use types::{Sign, UnknownSign, ZodiacPosition};

lazy_static::lazy_static! {
    static ref SHARED_MAPPER: ZodiacMapper = ZodiacMapper::new();
}

/// Map a longitude through the process-wide memoizing mapper.
pub fn position_of(longitude: f64) -> ZodiacPosition {
    SHARED_MAPPER.map(longitude)
}
