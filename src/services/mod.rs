// Service exports
pub mod catalog;
pub mod location;

pub use catalog::{Catalog, CatalogError, RawHospital};
pub use location::{
    FixedPosition, HostPositionError, IpGeolocation, LocationError, LocationProvider, PositionOptions, PositionSource,
};
