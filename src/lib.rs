pub mod catalog;
pub mod map;
pub mod repository;
pub mod routing;
pub mod schedule;
pub mod score;
pub mod shared;

pub mod prelude {
    pub use crate::catalog::Catalog;
    pub use crate::map::{
        CommuteReport, ExplorerQuery, MapData, MapPin, MapRoute, assemble, explorer_map,
    };
    pub use crate::repository::Repository;
    pub use crate::routing::{
        GeocodedAddress, RoutingResponse, TransportMode, normalize,
    };
    pub use crate::score::{CommuteScore, commute_score, overall_score};
    pub use crate::shared::geo::{Coordinate, Distance, Position, Units};
}
