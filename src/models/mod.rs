pub mod page;
pub mod parking_spot;

pub use page::{Page, PageParams, PageRequest, Sort, SortDirection, SortField};
pub use parking_spot::{ParkingSpot, ParkingSpotDto};
