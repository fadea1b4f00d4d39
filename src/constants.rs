pub const API_NAME: &str = "[parking-control-api]";

pub const NOT_FOUND_MESSAGE: &str = "Parking Spot not found";
pub const DELETED_MESSAGE: &str = "Parking Spot deleted successfully";

pub const DEFAULT_PAGE: u64 = 0;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 2000;
