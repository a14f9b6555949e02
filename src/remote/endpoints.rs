pub const REGIONS_PRIMARY: &str = "/regioner";
pub const REGIONS_FALLBACK: &str = "/region";
pub const CREATE_REGION: &str = "/region";
pub const CREATE_MUNICIPALITY: &str = "/kommune";
