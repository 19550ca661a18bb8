//! Real Las Vegas / Henderson places for pickup and drop-off fixtures.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API.

use route_planner::models::Location;

/// A directory entry with static data.
#[derive(Debug, Clone, Copy)]
pub struct Place {
    pub id: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(id: &'static str, name: &'static str, address: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            id,
            name,
            address,
            lat,
            lng,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.id, self.name, self.address, self.lat, self.lng)
    }
}

// ============================================================================
// Hotels (typical pickups)
// ============================================================================

pub const HOTELS: &[Place] = &[
    Place::new("wynn", "Wynn Las Vegas", "3131 S Las Vegas Blvd", 36.1263781, -115.1658180),
    Place::new("mgm", "MGM Grand", "3799 S Las Vegas Blvd", 36.1023654, -115.1688720),
    Place::new("bellagio", "Bellagio", "3600 S Las Vegas Blvd", 36.1126, -115.1767),
    Place::new("caesars", "Caesars Palace", "3570 S Las Vegas Blvd", 36.1162, -115.1745),
];

// ============================================================================
// Drop-offs
// ============================================================================

pub const DESTINATIONS: &[Place] = &[
    Place::new("airport", "Harry Reid International Airport", "5757 Wayne Newton Blvd", 36.0840, -115.1537),
    Place::new("fremont", "Fremont Street Experience", "E Fremont St", 36.1707, -115.1437),
    Place::new("galleria", "Galleria at Sunset", "1300 W Sunset Rd, Henderson", 36.0722, -115.0453),
    Place::new("arts", "Arts District", "1025 S 1st St", 36.1587, -115.1530),
];

pub fn hotel(index: usize) -> Location {
    HOTELS[index].location()
}

pub fn destination(index: usize) -> Location {
    DESTINATIONS[index].location()
}

pub fn directory() -> Vec<Location> {
    HOTELS.iter().chain(DESTINATIONS).map(Place::location).collect()
}
