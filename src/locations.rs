use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub name: &'static str,
    pub full_address: &'static str,
    pub search_value: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn loc(
    name: &'static str,
    full_address: &'static str,
    search_value: &'static str,
    latitude: f64,
    longitude: f64,
) -> Location {
    Location {
        name,
        full_address,
        search_value,
        latitude,
        longitude,
    }
}

/// Pickup points offered by the location autocomplete.
pub static LOCATIONS: &[Location] = &[
    loc("Las Vegas Airport - Gilespie St", "7135 Gilespie St, Las Vegas, NV 89119", "gilespie street", 36.060839, -115.16357),
    loc("Las Vegas Downtown", "1 South Main Street, Las Vegas, NV", "main street", 36.171666, -115.46944),
    loc("Henderson - Horizon Ridge", "1450 W Horizon Ridge Pkwy Suite A502, Henderson, NV", "horizon ridge", 36.023055, -115.049166),
    loc("Las Vegas - Sahara Ave East", "1815 E Sahara Avenue, Las Vegas, NV", "sahara avenue", 36.143854, -115.127095),
    loc("Las Vegas - Rainbow Blvd", "2219 South Rainbow Boulevard, Las Vegas, NV", "rainbow boulevard", 36.146944, -115.243055),
    loc("Las Vegas Strip - 2777 S", "2777 South Las Vegas Blvd, Las Vegas, NV", "2777 south las vegas", 36.13739, -115.15944),
    loc("Circus Circus Hotel", "2880 South Las Vegas Boulevard, Circus Circus, Las Vegas, NV", "circus", 36.1375, -115.166388),
    loc("Las Vegas Strip - 3131 S", "3131 Las Vegas Blvd S, Las Vegas, NV", "3131", 36.127204, -115.168021),
    loc("Hughes Center", "325 Hughes Center Drive, Las Vegas, NV", "hughes center", 36.11537, -115.15862),
    loc("Las Vegas Strip - 3300 S", "3300 Las Vegas Blvd S, Las Vegas, NV", "3300", 36.1229, -115.1712),
    loc("Las Vegas Strip - 3355 S", "3355 S Las Vegas Blvd, Las Vegas, NV", "3355", 36.12269, -115.170194),
    loc("Bellagio Resort", "3600 South Las Vegas Boulevard, Bellagio Resort, Las Vegas, NV", "bellagio", 36.111944, -115.175833),
    loc("MGM Grand Resort", "3799 South Las Vegas Boulevard, MGM Resort, Las Vegas, NV", "mgm", 36.102428, -115.170021),
    loc("Excalibur Hotel", "3850 South Las Vegas Boulevard, Excalibur Hotel, Las Vegas, NV", "excalibur", 36.098888, -115.174444),
    loc("Luxor Hotel", "3900 South Las Vegas Boulevard, Luxor Hotel, Las Vegas, NV", "luxor", 36.095563, -115.175836),
    loc("Mandalay Bay Resort", "3950 South Las Vegas Boulevard, Mandalay Bay Resort, Las Vegas, NV", "mandalay", 36.092222, -115.174166),
    loc("University Center", "4775 University Center Drive, Las Vegas, NV", "swenson street", 36.103552, -115.151663),
    loc("Las Vegas - Sahara Ave West", "5905 W Sahara Ave Unit A, Las Vegas, NV", "sahara", 36.142643, -115.222321),
    loc("Fremont Experience", "8 Fremont Experience St, Las Vegas, NV", "fremont experience", 36.172465, -115.145698),
    loc("South Las Vegas - 8755", "8755 Las Vegas Blvd S, Las Vegas, NV", "8755", 36.030944, -115.176956),
    loc("South Las Vegas - 8801", "8801 South Las Vegas Blvd, Las Vegas, NV", "8801 south las vegas", 36.029002, -115.174099),
];

/// Autocomplete suggestions for a pickup or dropoff input.
///
/// Blank input lists every location; otherwise name and address are matched
/// case-insensitively, keeping list order.
pub fn suggest(input: &str) -> Vec<&'static Location> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return LOCATIONS.iter().collect();
    }
    LOCATIONS
        .iter()
        .filter(|loc| {
            loc.name.to_lowercase().contains(&needle)
                || loc.full_address.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn find_exact(name: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|loc| loc.name.eq_ignore_ascii_case(name.trim()))
}
