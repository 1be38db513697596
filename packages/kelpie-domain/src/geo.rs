const EARTH_RADIUS_KM: f64 = 6_371.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
	pub latitude: f64,
	pub longitude: f64,
}

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
	let lat_a = a.latitude.to_radians();
	let lat_b = b.latitude.to_radians();
	let d_lat = (b.latitude - a.latitude).to_radians();
	let d_lon = (b.longitude - a.longitude).to_radians();
	let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

	2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Inclusive radius check.
pub fn within_radius(origin: Coordinates, candidate: Coordinates, radius_km: f64) -> bool {
	haversine_km(origin, candidate) <= radius_km
}
