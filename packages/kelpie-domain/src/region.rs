use serde::{Deserialize, Serialize};

/// Administrative region a council (and its suburbs) belongs to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
	MetroNorth,
	MetroSouth,
	MetroEast,
	MetroWest,
	Regional,
}
impl Region {
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"metro_north" => Some(Self::MetroNorth),
			"metro_south" => Some(Self::MetroSouth),
			"metro_east" => Some(Self::MetroEast),
			"metro_west" => Some(Self::MetroWest),
			"regional" => Some(Self::Regional),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::MetroNorth => "metro_north",
			Self::MetroSouth => "metro_south",
			Self::MetroEast => "metro_east",
			Self::MetroWest => "metro_west",
			Self::Regional => "regional",
		}
	}
}
