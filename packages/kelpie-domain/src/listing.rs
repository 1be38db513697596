use serde::{Deserialize, Serialize};

/// Kind of listing a business represents.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
	Trainer,
	BehaviourConsultant,
	EmergencyService,
}
impl ResourceType {
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"trainer" => Some(Self::Trainer),
			"behaviour_consultant" => Some(Self::BehaviourConsultant),
			"emergency_service" => Some(Self::EmergencyService),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Trainer => "trainer",
			Self::BehaviourConsultant => "behaviour_consultant",
			Self::EmergencyService => "emergency_service",
		}
	}
}

/// Subscription tier affecting default ranking priority.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
	Basic,
	Pro,
}
impl Tier {
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"basic" => Some(Self::Basic),
			"pro" => Some(Self::Pro),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Basic => "basic",
			Self::Pro => "pro",
		}
	}
}

/// Lifecycle of a paid featured placement. Only `Active` placements with an
/// unexpired window grant search priority.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStatus {
	Queued,
	Active,
	Expired,
	Cancelled,
}
impl PlacementStatus {
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"queued" => Some(Self::Queued),
			"active" => Some(Self::Active),
			"expired" => Some(Self::Expired),
			"cancelled" => Some(Self::Cancelled),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Queued => "queued",
			Self::Active => "active",
			Self::Expired => "expired",
			Self::Cancelled => "cancelled",
		}
	}
}
