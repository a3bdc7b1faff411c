//! Partner model and its admin list wiring.
//!
//! Partners carry a sponsorship tier; the default admin ordering is tier
//! rank, ties broken alphabetically by name.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{ControlValue, ListSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerTier {
    Platinum,
    Gold,
    Silver,
    Community,
}

impl PartnerTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerTier::Platinum => "platinum",
            PartnerTier::Gold => "gold",
            PartnerTier::Silver => "silver",
            PartnerTier::Community => "community",
        }
    }

    /// Display rank, highest tier first.
    pub fn rank(&self) -> u8 {
        match self {
            PartnerTier::Platinum => 0,
            PartnerTier::Gold => 1,
            PartnerTier::Silver => 2,
            PartnerTier::Community => 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub tier: PartnerTier,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Partner {
    pub fn new(
        name: String,
        tier: PartnerTier,
        website: Option<String>,
        logo_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            tier,
            website,
            logo_url,
            created_at: Utc::now(),
        }
    }
}

// ==================== Admin list controls ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartnerTierFilter {
    #[default]
    All,
    Platinum,
    Gold,
    Silver,
    Community,
}

impl ControlValue for PartnerTierFilter {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(PartnerTierFilter::All),
            "platinum" => Some(PartnerTierFilter::Platinum),
            "gold" => Some(PartnerTierFilter::Gold),
            "silver" => Some(PartnerTierFilter::Silver),
            "community" => Some(PartnerTierFilter::Community),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            PartnerTierFilter::All => "all",
            PartnerTierFilter::Platinum => "platinum",
            PartnerTierFilter::Gold => "gold",
            PartnerTierFilter::Silver => "silver",
            PartnerTierFilter::Community => "community",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartnerSort {
    /// Tier rank, then name.
    #[default]
    Tier,
    Name,
    Newest,
}

impl ControlValue for PartnerSort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "tier" => Some(PartnerSort::Tier),
            "name" => Some(PartnerSort::Name),
            "newest" => Some(PartnerSort::Newest),
            _ => None,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            PartnerSort::Tier => "tier",
            PartnerSort::Name => "name",
            PartnerSort::Newest => "newest",
        }
    }
}

fn search_fields(partner: &Partner) -> Vec<Option<&str>> {
    vec![Some(partner.name.as_str()), partner.website.as_deref()]
}

fn category_key(partner: &Partner) -> Option<&str> {
    Some(partner.tier.as_str())
}

pub fn comparator(sort: PartnerSort, a: &Partner, b: &Partner) -> Ordering {
    match sort {
        PartnerSort::Tier => a
            .tier
            .rank()
            .cmp(&b.tier.rank())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        PartnerSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        PartnerSort::Newest => b.created_at.cmp(&a.created_at),
    }
}

pub fn list_spec() -> ListSpec<Partner, PartnerSort> {
    ListSpec {
        search_fields,
        category_key,
        comparator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::apply_sort;

    fn partner(name: &str, tier: PartnerTier) -> Partner {
        Partner::new(name.to_string(), tier, None, None)
    }

    #[test]
    fn test_tier_sort_breaks_ties_by_name() {
        let partners = vec![
            partner("Zeta Corp", PartnerTier::Gold),
            partner("Acme", PartnerTier::Gold),
            partner("Mega Sponsor", PartnerTier::Platinum),
            partner("Local Cafe", PartnerTier::Community),
        ];
        let sorted = apply_sort(partners, PartnerSort::Tier, comparator);
        let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mega Sponsor", "Acme", "Zeta Corp", "Local Cafe"]);
    }
}
