//! Commodity group definitions.
//!
//! The index sheets and the turnover table spell the same six groups
//! differently, so each group carries both spellings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Excluded from turnover analysis by default.
pub const EXCLUDED_SUBCATEGORIES: &[&str] = &["Alat Musik"];

/// Top-level commodity groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommodityGroup {
    /// Food, beverages and tobacco
    FoodBeverageTobacco,

    /// Cultural and recreational goods
    CultureRecreation,

    /// Other goods
    OtherGoods,

    /// Information and communication equipment
    InformationCommunication,

    /// Other household equipment
    HouseholdEquipment,

    /// Spare parts and accessories
    SparePartsAccessories,
}

impl CommodityGroup {
    /// Returns all groups in display order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::FoodBeverageTobacco,
            Self::CultureRecreation,
            Self::OtherGoods,
            Self::InformationCommunication,
            Self::HouseholdEquipment,
            Self::SparePartsAccessories,
        ]
    }

    /// Name used by the index sources.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FoodBeverageTobacco => "Makanan, Minuman, dan Tembakau",
            Self::CultureRecreation => "Barang Budaya & Rekreasi",
            Self::OtherGoods => "Barang Lainnya",
            Self::InformationCommunication => "Peralatan Informasi & Komunikasi",
            Self::HouseholdEquipment => "Perlengkapan Rumah Tangga Lainnya",
            Self::SparePartsAccessories => "Suku Cadang & Aksesoris",
        }
    }

    /// Category value used by the turnover table.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::FoodBeverageTobacco => "Makanan, minuman dan tembakau",
            Self::CultureRecreation => "Barang Budaya dan Rekreasi",
            Self::OtherGoods => "Barang Lainnya",
            Self::InformationCommunication => "Peralatan Informasi dan Komunikasi",
            Self::HouseholdEquipment => "Perlengkapan Rumah Tangga Lainnya",
            Self::SparePartsAccessories => "Suku Cadang dan Aksesoris",
        }
    }

    /// Subgroups reported in the index sources.
    pub const fn subgroups(&self) -> &'static [&'static str] {
        match self {
            Self::FoodBeverageTobacco => &["Bahan Makanan", "Makanan Jadi", "Minuman", "Tembakau"],
            Self::CultureRecreation => &[
                "Alat Olahraga",
                "Alat Tulis dan Gambar",
                "Kertas, Karton, Cetakan",
                "Mainan anak-anak",
            ],
            Self::OtherGoods => &[
                "*Sandang",
                "Alas Kaki & Perlengkapannya",
                "Farmasi",
                "Kacamata, perhiasan, jam",
                "Kosmetik",
                "Pakaian Jadi",
                "Tas, dompet, koper dan ransel",
            ],
            Self::InformationCommunication => &["Elektronik (audio/video)"],
            Self::HouseholdEquipment => &[
                "Bahan Konstruksi dari Logam",
                "Elektronik (selain audio/video)",
                "Meubel",
                "Perabotan Rumah Tangga",
            ],
            Self::SparePartsAccessories => &["Suku Cadang & Aksesoris Mobil"],
        }
    }

    /// Whether the group counts as food in headline totals.
    pub const fn is_food(&self) -> bool {
        matches!(self, Self::FoodBeverageTobacco)
    }

    /// Find a group by either spelling, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all().into_iter().find(|g| {
            g.name().eq_ignore_ascii_case(name) || g.category().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for CommodityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named list of labels: a headline category set or a commodity group
/// with its subgroups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    /// Display name
    pub name: String,
    /// Member labels
    pub members: Vec<String>,
}

impl CategorySet {
    /// Create a set.
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `label` is the set itself or one of its members.
    pub fn covers(&self, label: &str) -> bool {
        self.name == label || self.members.iter().any(|m| m == label)
    }
}

/// Food and non-food headline sets over turnover categories.
pub fn default_headline_groups() -> Vec<CategorySet> {
    let (food, non_food): (Vec<_>, Vec<_>) =
        CommodityGroup::all().into_iter().partition(CommodityGroup::is_food);
    vec![
        CategorySet::new("Food", food.iter().map(CommodityGroup::category)),
        CategorySet::new("Non-food", non_food.iter().map(CommodityGroup::category)),
    ]
}

/// Commodity groups with their index subgroups.
pub fn default_commodity_groups() -> Vec<CategorySet> {
    CommodityGroup::all()
        .into_iter()
        .map(|g| CategorySet::new(g.name(), g.subgroups().iter().copied()))
        .collect()
}
