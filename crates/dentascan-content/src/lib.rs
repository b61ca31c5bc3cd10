//! DentaScan Static Content
//!
//! Condition encyclopedia, research studies, and the Jakarta clinic
//! directory, together with the pure search and filter functions the pages
//! use. All content is immutable and lives in memory; nothing here touches
//! the network.

pub mod fixtures;

pub use fixtures::{clinics, condition_by_id, conditions, studies, team};

use serde::{Deserialize, Serialize};

// ============================================================================
// Condition Types
// ============================================================================

/// A dental condition covered by the encyclopedia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DentalCondition {
    /// Stable identifier used in URLs (`caries`, `cracks`, `gingivitis`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description shown on the overview card.
    pub description: String,
    /// Illustration reference for the overview card.
    pub image_url: String,
    /// Common symptoms shown on the overview card.
    pub symptoms: Vec<String>,
    /// Long-form body for the per-condition detail page.
    pub detail: ConditionDetail,
}

/// Long-form detail page content for one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDetail {
    /// Page heading ("Understanding ...").
    pub title: String,
    /// Introductory paragraph under the hero image.
    pub intro: String,
    /// Illustration reference for the detail page hero.
    pub image_url: String,
    /// Body sections in display order.
    pub sections: Vec<DetailSection>,
    /// Embedded educational video URL.
    pub video_url: String,
}

/// One titled section of a condition detail page.
///
/// A section is a mix of titled explanation cards, flat bullet tips, and
/// titled tip groups; each piece renders only when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailSection {
    /// Section heading.
    pub title: String,
    /// Titled explanation cards.
    pub cards: Vec<DetailCard>,
    /// Flat bullet tips.
    pub tips: Vec<String>,
    /// Titled groups of bullet tips.
    pub groups: Vec<TipGroup>,
}

impl DetailSection {
    /// Creates a section made of titled explanation cards.
    #[must_use]
    pub fn cards(title: impl Into<String>, cards: Vec<DetailCard>) -> Self {
        Self {
            title: title.into(),
            cards,
            ..Self::default()
        }
    }

    /// Creates a section made of flat bullet tips.
    #[must_use]
    pub fn tips(title: impl Into<String>, tips: Vec<String>) -> Self {
        Self {
            title: title.into(),
            tips,
            ..Self::default()
        }
    }

    /// Creates a section made of titled tip groups.
    #[must_use]
    pub fn groups(title: impl Into<String>, groups: Vec<TipGroup>) -> Self {
        Self {
            title: title.into(),
            groups,
            ..Self::default()
        }
    }
}

/// A titled explanation card inside a detail section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailCard {
    /// Card heading.
    pub title: String,
    /// Card body text.
    pub body: String,
}

impl DetailCard {
    /// Creates a new explanation card.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A titled group of bullet tips inside a detail section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipGroup {
    /// Group heading.
    pub title: String,
    /// Bullet tips.
    pub tips: Vec<String>,
}

impl TipGroup {
    /// Creates a new tip group.
    #[must_use]
    pub fn new(title: impl Into<String>, tips: Vec<String>) -> Self {
        Self {
            title: title.into(),
            tips,
        }
    }
}

// ============================================================================
// Study Types
// ============================================================================

/// A published research study listed on the learn page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    /// Publication title.
    pub title: String,
    /// Author list as printed.
    pub authors: Vec<String>,
    /// Journal or venue name.
    pub journal: String,
    /// Publication year.
    pub year: u16,
    /// Abstract text.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Link to the publication.
    pub link: String,
}

// ============================================================================
// Clinic Types
// ============================================================================

/// A dental clinic in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    /// Stable identifier (`clinic-001` style).
    pub id: String,
    /// Clinic name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Phone number as printed.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Clinic website, when one exists.
    pub website: Option<String>,
    /// Offered specialties.
    pub specialties: Vec<String>,
    /// Average rating on a 0 to 5 scale.
    pub rating: f64,
    /// Opening hours by day group.
    pub open_hours: OpenHours,
    /// Map coordinates.
    pub coordinates: Coordinates,
    /// Short description.
    pub description: String,
    /// Photo reference.
    pub image: String,
}

impl Clinic {
    /// Returns the map marker payload for this clinic.
    #[must_use]
    pub fn marker(&self) -> ClinicMarker {
        ClinicMarker {
            id: self.id.clone(),
            name: self.name.clone(),
            lat: self.coordinates.lat,
            lng: self.coordinates.lng,
        }
    }
}

/// Opening hours grouped the way the directory prints them.
///
/// Values are free text; "Closed" and "By Appointment" appear alongside
/// `HH:MM - HH:MM` ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenHours {
    /// Monday through Friday.
    pub weekdays: String,
    /// Saturday.
    pub saturday: String,
    /// Sunday.
    pub sunday: String,
}

/// Geographic coordinates for the map collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Marker payload the map view embeds for each clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicMarker {
    /// Clinic identifier.
    pub id: String,
    /// Clinic name for the marker popup.
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

// ============================================================================
// Team Types
// ============================================================================

/// A member of the project team shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Full name.
    pub name: String,
    /// Project role.
    pub role: String,
    /// Short biography line.
    pub bio: String,
    /// Portrait reference.
    pub image_url: String,
    /// Profile link.
    pub linkedin_url: String,
}

// ============================================================================
// Page Selectors
// ============================================================================

/// Tab selection on the learn page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LearnTab {
    /// Condition encyclopedia cards.
    #[default]
    Conditions,
    /// Research study list.
    Studies,
}

impl LearnTab {
    /// Parses a query-string value, falling back to the default tab.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("studies") => Self::Studies,
            _ => Self::Conditions,
        }
    }

    /// Returns the query-string value for this tab.
    #[must_use]
    pub const fn as_query(&self) -> &'static str {
        match self {
            Self::Conditions => "conditions",
            Self::Studies => "studies",
        }
    }
}

/// View mode on the clinics page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClinicView {
    /// Card grid of all matching clinics.
    #[default]
    List,
    /// Map with a clinic sidebar.
    Map,
}

impl ClinicView {
    /// Parses a query-string value, falling back to the default view.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("map") => Self::Map,
            _ => Self::List,
        }
    }

    /// Returns the query-string value for this view.
    #[must_use]
    pub const fn as_query(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Map => "map",
        }
    }
}

// ============================================================================
// Search and Filtering
// ============================================================================

/// Filters conditions by a case-insensitive substring of name or
/// description. An empty or whitespace-only query matches everything.
#[must_use]
pub fn filter_conditions<'a>(
    conditions: &'a [DentalCondition],
    query: &str,
) -> Vec<&'a DentalCondition> {
    let needle = query.trim().to_lowercase();
    conditions
        .iter()
        .filter(|condition| {
            needle.is_empty()
                || condition.name.to_lowercase().contains(&needle)
                || condition.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Filters studies by a case-insensitive substring of title or abstract.
/// An empty or whitespace-only query matches everything.
#[must_use]
pub fn filter_studies<'a>(studies: &'a [Study], query: &str) -> Vec<&'a Study> {
    let needle = query.trim().to_lowercase();
    studies
        .iter()
        .filter(|study| {
            needle.is_empty()
                || study.title.to_lowercase().contains(&needle)
                || study.abstract_text.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Filters clinics by search term and specialty.
///
/// The term matches case-insensitively against name, address, or any
/// specialty; the specialty filter is an exact match against the offered
/// list. Empty values disable the respective filter. Both filters are pure
/// functions of their inputs, so applying them twice gives the same set.
#[must_use]
pub fn filter_clinics<'a>(
    clinics: &'a [Clinic],
    query: &str,
    specialty: Option<&str>,
) -> Vec<&'a Clinic> {
    let needle = query.trim().to_lowercase();
    let specialty = specialty.map(str::trim).filter(|s| !s.is_empty());

    clinics
        .iter()
        .filter(|clinic| {
            needle.is_empty()
                || clinic.name.to_lowercase().contains(&needle)
                || clinic.address.to_lowercase().contains(&needle)
                || clinic
                    .specialties
                    .iter()
                    .any(|s| s.to_lowercase().contains(&needle))
        })
        .filter(|clinic| {
            specialty.map_or(true, |wanted| clinic.specialties.iter().any(|s| s == wanted))
        })
        .collect()
}

/// Returns the sorted, deduplicated list of all specialties on offer.
#[must_use]
pub fn specialty_options(clinics: &[Clinic]) -> Vec<String> {
    let mut options: Vec<String> = clinics
        .iter()
        .flat_map(|clinic| clinic.specialties.iter().cloned())
        .collect();
    options.sort();
    options.dedup();
    options
}
