use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ HaalCentraal BRP Models ============

/// One `ingeschrevenpersoon` as returned by the HaalCentraal BRP API.
///
/// Only the fields the enrichment logic reads are typed. Everything else the
/// source returns is carried through untouched in `extra`, so the mapping
/// step can still reach fields this service never inspects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    /// National identification number. Not always present in the record
    /// itself; the lookup key is supplied by the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burgerservicenummer: Option<String>,
    /// Residence address of the person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verblijfplaats: Option<Verblijfplaats>,
    /// Registered nationalities, in registration order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationaliteiten: Option<Vec<NationaliteitEntry>>,
    /// Embedded related-person summaries (`expand=` responses).
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EmbeddedRelatives>,
    /// HAL links, including per-relation-kind link collections.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<PersonLinks>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Person {
    /// True when the source answered with an empty document.
    pub fn is_empty(&self) -> bool {
        self.burgerservicenummer.is_none()
            && self.verblijfplaats.is_none()
            && self.nationaliteiten.is_none()
            && self.embedded.is_none()
            && self.links.is_none()
            && self.extra.is_empty()
    }
}

/// Residence address sub-record.
///
/// The comparison fields are kept as raw JSON values: `huisnummer` is an
/// integer in some source configurations and a string in others, and the
/// address-equivalence rule only needs equality, not a concrete type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verblijfplaats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub huisnummer: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub huisletter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub huisnummertoevoeging: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One entry of the `nationaliteiten` sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NationaliteitEntry {
    #[serde(default)]
    pub nationaliteit: Nationaliteit,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Nationaliteit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omschrijving: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Embedded related-person summaries, one collection per relation kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddedRelatives {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partners: Option<Vec<RelativeSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ouders: Option<Vec<RelativeSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinderen: Option<Vec<RelativeSummary>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A related-person summary carrying a self-link to the full record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelativeSummary {
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<SummaryLinks>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryLinks {
    #[serde(rename = "ingeschrevenPersoon", skip_serializing_if = "Option::is_none")]
    pub ingeschreven_persoon: Option<Link>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Top-level HAL links of a person record. Some source configurations list
/// relatives here as direct hyperlinks instead of embedding summaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partners: Option<Vec<Link>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ouders: Option<Vec<Link>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinderen: Option<Vec<Link>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Collection response of a batched `burgerservicenummer` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonCollection {
    #[serde(rename = "_embedded", default)]
    pub embedded: CollectionEmbedded,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionEmbedded {
    #[serde(default)]
    pub ingeschrevenpersonen: Vec<Person>,
}
