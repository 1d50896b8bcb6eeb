use crate::brp_client::BrpClient;
use crate::models::{Link, Person, RelativeSummary, Verblijfplaats};
use crate::resources::Source;
use futures::future::join_all;
use url::Url;

/// API-version path prefix carried by embedded-shape self-links. The BSN is
/// the path remainder after this segment.
const INGESCHREVEN_PERSONEN_PATH: &str =
    "/haal-centraal-brp-bevragen/api/v1.3/ingeschrevenpersonen";

/// The three relation kinds discovered on a subject record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Partner,
    Parent,
    Child,
}

impl RelationKind {
    /// Collection key used by the source for this kind.
    pub fn source_key(&self) -> &'static str {
        match self {
            RelationKind::Partner => "partners",
            RelationKind::Parent => "ouders",
            RelationKind::Child => "kinderen",
        }
    }
}

/// Relative references extracted from a subject record, one shape per kind.
///
/// A source/person pair exposes at most one of these shapes per relation
/// kind; the resolver consumes the union uniformly.
#[derive(Debug, Clone, PartialEq)]
pub enum RelativeLinks {
    /// Identification numbers derived from embedded self-links; resolvable
    /// with a single batched fetch.
    Embedded(Vec<String>),
    /// Direct fetchable endpoints relative to the source location.
    Direct(Vec<String>),
    /// No references of this kind on the subject.
    Absent,
}

/// Relatives of a subject, fetched and filtered, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRelatives {
    pub partners: Vec<Person>,
    pub parents: Vec<Person>,
    pub children: Vec<Person>,
}

/// Extracts the relative references of one kind from a subject record.
pub fn extract_links(source: &Source, person: &Person, kind: RelationKind) -> RelativeLinks {
    if let Some(summaries) = embedded_of(person, kind) {
        let bsns: Vec<String> = summaries.iter().filter_map(bsn_from_summary).collect();
        if !bsns.is_empty() {
            return RelativeLinks::Embedded(bsns);
        }
    }

    if let Some(links) = linked_of(person, kind) {
        let endpoints: Vec<String> = links
            .iter()
            .filter_map(|link| endpoint_from_href(source, &link.href))
            .collect();
        if !endpoints.is_empty() {
            return RelativeLinks::Direct(endpoints);
        }
    }

    RelativeLinks::Absent
}

fn embedded_of<'a>(person: &'a Person, kind: RelationKind) -> Option<&'a [RelativeSummary]> {
    let embedded = person.embedded.as_ref()?;
    let summaries = match kind {
        RelationKind::Partner => embedded.partners.as_ref(),
        RelationKind::Parent => embedded.ouders.as_ref(),
        RelationKind::Child => embedded.kinderen.as_ref(),
    }?;
    Some(summaries.as_slice())
}

fn linked_of<'a>(person: &'a Person, kind: RelationKind) -> Option<&'a [Link]> {
    let links = person.links.as_ref()?;
    let collection = match kind {
        RelationKind::Partner => links.partners.as_ref(),
        RelationKind::Parent => links.ouders.as_ref(),
        RelationKind::Child => links.kinderen.as_ref(),
    }?;
    Some(collection.as_slice())
}

/// Derives the BSN from an embedded summary's self-link: strip scheme and
/// host, then take the path remainder after the API-version prefix.
fn bsn_from_summary(summary: &RelativeSummary) -> Option<String> {
    let href = &summary.links.as_ref()?.ingeschreven_persoon.as_ref()?.href;

    let path = match Url::parse(href) {
        Ok(url) => url.path().to_string(),
        // Already a bare path.
        Err(_) => href.clone(),
    };

    match path.split_once(INGESCHREVEN_PERSONEN_PATH) {
        Some((_, remainder)) => {
            let bsn = remainder.trim_start_matches('/');
            if bsn.is_empty() {
                tracing::warn!("Self-link without BSN segment: {}", href);
                None
            } else {
                Some(bsn.to_string())
            }
        }
        None => {
            tracing::warn!("Self-link outside the ingeschrevenpersonen API: {}", href);
            None
        }
    }
}

/// Turns a direct relative hyperlink into an endpoint relative to the source
/// location. Schemes are normalized to `http` first so an `https` mismatch
/// between the link and the configured location still resolves.
fn endpoint_from_href(source: &Source, href: &str) -> Option<String> {
    let normalized_href = href.replacen("https://", "http://", 1);
    let normalized_base = source.location.replacen("https://", "http://", 1);

    match normalized_href.strip_prefix(&normalized_base) {
        Some(endpoint) => Some(endpoint.to_string()),
        None => {
            tracing::warn!("Relative link outside the configured source: {}", href);
            None
        }
    }
}

/// The address-equivalence filter: a fetched relative counts as co-resident
/// when every address sub-field present on both sides compares equal and no
/// sub-field is present on exactly one side. A subject without a
/// `verblijfplaats` skips the filter entirely.
pub fn same_residence(subject: &Person, candidate: &Person) -> bool {
    let Some(ours) = subject.verblijfplaats.as_ref() else {
        return true;
    };
    let absent = Verblijfplaats::default();
    let theirs = candidate.verblijfplaats.as_ref().unwrap_or(&absent);

    let pairs = [
        (&ours.postcode, &theirs.postcode),
        (&ours.huisnummer, &theirs.huisnummer),
        (&ours.huisletter, &theirs.huisletter),
        (&ours.huisnummertoevoeging, &theirs.huisnummertoevoeging),
    ];

    for (subject_field, candidate_field) in pairs {
        match (subject_field, candidate_field) {
            (Some(a), Some(b)) if a != b => return false,
            (Some(_), None) | (None, Some(_)) => return false,
            _ => {}
        }
    }

    true
}

/// Fetches all relatives of the subject. The three relation kinds resolve
/// concurrently; each kind is processed to completion independently, and a
/// failed relative fetch only omits that relative.
pub async fn resolve_relatives(
    client: &BrpClient,
    source: &Source,
    subject: &Person,
) -> ResolvedRelatives {
    let (partners, parents, children) = tokio::join!(
        resolve_kind(client, source, subject, RelationKind::Partner),
        resolve_kind(client, source, subject, RelationKind::Parent),
        resolve_kind(client, source, subject, RelationKind::Child),
    );

    ResolvedRelatives {
        partners,
        parents,
        children,
    }
}

async fn resolve_kind(
    client: &BrpClient,
    source: &Source,
    subject: &Person,
    kind: RelationKind,
) -> Vec<Person> {
    match extract_links(source, subject, kind) {
        RelativeLinks::Absent => Vec::new(),
        RelativeLinks::Embedded(bsns) => {
            tracing::info!("Resolving {} {} via batched fetch", bsns.len(), kind.source_key());
            let query = [("burgerservicenummer", bsns.join(","))];
            match client.fetch_person_collection(source, &query).await {
                Some(candidates) => candidates
                    .into_iter()
                    .filter(|candidate| same_residence(subject, candidate))
                    .collect(),
                None => Vec::new(),
            }
        }
        RelativeLinks::Direct(endpoints) => {
            tracing::info!(
                "Resolving {} {} via direct links",
                endpoints.len(),
                kind.source_key()
            );
            // Fan out, then reassemble in link order; join_all preserves it.
            let fetches = endpoints
                .iter()
                .map(|endpoint| client.fetch_person(source, endpoint, &[]));
            join_all(fetches).await.into_iter().flatten().collect()
        }
    }
}
