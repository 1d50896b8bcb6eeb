use crate::brp_client::BrpClient;
use crate::errors::{AppError, ResultExt};
use crate::mapping::apply_mapping;
use crate::merge::merge_record;
use crate::nationality::check_dutch_nationality;
use crate::relatives::resolve_relatives;
use crate::resources::{ResourceStore, MAPPING_REF, SOURCE_REF};
use crate::xml::encode_envelope;
use serde_json::Value;

/// Outcome of one family-situation inquiry.
///
/// `Unanswered` is the fail-soft contract: the caller returns its own
/// original request data unchanged, so the boundary behaves idempotently
/// from the caller's point of view.
#[derive(Debug)]
pub enum InquiryOutcome {
    /// The encoded La01 envelope, ready to send as `application/xml`.
    Answered(String),
    /// The inquiry could not be answered; return the input untouched.
    Unanswered,
}

/// Answers a StUF `npsLv01` family-situation inquiry from the BRP source.
///
/// Configuration and input failures abort fail-soft; relative resolution and
/// nationality classification degrade gracefully; mapping and encoding
/// failures are the only hard errors, since there is no meaningful fallback
/// for a broken mapping or encoder.
pub async fn handle_family_inquiry(
    store: &ResourceStore,
    client: &BrpClient,
    envelope: &Value,
) -> Result<InquiryOutcome, AppError> {
    // 0. Validate configuration.
    let Some(mapping) = store.get_mapping(MAPPING_REF) else {
        tracing::error!("Mapping {} not found", MAPPING_REF);
        return Ok(InquiryOutcome::Unanswered);
    };
    let Some(source) = store.get_source(SOURCE_REF) else {
        tracing::error!("Source {} not found", SOURCE_REF);
        return Ok(InquiryOutcome::Unanswered);
    };

    // 1. Get BSN and referentienummer from the request body.
    tracing::info!("Getting BSN from request body");
    let request = envelope
        .get("SOAP-ENV:Body")
        .and_then(|v| v.get("BG:npsLv01-prs-GezinssituatieOpAdresAanvrager"));
    let bsn = request
        .and_then(|v| v.get("BG:gelijk"))
        .and_then(|v| v.get("BG:inp.bsn"))
        .and_then(|v| v.as_str());
    let referentienummer = request
        .and_then(|v| v.get("BG:stuurgegevens"))
        .and_then(|v| v.get("StUF:referentienummer"))
        .and_then(|v| v.as_str());

    let Some(bsn) = bsn else {
        tracing::error!("BSN not found in request body");
        return Ok(InquiryOutcome::Unanswered);
    };

    // 2. Get the ingeschrevenpersoon from the source; retry once without the
    //    expand parameter when the expanded fetch comes back empty.
    let endpoint = format!("/{}", bsn);
    let expand = [("expand", "ouders,partners,kinderen".to_string())];
    let mut subject = client
        .fetch_person(source, &endpoint, &expand)
        .await
        .filter(|person| !person.is_empty());
    if subject.is_none() {
        subject = client
            .fetch_person(source, &endpoint, &[])
            .await
            .filter(|person| !person.is_empty());
    }
    let Some(subject) = subject else {
        tracing::error!("IngeschrevenPersoon could not be found/fetched from source");
        return Ok(InquiryOutcome::Unanswered);
    };

    // 3. Check partners, parents and children. Fetch those.
    let relatives = resolve_relatives(client, source, &subject).await;

    // 4. Check if the nationality of the ingeschrevenpersoon is Dutch.
    let dutch_nationality = match check_dutch_nationality(&subject) {
        Ok(flag) => flag,
        Err(e) => {
            tracing::warn!("Nationality could not be classified, defaulting to false: {}", e);
            "false".to_string()
        }
    };

    // 5. Map everything together into a StUF response.
    let record = merge_record(&subject, &relatives, &dutch_nationality, referentienummer)?;
    let mapped = apply_mapping(mapping, &record).context("mapping the merged record")?;

    // 6. Create the response document.
    let xml = encode_envelope(&mapped).context("encoding the La01 envelope")?;

    Ok(InquiryOutcome::Answered(xml))
}
