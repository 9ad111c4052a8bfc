use super::{CheckError, Evaluation};
use crate::classify::{self, ClaimSupport, ClassificationOutcome, Confidence};
use crate::model::CapabilityDocument;

/// Shared by the NIST checks: classify `acr_values_supported` with claim flags.
pub(super) fn classify_document(doc: &CapabilityDocument) -> Result<ClassificationOutcome, CheckError> {
    let tokens = doc.acr_values_supported()?;
    let claims = ClaimSupport {
        acr: doc.advertises_claim("acr")?,
        amr: doc.advertises_claim("amr")?,
    };
    Ok(classify::classify(tokens.as_deref(), claims))
}

pub fn run(doc: &CapabilityDocument, eval: &mut Evaluation) -> Result<(), CheckError> {
    let outcome = classify_document(doc)?;

    if !outcome.can_determine {
        eval.critical("no value in `acr_values_supported` maps to a NIST 800-63B assurance level");
    } else if outcome.confidence == Confidence::Medium {
        eval.recommend(format!(
            "map or replace unrecognized ACR values: {}",
            outcome.unmapped_tokens.join(", ")
        ));
    }

    eval.record("classification", outcome.to_json());
    Ok(())
}
