use super::aal_advertised::classify_document;
use super::{CheckError, Evaluation};
use crate::classify::AalLevel;
use crate::model::CapabilityDocument;
use idpguard_types::Severity;

pub fn run(doc: &CapabilityDocument, eval: &mut Evaluation) -> Result<(), CheckError> {
    let outcome = classify_document(doc)?;

    match outcome.highest_level() {
        None => eval.critical_with_severity(
            "assurance level cannot be determined from `acr_values_supported`",
            Severity::Low,
        ),
        Some(AalLevel::Aal3) => {}
        Some(level) => eval.recommend(format!(
            "offer a hardware-backed AAL3 option (highest advertised is {level})"
        )),
    }

    eval.record("classification", outcome.to_json());
    Ok(())
}
