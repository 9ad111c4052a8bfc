use super::aal_advertised::classify_document;
use super::{CheckError, Evaluation};
use crate::classify::{AalLevel, Confidence};
use crate::model::CapabilityDocument;

pub fn run(doc: &CapabilityDocument, eval: &mut Evaluation) -> Result<(), CheckError> {
    let outcome = classify_document(doc)?;

    match outcome.highest_level() {
        None => eval.critical("assurance level cannot be determined from `acr_values_supported`"),
        Some(level) if level < AalLevel::Aal2 => eval.critical(format!(
            "highest advertised assurance level is {level}; AAL2 or above is required"
        )),
        Some(_) if outcome.confidence == Confidence::Medium => eval.recommend(
            "confirm the unrecognized ACR values do not weaken the AAL2 guarantee",
        ),
        Some(_) => {}
    }

    eval.record("classification", outcome.to_json());
    Ok(())
}
