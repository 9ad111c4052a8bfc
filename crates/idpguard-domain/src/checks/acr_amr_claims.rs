use super::{CheckError, Evaluation};
use crate::model::CapabilityDocument;

pub fn run(doc: &CapabilityDocument, eval: &mut Evaluation) -> Result<(), CheckError> {
    let acr = doc.advertises_claim("acr")?;
    let amr = doc.advertises_claim("amr")?;

    if !acr {
        eval.critical("`claims_supported` does not include `acr`");
    }
    if !amr {
        eval.recommend("add `amr` to `claims_supported`");
    }

    eval.record("acr_claim_supported", acr);
    eval.record("amr_claim_supported", amr);
    Ok(())
}
