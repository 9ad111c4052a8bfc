use super::{CheckError, Evaluation};
use crate::model::CapabilityDocument;
use serde_json::json;

pub fn run(doc: &CapabilityDocument, eval: &mut Evaluation) -> Result<(), CheckError> {
    let response_types = doc.response_types_supported()?.unwrap_or_default();
    if !response_types
        .iter()
        .any(|t| t.split_whitespace().any(|p| p == "code"))
    {
        eval.skip("authorization code flow is not advertised");
        return Ok(());
    }

    let methods = doc.code_challenge_methods_supported()?;
    eval.record("code_challenge_methods_supported", json!(methods));

    let methods = methods.unwrap_or_default();
    if !methods.contains(&"S256") {
        eval.critical("`code_challenge_methods_supported` does not include `S256`");
    }
    if methods.contains(&"plain") {
        eval.recommend("remove the `plain` PKCE method");
    }
    Ok(())
}
