use super::{CheckError, Evaluation};
use crate::model::CapabilityDocument;
use serde_json::json;

/// Pure implicit response types. Hybrid types that also return `code` are allowed.
const IMPLICIT: &[&str] = &["token", "id_token token"];

pub fn run(doc: &CapabilityDocument, eval: &mut Evaluation) -> Result<(), CheckError> {
    let advertised = doc.response_types_supported()?.unwrap_or_default();

    let code_flow = advertised.iter().any(|t| normalize(t) == "code");
    if !code_flow {
        eval.critical("`response_types_supported` does not include `code`");
    }

    let implicit: Vec<&str> = advertised
        .iter()
        .copied()
        .filter(|t| IMPLICIT.contains(&normalize(t).as_str()))
        .collect();
    if !implicit.is_empty() {
        eval.recommend(format!(
            "stop advertising implicit response types: {}",
            implicit.join(", ")
        ));
    }

    eval.record("response_types_supported", json!(advertised));
    eval.record("code_flow_supported", code_flow);
    eval.record("implicit_response_types", json!(implicit));
    Ok(())
}

/// Response types are space-separated sets; compare them order-insensitively.
fn normalize(response_type: &str) -> String {
    let mut parts: Vec<&str> = response_type.split_whitespace().collect();
    parts.sort_by_key(|p| match *p {
        "code" => 0,
        "id_token" => 1,
        "token" => 2,
        _ => 3,
    });
    parts.join(" ")
}
