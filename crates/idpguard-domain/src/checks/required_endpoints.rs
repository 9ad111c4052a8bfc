use super::{CheckError, Evaluation};
use crate::model::CapabilityDocument;
use serde_json::json;

const REQUIRED: &[&str] = &["issuer", "authorization_endpoint", "token_endpoint", "jwks_uri"];

pub fn run(doc: &CapabilityDocument, eval: &mut Evaluation) -> Result<(), CheckError> {
    let mut missing = Vec::new();
    for field in REQUIRED {
        if doc.string(field)?.is_none_or(str::is_empty) {
            eval.critical(format!("`{field}` is not advertised"));
            missing.push(*field);
        }
    }

    let has_userinfo = doc.userinfo_endpoint()?.is_some_and(|u| !u.is_empty());
    if !has_userinfo {
        eval.recommend("advertise `userinfo_endpoint` so clients can fetch claims");
    }

    eval.record("missing_endpoints", json!(missing));
    eval.record("userinfo_endpoint_advertised", has_userinfo);
    Ok(())
}
