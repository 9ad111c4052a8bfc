use super::{CheckError, Evaluation};
use crate::model::CapabilityDocument;
use serde_json::json;

const ASYMMETRIC: &[&str] = &["private_key_jwt", "tls_client_auth", "self_signed_tls_client_auth"];

pub fn run(doc: &CapabilityDocument, eval: &mut Evaluation) -> Result<(), CheckError> {
    // RFC 8414 default when the field is absent.
    let methods = doc
        .token_endpoint_auth_methods_supported()?
        .unwrap_or_else(|| vec!["client_secret_basic"]);

    if !methods.is_empty() && methods.iter().all(|m| *m == "none") {
        eval.critical("the token endpoint accepts only unauthenticated (`none`) clients");
    }

    let asymmetric = methods.iter().any(|m| ASYMMETRIC.contains(m));
    if !asymmetric {
        eval.recommend(
            "support an asymmetric client authentication method (`private_key_jwt` or mutual TLS)",
        );
    }

    eval.record("token_endpoint_auth_methods", json!(methods));
    eval.record("asymmetric_auth_supported", asymmetric);
    Ok(())
}
