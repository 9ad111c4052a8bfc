use super::{CheckError, Evaluation};
use crate::model::CapabilityDocument;
use idpguard_types::Severity;
use serde_json::json;

pub fn run(doc: &CapabilityDocument, eval: &mut Evaluation) -> Result<(), CheckError> {
    let urls = doc.endpoint_urls()?;
    let mut insecure = Vec::new();
    for (field, url) in &urls {
        if !url.to_ascii_lowercase().starts_with("https://") {
            eval.critical_with_severity(
                format!("`{field}` is not served over HTTPS: {url}"),
                Severity::Critical,
            );
            insecure.push(json!({ "field": field, "url": url }));
        }
    }

    eval.record("endpoints_checked", urls.len());
    eval.record("insecure_endpoints", insecure);
    Ok(())
}
