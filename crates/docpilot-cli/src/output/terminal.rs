//! Terminal output formatter

use docpilot_core::{CapabilityResult, Payload, ProcessedDocument, ProviderDescriptor};

/// Payload followed by the provider that produced it; failures print nothing
/// here and are reported on stderr instead
pub fn format_result(result: &CapabilityResult) -> String {
    let (payload, provider) = match result {
        CapabilityResult::Success {
            payload, provider, ..
        } => (payload, provider),
        CapabilityResult::Failure { .. } => return String::new(),
    };

    let body = match payload {
        Payload::Summary(text) | Payload::Answer(text) => text.clone(),
        Payload::Tags(tags) => tags.join(", "),
    };

    format!("{}\n\nvia {}\n", body, provider)
}

pub fn format_processed(processed: &ProcessedDocument) -> String {
    let mut output = String::new();
    let analysis = &processed.analysis;

    match (&processed.summary, &processed.summary_provider) {
        (Some(summary), Some(provider)) => {
            output.push_str(&format!("Summary ({}):\n  {}\n\n", provider, summary));
        }
        _ => output.push_str("Summary:         unavailable\n\n"),
    }

    match &processed.tags_provider {
        Some(provider) => output.push_str(&format!(
            "Tags:            {} ({})\n",
            processed.tags_field(),
            provider
        )),
        None => output.push_str("Tags:            unavailable\n"),
    }

    output.push_str(&format!("Content type:    {}\n", analysis.content_type));
    output.push_str(&format!("Words:           {}\n", analysis.word_count));
    output.push_str(&format!("Sentences:       {}\n", analysis.sentence_count));
    output.push_str(&format!("Paragraphs:      {}\n", analysis.paragraph_count));
    output.push_str(&format!("Reading time:    {} min\n", analysis.reading_minutes));
    if !analysis.key_topics.is_empty() {
        output.push_str(&format!(
            "Key topics:      {}\n",
            analysis.key_topics.join(", ")
        ));
    }

    output
}

pub fn format_providers(descriptors: &[ProviderDescriptor]) -> String {
    let mut output = String::new();

    for descriptor in descriptors {
        let status = if descriptor.available {
            "available"
        } else {
            "unavailable"
        };
        output.push_str(&format!(
            "{:>3}  {:<18} {}\n",
            descriptor.priority, descriptor.name, status
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use docpilot_core::{CapabilityKind, FailureReason};

    #[test]
    fn test_format_tags_result() {
        let result = CapabilityResult::Success {
            payload: Payload::Tags(vec!["technology".to_string(), "business".to_string()]),
            provider: "local-rule-based".to_string(),
            attempts: Vec::new(),
        };
        assert_eq!(
            format_result(&result),
            "technology, business\n\nvia local-rule-based\n"
        );
    }

    #[test]
    fn test_failure_prints_nothing() {
        let result = CapabilityResult::Failure {
            reason: FailureReason::AllProvidersExhausted {
                capability: CapabilityKind::Tag,
            },
            attempts: Vec::new(),
        };
        assert!(format_result(&result).is_empty());
    }

    #[test]
    fn test_format_providers() {
        let descriptors = vec![ProviderDescriptor {
            name: "openai".to_string(),
            priority: 0,
            available: false,
        }];
        let output = format_providers(&descriptors);
        assert!(output.contains("openai"));
        assert!(output.ends_with("unavailable\n"));
    }
}
