use serde::Serialize;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use once_cell::sync::Lazy;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::mode::SummaryMode;
use crate::text::clean_text;

/// Input longer than this is truncated before it is sent upstream.
const MAX_INPUT_CHARS: usize = 4000;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(90);

const BULLET_GLYPH: &str = "•";

static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client")
});

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_length: u32,
    min_length: u32,
}

/// Summarizes `text` in the given mode via the remote inference endpoint.
///
/// A single POST with a fixed timeout; no retries. Bullet mode reformats the
/// returned summary into one bullet per sentence.
pub async fn summarize(config: &Config, text: &str, mode: SummaryMode) -> Result<String> {
    let text = clean_text(text);
    if text.is_empty() {
        return Err(AppError::InvalidInput(
            "No text provided for summarization.".to_string(),
        ));
    }

    let input = truncate_chars(&text, MAX_INPUT_CHARS);
    let (max_length, min_length) = mode.length_bounds();

    let summary = call_inference_api(config, input, max_length, min_length).await?;

    Ok(match mode {
        SummaryMode::Bullets => format_bullets(&summary),
        _ => summary,
    })
}

async fn call_inference_api(
    config: &Config,
    text: &str,
    max_length: u32,
    min_length: u32,
) -> Result<String> {
    let body = InferenceRequest {
        inputs: text,
        parameters: InferenceParameters {
            max_length,
            min_length,
        },
    };

    let res = CLIENT
        .post(&config.inference_url)
        .bearer_auth(&config.hf_api_token)
        .json(&body)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|e| AppError::UpstreamError(format!("Inference API error: {}", e)))?;

    let json: serde_json::Value = res
        .json()
        .await
        .map_err(|e| AppError::UpstreamError(format!("Inference API error: {}", e)))?;

    // The endpoint returns a one-element list holding the summary
    let summary = json
        .as_array()
        .filter(|entries| entries.len() == 1)
        .and_then(|entries| entries[0].get("summary_text"))
        .and_then(|value| value.as_str())
        .ok_or_else(|| {
            AppError::UpstreamError(format!("Unexpected response from inference API: {}", json))
        })?;

    Ok(summary.to_string())
}

/// Cuts `text` down to at most `max` characters, never splitting a code point.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Turns a sentence-per-period summary into one bullet per line, dropping
/// empty fragments.
fn format_bullets(summary: &str) -> String {
    summary
        .split(". ")
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| format!("{} {}", BULLET_GLYPH, fragment))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_input() {
        let long: String = "a".repeat(MAX_INPUT_CHARS + 100);
        assert_eq!(truncate_chars(&long, MAX_INPUT_CHARS).len(), MAX_INPUT_CHARS);
    }

    #[test]
    fn short_input_is_untouched() {
        assert_eq!(truncate_chars("short text", MAX_INPUT_CHARS), "short text");
        let exact: String = "b".repeat(MAX_INPUT_CHARS);
        assert_eq!(truncate_chars(&exact, MAX_INPUT_CHARS), exact);
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        // é is two bytes in UTF-8
        let text = "ééééé";
        assert_eq!(truncate_chars(text, 3), "ééé");
    }

    #[test]
    fn bullets_one_per_sentence() {
        assert_eq!(format_bullets("A. B. C"), "• A\n• B\n• C");
    }

    #[test]
    fn bullets_drop_empty_fragments() {
        assert_eq!(format_bullets("A. B. "), "• A\n• B");
        assert_eq!(format_bullets("A.  . B"), "• A\n• B");
    }
}
