use crate::domain::model::RawRecord;
use crate::utils::error::{PlotError, Result};
use reqwest::Client;

/// 取得遠端資料集（單次 GET，不重試、不設逾時）
///
/// Transport failures and non-2xx statuses surface as [`PlotError::Transport`];
/// a body that is empty, `null` or `[]` surfaces as [`PlotError::EmptyPayload`].
/// Every failure is logged here before it is returned.
pub async fn fetch_records(client: &Client, url: &str) -> Result<Vec<RawRecord>> {
    let result = request_records(client, url).await;
    if let Err(e) = &result {
        tracing::error!("❌ Failed to load dataset from {}: {}", url, e);
    }
    result
}

async fn request_records(client: &Client, url: &str) -> Result<Vec<RawRecord>> {
    tracing::debug!("Making API request to: {}", url);
    let response = client.get(url).send().await?.error_for_status()?;
    tracing::debug!("API response status: {}", response.status());

    let body = response.text().await?;
    parse_payload(url, &body)
}

pub(crate) fn parse_payload(url: &str, body: &str) -> Result<Vec<RawRecord>> {
    let empty = || PlotError::EmptyPayload {
        url: url.to_string(),
    };

    if body.trim().is_empty() {
        return Err(empty());
    }

    let value: serde_json::Value = serde_json::from_str(body)?;
    match value {
        serde_json::Value::Null => Err(empty()),
        serde_json::Value::Array(items) if items.is_empty() => Err(empty()),
        other => {
            let records: Vec<RawRecord> = serde_json::from_value(other)?;
            tracing::debug!("Parsed {} raw records", records.len());
            Ok(records)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const URL: &str = "https://example.com/cyclist-data.json";

    #[test]
    fn test_parse_payload_rejects_missing_data() {
        for body in ["", "   \n", "null", "[]"] {
            let err = parse_payload(URL, body).unwrap_err();
            assert!(
                matches!(err, PlotError::EmptyPayload { .. }),
                "body {:?} gave {:?}",
                body,
                err
            );
        }
    }

    #[test]
    fn test_parse_payload_rejects_non_array() {
        let err = parse_payload(URL, r#"{"Year": 1994}"#).unwrap_err();
        assert!(matches!(err, PlotError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_fetch_records_keeps_source_order() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/cyclist-data.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"Year": 1996, "Seconds": 2200, "Doping": "EPO", "Name": "B", "Nationality": "ITA", "Place": 2, "URL": ""},
                    {"Year": 1994, "Seconds": 2175, "Doping": "", "Name": "A", "Nationality": "USA", "Place": 1, "URL": ""}
                ]));
        });

        let records = fetch_records(&Client::new(), &server.url("/cyclist-data.json"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "B");
        assert_eq!(records[1].name, "A");
    }

    #[tokio::test]
    async fn test_fetch_records_http_error_is_transport_failure() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let err = fetch_records(&Client::new(), &server.url("/missing"))
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(matches!(err, PlotError::Transport(_)));
    }
}
