use crate::core::document::render_document;
use crate::core::loader::fetch_records;
use crate::core::mapper::map_records;
use crate::core::scatter::render_scatter;
use crate::core::tooltip::format_race_time;
use crate::core::{ConfigProvider, Pipeline, PlotPoint, RawRecord, RenderResult, Storage};
use crate::utils::error::{PlotError, Result};
use reqwest::Client;
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const SVG_FILENAME: &str = "scatter.svg";
pub const HTML_FILENAME: &str = "index.html";
pub const CSV_FILENAME: &str = "points.csv";
pub const BUNDLE_FILENAME: &str = "scatter_plot.zip";

pub struct ScatterPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) client: Client,
}

impl<S: Storage, C: ConfigProvider> ScatterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PointRow<'a> {
    year: i32,
    seconds: i64,
    time: String,
    place: i64,
    name: &'a str,
    nationality: &'a str,
    flagged: bool,
    doping: &'a str,
    url: &'a str,
}

/// 匯出資料點為 CSV（順序與來源一致）
pub fn points_csv(points: &[PlotPoint]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for point in points {
        writer.serialize(PointRow {
            year: point.calendar_year(),
            seconds: point.time.timestamp(),
            time: format_race_time(point.time),
            place: point.place,
            name: &point.name,
            nationality: &point.nationality,
            flagged: point.is_flagged(),
            doping: &point.doping,
            url: &point.url,
        })?;
    }

    let bytes = writer.into_inner().map_err(|e| PlotError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| PlotError::Config {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ScatterPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawRecord>> {
        fetch_records(&self.client, self.config.data_url()).await
    }

    async fn transform(&self, data: Vec<RawRecord>) -> Result<RenderResult> {
        let layout = self.config.layout();
        let points = map_records(&data)?;
        tracing::debug!("Mapped {} records into plot points", points.len());

        let plot = render_scatter(points, &layout)?;
        let svg = plot.to_svg();
        let html = render_document(&plot, &layout, self.config.title())?;
        let csv = points_csv(&plot.points)?;

        Ok(RenderResult {
            points: plot.points,
            svg,
            html,
            csv,
        })
    }

    async fn load(&self, result: RenderResult) -> Result<String> {
        let artifacts = [
            (SVG_FILENAME, result.svg.as_bytes()),
            (HTML_FILENAME, result.html.as_bytes()),
            (CSV_FILENAME, result.csv.as_bytes()),
        ];

        if !self.config.bundle() {
            for (name, data) in artifacts {
                tracing::debug!("Writing {} ({} bytes) to storage", name, data.len());
                self.storage.write_file(name, data).await?;
            }
            return Ok(format!("{}/{}", self.config.output_path(), HTML_FILENAME));
        }

        tracing::debug!("Creating ZIP bundle with {} files", artifacts.len());
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, data) in artifacts {
                zip.start_file::<_, ()>(name, FileOptions::default())?;
                zip.write_all(data)?;
            }
            // 完成並取回底層 Vec<u8>
            zip.finish()?.into_inner()
        };

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(BUNDLE_FILENAME, &zip_data).await?;
        Ok(format!("{}/{}", self.config.output_path(), BUNDLE_FILENAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ChartLayout;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                PlotError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        data_url: String,
        bundle: bool,
    }

    impl ConfigProvider for TestConfig {
        fn data_url(&self) -> &str {
            &self.data_url
        }

        fn output_path(&self) -> &str {
            "./test-output"
        }

        fn layout(&self) -> ChartLayout {
            ChartLayout::default()
        }

        fn title(&self) -> &str {
            "Doping in Professional Bicycle Racing"
        }

        fn bundle(&self) -> bool {
            self.bundle
        }
    }

    fn dataset() -> serde_json::Value {
        serde_json::json!([
            {"Year": 1994, "Seconds": 2175, "Doping": "", "Name": "A", "Nationality": "USA", "Place": 1, "URL": ""},
            {"Year": 1996, "Seconds": 2200, "Doping": "EPO", "Name": "B", "Nationality": "ITA", "Place": 2, "URL": "https://example.com/b"}
        ])
    }

    #[tokio::test]
    async fn test_pipeline_writes_svg_html_and_csv() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/cyclist-data.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(dataset());
        });

        let storage = MockStorage::new();
        let pipeline = ScatterPipeline::new(
            storage.clone(),
            TestConfig {
                data_url: server.url("/cyclist-data.json"),
                bundle: false,
            },
        );

        let raw = pipeline.extract().await.unwrap();
        api_mock.assert();
        let result = pipeline.transform(raw).await.unwrap();
        assert_eq!(result.points.len(), 2);

        let output = pipeline.load(result).await.unwrap();
        assert_eq!(output, "./test-output/index.html");

        let svg = String::from_utf8(storage.read_file(SVG_FILENAME).await.unwrap()).unwrap();
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("dot_background_red").count(), 1);

        let html = String::from_utf8(storage.read_file(HTML_FILENAME).await.unwrap()).unwrap();
        assert!(html.contains("Doping in Professional Bicycle Racing"));

        let csv = String::from_utf8(storage.read_file(CSV_FILENAME).await.unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "year,seconds,time,place,name,nationality,flagged,doping,url"
        );
        assert_eq!(lines[1], "1994,2175,36:15,1,A,USA,false,,");
        assert_eq!(lines[2], "1996,2200,36:40,2,B,ITA,true,EPO,https://example.com/b");
    }

    #[tokio::test]
    async fn test_pipeline_bundles_into_zip() {
        let storage = MockStorage::new();
        let pipeline = ScatterPipeline::new(
            storage.clone(),
            TestConfig {
                data_url: "http://unused.invalid/data.json".to_string(),
                bundle: true,
            },
        );

        let raw: Vec<RawRecord> = serde_json::from_value(dataset()).unwrap();
        let result = pipeline.transform(raw).await.unwrap();
        let output = pipeline.load(result).await.unwrap();
        assert_eq!(output, "./test-output/scatter_plot.zip");

        let zip_data = storage.read_file(BUNDLE_FILENAME).await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort();
        assert_eq!(names, vec![HTML_FILENAME, CSV_FILENAME, SVG_FILENAME]);
        assert!(storage.read_file(SVG_FILENAME).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_payload_stops_before_render() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/empty");
            then.status(200).body("");
        });

        let pipeline = ScatterPipeline::new(
            MockStorage::new(),
            TestConfig {
                data_url: server.url("/empty"),
                bundle: false,
            },
        );

        let err = pipeline.extract().await.unwrap_err();
        api_mock.assert();
        assert!(matches!(err, PlotError::EmptyPayload { .. }));
    }
}
