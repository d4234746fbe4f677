use async_trait::async_trait;
use chrono::Local;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use upi_resolver::{
    export::{self, summary_report, ExportFormat, RecordFilter},
    ingest::LoadReport,
    lookup::{Candidate, CandidateGenerator, HttpLookupClient, Identity, LookupClient, LookupOutcome},
    resolve::{BatchController, BatchStatus, RecordStatus, ResolutionEngine},
};

/// Fixed answers keyed by `number@handle`; anything else is `Invalid`.
struct ScriptedLookup {
    answers: HashMap<String, LookupOutcome>,
}

#[async_trait]
impl LookupClient for ScriptedLookup {
    async fn probe(&self, candidate: &Candidate) -> LookupOutcome {
        self.answers
            .get(&candidate.address())
            .cloned()
            .unwrap_or(LookupOutcome::Invalid)
    }
}

fn valid(name: &str, bank: &str, vpa: &str) -> LookupOutcome {
    LookupOutcome::Valid(Identity {
        name: name.to_string(),
        bank: bank.to_string(),
        vpa: vpa.to_string(),
        ifsc: "SBIN0000001".to_string(),
    })
}

fn scripted_controller() -> BatchController<ScriptedLookup> {
    let answers = HashMap::from([
        (
            "9000000001@ybl".to_string(),
            valid("ASHA RAO", "STATE BANK OF INDIA", "9000000001@ybl"),
        ),
        (
            "9000000003@oksbi".to_string(),
            valid("VIKRAM SINGH", "STATE BANK OF INDIA", "vikram@oksbi"),
        ),
        (
            "9000000004@ptyes".to_string(),
            valid("MEERA IYER", "YES BANK", "meera@ptyes"),
        ),
    ]);
    let engine = ResolutionEngine::new(CandidateGenerator::default(), ScriptedLookup { answers });
    BatchController::new(engine, Duration::ZERO)
}

async fn run_to_end<L: LookupClient>(controller: &mut BatchController<L>) {
    while controller.snapshot().status() == BatchStatus::Running {
        controller.tick().await;
    }
}

fn find(files: &[PathBuf], prefix: &str, extension: &str) -> PathBuf {
    files
        .iter()
        .find(|p| {
            let name = p.file_name().unwrap().to_string_lossy();
            name.starts_with(prefix) && name.ends_with(extension)
        })
        .unwrap_or_else(|| panic!("no {}*{} in {:?}", prefix, extension, files))
        .clone()
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[tokio::test]
async fn file_to_exports() {
    let report = LoadReport::parse("9000000001\n\n9000000002\nnot-a-number\n9000000003\n9000000004\n");
    assert_eq!(report.numbers.len(), 4);
    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].line, 4);

    let mut controller = scripted_controller();
    controller.load(report.numbers);
    controller.start().unwrap();
    run_to_end(&mut controller).await;

    let state = controller.snapshot();
    assert_eq!(state.status(), BatchStatus::Completed);
    let counters = state.counters();
    assert_eq!(counters.total_processed, 4);
    assert_eq!(counters.successful, 3);
    assert_eq!(counters.failed, 1);
    assert_eq!(
        state.aggregator().ranked_banks(),
        vec![("STATE BANK OF INDIA", 2), ("YES BANK", 1)]
    );

    let failed = &state.results()[1];
    assert_eq!(failed.status, RecordStatus::Failed);
    assert!(failed
        .error
        .as_deref()
        .unwrap()
        .starts_with("All 10 UPI handles failed"));

    let dir = tempfile::tempdir().unwrap();
    let files = export::export(state, &RecordFilter::default(), dir.path(), ExportFormat::All).unwrap();
    // csv, json, xlsx, two bank files, summary
    assert_eq!(files.len(), 6);

    let xlsx = std::fs::read(find(&files, "upi_results_", ".xlsx")).unwrap();
    assert!(xlsx.starts_with(b"PK"));

    let csv = read(&find(&files, "upi_results_", ".csv"));
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("mobile,name,bank,vpa,ifsc,upi_handle,status,timestamp")
    );
    assert_eq!(lines.count(), 4);
    assert!(csv.contains("9000000003,VIKRAM SINGH,STATE BANK OF INDIA,vikram@oksbi"));

    let json: serde_json::Value = serde_json::from_str(&read(&find(&files, "upi_results_", ".json"))).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 4);
    assert_eq!(json[3]["upi_handle"], "@ptyes");

    let sbi = read(&find(&files, "STATE_BANK_OF_INDIA_", ".txt"));
    assert!(sbi.starts_with("Bank: STATE BANK OF INDIA"));
    assert!(sbi.contains("Total Records: 2"));

    let summary = read(&find(&files, "summary_report_", ".txt"));
    assert!(summary.contains("Total Numbers Processed: 4"));
    assert!(summary.contains("Success Rate: 75.00%"));
    assert!(summary.contains("STATE BANK OF INDIA: 2 (66.7%)"));
    assert!(summary.contains(" 1. 9000000001 -> ASHA RAO (STATE BANK OF INDIA)"));
}

#[tokio::test]
async fn filtered_export_narrows_records_only() {
    let mut controller = scripted_controller();
    controller.load(
        LoadReport::parse("9000000001\n9000000002\n9000000004\n").numbers,
    );
    controller.start().unwrap();
    run_to_end(&mut controller).await;

    let filter = RecordFilter {
        search: None,
        bank: Some("YES BANK".to_string()),
    };
    let dir = tempfile::tempdir().unwrap();
    let files = export::export(controller.snapshot(), &filter, dir.path(), ExportFormat::Csv).unwrap();

    assert_eq!(files.len(), 1);
    let csv = read(&files[0]);
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("MEERA IYER"));
}

#[tokio::test]
async fn summary_of_an_untouched_batch() {
    let controller = scripted_controller();
    let summary = summary_report(controller.snapshot(), Local::now());

    assert!(summary.starts_with("UPI DETAILS EXTRACTION SUMMARY REPORT"));
    assert!(summary.contains("Total Numbers Processed: 0"));
    assert!(!summary.contains("Success Rate"));
    assert!(!summary.contains("BANK DISTRIBUTION"));
}

/// Answers `9000000002@axl` with a full record; every other address gets a 404.
async fn serve_lookup() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 2048];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let response = if request.contains("upi_id=9000000002@axl ") {
                    let body = r#"{"data":{"vpa_details":{"name":"RAVI KUMAR","vpa":"9000000002@axl","ifsc":"UTIB0000001"},"bank_details_raw":{"BANK":"AXIS BANK"}}}"#;
                    format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    )
                } else {
                    "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
                };
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    format!("http://{}/upi?upi_id={{}}", addr)
}

#[tokio::test]
async fn http_client_end_to_end() {
    let template = serve_lookup().await;
    let client = HttpLookupClient::new(&template, Duration::from_secs(2)).unwrap();
    let engine = ResolutionEngine::new(CandidateGenerator::default(), client);
    let mut controller = BatchController::new(engine, Duration::ZERO);

    controller.load(LoadReport::parse("9000000002\n9000000005\n").numbers);
    controller.start().unwrap();
    run_to_end(&mut controller).await;

    let results = controller.snapshot().results();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0].status, RecordStatus::Success);
    assert_eq!(results[0].name, "RAVI KUMAR");
    assert_eq!(results[0].bank, "AXIS BANK");
    assert_eq!(results[0].upi_handle.as_deref(), Some("@axl"));

    assert_eq!(results[1].status, RecordStatus::Failed);
    let error = results[1].error.as_deref().unwrap();
    assert!(error.contains("9000000005@ptyes"), "{error}");
    assert!(error.ends_with("http 404"), "{error}");
}
