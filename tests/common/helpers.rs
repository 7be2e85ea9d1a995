use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncRead, ReadBuf};

use resumable::{
    CancelHandle, EngineBuilder, HttpClientConfig, Interrupter, NetworkPerformer, NetworkResponse,
    ProgressBarOpts, ProgressDelivery, TransferEngine, TransferError, TransferRequest,
};

// Common test constants
pub const TEST_URL: &str = "http://files.test/data.bin";
pub const TEST_RETRY_INTERVAL: Duration = Duration::from_millis(1000);

/// Installs a test log subscriber, honoring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// Asserts that a file has the expected size
pub fn assert_file_size(path: &Path, expected_size: u64) {
    let metadata = fs::metadata(path).expect("Failed to get file metadata");
    assert_eq!(
        metadata.len(),
        expected_size,
        "File size mismatch at path: {:?}",
        path
    );
}

/// Asserts that a file holds exactly the expected bytes
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let actual = fs::read(path).expect("Failed to read file");
    assert_eq!(actual.len(), expected.len(), "File length mismatch at {:?}", path);
    assert!(actual == expected, "File content mismatch at {:?}", path);
}

/// HTTP configuration without send retries, so failures surface at once
pub fn create_test_http_config() -> HttpClientConfig {
    HttpClientConfig {
        retries: 0,
        proxy: None,
        headers: None,
        connect_timeout: Some(Duration::from_secs(5)),
    }
}

// === Scripted body ===

/// One step of a scripted response body.
#[derive(Debug, Clone)]
pub enum ReadStep {
    /// Deliver these bytes in one read.
    Chunk(Vec<u8>),
    /// Fail the read with this kind.
    Fail(io::ErrorKind),
    /// Never complete the read.
    Stall,
}

/// An `AsyncRead` returning one scripted step per read call.
pub struct ScriptedReader {
    steps: VecDeque<ReadStep>,
}

impl ScriptedReader {
    pub fn new(steps: Vec<ReadStep>) -> Self {
        Self {
            steps: steps.into(),
        }
    }
}

impl AsyncRead for ScriptedReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.steps.pop_front() {
            None => Poll::Ready(Ok(())),
            Some(ReadStep::Chunk(mut bytes)) => {
                let n = bytes.len().min(buf.remaining());
                buf.put_slice(&bytes[..n]);
                if n < bytes.len() {
                    let rest = bytes.split_off(n);
                    self.steps.push_front(ReadStep::Chunk(rest));
                }
                Poll::Ready(Ok(()))
            }
            Some(ReadStep::Fail(kind)) => Poll::Ready(Err(io::Error::new(kind, "scripted failure"))),
            Some(ReadStep::Stall) => {
                self.steps.push_front(ReadStep::Stall);
                Poll::Pending
            }
        }
    }
}

/// Split `content` into chunks of the given sizes.
pub fn chunks(content: &[u8], sizes: &[usize]) -> Vec<ReadStep> {
    let mut offset = 0;
    sizes
        .iter()
        .map(|size| {
            let step = ReadStep::Chunk(content[offset..offset + size].to_vec());
            offset += size;
            step
        })
        .collect()
}

// === Scripted network ===

/// A scripted response.
pub struct MockResponse {
    total_length: u64,
    content_length: u64,
    supports_range: bool,
    body: ScriptedReader,
    disconnects: Arc<AtomicUsize>,
}

impl NetworkResponse for MockResponse {
    fn total_length(&self) -> u64 {
        self.total_length
    }

    fn content_length(&self) -> u64 {
        self.content_length
    }

    fn supports_range(&self) -> bool {
        self.supports_range
    }

    fn content_stream(&mut self) -> &mut (dyn AsyncRead + Send + Unpin) {
        &mut self.body
    }

    fn disconnect(&mut self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

/// What the mock performer does on one call.
pub enum Script {
    Respond {
        total_length: u64,
        content_length: u64,
        supports_range: bool,
        steps: Vec<ReadStep>,
    },
    /// Respond, but cancel the request before returning.
    CancelThenRespond {
        total_length: u64,
        steps: Vec<ReadStep>,
    },
    Fail(fn() -> TransferError),
}

impl Script {
    /// A full response delivering `steps`.
    pub fn full(total_length: u64, steps: Vec<ReadStep>) -> Self {
        Script::Respond {
            total_length,
            content_length: total_length,
            supports_range: false,
            steps,
        }
    }

    /// A ranged response starting at `offset`.
    pub fn ranged(total_length: u64, offset: u64, steps: Vec<ReadStep>) -> Self {
        Script::Respond {
            total_length,
            content_length: total_length - offset,
            supports_range: true,
            steps,
        }
    }
}

/// A performer replaying scripts in order and recording each call's offset.
#[derive(Default)]
pub struct MockPerformer {
    scripts: Mutex<VecDeque<Script>>,
    offsets: Mutex<Vec<u64>>,
    disconnects: Arc<AtomicUsize>,
}

impl MockPerformer {
    pub fn new(scripts: Vec<Script>) -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
            ..Self::default()
        })
    }

    /// Start offsets of every call, in order.
    pub fn offsets(&self) -> Vec<u64> {
        self.offsets.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.offsets.lock().unwrap().len()
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    fn response(&self, total_length: u64, content_length: u64, supports_range: bool, steps: Vec<ReadStep>) -> MockResponse {
        MockResponse {
            total_length,
            content_length,
            supports_range,
            body: ScriptedReader::new(steps),
            disconnects: self.disconnects.clone(),
        }
    }
}

impl NetworkPerformer for MockPerformer {
    type Response = MockResponse;

    async fn perform(&self, request: &mut TransferRequest) -> Result<MockResponse, TransferError> {
        self.offsets.lock().unwrap().push(request.start_offset());
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .expect("performer called more often than scripted");
        match script {
            Script::Respond {
                total_length,
                content_length,
                supports_range,
                steps,
            } => Ok(self.response(total_length, content_length, supports_range, steps)),
            Script::CancelThenRespond {
                total_length,
                steps,
            } => {
                request.cancel();
                Ok(self.response(total_length, total_length, false, steps))
            }
            Script::Fail(make_error) => Err(make_error()),
        }
    }
}

// === Recording delivery ===

/// A progress event as seen by the delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Total(u64),
    Loading(u64),
}

/// Records every event with the request's `current_bytes()` at that time,
/// and can cancel or interrupt after a number of loading events.
#[derive(Default)]
pub struct RecordingDelivery {
    events: Mutex<Vec<Event>>,
    current_bytes: Mutex<Vec<u64>>,
    cancel_after: Option<(usize, CancelHandle)>,
    interrupt_after: Option<(usize, Interrupter)>,
}

impl RecordingDelivery {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn cancelling_after(loads: usize, handle: CancelHandle) -> Arc<Self> {
        Arc::new(Self {
            cancel_after: Some((loads, handle)),
            ..Self::default()
        })
    }

    pub fn interrupting_after(loads: usize, interrupter: Interrupter) -> Arc<Self> {
        Arc::new(Self {
            interrupt_after: Some((loads, interrupter)),
            ..Self::default()
        })
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn current_bytes(&self) -> Vec<u64> {
        self.current_bytes.lock().unwrap().clone()
    }

    fn loads(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, Event::Loading(_)))
            .count()
    }
}

impl ProgressDelivery for RecordingDelivery {
    fn post_total_length(&self, request: &TransferRequest, total_bytes: u64) {
        self.events.lock().unwrap().push(Event::Total(total_bytes));
        self.current_bytes.lock().unwrap().push(request.current_bytes());
    }

    fn post_loading(&self, request: &TransferRequest, downloaded_bytes: u64) {
        self.events.lock().unwrap().push(Event::Loading(downloaded_bytes));
        self.current_bytes.lock().unwrap().push(request.current_bytes());
        let loads = self.loads();
        if let Some((after, ref handle)) = self.cancel_after {
            if loads >= after {
                handle.cancel();
            }
        }
        if let Some((after, ref interrupter)) = self.interrupt_after {
            if loads >= after {
                interrupter.interrupt();
            }
        }
    }
}

// === Engine helpers ===

/// Builds an engine with the test retry interval
pub fn create_test_engine<P, D>(
    performer: P,
    delivery: D,
    request: TransferRequest,
) -> TransferEngine<P, D>
where
    P: NetworkPerformer,
    D: ProgressDelivery,
{
    EngineBuilder::new()
        .retry_interval(TEST_RETRY_INTERVAL)
        .build(performer, delivery, request)
}

// === Progress helpers ===

/// Creates default progress bar options
pub fn create_test_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::default()
}

/// Creates progress bar options with a custom template and characters
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(Some(template.to_string()), Some(chars.to_string()), true, false)
}

/// Asserts that progress bar options are enabled
pub fn assert_progress_opts_enabled(opts: &ProgressBarOpts) {
    assert!(opts.is_enabled(), "Progress bar options should be enabled");
}

/// Asserts that progress bar options are disabled
pub fn assert_progress_opts_disabled(opts: &ProgressBarOpts) {
    assert!(!opts.is_enabled(), "Progress bar options should be disabled");
}
