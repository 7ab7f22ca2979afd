// reelpress-core/tests/common/mod.rs

// --- Mocking Infrastructure (shared by the integration tests) ---

#![allow(dead_code)]

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress};
use reelpress_core::error::{CoreError, CoreResult};
use reelpress_core::external::ffprobe_executor::VideoProperties;
use reelpress_core::external::{FfmpegProcess, FfmpegSpawner, FfprobeExecutor};
use std::cell::RefCell;
use std::collections::HashMap;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Mock implementation of FfmpegProcess.
pub struct MockFfmpegProcess {
    events: Vec<FfmpegEvent>,
    exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in std::mem::take(&mut self.events) {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// An expected ffmpeg call: matched when any argument contains `arg_pattern`.
struct Expectation {
    arg_pattern: String,
    result: CoreResult<MockFfmpegProcess>,
    /// Bytes written to the output path (the last argument) when spawned
    output: Option<Vec<u8>>,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<Expectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exits with status 0 after emitting `events`, writing `output` to the output path.
    pub fn add_success_expectation(&self, arg_pattern: &str, events: Vec<FfmpegEvent>, output: &[u8]) {
        self.push(arg_pattern, Ok(process(events, 0)), Some(output.to_vec()));
    }

    /// Exits with status 0 without writing any output.
    pub fn add_silent_success_expectation(&self, arg_pattern: &str) {
        self.push(arg_pattern, Ok(process(Vec::new(), 0)), None);
    }

    /// Exits with `exit_code`, optionally leaving a partial output behind.
    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
        partial_output: Option<&[u8]>,
    ) {
        self.push(
            arg_pattern,
            Ok(process(events, exit_code)),
            partial_output.map(<[u8]>::to_vec),
        );
    }

    /// Fails to spawn at all.
    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.push(arg_pattern, Err(error), None);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    fn push(&self, arg_pattern: &str, result: CoreResult<MockFfmpegProcess>, output: Option<Vec<u8>>) {
        self.expectations.borrow_mut().push(Expectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            output,
        });
    }
}

fn process(events: Vec<FfmpegEvent>, exit_code: i32) -> MockFfmpegProcess {
    MockFfmpegProcess {
        events,
        exit_status: ExitStatus::from_raw(exit_code << 8),
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd.get_args().map(|s| s.to_string_lossy().into_owned()).collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();
        let index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)))
            .unwrap_or_else(|| panic!("MockFfmpegSpawner: no expectation for args {args:?}"));
        let expectation = expectations.remove(index);

        if let (Ok(_), Some(bytes)) = (&expectation.result, &expectation.output) {
            let output_path = PathBuf::from(args.last().expect("command has an output path"));
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent).expect("create mock output dir");
            }
            std::fs::write(&output_path, bytes).expect("write mock output");
        }
        expectation.result
    }
}

/// Mock implementation of FfprobeExecutor. Each stored result is returned once.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    results: Rc<RefCell<HashMap<PathBuf, CoreResult<VideoProperties>>>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_video_properties(&self, input_path: &Path, result: CoreResult<VideoProperties>) {
        self.results.borrow_mut().insert(input_path.to_path_buf(), result);
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn get_video_properties(&self, input_path: &Path) -> CoreResult<VideoProperties> {
        self.results.borrow_mut().remove(input_path).unwrap_or_else(|| {
            Err(CoreError::VideoInfo(format!(
                "MockFfprobeExecutor: no expectation for {}",
                input_path.display()
            )))
        })
    }
}

// --- Helpers ---

pub fn create_file(dir: &Path, filename: &str, size: usize) -> PathBuf {
    let path = dir.join(filename);
    std::fs::write(&path, vec![0x42u8; size]).expect("write test file");
    path
}

pub fn props(width: u32, height: u32, duration_secs: f64) -> VideoProperties {
    VideoProperties {
        width,
        height,
        duration_secs,
    }
}

pub fn progress_at(time: &str) -> FfmpegEvent {
    FfmpegEvent::Progress(FfmpegProgress {
        frame: 100,
        fps: 30.0,
        q: 0.0,
        size_kb: 1024,
        time: time.to_string(),
        bitrate_kbps: 546.0,
        speed: 2.0,
        raw_log_message: String::new(),
    })
}

/// Returns the value following `key` in an argument list.
pub fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == key)
        .map(|w| w[1].as_str())
}
