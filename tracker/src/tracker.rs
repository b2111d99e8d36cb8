use attitude::{AttitudeSample, IndicatorReadout, OrientationFrame};

use crate::config::TrackerConfig;
use crate::error::{MalformedSample, TrackerResult};
use crate::pacing::{Pacer, SleepPacer};
use crate::sample::{parse_line, ParsedLine};
use crate::scene::{Renderer, Scene};
use crate::source::{open_source, SampleSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Result of feeding one raw line to the tracker
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Blank line, nothing changed
    Idle,
    /// The scene was moved to this frame
    Updated(OrientationFrame),
    /// The line was rejected and the previous sample kept
    Malformed(MalformedSample),
}

/// Counters for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub updates: usize,
    pub idle_ticks: usize,
    pub malformed: usize,
    pub paced: usize,
}

/// Reads attitude lines from a source and keeps a scene in sync with them.
///
/// A run opens the configured source, processes one line per iteration and
/// waits for the configured interval after each one. File sources stop the
/// run when they are exhausted; serial sources keep it going until the host
/// halts it.
pub struct Tracker<R: Renderer, P: Pacer = SleepPacer> {
    config: TrackerConfig,
    scene: Scene<R>,
    sample: AttitudeSample,
    state: LoopState,
    pacer: P,
}

impl<R: Renderer> Tracker<R> {
    pub fn new(config: TrackerConfig, renderer: &mut R) -> TrackerResult<Self> {
        Self::with_pacer(config, renderer, SleepPacer)
    }
}

impl<R: Renderer, P: Pacer> Tracker<R, P> {
    pub fn with_pacer(config: TrackerConfig, renderer: &mut R, pacer: P) -> TrackerResult<Self> {
        config.validate()?;
        let scene = Scene::build(renderer, config.indicator_radius);
        Ok(Self {
            config,
            scene,
            sample: AttitudeSample::ZERO,
            state: LoopState::Running,
            pacer,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The last sample that parsed successfully
    pub fn sample(&self) -> AttitudeSample {
        self.sample
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn scene(&self) -> &Scene<R> {
        &self.scene
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Stop the current run. Takes effect before the next [`step`](Self::step).
    pub fn halt(&mut self) {
        self.state = LoopState::Stopped;
    }

    /// Re-arm a halted or exhausted tracker so [`step`](Self::step) reads again.
    ///
    /// A new tracker is already running; every `run_*` call starts itself.
    pub fn start(&mut self) {
        self.state = LoopState::Running;
    }

    /// Parse one raw line and, if it holds a sample, push it to the scene.
    ///
    /// The scene is only touched when the whole line is valid.
    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        log::trace!("raw line {:?}", line);
        match parse_line(line) {
            Ok(ParsedLine::Idle) => {
                log::debug!("idle tick");
                LineOutcome::Idle
            }
            Ok(ParsedLine::Sample(sample)) => {
                self.sample = sample;
                LineOutcome::Updated(self.show(&sample))
            }
            Err(err) => {
                log::warn!("Invalid line: {}", err);
                LineOutcome::Malformed(err)
            }
        }
    }

    fn show(&mut self, sample: &AttitudeSample) -> OrientationFrame {
        let frame = sample.frame();
        let readout = IndicatorReadout::new(sample, self.config.indicator_radius);
        let labels = self.config.display.readouts(sample);
        log::debug!("axis {:?} up {:?}", frame.axis, frame.up);

        self.scene.show_pose(&frame);
        self.scene.show_indicators(&readout, &labels);
        frame
    }

    /// One iteration: read a line, process it, then pace.
    ///
    /// Returns the state after the iteration. An exhausted source stops the
    /// loop without pacing; a read error stops it and is returned.
    pub fn step<S: SampleSource + ?Sized>(
        &mut self,
        source: &mut S,
        summary: &mut RunSummary,
    ) -> TrackerResult<LoopState> {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }

        let line = match source.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                log::info!("{} exhausted after {} lines", source.name(), summary.lines);
                self.state = LoopState::Stopped;
                return Ok(self.state);
            }
            Err(err) => {
                self.state = LoopState::Stopped;
                return Err(err);
            }
        };

        summary.lines += 1;
        match self.process_line(&line) {
            LineOutcome::Idle => summary.idle_ticks += 1,
            LineOutcome::Updated(_) => summary.updates += 1,
            LineOutcome::Malformed(_) => summary.malformed += 1,
        }

        self.pacer.pace(self.config.source.interval());
        summary.paced += 1;

        Ok(self.state)
    }

    /// Open the configured source and run until it is exhausted.
    ///
    /// A serial source is never exhausted, so this only returns on error;
    /// use [`run_until`](Self::run_until) to bound a live run.
    pub fn run(&mut self) -> TrackerResult<RunSummary> {
        self.run_until(|_| false)
    }

    /// Open the configured source and run until it is exhausted or `halt`
    /// returns true. `halt` is checked before every iteration.
    ///
    /// Failing to open the source is reported before any line is processed.
    /// The source is closed when this returns.
    pub fn run_until(&mut self, halt: impl FnMut(&RunSummary) -> bool) -> TrackerResult<RunSummary> {
        let source = open_source(&self.config.source)?;
        self.run_with(source, halt)
    }

    /// Same as [`run_until`](Self::run_until) over a source the caller opened
    pub fn run_with<S: SampleSource>(
        &mut self,
        mut source: S,
        mut halt: impl FnMut(&RunSummary) -> bool,
    ) -> TrackerResult<RunSummary> {
        self.start();
        let mut summary = RunSummary::default();

        while self.state == LoopState::Running {
            if halt(&summary) {
                log::info!("{} halted after {} lines", source.name(), summary.lines);
                self.halt();
                break;
            }
            self.step(&mut source, &mut summary)?;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceConfig;
    use crate::display::{AngleUnit, DisplayFormat};
    use crate::error::TrackerError;
    use crate::scene::recording::{Event, RecordingRenderer};
    use crate::scene::{PosePart, Readout};
    use crate::source::{FileReplay, LivePort};
    use approx::assert_relative_eq;
    use std::cell::Cell;
    use std::io::{self, Cursor, Read, Write};
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Default)]
    struct CountingPacer {
        delays: Vec<Duration>,
    }

    impl Pacer for CountingPacer {
        fn pace(&mut self, interval: Duration) {
            self.delays.push(interval);
        }
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn tracker(
        config: TrackerConfig,
    ) -> (Tracker<RecordingRenderer, CountingPacer>, RecordingRenderer) {
        init_logger();
        let mut renderer = RecordingRenderer::default();
        let tracker = Tracker::with_pacer(config, &mut renderer, CountingPacer::default()).unwrap();
        renderer.clear();
        (tracker, renderer)
    }

    fn replay_config() -> TrackerConfig {
        TrackerConfig::new(SourceConfig::file("replay.txt"))
    }

    fn replay(text: &str) -> FileReplay<Cursor<Vec<u8>>> {
        FileReplay::from_reader("replay.txt", Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn test_valid_line_updates_sample_and_scene() {
        let (mut tracker, renderer) = tracker(replay_config());

        let outcome = tracker.process_line("1.0,2.0,3.0\n");
        let expected = AttitudeSample::from_degrees(1.0, 2.0, 3.0).unwrap();
        assert_eq!(tracker.sample(), expected);
        assert_eq!(outcome, LineOutcome::Updated(expected.frame()));

        let events = renderer.events();
        assert_eq!(events.len(), 3 + 5 + 3, "three pose parts, five glyphs, three labels");
        assert_eq!(
            events[0],
            Event::Pose(PosePart::Platform, expected.frame().axis, expected.frame().up)
        );
        assert!(events.contains(&Event::Label(Readout::Roll, "1.7453e-02".into())));
        assert!(events.contains(&Event::Label(Readout::Yaw, "5.2360e-02".into())));
    }

    #[test]
    fn test_blank_line_changes_nothing() {
        let (mut tracker, renderer) = tracker(replay_config());
        tracker.process_line("10,20,30");
        let before = tracker.sample();
        renderer.clear();

        assert_eq!(tracker.process_line("\n"), LineOutcome::Idle);
        assert_eq!(tracker.sample(), before);
        assert!(renderer.events().is_empty());
    }

    #[test]
    fn test_malformed_line_keeps_previous_sample() {
        let (mut tracker, renderer) = tracker(replay_config());
        tracker.process_line("10,20,30");
        let before = tracker.sample();
        renderer.clear();

        match tracker.process_line("1.0,bad,3.0") {
            LineOutcome::Malformed(err) => assert_eq!(err.line(), "1.0,bad,3.0"),
            other => panic!("expected a malformed sample, got {:?}", other),
        }
        assert_eq!(tracker.sample(), before);
        assert!(renderer.events().is_empty(), "no partial update may reach the scene");
    }

    #[test]
    fn test_degree_readouts() {
        let config = replay_config().with_display(DisplayFormat {
            precision: 2,
            unit: AngleUnit::Degrees,
        });
        let (mut tracker, renderer) = tracker(config);
        tracker.process_line("12.5,-3.2,90");

        let labels: Vec<Event> = renderer
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::Label(..)))
            .collect();
        assert_eq!(
            labels,
            vec![
                Event::Label(Readout::Roll, "1.25e+01".into()),
                Event::Label(Readout::Pitch, "-3.20e+00".into()),
                Event::Label(Readout::Yaw, "9.00e+01".into()),
            ]
        );
    }

    #[test]
    fn test_replay_counts_updates_and_delays() {
        let (mut tracker, renderer) = tracker(replay_config());
        // N = 4 data lines, M = 3 blank lines
        let text = "0,0,0\n\n10,0,0\n20,0,0\n\n   \n30,0,0\n";

        let summary = tracker.run_with(replay(text), |_| false).unwrap();

        assert_eq!(summary.updates, 4);
        assert_eq!(summary.idle_ticks, 3);
        assert_eq!(summary.paced, 7);
        assert_eq!(summary.malformed, 0);
        assert_eq!(tracker.pacer().delays, vec![Duration::from_millis(100); 7]);
        assert_eq!(tracker.state(), LoopState::Stopped);

        let platform_moves = renderer
            .events()
            .iter()
            .filter(|e| matches!(e, Event::Pose(PosePart::Platform, ..)))
            .count();
        assert_eq!(platform_moves, 4);
        assert_relative_eq!(tracker.sample().roll(), 30.0_f64.to_radians(), epsilon = 1e-15);
    }

    #[test]
    fn test_replay_skips_malformed_lines() {
        let (mut tracker, _renderer) = tracker(replay_config());
        let summary = tracker
            .run_with(replay("5,5,5\n5,5\nnope,1,2\n\n"), |_| false)
            .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                lines: 4,
                updates: 1,
                idle_ticks: 1,
                malformed: 2,
                paced: 4,
            }
        );
        assert_eq!(tracker.sample(), AttitudeSample::from_degrees(5.0, 5.0, 5.0).unwrap());
    }

    #[test]
    fn test_run_replays_file_from_config() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "1.0,2.0,3.0\n\n4.0,5.0,6.0\n")?;

        let config = TrackerConfig::new(
            SourceConfig::file(file.path()).with_interval(Duration::from_millis(5)),
        );
        let (mut tracker, _renderer) = tracker(config);
        let summary = tracker.run()?;

        assert_eq!(summary.updates, 2);
        assert_eq!(summary.paced, 3);
        assert_eq!(tracker.pacer().delays, vec![Duration::from_millis(5); 3]);
        Ok(())
    }

    #[test]
    fn test_missing_file_fails_before_processing() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrackerConfig::new(SourceConfig::file(dir.path().join("Serial0.txt")));
        let (mut tracker, renderer) = tracker(config);

        let err = tracker.run().unwrap_err();
        assert!(matches!(err, TrackerError::FileOpen { .. }));
        assert!(renderer.events().is_empty());
        assert!(tracker.pacer().delays.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut renderer = RecordingRenderer::default();
        let config = TrackerConfig::new(SourceConfig::serial("COM1").with_baud_rate(0));
        assert!(Tracker::with_pacer(config, &mut renderer, CountingPacer::default()).is_err());
        assert!(renderer.events().is_empty(), "no scene is built for a rejected config");
    }

    #[test]
    fn test_live_run_repeats_until_halted() {
        let config = TrackerConfig::new(SourceConfig::serial("scripted"));
        let (mut tracker, _renderer) = tracker(config);

        // Cursor runs dry after three lines; the port then only reports idle reads.
        let port = LivePort::from_reader("scripted", Cursor::new(b"1,1,1\n2,2,2\n3,3,3\n".to_vec()));
        let summary = tracker.run_with(port, |s| s.lines == 10).unwrap();

        assert_eq!(summary.lines, 10);
        assert_eq!(summary.updates, 3);
        assert_eq!(summary.idle_ticks, 7);
        assert_eq!(tracker.pacer().delays, vec![Duration::from_secs(1); 10]);
        assert_eq!(tracker.state(), LoopState::Stopped);
    }

    #[test]
    fn test_first_step_reads_one_line() {
        let (mut tracker, renderer) = tracker(replay_config());
        assert_eq!(tracker.state(), LoopState::Running);

        let mut source = replay("10,20,30\n40,50,60\n");
        let mut summary = RunSummary::default();
        assert_eq!(tracker.step(&mut source, &mut summary).unwrap(), LoopState::Running);

        assert_eq!(summary.lines, 1);
        assert_eq!(summary.updates, 1);
        assert_eq!(tracker.sample(), AttitudeSample::from_degrees(10.0, 20.0, 30.0).unwrap());
        let platform_moves = renderer
            .events()
            .iter()
            .filter(|e| matches!(e, Event::Pose(PosePart::Platform, ..)))
            .count();
        assert_eq!(platform_moves, 1);
        assert_eq!(tracker.pacer().delays.len(), 1);
    }

    #[test]
    fn test_halt_between_steps() {
        let (mut tracker, _renderer) = tracker(replay_config());
        let mut source = replay("1,1,1\n2,2,2\n");
        let mut summary = RunSummary::default();

        assert_eq!(tracker.step(&mut source, &mut summary).unwrap(), LoopState::Running);
        tracker.halt();
        assert_eq!(tracker.step(&mut source, &mut summary).unwrap(), LoopState::Stopped);
        assert_eq!(summary.lines, 1, "a halted tracker reads nothing more");

        tracker.start();
        assert_eq!(tracker.step(&mut source, &mut summary).unwrap(), LoopState::Running);
        assert_eq!(summary.lines, 2);
        assert_eq!(tracker.sample(), AttitudeSample::from_degrees(2.0, 2.0, 2.0).unwrap());
        assert_eq!(tracker.step(&mut source, &mut summary).unwrap(), LoopState::Stopped);
    }

    struct FailingReader {
        released: Rc<Cell<bool>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
        }
    }

    impl Drop for FailingReader {
        fn drop(&mut self) {
            self.released.set(true);
        }
    }

    #[test]
    fn test_source_released_when_run_fails() {
        let (mut tracker, _renderer) = tracker(TrackerConfig::new(SourceConfig::serial("scripted")));
        let released = Rc::new(Cell::new(false));
        let port = LivePort::from_reader(
            "scripted",
            FailingReader {
                released: released.clone(),
            },
        );

        let err = tracker.run_with(port, |_| false).unwrap_err();
        assert!(matches!(err, TrackerError::Read { .. }));
        assert!(released.get(), "the port must be dropped when the run ends");
        assert_eq!(tracker.state(), LoopState::Stopped);
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let (mut first, _) = tracker(replay_config());
        let (second, _) = tracker(replay_config());

        first.process_line("45,45,45");
        assert_ne!(first.sample(), AttitudeSample::ZERO);
        assert_eq!(second.sample(), AttitudeSample::ZERO);
    }
}
