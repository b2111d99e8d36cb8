mod config;
mod display;
mod error;
mod pacing;
mod sample;
mod scene;
mod source;
mod tracker;

pub use attitude::{AttitudeSample, OrientationFrame, Vector3};
pub use config::{
    SourceConfig, SourceKind, TrackerConfig, DEFAULT_BAUD_RATE, DEFAULT_REPLAY_INTERVAL,
    DEFAULT_SERIAL_TIMEOUT,
};
pub use display::{AngleUnit, DisplayFormat};
pub use error::{MalformedSample, TrackerError, TrackerResult};
pub use pacing::{IntervalPacer, Pacer, SleepPacer};
pub use sample::{parse_line, ParsedLine, MAX_LINE_LEN};
pub use scene::{
    Glyph, IndicatorObject, IndicatorPanel, Panel, PoseHandles, PoseObject, PosePart, Readout,
    Renderer, Scene, TextLabel,
};
pub use source::{open_source, FileReplay, LivePort, SampleSource};
pub use tracker::{LineOutcome, LoopState, RunSummary, Tracker};
