//! Interface to the rendering front-end.
//!
//! The tracker never draws anything itself. A [`Renderer`] creates the scene
//! objects once, and the tracker then only moves them.

use attitude::{compass_rose, IndicatorReadout, OrientationFrame, Vector3, REFERENCE_AXES};

/// A 3D object posed by a forward axis and an up vector
pub trait PoseObject {
    fn set(&mut self, axis: &Vector3<f64>, up: &Vector3<f64>);
}

/// A 2D glyph pointed along `axis` from its centre
pub trait IndicatorObject {
    fn set(&mut self, axis: &Vector3<f64>);
}

/// A text readout
pub trait TextLabel {
    fn set(&mut self, text: &str);
}

/// Parts of the pose model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosePart {
    Platform,
    Line,
    Arrow,
}

/// Glyphs of the indicator panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Roll,
    RollOpposite,
    Pitch,
    PitchOpposite,
    Compass,
}

/// Numeric readouts of the indicator panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readout {
    Roll,
    Pitch,
    Yaw,
}

/// The two canvases a renderer provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Pose,
    Indicators,
}

/// Factory for scene objects
pub trait Renderer {
    type Pose: PoseObject;
    type Indicator: IndicatorObject;
    type Label: TextLabel;

    fn create_pose(&mut self, part: PosePart) -> Self::Pose;

    fn create_indicator(&mut self, glyph: Glyph) -> Self::Indicator;

    fn create_label(&mut self, readout: Readout) -> Self::Label;

    /// Static text that never moves (reference axes, compass directions)
    fn create_marker(&mut self, _panel: Panel, _text: &str, _position: Vector3<f64>) {}
}

pub struct PoseHandles<P> {
    pub platform: P,
    pub line: P,
    pub arrow: P,
}

pub struct IndicatorPanel<I, L> {
    pub roll: I,
    pub roll_opposite: I,
    pub pitch: I,
    pub pitch_opposite: I,
    pub compass: I,
    pub roll_label: L,
    pub pitch_label: L,
    pub yaw_label: L,
}

/// Every object the tracker moves
pub struct Scene<R: Renderer> {
    pub pose: PoseHandles<R::Pose>,
    pub indicators: IndicatorPanel<R::Indicator, R::Label>,
}

impl<R: Renderer> Scene<R> {
    /// Create the scene objects, plus the static reference axis and compass
    /// rose markers for a glyph radius of `indicator_radius`
    pub fn build(renderer: &mut R, indicator_radius: f64) -> Self {
        for (text, [x, y, z]) in REFERENCE_AXES {
            renderer.create_marker(Panel::Pose, text, Vector3::new(x, y, z));
        }
        for marker in compass_rose(indicator_radius) {
            renderer.create_marker(Panel::Indicators, marker.text, marker.position);
        }

        Self {
            pose: PoseHandles {
                platform: renderer.create_pose(PosePart::Platform),
                line: renderer.create_pose(PosePart::Line),
                arrow: renderer.create_pose(PosePart::Arrow),
            },
            indicators: IndicatorPanel {
                roll: renderer.create_indicator(Glyph::Roll),
                roll_opposite: renderer.create_indicator(Glyph::RollOpposite),
                pitch: renderer.create_indicator(Glyph::Pitch),
                pitch_opposite: renderer.create_indicator(Glyph::PitchOpposite),
                compass: renderer.create_indicator(Glyph::Compass),
                roll_label: renderer.create_label(Readout::Roll),
                pitch_label: renderer.create_label(Readout::Pitch),
                yaw_label: renderer.create_label(Readout::Yaw),
            },
        }
    }

    pub fn show_pose(&mut self, frame: &OrientationFrame) {
        let pose = &mut self.pose;
        for part in [&mut pose.platform, &mut pose.line, &mut pose.arrow] {
            part.set(&frame.axis, &frame.up);
        }
    }

    /// Move the glyphs and rewrite the labels (roll, pitch, yaw order)
    pub fn show_indicators(&mut self, readout: &IndicatorReadout, labels: &[String; 3]) {
        let panel = &mut self.indicators;
        panel.roll.set(&readout.roll.0);
        panel.roll_opposite.set(&readout.roll.1);
        panel.pitch.set(&readout.pitch.0);
        panel.pitch_opposite.set(&readout.pitch.1);
        panel.compass.set(&readout.compass);

        let [roll, pitch, yaw] = labels;
        panel.roll_label.set(roll);
        panel.pitch_label.set(pitch);
        panel.yaw_label.set(yaw);
    }
}
