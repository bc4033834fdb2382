//! Status page rendering

use core::fmt::{self, Display, Write};

use super::template::{fill, Template};
use crate::mission::MissionState;
use crate::profile::{PressureReading, Profile};

/// Note shown for a profile that held station
pub const NOTE_HELD: &str = "held station";
/// Note shown for a profile that did not reach the threshold depth
pub const NOTE_NOT_HELD: &str = "no station hold";

/// Rendering errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Output buffer is full
    Overflow,
}

impl From<fmt::Error> for RenderError {
    fn from(_: fmt::Error) -> Self {
        RenderError::Overflow
    }
}

/// Milliseconds shown as seconds with three decimals
#[derive(Debug, Clone, Copy)]
pub struct Seconds(pub u32);

impl Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.0 / 1000, self.0 % 1000)
    }
}

/// Value shown with two decimals
#[derive(Debug, Clone, Copy)]
pub struct Centi(pub f32);

impl Display for Centi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Render the whole status page
pub fn render<W: Write>(
    template: &Template<'_>,
    state: &MissionState,
    out: &mut W,
) -> Result<(), RenderError> {
    match state.boot_reading() {
        Some(reading) => write_reading(out, template.head(), reading)?,
        None => fill(out, template.head(), &[&"-", &"-", &"-"])?,
    }

    for profile in state.all_profiles() {
        render_profile(template, profile, out)?;
    }

    fill(out, template.foot(), &[&state.dive_state().label()])?;
    Ok(())
}

/// Render one profile: header, all readings in phase order, footer
pub fn render_profile<W: Write>(
    template: &Template<'_>,
    profile: &Profile,
    out: &mut W,
) -> Result<(), RenderError> {
    let note = if profile.bobbed() {
        NOTE_HELD
    } else {
        NOTE_NOT_HELD
    };
    fill(out, template.profile_start(), &[&profile.number(), &note])?;
    for reading in profile.readings() {
        write_reading(out, template.row(), reading)?;
    }
    out.write_str(template.profile_end())?;
    Ok(())
}

fn write_reading<W: Write>(out: &mut W, pattern: &str, reading: &PressureReading) -> fmt::Result {
    fill(
        out,
        pattern,
        &[
            &Seconds(reading.elapsed_ms),
            &Centi(reading.pressure_hpa),
            &Centi(reading.depth_m),
        ],
    )
}
