//! Status display trait

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction failed or was not acknowledged
    Bus,
    /// Value does not fit the field
    Overflow,
}

/// Fields of the on-device status display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayField {
    /// X axis position (mm)
    AxisX,
    /// Y axis position (mm)
    AxisY,
    /// Z axis position (mm)
    AxisZ,
    /// Extruder temperature
    Extruder,
    /// Bed temperature
    Bed,
}

impl DisplayField {
    /// Short label drawn in front of the value
    pub const fn label(self) -> &'static str {
        match self {
            DisplayField::AxisX => "X",
            DisplayField::AxisY => "Y",
            DisplayField::AxisZ => "Z",
            DisplayField::Extruder => "Ext:",
            DisplayField::Bed => "Bed:",
        }
    }
}

/// On-device status display
///
/// Rendering is best-effort: the dispatcher counts failures and moves on.
pub trait StatusDisplay {
    /// Whether a real display is fitted
    const ENABLED: bool = true;

    /// Draw `value` into `field`, replacing what was there
    fn render(&mut self, field: DisplayField, value: &str) -> Result<(), DisplayError>;
}
