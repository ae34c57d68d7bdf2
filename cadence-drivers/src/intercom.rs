//! Inter-board link
//!
//! Sends the extruder target to a remote extruder controller once per
//! 10ms epoch. Frames are small enough to fit the UART FIFO, so a send
//! never waits on the line.
//!
//! Frame layout:
//! ```text
//! +------+-----+-----+-----------+-----------+-----+
//! | 0x55 | SEQ | CMD | TARGET_LO | TARGET_HI | XOR |
//! +------+-----+-----+-----------+-----------+-----+
//! ```
//! XOR covers SEQ through TARGET_HI. TARGET is little-endian 0.1°C.

use cadence_core::traits::{CommsLink, HeaterChannel};
use embedded_io::Write;

use crate::heater::TargetBank;

/// Frame start marker
pub const START_BYTE: u8 = 0x55;

/// Frame length in bytes
pub const FRAME_LEN: usize = 6;

/// Link commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// Set the remote heater target
    SetTarget = 0x01,
}

/// Build one frame
pub fn encode(seq: u8, command: Command, target_x10: i16) -> [u8; FRAME_LEN] {
    let [lo, hi] = target_x10.to_le_bytes();
    let body = [seq, command as u8, lo, hi];
    let checksum = body.iter().fold(0, |acc, b| acc ^ b);
    [START_BYTE, body[0], body[1], body[2], body[3], checksum]
}

/// Outbound inter-board link
pub struct IntercomLink<'a, W> {
    tx: W,
    targets: &'a TargetBank,
    seq: u8,
    errors: u32,
}

impl<'a, W: Write> IntercomLink<'a, W> {
    /// Create a link reporting targets from `targets`
    pub fn new(tx: W, targets: &'a TargetBank) -> Self {
        Self {
            tx,
            targets,
            seq: 0,
            errors: 0,
        }
    }

    /// Sequence number of the next frame
    pub fn sequence(&self) -> u8 {
        self.seq
    }

    /// Frames that failed to send
    pub fn errors(&self) -> u32 {
        self.errors
    }
}

impl<W: Write> CommsLink for IntercomLink<'_, W> {
    fn start_send(&mut self) {
        let target = self.targets.target(HeaterChannel::Extruder);
        let frame = encode(self.seq, Command::SetTarget, target);
        if self.tx.write_all(&frame).is_err() {
            self.errors = self.errors.saturating_add(1);
        }
        self.seq = self.seq.wrapping_add(1);
    }
}
