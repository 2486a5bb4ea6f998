// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pattern sequencer for the CMICx LED microcontroller
//!
//! The LED processor embedded in the switch ASIC calls one handler per scan
//! tick. The handler reads per-port link-activity words out of ACCU RAM,
//! decides a pattern code for every front-panel LED, and writes those codes
//! into PATT RAM, where the LED scan hardware picks them up. Everything is
//! run-to-completion: no blocking, no allocation, no error channel back to
//! the caller.
//!
//! Memory window of the LED processor, for reference:
//!
//! ```text
//! 0x0000 - 0x37ff  linkscan: text + data
//! 0x3800 - 0x3ffb  custom handler image (2044 bytes); the debug and
//!                  control blocks live at the tail of this window
//! 0x4000 - 0x7fff  linkscan: bss + stack
//! 0x9000 - 0x9fff  ACCU RAM (16-bit cells on a 32-bit stride)
//! 0xa000 - 0xafff  PATT RAM (same layout; cells 512.. hold the port map)
//! ```
//!
//! Two policies are provided:
//!
//! - [`locator`]: fixed three-state policy for 128 ports and a single scan
//!   interface. No host configuration, no failure modes.
//! - [`mapped`]: host-configured policy for 512 ports. The host supplies a
//!   port -> LED mapping and a pattern palette through the shared-memory
//!   control block; a block that fails validation degrades the tick to a
//!   pair of sentinel writes.
//!
//! An image links exactly one of the two and names it as the tick entry
//! point. They share the region accessors in [`mem`] and the wire formats
//! in `drv-cmicx-led-api`.

#![cfg_attr(not(test), no_std)]

pub mod locator;
pub mod mapped;
pub mod mem;

#[cfg(test)]
mod sim;

use drv_cmicx_led_api::IntfCtrl;
use mem::{AccuRam, PattRam};

/// Caller-owned descriptor handed to the handler on every tick.
///
/// The LED processor runtime owns this; the handler reads link state
/// through `accu_ram`, writes pattern codes through `patt_ram`, and must
/// fill in `intf_ctrl` before returning. Holding the regions here, rather
/// than in statics, keeps the handler runnable against simulated memory.
pub struct LedHandlerCtrl<'a> {
    pub accu_ram: AccuRam,
    pub patt_ram: PattRam,
    /// Interface scan descriptors to populate, one per scan interface the
    /// caller drives (1 for the locator policy, up to
    /// [`drv_cmicx_led_api::LED_INTF_COUNT`] for the mapped policy).
    pub intf_ctrl: &'a mut [IntfCtrl],
}
