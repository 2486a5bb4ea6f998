// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessors for the LED processor's hardware memory regions
//!
//! ACCU RAM and PATT RAM store one 16-bit cell per 32-bit word; only the
//! low half of each word is wired up. That layout is a hardware contract,
//! so the accessors here keep the 4-byte stride and 16-bit element width
//! rather than presenting the regions as packed `u16` arrays.

use core::mem::size_of;

use drv_cmicx_led_api::{
    ConfigError, PlCtrl, PlDbg, PortMapEntry, LED_HW_LINK_UP, LED_MAGIC,
};

/// Both regions are 0x1000 bytes: 1024 strided cells.
pub const ACCU_RAM_CELLS: usize = 1024;
pub const PATT_RAM_CELLS: usize = 1024;

/// First PATT RAM cell of the port map window; the entry for physical
/// port `p` (1-based) is cell `PORT_MAP_BASE + p - 1`. The window shares
/// the region with the pattern slots, which use cells `0..512`.
pub const PORT_MAP_BASE: usize = 512;

/// A region of 16-bit cells, each occupying the low half of a 32-bit
/// strided word. Reads and writes are volatile and leave the upper half
/// of each word untouched.
pub struct Mem16 {
    base: *mut u32,
    cells: usize,
}

impl Mem16 {
    /// # Safety
    ///
    /// `base` must point at a readable/writable region of at least
    /// `cells * 4` bytes for the lifetime of the returned value, and
    /// nothing else may hold a Rust reference into it.
    pub unsafe fn from_raw(base: *mut u32, cells: usize) -> Self {
        Mem16 { base, cells }
    }

    pub fn read(&self, index: usize) -> u16 {
        assert!(index < self.cells);
        // Low half-word of the strided cell (the target is little-endian).
        unsafe { (self.base.add(index) as *const u16).read_volatile() }
    }

    pub fn write(&mut self, index: usize, value: u16) {
        assert!(index < self.cells);
        unsafe { (self.base.add(index) as *mut u16).write_volatile(value) }
    }
}

/// Read-only view of ACCU RAM, the link-activity region. An external
/// linkscan process refreshes it between ticks.
pub struct AccuRam(Mem16);

impl AccuRam {
    /// # Safety
    ///
    /// See [`Mem16::from_raw`]; the region must span `ACCU_RAM_CELLS`
    /// cells.
    pub unsafe fn from_raw(base: *mut u32) -> Self {
        AccuRam(Mem16::from_raw(base, ACCU_RAM_CELLS))
    }

    /// Raw link-activity word for a physical port (1-based).
    pub fn link_activity(&self, port: u16) -> u16 {
        self.0.read(usize::from(port) - 1)
    }

    pub fn link_up(&self, port: u16) -> bool {
        self.link_activity(port) & LED_HW_LINK_UP != 0
    }
}

/// PATT RAM: pattern slots in cells `0..512`, consumed by the LED scan
/// hardware, plus the host-written port map aliased into cells `512..`.
pub struct PattRam(Mem16);

impl PattRam {
    /// # Safety
    ///
    /// See [`Mem16::from_raw`]; the region must span `PATT_RAM_CELLS`
    /// cells.
    pub unsafe fn from_raw(base: *mut u32) -> Self {
        PattRam(Mem16::from_raw(base, PATT_RAM_CELLS))
    }

    pub fn read_slot(&self, slot: u16) -> u16 {
        self.0.read(usize::from(slot))
    }

    pub fn write_slot(&mut self, slot: u16, code: u16) {
        self.0.write(usize::from(slot), code);
    }

    /// Port map entry for a physical port (1-based).
    pub fn port_map(&self, port: u16) -> PortMapEntry {
        PortMapEntry::new(self.0.read(PORT_MAP_BASE + usize::from(port) - 1))
    }
}

/// The debug/control block pair in the shared-memory window: the
/// firmware-owned [`PlDbg`] at the base, the host-owned [`PlCtrl`]
/// immediately after it.
pub struct SharedMem {
    dbg: *mut PlDbg,
    ctrl: *const PlCtrl,
}

impl SharedMem {
    /// # Safety
    ///
    /// `base` must be 16-byte aligned and point at a region of at least
    /// `size_of::<PlDbg>() + size_of::<PlCtrl>()` bytes shared with the
    /// host driver; nothing else on the firmware side may hold a Rust
    /// reference into it.
    pub unsafe fn from_raw(base: *mut u8) -> Self {
        SharedMem {
            dbg: base as *mut PlDbg,
            ctrl: base.add(size_of::<PlDbg>()) as *const PlCtrl,
        }
    }

    /// Overwrites the debug block with this tick's snapshot.
    pub fn write_debug(&self, ctrl_base: u32, activities: u32) {
        let dbg = PlDbg {
            magic: LED_MAGIC,
            length: size_of::<PlDbg>() as u16,
            ctrl_base,
            activities,
            rsvd: 0,
        };
        unsafe { self.dbg.write_volatile(dbg) }
    }

    /// Snapshots the host's control block and runs the validation gate.
    /// The host may rewrite the block at any time; a torn update is
    /// expected to fail the gate and push this tick into degraded mode.
    pub fn read_control(&self) -> Result<PlCtrl, ConfigError> {
        let ctrl = unsafe { self.ctrl.read_volatile() };
        ctrl.validate()?;
        Ok(ctrl)
    }
}
