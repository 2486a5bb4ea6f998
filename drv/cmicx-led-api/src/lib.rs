// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared-memory contract between the CMICx LED firmware and its host driver
//!
//! The CMICx LED microcontroller and the host-side driver communicate through
//! a handful of fixed-layout structures in the LED processor's memory window:
//!
//! - A host-owned **control block** ([`PlCtrl`]) describing the per-interface
//!   scan ranges and the on/off pattern palette. The firmware validates it on
//!   every tick and never writes it.
//! - A firmware-owned **debug block** ([`PlDbg`]) snapshotting the last
//!   invocation, for out-of-band inspection by the host.
//! - A per-physical-port **port map word** ([`PortMapEntry`]) assigning each
//!   port a pattern-RAM slot, a pattern class, and a blink flag.
//!
//! These are hardware/firmware wire formats: every bit position here is
//! load-bearing and must match what the host driver writes. The packed words
//! use explicit shift/mask accessors (via `bitfield!`) rather than C-style
//! bitfield structs, so the layout is the LSB-0 one the host assumes no
//! matter what a given compiler would have done with native bitfields.

#![cfg_attr(not(test), no_std)]

use bitfield::bitfield;
use num_derive::FromPrimitive;
use static_assertions::const_assert_eq;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

/// Magic value ("PL") marking a valid control or debug block.
pub const LED_MAGIC: u16 = 0x504c;

/// Number of LED scan interfaces the CMICx LED processor supports.
pub const LED_INTF_COUNT: usize = 5;

/// The caller's "activities" word, shifted right by this, is the tick
/// counter. Only the counter's low bit is meaningful (blink phase).
pub const LED_TICKS_SHIFT: u32 = 5;

/// Link-up flag in a port's ACCU RAM link-activity word.
pub const LED_HW_LINK_UP: u16 = 0x1;

/// Sentinel codes written to pattern-RAM slots 0 and 1 when the control
/// block fails validation, so a host-side inspector can tell "firmware ran
/// but refused the configuration" from "firmware never ran".
pub const SENTINEL_DEAD: u16 = 0xdead;
pub const SENTINEL_BEEF: u16 = 0xbeef;

/// Why the firmware rejected a control block.
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromPrimitive)]
pub enum ConfigError {
    BadMagic = 1,
    BadLength = 2,
}

/// Pattern codes used by the fixed locator-only policy, where the LED scan
/// hardware is programmed for two bits per port.
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromPrimitive)]
pub enum LedPattern {
    SolidOff = 0,
    Blink = 2,
    SolidOn = 3,
}

bitfield! {
    /// One port map word: physical port -> LED slot assignment.
    ///
    /// The host writes one of these per physical port into the window that
    /// aliases the tail of PATT RAM. `led` (bits 9..0) is the pattern-RAM
    /// slot plus one, with 0 meaning "no LED, skip this port"; `pid`
    /// (bits 11..10) selects a `PlCtrl::patt` palette entry; bit 15 is the
    /// blink flag, which the fixed locator-only policy reads as the
    /// locator request (hence the second accessor for the same bit).
    #[derive(Copy, Clone, Eq, PartialEq)]
    pub struct PortMapEntry(u16);
    pub led, set_led: 9, 0;
    pub pid, set_pid: 11, 10;
    pub blink, set_blink: 15;
    pub locator, set_locator: 15;
}

impl PortMapEntry {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

bitfield! {
    /// One packed per-interface scan configuration word from the control
    /// block. `head`/`tail` are the first and last pattern-RAM rows the
    /// scan interface shifts out, `bits` the pattern width per port.
    #[derive(Copy, Clone, Eq, PartialEq)]
    pub struct IntfConf(u32);
    pub tail, set_tail: 9, 0;
    pub head, set_head: 19, 10;
    // bits 25..20 reserved
    pub bits, set_bits: 30, 26;
    pub valid, set_valid: 31;
}

impl IntfConf {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// On/off pattern codes for one pattern class.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    FromBytes,
    IntoBytes,
    Immutable,
    KnownLayout,
)]
#[repr(C)]
pub struct PattEntry {
    pub led_on: u16,
    pub led_off: u16,
}

/// The host-owned control block.
///
/// Written by the host driver at init or on reconfiguration; the firmware
/// re-validates it on every tick and treats it as read-only. `length` is
/// checked with `>=` rather than `==` so a newer host writing a longer
/// block still passes.
#[derive(
    Copy, Clone, Debug, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
#[repr(C)]
pub struct PlCtrl {
    pub magic: u16,
    pub length: u16,
    /// Packed [`IntfConf`] words, one per scan interface.
    pub conf: [u32; LED_INTF_COUNT],
    /// Pattern palette, indexed by a port map entry's `pid`.
    pub patt: [PattEntry; LED_INTF_COUNT],
}

impl PlCtrl {
    /// A control block as the host driver would initialize it: magic and
    /// length filled in, everything else zero.
    pub fn new_host() -> Self {
        let mut ctrl = Self::new_zeroed();
        ctrl.magic = LED_MAGIC;
        ctrl.length = core::mem::size_of::<Self>() as u16;
        ctrl
    }

    /// The validation gate the firmware applies before trusting any field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.magic != LED_MAGIC {
            return Err(ConfigError::BadMagic);
        }
        if usize::from(self.length) < core::mem::size_of::<Self>() {
            return Err(ConfigError::BadLength);
        }
        Ok(())
    }

    pub fn intf_conf(&self, intf: usize) -> IntfConf {
        IntfConf(self.conf[intf])
    }

    pub fn set_intf_conf(&mut self, intf: usize, conf: IntfConf) {
        self.conf[intf] = conf.0;
    }
}

/// The firmware-owned debug block, overwritten on every tick before the
/// control block is even looked at, so the snapshot is valid in the
/// degraded mode too.
#[derive(
    Copy, Clone, Debug, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
#[repr(C, align(16))]
pub struct PlDbg {
    pub magic: u16,
    pub length: u16,
    /// Address of the caller-supplied hardware control descriptor.
    pub ctrl_base: u32,
    /// Raw activities word from the last invocation.
    pub activities: u32,
    pub rsvd: u32,
}

/// The interface scan descriptor the firmware fills in for the caller on
/// every tick. This is the caller-owned, in-RAM form; it is not part of the
/// packed shared-memory layout.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct IntfCtrl {
    pub start_row: u16,
    pub end_row: u16,
    pub pat_width: u8,
    pub valid: bool,
}

// The shared-memory layout is fixed; catch any drift at compile time.
const_assert_eq!(core::mem::size_of::<PlDbg>(), 16);
const_assert_eq!(core::mem::size_of::<PlCtrl>(), 44);
const_assert_eq!(core::mem::align_of::<PlDbg>(), 16);
